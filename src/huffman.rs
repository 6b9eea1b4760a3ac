//! Static Huffman codec and its self-describing container format.
//!
//! Container layout (big-endian multi-byte integers):
//!
//! ```text
//! [1 byte]  extension length L
//! [L bytes] extension string (no terminator)
//! [tree]    pre-order serialized Huffman tree
//! [6 bytes] total original symbol count
//! [...]     packed bit payload, MSB-first per byte
//! ```
//!
//! The encoder makes two sequential passes over the input: one to collect
//! frequencies, then a rewind and a second pass emitting packed bits against
//! the fixed code table. The decoder reads the header once, then walks the
//! tree bit by bit for exactly the declared number of symbols. Every
//! invocation owns its tree and code table; nothing is shared across calls.

use std::fmt::Display;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use thiserror::Error;

use crate::compressor::{Compressor, Result as CompressorResult};

pub mod bitio;
pub mod code;
pub mod heap;
pub mod tree;

use bitio::{BitReader, BitWriter};
use code::CodeTable;
use tree::{HuffNode, build_tree, count_frequencies, read_tree, write_tree};

/// Width of the container's original-symbol-count field.
const COUNT_FIELD_BYTES: usize = 6;

/// Largest symbol count the 6-byte count field can carry.
pub const MAX_SYMBOL_COUNT: u64 = (1 << (COUNT_FIELD_BYTES * 8)) - 1;

#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Compression was requested on a zero-byte input; there are no symbols to
    /// build a tree from.
    #[error("cannot compress an empty input")]
    EmptyInput,

    /// The container header could not be parsed: a bad tree marker, a stream
    /// that ends mid-field, or a tree deeper than the alphabet allows.
    #[error("corrupt container header: {0}")]
    CorruptHeader(String),

    /// The packed bit payload ended before the declared symbol count was
    /// satisfied.
    #[error("compressed payload ended after {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },

    /// More distinct symbols than the byte alphabet permits. Cannot occur for
    /// byte input, but it is a guarded invariant rather than a silent overflow.
    #[error("frequency table reports {0} distinct symbols, more than the byte alphabet holds")]
    UnsupportedAlphabet(usize),

    /// The extension does not fit the container's 1-byte length field.
    #[error("extension is {0} bytes long, the container stores at most 255")]
    ExtensionTooLong(usize),

    /// The input holds more symbols than the 6-byte count field can carry.
    #[error("input holds {0} symbols, the container counts at most 2^48 - 1")]
    InputTooLarge(u64),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Everything the container stores ahead of the packed payload. The extension
/// goes back to the naming collaborator before any payload byte is consumed.
#[derive(Debug)]
pub struct Header {
    pub extension: String,
    pub tree: HuffNode,
    pub symbol_count: u64,
}

impl Header {
    pub fn read<R: Read>(input: &mut R) -> Result<Self, HuffmanError> {
        let ext_len = read_uint(1, input)? as usize;
        let mut ext = vec![0u8; ext_len];
        input.read_exact(&mut ext).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                HuffmanError::CorruptHeader("container ended inside the extension field".into())
            } else {
                HuffmanError::Io(e)
            }
        })?;
        let extension = String::from_utf8(ext)
            .map_err(|_| HuffmanError::CorruptHeader("extension is not valid UTF-8".into()))?;
        let tree = read_tree(input)?;
        let symbol_count = read_uint(COUNT_FIELD_BYTES, input)?;
        Ok(Header {
            extension,
            tree,
            symbol_count,
        })
    }
}

/// Compresses `input` into a container on `output`, recording `extension` in
/// the header for the decompressor's naming collaborator. Returns the original
/// symbol count.
pub fn encode<R: Read + Seek, W: Write>(
    input: &mut R,
    extension: &str,
    output: &mut W,
) -> Result<u64, HuffmanError> {
    if extension.len() > u8::MAX as usize {
        return Err(HuffmanError::ExtensionTooLong(extension.len()));
    }

    let counts = count_frequencies(input)?;
    let symbol_count: u64 = counts.iter().sum();
    if symbol_count == 0 {
        return Err(HuffmanError::EmptyInput);
    }
    if symbol_count > MAX_SYMBOL_COUNT {
        return Err(HuffmanError::InputTooLarge(symbol_count));
    }

    let root = build_tree(&counts)?;
    let table = CodeTable::from_tree(&root);
    tracing::debug!(
        target: "huffman",
        symbol_count,
        distinct_symbols = table.distinct_symbols(),
        "code table built"
    );

    output.write_all(&[extension.len() as u8])?;
    output.write_all(extension.as_bytes())?;
    write_tree(&root, output)?;
    write_uint(symbol_count, COUNT_FIELD_BYTES, output)?;

    input.seek(SeekFrom::Start(0))?;
    let mut bits = BitWriter::new(&mut *output);
    let mut buf = [0u8; 8192];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            let code = table.code(byte).ok_or_else(|| {
                HuffmanError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("byte 0x{byte:02x} appeared only in the second pass; input changed while compressing"),
                ))
            })?;
            bits.write_code(code)?;
        }
    }
    bits.finish()?;

    Ok(symbol_count)
}

/// Decompresses the payload of an already-parsed container. Emits exactly
/// `header.symbol_count` symbols and never reads past them; zero padding in
/// the final payload byte is ignored.
pub fn decode_payload<R: Read, W: Write>(
    header: &Header,
    input: &mut R,
    output: &mut W,
) -> Result<(), HuffmanError> {
    // Degenerate single-symbol tree: the root is itself a leaf and every
    // occurrence costs zero payload bits, so no payload byte is read at all.
    if let HuffNode::Leaf { symbol, .. } = &header.tree {
        let chunk = [*symbol; 8192];
        let mut remaining = header.symbol_count;
        while remaining > 0 {
            let n = remaining.min(chunk.len() as u64) as usize;
            output.write_all(&chunk[..n])?;
            remaining -= n as u64;
        }
        return Ok(());
    }

    let mut bits = BitReader::new(&mut *input);
    for decoded in 0..header.symbol_count {
        let mut node = &header.tree;
        while let HuffNode::Internal { left, right, .. } = node {
            let bit = bits.read_bit().map_err(|e| {
                if e.kind() == io::ErrorKind::UnexpectedEof {
                    HuffmanError::TruncatedStream {
                        decoded,
                        expected: header.symbol_count,
                    }
                } else {
                    HuffmanError::Io(e)
                }
            })?;
            node = if bit == 0 { left } else { right };
        }
        if let HuffNode::Leaf { symbol, .. } = node {
            output.write_all(&[*symbol])?;
        }
    }
    Ok(())
}

/// Parses the header and decompresses the payload in one go, handing the
/// parsed header back so callers can inspect the recovered extension.
pub fn decode<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<Header, HuffmanError> {
    let header = Header::read(input)?;
    decode_payload(&header, input, output)?;
    Ok(header)
}

/// Writes the low `bytes` bytes of `value`, most significant first.
fn write_uint<W: Write>(value: u64, bytes: usize, out: &mut W) -> io::Result<()> {
    for shift in (0..bytes).rev() {
        out.write_all(&[(value >> (8 * shift)) as u8])?;
    }
    Ok(())
}

fn read_uint<R: Read>(bytes: usize, input: &mut R) -> Result<u64, HuffmanError> {
    let mut value = 0u64;
    let mut byte = [0u8; 1];
    for _ in 0..bytes {
        input.read_exact(&mut byte).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                HuffmanError::CorruptHeader("container ended inside an integer field".into())
            } else {
                HuffmanError::Io(e)
            }
        })?;
        value = (value << 8) | u64::from(byte[0]);
    }
    Ok(value)
}

/// Byte-level surface over the stream codec, used by the `test` subcommand and
/// the round-trip harness. `compress_bytes` produces the same container as
/// [`encode`] with an empty extension.
#[derive(Clone, Copy, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> CompressorResult<Vec<u8>> {
        let mut out = Vec::new();
        encode(&mut Cursor::new(data), "", &mut out)?;
        Ok(out)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> CompressorResult<Vec<u8>> {
        let mut out = Vec::new();
        decode(&mut Cursor::new(data), &mut out)?;
        Ok(out)
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Huffman Coding")
    }
}
