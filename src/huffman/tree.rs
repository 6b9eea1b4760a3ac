use std::io::{self, Read, Write};

use crate::huffman::HuffmanError;
use crate::huffman::heap::MinHeap;

pub const ALPHABET_SIZE: usize = 256;

/// Marker bytes of the pre-order tree wire grammar.
const LEAF_MARKER: u8 = b'1';
const INTERNAL_MARKER: u8 = b'0';

/// One node of a Huffman tree. Internal nodes always own exactly two children
/// and carry the sum of their weights; leaves carry the observed frequency of
/// their symbol. A tree built from a single distinct symbol degenerates to a
/// bare leaf acting as the root.
#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Combines the two lowest-weight nodes into an internal node. `a` is the
    /// node that was popped first and becomes the left child.
    pub fn merge(a: Self, b: Self) -> Self {
        HuffNode::Internal {
            weight: a.weight() + b.weight(),
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

}

/// Single forward pass over the input, counting every byte value. Counts are
/// u64 so arbitrarily large files cannot overflow a symbol's frequency.
pub fn count_frequencies<R: Read>(input: &mut R) -> io::Result<[u64; ALPHABET_SIZE]> {
    let mut counts = [0u64; ALPHABET_SIZE];
    let mut buf = [0u8; 8192];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            counts[byte as usize] += 1;
        }
    }
    Ok(counts)
}

/// Builds the Huffman tree: one leaf per distinct symbol seeded in ascending
/// symbol order, then the two lowest-weight nodes are merged until a single
/// root remains.
pub fn build_tree(counts: &[u64; ALPHABET_SIZE]) -> Result<HuffNode, HuffmanError> {
    let distinct = counts.iter().filter(|&&c| c > 0).count();
    if distinct == 0 {
        return Err(HuffmanError::EmptyInput);
    }
    if distinct > ALPHABET_SIZE {
        return Err(HuffmanError::UnsupportedAlphabet(distinct));
    }

    let mut heap = MinHeap::with_capacity(distinct);
    for (symbol, &weight) in counts.iter().enumerate() {
        if weight > 0 {
            heap.push(HuffNode::leaf(symbol as u8, weight));
        }
    }

    while heap.len() > 1 {
        if let (Some(a), Some(b)) = (heap.pop(), heap.pop()) {
            heap.push(HuffNode::merge(a, b));
        }
    }

    heap.pop().ok_or(HuffmanError::EmptyInput)
}

/// Serializes a tree pre-order: `b'1'` + symbol byte per leaf, `b'0'` followed
/// by both subtrees per internal node. The grammar self-terminates, so no
/// length field is needed.
pub fn write_tree<W: Write>(node: &HuffNode, out: &mut W) -> io::Result<()> {
    match node {
        HuffNode::Leaf { symbol, .. } => out.write_all(&[LEAF_MARKER, *symbol]),
        HuffNode::Internal { left, right, .. } => {
            out.write_all(&[INTERNAL_MARKER])?;
            write_tree(left, out)?;
            write_tree(right, out)
        }
    }
}

/// Mirror of [`write_tree`]. Rebuilt leaves carry zero weight; the wire format
/// stores only the shape and the symbols, which is all decoding needs.
pub fn read_tree<R: Read>(input: &mut R) -> Result<HuffNode, HuffmanError> {
    read_tree_at(input, 0)
}

fn read_tree_at<R: Read>(input: &mut R, depth: usize) -> Result<HuffNode, HuffmanError> {
    // A valid byte-alphabet tree is at most 255 levels deep. Anything past
    // that is a corrupt stream of internal markers, not a tree.
    if depth > ALPHABET_SIZE {
        return Err(HuffmanError::CorruptHeader(
            "serialized tree exceeds the alphabet depth bound".into(),
        ));
    }
    match read_marker_byte(input)? {
        LEAF_MARKER => {
            let symbol = read_marker_byte(input)?;
            Ok(HuffNode::leaf(symbol, 0))
        }
        INTERNAL_MARKER => {
            let left = read_tree_at(input, depth + 1)?;
            let right = read_tree_at(input, depth + 1)?;
            Ok(HuffNode::Internal {
                weight: left.weight() + right.weight(),
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        other => Err(HuffmanError::CorruptHeader(format!(
            "unknown tree marker byte 0x{other:02x}"
        ))),
    }
}

fn read_marker_byte<R: Read>(input: &mut R) -> Result<u8, HuffmanError> {
    let mut byte = [0u8; 1];
    input.read_exact(&mut byte).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            HuffmanError::CorruptHeader("container ended in the middle of the serialized tree".into())
        } else {
            HuffmanError::Io(e)
        }
    })?;
    Ok(byte[0])
}
