use std::io::{self, Read, Write};

/// MSB-first bit accumulator over any byte sink. Whole bytes are emitted as
/// soon as 8 bits have accumulated; [`finish`](BitWriter::finish) flushes a
/// final partial byte with the unused low-order bits left as zero padding.
///
/// The padding is not self-describing. Decode correctness rests entirely on
/// the container's symbol-count field, never on an end-of-stream marker.
pub struct BitWriter<W: Write> {
    out: W,
    acc: u8,
    filled: u8,
}

impl<W: Write> BitWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, acc: 0, filled: 0 }
    }

    pub fn write_bit(&mut self, bit: u8) -> io::Result<()> {
        self.acc = (self.acc << 1) | (bit & 1);
        self.filled += 1;
        if self.filled == 8 {
            self.out.write_all(&[self.acc])?;
            self.acc = 0;
            self.filled = 0;
        }
        Ok(())
    }

    pub fn write_code(&mut self, code: &[u8]) -> io::Result<()> {
        for &bit in code {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Flushes a zero-padded partial byte if 1-7 bits are pending, then hands
    /// the sink back. Writes nothing extra when the stream ended on a byte
    /// boundary.
    pub fn finish(mut self) -> io::Result<W> {
        if self.filled > 0 {
            self.out.write_all(&[self.acc << (8 - self.filled)])?;
        }
        Ok(self.out)
    }
}

/// MSB-first bit fetch over any byte source, pulling one byte per 8 bits.
/// Running out of bytes surfaces as `UnexpectedEof`, which the decoder maps
/// onto its truncated-stream error.
pub struct BitReader<R: Read> {
    input: R,
    acc: u8,
    remaining: u8,
}

impl<R: Read> BitReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            acc: 0,
            remaining: 0,
        }
    }

    pub fn read_bit(&mut self) -> io::Result<u8> {
        if self.remaining == 0 {
            let mut byte = [0u8; 1];
            self.input.read_exact(&mut byte)?;
            self.acc = byte[0];
            self.remaining = 8;
        }
        self.remaining -= 1;
        Ok((self.acc >> self.remaining) & 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_pack_msb_first() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [1, 0, 1, 1, 0, 0, 1, 0] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), vec![0b1011_0010]);
    }

    #[test]
    fn partial_byte_is_zero_padded() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_code(&[1, 1, 1]).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0b1110_0000]);
    }

    #[test]
    fn no_pending_bits_means_no_padding_byte() {
        let writer = BitWriter::new(Vec::new());
        assert!(writer.finish().unwrap().is_empty());
    }

    #[test]
    fn reader_mirrors_writer() {
        let bits = [1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1];
        let mut writer = BitWriter::new(Vec::new());
        writer.write_code(&bits).unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = BitReader::new(&bytes[..]);
        for &expected in &bits {
            assert_eq!(reader.read_bit().unwrap(), expected);
        }
        // The rest of the final byte is padding, still readable as zeros.
        for _ in bits.len()..16 {
            assert_eq!(reader.read_bit().unwrap(), 0);
        }
    }

    #[test]
    fn exhausted_reader_reports_eof() {
        let mut reader = BitReader::new(&[0xffu8][..]);
        for _ in 0..8 {
            reader.read_bit().unwrap();
        }
        let err = reader.read_bit().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
