//! BitReader: reads back a bitstream written by the BitPacker.
//!
//! The reader works on an in-memory slice and knows how many padding bits sit at the end of the last
//! byte, so bit() returns None exactly when the real bits run out.
//!

use crate::error::{HuffError, Result};

const BIT_MASK: u8 = 0x80;

#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    bits_left: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over `buffer` whose last byte carries `padding` zero bits after the data.
    pub fn new(buffer: &'a [u8], padding: u8) -> Result<Self> {
        if padding > 7 {
            return Err(HuffError::malformed(format!(
                "padding count {} is larger than 7",
                padding
            )));
        }
        if buffer.is_empty() && padding > 0 {
            return Err(HuffError::malformed(format!(
                "padding count {} given for an empty body",
                padding
            )));
        }
        Ok(Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            bits_left: buffer.len() * 8 - padding as usize,
        })
    }

    /// Return the next bit (true for 1), or None once every real bit has been read.
    #[inline(always)]
    pub fn bit(&mut self) -> Option<bool> {
        if self.bits_left == 0 {
            return None;
        }
        let bit = self.buffer[self.cursor] & (BIT_MASK >> self.bit_index) != 0;
        self.bits_left -= 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Number of real bits not yet read.
    pub fn bits_left(&self) -> usize {
        self.bits_left
    }

    /// Number of bits read so far.
    pub fn bits_read(&self) -> usize {
        self.cursor * 8 + self.bit_index
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bits_left, Some(self.bits_left))
    }
}

/// Unpacks bytes written by pack(), dropping the `padding` bits at the end.
pub fn unpack(bytes: &[u8], padding: u8) -> Result<Vec<bool>> {
    Ok(BitReader::new(bytes, padding)?.collect())
}
