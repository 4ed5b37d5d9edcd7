use log::error;

use crate::huffman_coding::huffman_codes::Code;

/// Largest number of bits out_bits() takes at once. The queue keeps at most 7 bits between calls, so
/// 56 more always fit in the u64.
const MAX_CHUNK: u8 = 56;

/// Packs bits into bytes, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Zero bits added to the last byte by flush().
    pub padding: u8,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the size specified. Call flush() to push the
    /// last partial byte out before using the output.
    pub fn new(size: usize) -> Self {
        Self::with_output(Vec::with_capacity(size))
    }

    /// Create a BitPacker that appends to an existing buffer (e.g. one already holding a header).
    pub fn with_output(output: Vec<u8>) -> Self {
        Self {
            output,
            padding: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Writes the `len` least significant bits of `data`, highest of those bits first.
    pub fn out_bits(&mut self, data: u64, len: u8) {
        debug_assert!(len <= MAX_CHUNK);
        if len == 0 {
            return;
        }
        self.queue <<= len; //shift queue by bit length
        self.queue |= data & (u64::MAX >> (64 - len)); //add data portion to queue
        self.q_bits += len; //update depth of queue bits
        self.write_stream();
    }

    /// Writes a single bit.
    pub fn out_bit(&mut self, bit: bool) {
        self.out_bits(bit as u64, 1);
    }

    /// Writes a whole huffman code.
    pub fn out_code(&mut self, code: Code) {
        if code.len > MAX_CHUNK {
            // Split long codes so the queue cannot overflow
            self.out_bits(code.value >> 32, code.len - 32);
            self.out_bits(code.value & 0xffff_ffff, 32);
        } else {
            self.out_bits(code.value, code.len);
        }
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least significant bits.
    /// Returns the number of padding bits, which is 0 when the stream was already byte aligned.
    pub fn flush(&mut self) -> u8 {
        self.padding = (8 - self.q_bits % 8) % 8;
        if self.q_bits > 0 {
            self.queue <<= self.padding; //pad the queue with zeros
            self.q_bits += self.padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
        self.padding
    }

    /// Number of bits written so far, including any still waiting in the queue.
    pub fn bit_count(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bit_count() / 8, self.bit_count() % 8)
    }
}

/// Packs a bit sequence into bytes. Returns the bytes and the number of padding bits in the last one.
pub fn pack(bits: &[bool]) -> (Vec<u8>, u8) {
    let mut bp = BitPacker::new((bits.len() + 7) / 8);
    bits.iter().for_each(|&bit| bp.out_bit(bit));
    let padding = bp.flush();
    (bp.output, padding)
}
