//! The bitstream module forms the bit-level I/O of huffzip.
//!
//! Codes are packed most significant bit first. The last byte is padded with zero bits after the real
//! bits, and the number of padding bits (0-7) is recorded in the container so the reader can drop them.
//!
pub mod bitpacker;
pub mod bitreader;
