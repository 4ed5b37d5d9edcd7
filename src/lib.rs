//! Static Huffman compression of byte streams.
//!
//! The whole input is counted, a Huffman code is built from the byte frequencies, and every byte is
//! replaced by its code. The frequencies go into the file header so the decoder can rebuild exactly the
//! same code; the tree build breaks ties by table position, never by anything that is not in the file.
//!
//! ```
//! let packed = huffzip::compress(b"aaabbc")?;
//! assert_eq!(huffzip::decompress(&packed)?, b"aaabbc");
//! # Ok::<(), huffzip::HuffError>(())
//! ```
//!
//! The reference header stores each frequency in one byte. Inputs where a byte occurs more than 255
//! times are refused with `HuffError::FrequencyOverflow`, unless the wide header is used:
//!
//! ```
//! use huffzip::CodecOptions;
//!
//! let data = vec![b'x'; 1000];
//! assert!(huffzip::compress(&data).is_err());
//! let packed = huffzip::compress_with(&data, &CodecOptions::wide())?;
//! assert_eq!(huffzip::decompress_with(&packed, &CodecOptions::wide())?, data);
//! # Ok::<(), huffzip::HuffError>(())
//! ```
//!
//! Command line usage mirrors bzip2:
//!
//! `$> huffzip -k notes.txt` writes notes.txt.huf, `$> huffzip -d notes.txt.huf` restores it.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_with};
pub use compression::container::{CodecOptions, FreqWidth};
pub use compression::decompress::{decompress, decompress_with};
pub use error::{HuffError, Result};
