//! The compression module holds the two directions of huffzip and the container they share.
//!
//! Compression happens in the following steps:
//! - Frequency count: count each byte value of the whole input.
//! - Huffman tree: merge the two lightest nodes until one remains, ties going to the older node.
//! - Code derivation: walk the tree, 0 for left and 1 for right.
//! - Packing: write the header, then every input byte's code, MSB first, padding the last byte.
//!
//! Decompression parses the header, rebuilds the same tree from the stored frequencies, and matches
//! the body bits against the reverse code table one bit at a time.
//!

pub mod compress;
pub mod container;
pub mod decompress;
