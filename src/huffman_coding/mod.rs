//! The huffman module builds the code used by huffzip.
//!
//! A tree is built from the frequency table with a min-heap merge, and each symbol's code is the path
//! from the root to its leaf (left = 0, right = 1). The decoder never sees the tree itself: it rebuilds
//! it from the frequencies stored in the container header, so the build has to be exactly repeatable.
//!
//! - huffman: the arena-backed tree and the deterministic build.
//! - huffman_codes: code derivation and the reverse lookup table.
//!

pub mod huffman;
pub mod huffman_codes;
