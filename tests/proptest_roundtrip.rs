//! Property-based tests for huffzip.
//!
//! These tests check that the codec properties hold across a wide range of inputs:
//! - compress followed by decompress returns the input, for both header widths
//! - the packer round-trips every bit sequence, aligned or not
//! - derived codes are prefix free and do not depend on anything but the frequency table
//!
//! Run with: cargo test --test proptest_roundtrip

use proptest::prelude::*;

use huffzip::bitstream::bitpacker::pack;
use huffzip::bitstream::bitreader::unpack;
use huffzip::huffman_coding::huffman::HuffmanTree;
use huffzip::huffman_coding::huffman_codes::CodeTable;
use huffzip::tools::freq_count::FrequencyTable;
use huffzip::{compress, compress_with, decompress, decompress_with, CodecOptions, HuffError};

/// Inputs short enough that no byte can pass the one-byte frequency limit.
fn short_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=255)
}

/// Inputs drawn from a small alphabet, so frequencies get large and codes get skewed.
fn skewed_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![8 => Just(b'e'), 4 => Just(b't'), 2 => 0u8..4, 1 => any::<u8>()], 1..4000)
}

fn codes_for(data: &[u8]) -> CodeTable {
    let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data)).unwrap();
    CodeTable::from_tree(&tree).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    /// Property: byte-header containers decode to the original input.
    #[test]
    fn prop_roundtrip_byte_header(data in short_input()) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    /// Property: wide-header containers decode to the original input, whatever the counts.
    #[test]
    fn prop_roundtrip_wide_header(data in skewed_input()) {
        let opts = CodecOptions::wide();
        let packed = compress_with(&data, &opts).unwrap();
        prop_assert_eq!(decompress_with(&packed, &opts).unwrap(), data);
    }

    /// Property: a byte header either holds every count or compress refuses with FrequencyOverflow.
    #[test]
    fn prop_byte_header_never_truncates(data in skewed_input()) {
        let table = FrequencyTable::from_bytes(&data);
        let fits = table.entries().iter().all(|&(_, c)| c <= 255);
        match compress(&data) {
            Ok(packed) => {
                prop_assert!(fits);
                prop_assert_eq!(decompress(&packed).unwrap(), data);
            }
            Err(HuffError::FrequencyOverflow { count, max, .. }) => {
                prop_assert!(!fits);
                prop_assert!(count > max);
            }
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }

    /// Property: a run of one byte value round-trips with a one-bit code.
    #[test]
    fn prop_single_symbol(sym in any::<u8>(), n in 1usize..=255) {
        let data = vec![sym; n];
        let codes = codes_for(&data);
        prop_assert_eq!(codes.get(sym).map(|c| c.len), Some(1));
        prop_assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
    }

    /// Property: unpack(pack(bits)) == bits for every length, with padding 0..=7.
    #[test]
    fn prop_packer_roundtrip(bits in prop::collection::vec(any::<bool>(), 0..200)) {
        let (bytes, padding) = pack(&bits);
        prop_assert_eq!(bytes.len(), (bits.len() + 7) / 8);
        prop_assert_eq!(padding as usize, (8 - bits.len() % 8) % 8);
        prop_assert_eq!(unpack(&bytes, padding).unwrap(), bits);
    }

    /// Property: no code is a prefix of another code in the same table.
    #[test]
    fn prop_prefix_free(data in skewed_input()) {
        let codes: Vec<_> = codes_for(&data).iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(a.len >= 1);
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    /// Property: building from a table and from its header copy yields the same codes.
    #[test]
    fn prop_deterministic_codes(data in skewed_input()) {
        let table = FrequencyTable::from_bytes(&data);
        let copy = FrequencyTable::from_entries(table.entries().to_vec()).unwrap();
        let first = CodeTable::from_tree(&HuffmanTree::build(&table).unwrap()).unwrap();
        let second = CodeTable::from_tree(&HuffmanTree::build(&copy).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn packer_every_length_up_to_64() {
    for len in 0..=64usize {
        // Alternate a few patterns so both bit values show up at every position
        for seed in [0b1011_0110_u64, u64::MAX, 0] {
            let bits: Vec<bool> = (0..len).map(|i| (seed >> (i % 64)) & 1 == 1).collect();
            let (bytes, padding) = pack(&bits);
            assert_eq!(unpack(&bytes, padding).unwrap(), bits, "length {}", len);
        }
    }
}

#[test]
fn aaabbc_scenario() {
    let codes = codes_for(b"aaabbc");
    assert_eq!(codes.get(b'a').unwrap().len, 1);
    assert_eq!(codes.get(b'c').unwrap().len, 2);
    assert_eq!(decompress(&compress(b"aaabbc").unwrap()).unwrap(), b"aaabbc");
}

#[test]
fn empty_input_and_container() {
    assert!(compress(&[]).unwrap().is_empty());
    assert!(decompress(&[]).unwrap().is_empty());
}

#[test]
fn overflow_at_300() {
    let mut data = vec![b'a'; 300];
    data.push(b'b');
    assert!(matches!(
        compress(&data),
        Err(HuffError::FrequencyOverflow { symbol: b'a', count: 300, max: 255 })
    ));
}

#[test]
fn skewed_frequencies_make_deep_codes() {
    // Fibonacci-like counts give the deepest possible tree for their size
    let counts = [1usize, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233];
    let data: Vec<u8> = counts
        .iter()
        .enumerate()
        .flat_map(|(sym, &n)| std::iter::repeat(sym as u8).take(n))
        .collect();
    let codes = codes_for(&data);
    assert_eq!(codes.max_len() as usize, counts.len() - 1);
    assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
}
