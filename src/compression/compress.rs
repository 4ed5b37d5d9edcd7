use std::fs;
use std::path::Path;

use log::{debug, info, trace};

use super::container::{header_len, write_header, CodecOptions};
use crate::bitstream::bitpacker::BitPacker;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::HuffmanTree;
use crate::huffman_coding::huffman_codes::CodeTable;
use crate::tools::cli::{HuffOpts, Output};
use crate::tools::file_io;
use crate::tools::freq_count::FrequencyTable;

/// Compress `data` using the reference container format (one byte per frequency).
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &CodecOptions::default())
}

/// Compress `data` into a container. Empty input gives an empty container.
pub fn compress_with(data: &[u8], opts: &CodecOptions) -> Result<Vec<u8>> {
    if data.is_empty() {
        debug!("Empty input, writing an empty container");
        return Ok(Vec::new());
    }

    let table = FrequencyTable::from_bytes(data);
    debug!("Found {} distinct symbols in {} bytes", table.len(), data.len());

    let tree = HuffmanTree::build(&table)
        .ok_or_else(|| HuffError::malformed("non-empty input produced no huffman tree"))?;
    let codes = CodeTable::from_tree(&tree)?;

    // Size the body up front so the padding can go in the header before the body is written.
    let body_bits: u64 = table
        .entries()
        .iter()
        .map(|&(sym, count)| count * codes.get(sym).map_or(0, |c| c.len as u64))
        .sum();
    let padding = ((8 - body_bits % 8) % 8) as u8;

    let mut output = Vec::with_capacity(
        header_len(table.len(), opts.freq_width) + ((body_bits + 7) / 8) as usize,
    );
    write_header(&mut output, &table, padding, opts.freq_width)?;
    let header_bytes = output.len();

    let mut bp = BitPacker::with_output(output);
    pack_body(&mut bp, data, &codes)?;
    trace!("Body ends at {}", bp.loc());
    let flushed = bp.flush();
    debug_assert_eq!(flushed, padding);

    info!(
        "Compressed {} bytes to {} ({} header, {} body bits, {} padding)",
        data.len(),
        bp.output.len(),
        header_bytes,
        body_bits,
        padding
    );
    Ok(bp.output)
}

/// Write each byte's code in input order. A byte without a code means the table does not belong to
/// this data, and the container would decode wrongly.
fn pack_body(bp: &mut BitPacker, data: &[u8], codes: &CodeTable) -> Result<()> {
    for &byte in data {
        let code = codes
            .get(byte)
            .ok_or_else(|| HuffError::malformed(format!("byte 0x{:02x} has no code", byte)))?;
        bp.out_code(code);
    }
    Ok(())
}

/// Compress every file named in opts, or stdin to stdout when no files were given.
pub fn compress_files(opts: &HuffOpts) -> Result<()> {
    if opts.files.is_empty() {
        let data = file_io::read_stdin()?;
        let encoded = compress_with(&data, &opts.codec)?;
        return file_io::write_stdout(&encoded);
    }
    for name in &opts.files {
        compress_file(Path::new(name), opts)?;
    }
    Ok(())
}

/// Compress one file to `<name>.huf` (or stdout), removing the input unless asked to keep it.
pub fn compress_file(path: &Path, opts: &HuffOpts) -> Result<()> {
    let data = file_io::read_input(path)?;
    let encoded = compress_with(&data, &opts.codec)?;

    match opts.output {
        Output::Stdout => file_io::write_stdout(&encoded)?,
        Output::File => {
            let target = file_io::compressed_name(path);
            file_io::write_output(&target, &encoded, opts.force_overwrite)?;
            info!(
                "{}: {} -> {} bytes, written to {}",
                path.display(),
                data.len(),
                encoded.len(),
                target.display()
            );
            if !opts.keep_input_files {
                fs::remove_file(path)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::{compress, compress_file, compress_with, pack_body};
    use crate::bitstream::bitpacker::BitPacker;
    use crate::compression::container::CodecOptions;
    use crate::error::HuffError;
    use crate::huffman_coding::huffman::HuffmanTree;
    use crate::huffman_coding::huffman_codes::CodeTable;
    use crate::tools::cli::{HuffOpts, Output};
    use crate::tools::file_io::scratch_dir;
    use crate::tools::freq_count::FrequencyTable;

    #[test]
    fn empty_input() {
        assert_eq!(compress(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn aaabbc_container() {
        // a=0 c=10 b=11: 0 0 0 11 11 10 -> 00011111 0(0000000)
        let out = compress(b"aaabbc").unwrap();
        assert_eq!(
            out,
            [3, b'a', 3, b'b', 2, b'c', 1, 7, 0b0001_1111, 0b0000_0000]
        );
    }

    #[test]
    fn aligned_body_has_no_padding() {
        // a=0 b=1, eight bits exactly
        let out = compress(b"abababab").unwrap();
        assert_eq!(out, [2, b'a', 4, b'b', 4, 0, 0b0101_0101]);
    }

    #[test]
    fn single_symbol() {
        let out = compress(&[b'z'; 10]).unwrap();
        assert_eq!(out, [1, b'z', 10, 6, 0, 0]);
    }

    #[test]
    fn overflow_in_byte_field() {
        let mut data = vec![b'a'; 300];
        data.extend_from_slice(b"bc");
        let err = compress(&data).unwrap_err();
        assert!(matches!(
            err,
            HuffError::FrequencyOverflow {
                symbol: b'a',
                count: 300,
                max: 255
            }
        ));
        assert!(compress_with(&data, &CodecOptions::wide()).is_ok());
    }

    #[test]
    fn byte_without_code_is_refused() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"ab")).unwrap();
        let codes = CodeTable::from_tree(&tree).unwrap();
        let mut bp = BitPacker::new(4);
        let err = pack_body(&mut bp, b"abc", &codes).unwrap_err();
        assert!(matches!(err, HuffError::MalformedContainer(_)));
    }

    #[test]
    fn file_gets_suffix_and_input_is_removed() {
        let dir = scratch_dir("compress-remove");
        let input = dir.join("notes.txt");
        fs::write(&input, b"aaabbc").unwrap();

        compress_file(&input, &HuffOpts::new()).unwrap();
        assert!(!input.exists());
        assert_eq!(
            fs::read(dir.join("notes.txt.huf")).unwrap(),
            compress(b"aaabbc").unwrap()
        );
        assert!(!dir.join("notes.txt.huf.tmp").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn keep_leaves_input_in_place() {
        let dir = scratch_dir("compress-keep");
        let input = dir.join("notes.txt");
        fs::write(&input, b"hello").unwrap();

        let mut opts = HuffOpts::new();
        opts.keep_input_files = true;
        compress_file(&input, &opts).unwrap();
        assert_eq!(fs::read(&input).unwrap(), b"hello");
        assert!(dir.join("notes.txt.huf").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn existing_output_keeps_everything() {
        let dir = scratch_dir("compress-exists");
        let input = dir.join("notes.txt");
        let target = dir.join("notes.txt.huf");
        fs::write(&input, b"hello").unwrap();
        fs::write(&target, b"old").unwrap();

        let err = compress_file(&input, &HuffOpts::new()).unwrap_err();
        assert!(matches!(err, HuffError::OutputExists { .. }));
        assert_eq!(fs::read(&input).unwrap(), b"hello");
        assert_eq!(fs::read(&target).unwrap(), b"old");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overflow_writes_nothing() {
        let dir = scratch_dir("compress-overflow");
        let input = dir.join("big.bin");
        fs::write(&input, vec![b'x'; 300]).unwrap();

        let err = compress_file(&input, &HuffOpts::new()).unwrap_err();
        assert!(matches!(err, HuffError::FrequencyOverflow { .. }));
        assert!(input.exists());
        assert!(!dir.join("big.bin.huf").exists());
        assert!(!dir.join("big.bin.huf.tmp").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_input() {
        let dir = scratch_dir("compress-missing");
        let mut opts = HuffOpts::new();
        opts.output = Output::Stdout;
        let err = compress_file(&dir.join("nope"), &opts).unwrap_err();
        assert!(matches!(err, HuffError::InputUnavailable { .. }));
        fs::remove_dir_all(dir).unwrap();
    }
}
