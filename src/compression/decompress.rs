use std::fs;
use std::path::Path;

use log::{debug, error, info, trace};

use super::container::{parse_header, CodecOptions};
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::HuffmanTree;
use crate::huffman_coding::huffman_codes::{Code, CodeTable};
use crate::tools::cli::{HuffOpts, Output};
use crate::tools::file_io;

/// Decompress a container written in the reference format (one byte per frequency).
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    decompress_with(container, &CodecOptions::default())
}

/// Decompress a container. An empty container gives empty output. On any error no output is returned.
pub fn decompress_with(container: &[u8], opts: &CodecOptions) -> Result<Vec<u8>> {
    if container.is_empty() {
        debug!("Empty container, nothing to decode");
        return Ok(Vec::new());
    }

    let (header, body) = parse_header(container, opts.freq_width)?;
    let expected = header.table.total();
    debug!(
        "Header lists {} symbols, {} bytes expected from {} body bytes",
        header.table.len(),
        expected,
        body.len()
    );

    // Rebuild exactly the tree the encoder used, from the header frequencies in on-disk order.
    let tree = HuffmanTree::build(&header.table)
        .ok_or_else(|| HuffError::malformed("header lists no symbols"))?;
    let reverse = CodeTable::from_tree(&tree)?.reverse();
    let mut br = BitReader::new(body, header.padding)?;

    // Every symbol takes at least one bit, so the body bounds the output too.
    let mut output = Vec::with_capacity(expected.min(br.bits_left() as u64) as usize);

    /*
    Read bits one at a time into a candidate code. The code is prefix free, so the first exact match
    is the symbol that was written. If the candidate reaches the longest code length without a match
    no further bit can help (only possible for a one-symbol tree, whose sole code is 0).
    */
    let mut candidate = Code::default();
    while let Some(bit) = br.bit() {
        candidate = candidate.push(bit);
        if let Some(sym) = reverse.get(&candidate) {
            output.push(sym);
            candidate = Code::default();
            if output.len() as u64 > expected {
                return Err(HuffError::malformed(format!(
                    "body decodes to more than the {} bytes the header declares",
                    expected
                )));
            }
        } else if candidate.len >= reverse.max_len() {
            error!("Bits {} at {} match no code", candidate, br.loc());
            return Err(HuffError::UnmatchedCode {
                bit_offset: br.bits_read(),
            });
        }
    }

    if !candidate.is_empty() {
        trace!("Leftover bits {} at end of stream", candidate);
        return Err(HuffError::UnknownCodeAtEndOfStream {
            bits: candidate.len,
        });
    }
    if output.len() as u64 != expected {
        return Err(HuffError::malformed(format!(
            "body decodes to {} bytes but the header declares {}",
            output.len(),
            expected
        )));
    }

    info!(
        "Decompressed {} bytes to {}",
        container.len(),
        output.len()
    );
    Ok(output)
}

/// Decompress every file named in opts, or stdin to stdout when no files were given.
pub fn decompress_files(opts: &HuffOpts) -> Result<()> {
    if opts.files.is_empty() {
        let data = file_io::read_stdin()?;
        let decoded = decompress_with(&data, &opts.codec)?;
        return file_io::write_stdout(&decoded);
    }
    for name in &opts.files {
        decompress_file(Path::new(name), opts)?;
    }
    Ok(())
}

/// Decompress one file, stripping the `.huf` suffix for the output name.
pub fn decompress_file(path: &Path, opts: &HuffOpts) -> Result<()> {
    let container = file_io::read_input(path)?;
    let decoded = decompress_with(&container, &opts.codec)?;

    match opts.output {
        Output::Stdout => file_io::write_stdout(&decoded)?,
        Output::File => {
            let target = file_io::decompressed_name(path);
            file_io::write_output(&target, &decoded, opts.force_overwrite)?;
            info!(
                "{}: {} -> {} bytes, written to {}",
                path.display(),
                container.len(),
                decoded.len(),
                target.display()
            );
            if !opts.keep_input_files {
                fs::remove_file(path)?;
            }
        }
    }
    Ok(())
}

/// Check that every named file (or stdin) decodes cleanly, without writing anything.
pub fn test_files(opts: &HuffOpts) -> Result<()> {
    if opts.files.is_empty() {
        let data = file_io::read_stdin()?;
        decompress_with(&data, &opts.codec)?;
        info!("<stdin>: ok");
        return Ok(());
    }
    for name in &opts.files {
        let container = file_io::read_input(Path::new(name))?;
        match decompress_with(&container, &opts.codec) {
            Ok(decoded) => info!("{}: ok ({} bytes)", name, decoded.len()),
            Err(e) => {
                error!("{}: {}", name, e);
                return Err(e);
            }
        }
    }
    Ok(())
}
