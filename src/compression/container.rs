//! Container layout shared by compress and decompress.
//!
//! ```text
//! [1 byte]   K, the number of distinct symbols (0 stands for 256)
//! K times:   [1 byte] symbol, then its frequency (1 byte, or 4 bytes big-endian when wide)
//! [1 byte]   padding bits in the last body byte (0-7)
//! [rest]     packed body, MSB first
//! ```
//!
//! Empty input is stored as an empty container, so a real header always has K >= 1 and the value 0 is
//! free to mean "all 256 byte values".

use log::trace;

use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyTable;

/// Width of the per-symbol frequency field in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreqWidth {
    /// One byte per frequency, at most 255 occurrences of any symbol.
    #[default]
    Byte,
    /// Four bytes, big-endian.
    Wide,
}

impl FreqWidth {
    /// Bytes taken by one frequency field.
    pub fn bytes(self) -> usize {
        match self {
            FreqWidth::Byte => 1,
            FreqWidth::Wide => 4,
        }
    }

    /// Largest frequency the field can hold.
    pub fn max(self) -> u64 {
        match self {
            FreqWidth::Byte => u8::MAX as u64,
            FreqWidth::Wide => u32::MAX as u64,
        }
    }
}

/// Settings that both sides of a round trip must agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub freq_width: FreqWidth,
}

impl CodecOptions {
    pub fn wide() -> Self {
        Self {
            freq_width: FreqWidth::Wide,
        }
    }
}

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub table: FrequencyTable,
    pub padding: u8,
}

/// Number of header bytes for `symbols` distinct symbols.
pub fn header_len(symbols: usize, width: FreqWidth) -> usize {
    2 + symbols * (1 + width.bytes())
}

/// Append the header for `table` to `out`. Fails with FrequencyOverflow, before writing anything, if a
/// count does not fit the frequency field.
pub fn write_header(
    out: &mut Vec<u8>,
    table: &FrequencyTable,
    padding: u8,
    width: FreqWidth,
) -> Result<()> {
    if let Some(&(symbol, count)) = table.entries().iter().find(|(_, c)| *c > width.max()) {
        return Err(HuffError::FrequencyOverflow {
            symbol,
            count,
            max: width.max(),
        });
    }
    debug_assert!((1..=256).contains(&table.len()));

    out.reserve(header_len(table.len(), width));
    // 256 wraps to 0
    out.push(table.len() as u8);
    for &(symbol, count) in table.entries() {
        out.push(symbol);
        match width {
            FreqWidth::Byte => out.push(count as u8),
            FreqWidth::Wide => out.extend_from_slice(&(count as u32).to_be_bytes()),
        }
    }
    out.push(padding);
    trace!(
        "Wrote header: {} symbols, {} padding bits",
        table.len(),
        padding
    );
    Ok(())
}

/// Parse the header at the start of a non-empty container. Returns it with the body that follows.
pub fn parse_header(data: &[u8], width: FreqWidth) -> Result<(Header, &[u8])> {
    let (&k, _) = data
        .split_first()
        .ok_or_else(|| HuffError::malformed("missing symbol count"))?;
    let symbols = if k == 0 { 256 } else { k as usize };

    let needed = header_len(symbols, width);
    if data.len() < needed {
        return Err(HuffError::malformed(format!(
            "header declares {} symbols and needs {} bytes, but the container has {}",
            symbols,
            needed,
            data.len()
        )));
    }

    let entry_len = 1 + width.bytes();
    let entries = data[1..needed - 1]
        .chunks_exact(entry_len)
        .map(|entry| {
            let count = entry[1..]
                .iter()
                .fold(0_u64, |acc, &b| (acc << 8) | b as u64);
            (entry[0], count)
        })
        .collect();
    let table = FrequencyTable::from_entries(entries)?;
    let padding = data[needed - 1];
    trace!("Read header: {} symbols, {} padding bits", symbols, padding);

    Ok((Header { table, padding }, &data[needed..]))
}
