use crate::error::{HuffError, Result};

/// Occurrence counts of the byte values in an input, in a fixed order.
///
/// Built from data the entries are in ascending symbol order. Rebuilt from a container header they keep
/// the on-disk order. The order matters: the tree builder breaks frequency ties by entry position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    entries: Vec<(u8, u64)>,
}

impl FrequencyTable {
    /// Count every byte of the input.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut freqs = [0_u64; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);

        let entries = freqs
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(sym, &count)| (sym as u8, count))
            .collect();
        Self { entries }
    }

    /// Rebuild a table from (symbol, count) pairs read from a header. Duplicate symbols and zero counts
    /// cannot come from a real input, so they mark the container as malformed.
    pub fn from_entries(entries: Vec<(u8, u64)>) -> Result<Self> {
        let mut seen = [false; 256];
        for &(sym, count) in &entries {
            if count == 0 {
                return Err(HuffError::malformed(format!(
                    "symbol 0x{:02x} has a zero frequency",
                    sym
                )));
            }
            if seen[sym as usize] {
                return Err(HuffError::malformed(format!(
                    "symbol 0x{:02x} appears twice in the header",
                    sym
                )));
            }
            seen[sym as usize] = true;
        }
        Ok(Self { entries })
    }

    /// The (symbol, count) pairs in table order.
    pub fn entries(&self) -> &[(u8, u64)] {
        &self.entries
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the input the table was built from.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }
}
