//! Derives bit codes from a huffman tree, and the reverse lookup used when decoding.
//!
//! A code is held as an integer plus a bit length rather than as text. The first bit of the code is
//! the most significant of the `len` low bits of `value`.

use std::fmt::{Display, Formatter};

use log::debug;
use rustc_hash::FxHashMap;

use super::huffman::{HuffmanTree, NodeData};
use crate::error::{HuffError, Result};

/// Longest code the u64 representation can hold.
pub const MAX_CODE_LEN: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    pub value: u64,
    pub len: u8,
}

impl Code {
    pub fn new(value: u64, len: u8) -> Self {
        Self { value, len }
    }

    /// Returns this code extended by one bit. The caller keeps len below MAX_CODE_LEN.
    #[inline(always)]
    pub fn push(self, bit: bool) -> Self {
        Self {
            value: (self.value << 1) | bit as u64,
            len: self.len + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shifted = other
            .value
            .checked_shr((other.len - self.len) as u32)
            .unwrap_or(0);
        shifted == self.value
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.len == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.value, width = self.len as usize)
    }
}

/// Symbol to code table for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    max_len: u8,
}

impl CodeTable {
    /// Walk the tree left before right, appending 0 going left and 1 going right. A tree that is a
    /// single leaf gets the one-bit code 0, since an empty code cannot be seen in a bitstream.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; 256];
        let root = tree.node(tree.root());
        match root.node_data {
            NodeData::Leaf(sym) => codes[sym as usize] = Some(Code::new(0, 1)),
            NodeData::Kids(..) => return_leaves(tree, tree.root(), Code::default(), &mut codes)?,
        }
        let max_len = codes.iter().flatten().map(|c| c.len).max().unwrap_or(0);
        debug!(
            "Derived {} codes, longest is {} bits",
            codes.iter().flatten().count(),
            max_len
        );
        Ok(Self { codes, max_len })
    }

    /// Code for a symbol, or None if the symbol was not in the frequency table.
    pub fn get(&self, sym: u8) -> Option<Code> {
        self.codes[sym as usize]
    }

    /// (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(sym, code)| code.map(|c| (sym as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.max_len == 0
    }

    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Build the code to symbol lookup for decoding.
    pub fn reverse(&self) -> ReverseCodeTable {
        let map = self.iter().map(|(sym, code)| (code, sym)).collect();
        ReverseCodeTable {
            map,
            max_len: self.max_len,
        }
    }
}

/// Recursively walk the tree and record the path to each leaf as that leaf's code.
fn return_leaves(
    tree: &HuffmanTree,
    idx: usize,
    code: Code,
    codes: &mut [Option<Code>; 256],
) -> Result<()> {
    match tree.node(idx).node_data {
        NodeData::Kids(left, right) => {
            if code.len == MAX_CODE_LEN {
                return Err(HuffError::malformed(format!(
                    "frequencies produce a code longer than {} bits",
                    MAX_CODE_LEN
                )));
            }
            return_leaves(tree, left, code.push(false), codes)?;
            return_leaves(tree, right, code.push(true), codes)?;
        }
        NodeData::Leaf(sym) => codes[sym as usize] = Some(code),
    }
    Ok(())
}

/// Code to symbol table for decoding.
#[derive(Debug, Clone)]
pub struct ReverseCodeTable {
    map: FxHashMap<Code, u8>,
    max_len: u8,
}

impl ReverseCodeTable {
    #[inline(always)]
    pub fn get(&self, code: &Code) -> Option<u8> {
        self.map.get(code).copied()
    }

    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.map.len()
    }
}
