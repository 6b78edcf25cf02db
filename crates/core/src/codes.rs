//! Code assignment: one bit string per leaf, read off the root-to-leaf path.

use bitvec::prelude::*;

use crate::frequency::{FrequencyTable, SYMBOL_COUNT};
use crate::tree::{HuffNode, HuffmanTree};

/// Path from the root to a leaf: `0` for left, `1` for right.
pub type Code = BitVec<u8, Msb0>;

/// Symbol → code lookup produced from a [`HuffmanTree`].
///
/// # Invariants
/// - The set of codes is prefix-free (codes are distinct leaf paths)
/// - A single-leaf tree maps its only symbol to the empty code
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Depth-first walk over the tree using an explicit stack.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes: Vec<Option<Code>> = vec![None; SYMBOL_COUNT];
        let mut stack: Vec<(&HuffNode, Code)> = vec![(tree.root(), Code::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    log::trace!("symbol {:#04x} -> {}", symbol, render(&path));
                    codes[*symbol as usize] = Some(path);
                }
                HuffNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((&**right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((&**left, left_path));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_ref().map(|c| (s as u8, c)))
    }

    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Exact payload length in bits for input with these frequencies.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .symbols()
            .filter_map(|(s, count)| self.get(s).map(|c| count.saturating_mul(c.len() as u64)))
            .fold(0u64, u64::saturating_add)
    }
}

fn render(code: &Code) -> String {
    code.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn table_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data)).unwrap();
        CodeTable::from_tree(&tree)
    }

    fn prefix_free(codes: &CodeTable) -> bool {
        let all: Vec<_> = codes.iter().collect();
        all.iter().all(|(a, ca)| {
            all.iter()
                .all(|(b, cb)| a == b || !(cb.len() >= ca.len() && cb[..ca.len()] == ca[..]))
        })
    }

    #[test]
    fn test_aaab_codes() {
        let codes = table_for(b"aaab");
        assert_eq!(render(codes.get(b'b').unwrap()), "0");
        assert_eq!(render(codes.get(b'a').unwrap()), "1");
        assert!(codes.get(b'c').is_none());
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn test_single_leaf_empty_code() {
        let codes = table_for(&[0x41; 1000]);
        assert_eq!(codes.len(), 1);
        assert!(codes.get(0x41).unwrap().is_empty());
        assert_eq!(codes.max_code_len(), 0);
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let data = b"aaaaaaaaaaaaaaaabbbbbbbbccccdde";
        let codes = table_for(data);
        let len = |s: u8| codes.get(s).unwrap().len();
        assert!(len(b'a') <= len(b'b'));
        assert!(len(b'b') <= len(b'c'));
        assert!(len(b'c') <= len(b'd'));
        assert!(len(b'd') <= len(b'e'));
        assert!(prefix_free(&codes));
    }

    #[test]
    fn test_encoded_bits() {
        let data = b"aaab";
        let codes = table_for(data);
        assert_eq!(codes.encoded_bits(&FrequencyTable::from_bytes(data)), 4);
    }

    #[test]
    fn test_skewed_tree_long_codes() {
        // Fibonacci weights force a maximally unbalanced tree
        let mut data = Vec::new();
        let (mut a, mut b) = (1usize, 1usize);
        for symbol in 0u8..20 {
            data.extend(std::iter::repeat(symbol).take(a));
            (a, b) = (b, a + b);
        }
        let codes = table_for(&data);
        assert_eq!(codes.max_code_len(), 19);
        assert!(prefix_free(&codes));
    }

    #[quickcheck]
    fn prop_prefix_free(data: Vec<u8>) -> bool {
        if data.is_empty() {
            return true;
        }
        prefix_free(&table_for(&data))
    }
}
