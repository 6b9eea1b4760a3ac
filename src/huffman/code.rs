use crate::huffman::tree::{ALPHABET_SIZE, HuffNode};

/// Mapping from symbol to its root-to-leaf bit path (0 = left, 1 = right).
///
/// Prefix-freeness falls out of the tree structure: one code per distinct leaf
/// of a full binary tree. In the single-symbol degenerate case the sole
/// symbol's code is the empty sequence.
#[derive(Debug)]
pub struct CodeTable {
    codes: [Option<Box<[u8]>>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Depth-first walk from the root, recording the accumulated path at every
    /// leaf. Codes are a deterministic function of tree shape only.
    pub fn from_tree(root: &HuffNode) -> Self {
        let mut codes = [const { None }; ALPHABET_SIZE];
        let mut path = Vec::new();
        walk(root, &mut path, &mut codes);
        CodeTable { codes }
    }

    /// The code for a symbol, as a slice of 0/1 bit values. `None` for symbols
    /// absent from the source alphabet.
    pub fn code(&self, symbol: u8) -> Option<&[u8]> {
        self.codes[symbol as usize].as_deref()
    }

    pub fn distinct_symbols(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }
}

fn walk(node: &HuffNode, path: &mut Vec<u8>, codes: &mut [Option<Box<[u8]>>; ALPHABET_SIZE]) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(path.clone().into_boxed_slice());
        }
        HuffNode::Internal { left, right, .. } => {
            path.push(0);
            walk(left, path, codes);
            path.pop();
            path.push(1);
            walk(right, path, codes);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::tree::{build_tree, count_frequencies};
    use std::io::Cursor;

    fn table_of(data: &[u8]) -> CodeTable {
        let counts = count_frequencies(&mut Cursor::new(data)).unwrap();
        CodeTable::from_tree(&build_tree(&counts).unwrap())
    }

    #[test]
    fn codes_are_prefix_free() {
        let table = table_of(b"the quick brown fox jumps over the lazy dog 0123456789");
        let codes: Vec<&[u8]> = (0u8..=255)
            .filter_map(|s| table.code(s))
            .collect();
        assert!(codes.len() > 2);
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "code {a:?} is a prefix of {b:?}");
                }
            }
        }
    }

    #[test]
    fn three_symbol_codes_stay_within_two_bits() {
        // A=2, B=3, C=4: a 3-leaf tree never needs more than 2 bits per code.
        let table = table_of(b"AABBBCCCC");
        assert_eq!(table.distinct_symbols(), 3);
        for symbol in [b'A', b'B', b'C'] {
            let code = table.code(symbol).unwrap();
            assert!(!code.is_empty() && code.len() <= 2, "code for {symbol}: {code:?}");
        }
    }

    #[test]
    fn degenerate_tree_gets_the_empty_code() {
        let table = table_of(b"AAAAA");
        assert_eq!(table.code(b'A'), Some(&[][..]));
        assert_eq!(table.distinct_symbols(), 1);
    }

    #[test]
    fn absent_symbols_have_no_code() {
        let table = table_of(b"AABBBCCCC");
        assert_eq!(table.code(b'z'), None);
    }
}
