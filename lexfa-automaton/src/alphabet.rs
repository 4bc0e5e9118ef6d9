use indexmap::IndexSet;

/// The set of bytes an automaton may label transitions with.
///
/// Insertion order is kept: subset construction visits characters in this
/// order and persisted alphabets round-trip unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: IndexSet<u8>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: u8) -> bool {
        self.symbols.insert(symbol)
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.symbols.iter().copied()
    }

    /// Symbols of `self` followed by the symbols of `other` not seen yet.
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(other.iter());
        merged
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl From<&str> for Alphabet {
    fn from(symbols: &str) -> Self {
        symbols.bytes().collect()
    }
}

impl From<&[u8]> for Alphabet {
    fn from(symbols: &[u8]) -> Self {
        symbols.iter().copied().collect()
    }
}

impl<const N: usize> From<&[u8; N]> for Alphabet {
    fn from(symbols: &[u8; N]) -> Self {
        symbols.iter().copied().collect()
    }
}

impl From<Vec<u8>> for Alphabet {
    fn from(symbols: Vec<u8>) -> Self {
        symbols.into_iter().collect()
    }
}

impl FromIterator<u8> for Alphabet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl Extend<u8> for Alphabet {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.symbols.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let alphabet = Alphabet::from("cabac");
        assert_eq!(alphabet.to_bytes(), b"cab");
    }

    #[test]
    fn union_appends_new_symbols() {
        let merged = Alphabet::from("ab").union(&Alphabet::from("bc1"));
        assert_eq!(merged.to_bytes(), b"abc1");
        assert!(merged.contains(b'1'));
        assert!(!merged.contains(b'2'));
    }

    #[test]
    fn owned_bytes_convert() {
        let alphabet = Alphabet::from(vec![0xe9, b'a', 0xe9]);
        assert_eq!(alphabet.to_bytes(), [0xe9, b'a']);
    }
}
