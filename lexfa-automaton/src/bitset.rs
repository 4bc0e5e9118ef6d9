use core::fmt;

use crate::state::StateId;

const WORD_BITS: usize = u64::BITS as usize;

/// Dense set of state indices.
///
/// Iteration is always in ascending index order. Trailing empty words are
/// never stored, so two sets with the same members compare (and hash) equal
/// regardless of how they were built.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet {
    words: Vec<u64>,
}

impl StateSet {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    pub fn with_capacity(states: usize) -> Self {
        Self {
            words: Vec::with_capacity(states.div_ceil(WORD_BITS)),
        }
    }

    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Returns `true` when the state was not yet a member.
    pub fn insert(&mut self, state: StateId) -> bool {
        let (word, mask) = locate(state);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    pub fn contains(&self, state: StateId) -> bool {
        let (word, mask) = locate(state);
        self.words.get(word).is_some_and(|bits| bits & mask != 0)
    }

    pub fn union_with(&mut self, other: &Self) -> bool {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        let mut changed = false;
        for (mine, theirs) in self.words.iter_mut().zip(&other.words) {
            let merged = *mine | *theirs;
            if merged != *mine {
                *mine = merged;
                changed = true;
            }
        }
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|bits| bits.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word: 0,
            pending: self.words.first().copied().unwrap_or(0),
        }
    }
}

fn locate(state: StateId) -> (usize, u64) {
    let index = state.index();
    (index / WORD_BITS, 1u64 << (index % WORD_BITS))
}

pub struct Iter<'a> {
    words: &'a [u64],
    word: usize,
    pending: u64,
}

impl Iterator for Iter<'_> {
    type Item = StateId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending == 0 {
            self.word += 1;
            self.pending = *self.words.get(self.word)?;
        }
        let bit = self.pending.trailing_zeros() as usize;
        self.pending &= self.pending - 1;
        Some(StateId::new(self.word * WORD_BITS + bit))
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(StateId::index)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[usize]) -> StateSet {
        values.iter().copied().map(StateId::new).collect()
    }

    #[test]
    fn iterates_in_ascending_order() {
        let set = ids(&[130, 3, 64, 0, 3]);
        let members: Vec<usize> = set.iter().map(StateId::index).collect();
        assert_eq!(members, [0, 3, 64, 130]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn equality_ignores_reserved_capacity() {
        let mut wide = StateSet::with_capacity(512);
        wide.insert(StateId::new(2));
        assert_eq!(wide, StateSet::singleton(StateId::new(2)));
        assert!(StateSet::with_capacity(512).is_empty());
    }

    #[test]
    fn union_reports_growth() {
        let mut left = ids(&[1]);
        assert!(left.union_with(&ids(&[1, 70])));
        assert!(!left.union_with(&ids(&[70])));
        assert!(left.contains(StateId::new(70)));
        assert!(!left.contains(StateId::new(69)));
    }
}
