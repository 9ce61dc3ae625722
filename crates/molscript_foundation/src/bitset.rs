//! Growable selection sets over non-negative integer indices.
//!
//! A [`SelectionSet`] designates a subset of modeled entities (atoms, bonds)
//! by index. Script values hold these behind an `Arc` and treat them as
//! immutable payloads; narrowing a selection always produces a fresh set.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// A growable set of non-negative integers stored as a bit vector.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionSet {
    words: Vec<u64>,
}

impl SelectionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `bits` indices before growing.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
        }
    }

    /// Creates a set containing every index in `from..to`.
    #[must_use]
    pub fn from_range(from: usize, to: usize) -> Self {
        let mut set = Self::new();
        set.set_range(from, to);
        set
    }

    /// Adds `index` to the set.
    pub fn set(&mut self, index: usize) {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (index % WORD_BITS);
    }

    /// Adds every index in `from..to`.
    pub fn set_range(&mut self, from: usize, to: usize) {
        for index in from..to {
            self.set(index);
        }
    }

    /// Removes `index` from the set.
    pub fn clear(&mut self, index: usize) {
        if let Some(word) = self.words.get_mut(index / WORD_BITS) {
            *word &= !(1u64 << (index % WORD_BITS));
        }
    }

    /// Removes every index.
    pub fn clear_all(&mut self) {
        self.words.clear();
    }

    /// Returns true if `index` is in the set.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (index % WORD_BITS)) != 0)
    }

    /// Returns the number of indices in the set.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns one past the highest member, or 0 for an empty set.
    #[must_use]
    pub fn length(&self) -> usize {
        for (i, &word) in self.words.iter().enumerate().rev() {
            if word != 0 {
                return i * WORD_BITS + (WORD_BITS - word.leading_zeros() as usize);
            }
        }
        0
    }

    /// Returns the first member at or after `from`.
    #[must_use]
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        let mut word_index = from / WORD_BITS;
        let mut word = *self.words.get(word_index)? & (u64::MAX << (from % WORD_BITS));
        loop {
            if word != 0 {
                return Some(word_index * WORD_BITS + word.trailing_zeros() as usize);
            }
            word_index += 1;
            word = *self.words.get(word_index)?;
        }
    }

    /// Adds every member of `other`.
    pub fn or(&mut self, other: &SelectionSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (mine, theirs) in self.words.iter_mut().zip(&other.words) {
            *mine |= theirs;
        }
    }

    /// Iterates over members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.next_set_bit(0), move |&i| self.next_set_bit(i + 1))
    }

    /// Words up to the last nonzero one; trailing empty words do not affect identity.
    fn significant_words(&self) -> &[u64] {
        let used = self.words.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1);
        &self.words[..used]
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.significant_words() == other.significant_words()
    }
}

impl Eq for SelectionSet {}

impl Hash for SelectionSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_words().hash(state);
    }
}

impl fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.set(index);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut set = SelectionSet::new();
        set.set(3);
        set.set(130);
        assert!(set.get(3));
        assert!(set.get(130));
        assert!(!set.get(4));
        assert_eq!(set.cardinality(), 2);
        assert_eq!(set.length(), 131);
    }

    #[test]
    fn clear_shrinks_membership() {
        let mut set = SelectionSet::from_range(0, 5);
        set.clear(2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
        set.clear(1000);
        assert_eq!(set.cardinality(), 4);
    }

    #[test]
    fn next_set_bit_crosses_words() {
        let set: SelectionSet = [1, 64, 200].into_iter().collect();
        assert_eq!(set.next_set_bit(0), Some(1));
        assert_eq!(set.next_set_bit(2), Some(64));
        assert_eq!(set.next_set_bit(65), Some(200));
        assert_eq!(set.next_set_bit(201), None);
    }

    #[test]
    fn empty_set() {
        let set = SelectionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.length(), 0);
        assert_eq!(set.next_set_bit(0), None);
    }

    #[test]
    fn equality_ignores_capacity() {
        let mut a = SelectionSet::from_range(0, 200);
        for i in 1..200 {
            a.clear(i);
        }
        let b: SelectionSet = [0].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn or_merges() {
        let mut a: SelectionSet = [1, 2].into_iter().collect();
        let b: SelectionSet = [2, 90].into_iter().collect();
        a.or(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![1, 2, 90]);
    }
}
