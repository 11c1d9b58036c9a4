#![forbid(unsafe_code)]

//! Packed bits for chunk validity and boolean values.

const WORD_BITS: usize = u64::BITS as usize;

/// Split a bit position into its word slot and the mask selecting it inside that word.
#[inline]
fn locate(index: usize) -> (usize, u64) {
    (index / WORD_BITS, 1u64 << (index % WORD_BITS))
}

fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Growable sequence of bits, 64 to a word, position `i` at bit `i % 64` of word `i / 64`.
///
/// Bits past `len` in the last word are always clear, and the number of set bits is
/// tracked on every push so null counts are O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitVec {
    words: Vec<u64>,
    len: usize,
    ones: usize,
}

impl BitVec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty, with room for `bits` pushes before reallocating.
    pub fn with_capacity_bits(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(words_for(bits)),
            ..Self::default()
        }
    }

    /// `bits` set bits; the validity of a chunk without nulls.
    pub fn with_len_all_true(bits: usize) -> Self {
        let mut words = vec![u64::MAX; words_for(bits)];
        let tail = bits % WORD_BITS;
        if let (Some(last), true) = (words.last_mut(), tail != 0) {
            *last >>= WORD_BITS - tail;
        }
        Self {
            words,
            len: bits,
            ones: bits,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, value: bool) {
        let (word, mask) = locate(self.len);
        if word == self.words.len() {
            self.words.push(0);
        }
        if value {
            self.words[word] |= mask;
            self.ones += 1;
        }
        self.len += 1;
    }

    /// Bit at `index`. Callers bounds-check against [`BitVec::len`] first.
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "bit {index} of {}", self.len);
        let (word, mask) = locate(index);
        self.words[word] & mask != 0
    }

    pub fn count_ones(&self) -> usize {
        self.ones
    }

    pub fn count_zeros(&self) -> usize {
        self.len - self.ones
    }

    pub fn all_true(&self) -> bool {
        self.count_zeros() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity_bits(iter.size_hint().0);
        iter.for_each(|bit| out.push(bit));
        out
    }
}

impl From<&[bool]> for BitVec {
    fn from(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }
}
