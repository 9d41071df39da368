/// Word-packed set of null row indices.
///
/// Bits are stored little-endian within each `u64` word: bit `i % 64` of word
/// `i / 64` is set when row `i` is null. The set bit count is maintained
/// incrementally so membership and cardinality are both O(1).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct NullMask {
    words: Vec<u64>,
    len: usize,
    ones: usize,
}

impl NullMask {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            ones: 0,
        }
    }

    /// A mask of `len` rows, none of them null.
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(64)],
            len,
            ones: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn null_count(&self) -> usize {
        self.ones
    }

    pub fn any(&self) -> bool {
        self.ones > 0
    }

    pub fn push(&mut self, is_null: bool) {
        let bit = self.len % 64;
        if bit == 0 {
            self.words.push(0);
        }
        if is_null {
            self.words[self.len / 64] |= 1u64 << bit;
            self.ones += 1;
        }
        self.len += 1;
    }

    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "NullMask index out of bounds");
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    pub fn set(&mut self, index: usize, is_null: bool) {
        debug_assert!(index < self.len, "NullMask index out of bounds");
        let word = index / 64;
        let mask = 1u64 << (index % 64);
        let was_null = self.words[word] & mask != 0;
        match (was_null, is_null) {
            (false, true) => {
                self.words[word] |= mask;
                self.ones += 1;
            }
            (true, false) => {
                self.words[word] &= !mask;
                self.ones -= 1;
            }
            _ => {}
        }
    }

    pub fn clear_all(&mut self) {
        for w in &mut self.words {
            *w = 0;
        }
        self.ones = 0;
    }

    pub fn set_all(&mut self) {
        if self.len == 0 {
            return;
        }
        for w in &mut self.words {
            *w = u64::MAX;
        }
        let rem = self.len % 64;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
        self.ones = self.len;
    }

    /// Grow or shrink to `new_len` rows. Newly exposed rows are non-null.
    pub fn resize(&mut self, new_len: usize) {
        if new_len >= self.len {
            self.words.resize(new_len.div_ceil(64), 0);
            self.len = new_len;
            return;
        }

        self.words.truncate(new_len.div_ceil(64));
        let rem = new_len % 64;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
        self.len = new_len;
        self.ones = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }

    /// Ascending iterator over the null row indices.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.get(i))
    }

    /// Row-wise OR with another mask of the same length.
    pub fn union_inplace(&mut self, other: &NullMask) {
        debug_assert_eq!(self.len, other.len, "NullMask length mismatch");
        for (w, o) in self.words.iter_mut().zip(other.words.iter()) {
            *w |= *o;
        }
        self.ones = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_membership() {
        let mut mask = NullMask::new();
        for i in 0..130 {
            mask.push(i % 3 == 0);
        }
        assert_eq!(mask.len(), 130);
        assert!(mask.get(0));
        assert!(!mask.get(1));
        assert!(mask.get(129));
        assert_eq!(mask.null_count(), (0..130).filter(|i| i % 3 == 0).count());
    }

    #[test]
    fn set_updates_count_both_ways() {
        let mut mask = NullMask::with_len(10);
        assert_eq!(mask.null_count(), 0);
        mask.set(4, true);
        assert_eq!(mask.null_count(), 1);
        mask.set(4, true);
        assert_eq!(mask.null_count(), 1);
        mask.set(4, false);
        assert_eq!(mask.null_count(), 0);
    }

    #[test]
    fn resize_grows_non_null_and_shrink_discards() {
        let mut mask = NullMask::with_len(5);
        mask.set(1, true);
        mask.set(4, true);

        mask.resize(100);
        assert_eq!(mask.len(), 100);
        assert_eq!(mask.null_count(), 2);
        assert!(!mask.get(99));

        mask.resize(3);
        assert_eq!(mask.null_count(), 1);
        assert!(mask.get(1));
    }

    #[test]
    fn union_and_indices() {
        let mut left = NullMask::with_len(70);
        left.set(0, true);
        left.set(65, true);
        let mut right = NullMask::with_len(70);
        right.set(0, true);
        right.set(33, true);

        left.union_inplace(&right);
        assert_eq!(left.indices().collect::<Vec<_>>(), vec![0, 33, 65]);
    }
}
