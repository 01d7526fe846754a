//! Comparison and search over a [`RingSlice`], walking the ring in place.

use core::cmp::Ordering;

use crate::{
    RingSlice,
    contract::{SUFFIX_FROM_IN_RANGE, require},
};

impl<'a> RingSlice<'a> {
    /// Lexicographic comparison with `literal`, bytes compared as unsigned.
    ///
    /// Returns `0` on equality, the difference of the first mismatching bytes
    /// otherwise. A slice that runs out first compares less; a literal that
    /// runs out first makes the slice compare greater. An empty slice orders
    /// before every non-empty literal.
    ///
    /// ```rust
    /// use ringslice::RingSlice;
    ///
    /// let ring = *b"o World!__Hell";
    /// let rs = RingSlice::new(&ring, 10, 8);
    /// assert_eq!(rs.compare("Hello World!"), 0);
    /// assert!(rs.compare("Hello there") < 0);
    /// assert!(rs.compare("Hello") > 0);
    /// ```
    pub fn compare(&self, literal: impl AsRef<[u8]>) -> i32 {
        let mut expected = literal.as_ref().iter();
        for byte in self {
            let Some(&c) = expected.next() else {
                return i32::from(byte).max(1);
            };
            let diff = i32::from(byte) - i32::from(c);
            if diff != 0 {
                return diff;
            }
        }
        expected.next().map_or(0, |&c| -i32::from(c).max(1))
    }

    /// Like [`compare`](Self::compare), but succeeds with `0` as soon as
    /// `prefix` is exhausted, whatever follows in the slice.
    pub fn prefix_compare(&self, prefix: impl AsRef<[u8]>) -> i32 {
        let mut bytes = self.iter();
        for &c in prefix.as_ref() {
            let Some(byte) = bytes.next() else {
                return -i32::from(c).max(1);
            };
            let diff = i32::from(byte) - i32::from(c);
            if diff != 0 {
                return diff;
            }
        }
        0
    }

    /// `true` when the slice begins with `prefix`.
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.prefix_compare(prefix) == 0
    }

    /// Leftmost occurrence of `needle`.
    ///
    /// Returns an empty slice positioned at this slice's start when there is
    /// no match or when `needle` is empty.
    ///
    /// The scan is a single forward pass: a mismatch after `k` matched bytes
    /// steps the cursor back to one past where the partial match began. This
    /// is `O(len * needle.len())` in the worst case, which is fine for the
    /// short protocol tokens it is meant for.
    #[must_use]
    pub fn find(&self, needle: impl AsRef<[u8]>) -> Self {
        let needle = needle.as_ref();
        let mut cursor = self.cursor();
        let mut matched = 0;

        while cursor.get() != self.last && matched < needle.len() {
            if self.buf[cursor.get()] == needle[matched] {
                matched += 1;
            } else {
                cursor = cursor.retreat(matched);
                matched = 0;
            }
            cursor = cursor.advance(1);
        }

        if needle.is_empty() || matched < needle.len() {
            return self.empty_at_first();
        }

        Self {
            buf: self.buf,
            first: cursor.retreat(matched).get(),
            last: cursor.get(),
        }
    }

    /// Everything from the start of this slice up to and including the first
    /// `suffix` found at or after index `from`.
    ///
    /// Returns an empty slice when `suffix` is empty or not found.
    ///
    /// ```rust
    /// use ringslice::RingSlice;
    ///
    /// let ring = *b"\r\nOK\r\n+CSQ: 20,0";
    /// let rs = RingSlice::new(&ring, 6, 4);
    /// assert_eq!(rs.subslice_with_suffix(0, "OK"), "+CSQ: 20,0\r\nOK");
    /// ```
    ///
    /// # Panics
    ///
    /// Raises contract violation 204 when `from > self.len()`.
    #[track_caller]
    #[must_use]
    pub fn subslice_with_suffix(&self, from: usize, suffix: impl AsRef<[u8]>) -> Self {
        let len = self.len();
        require!(SUFFIX_FROM_IN_RANGE, from <= len);
        if from == len {
            return self.empty_at_first();
        }

        let found = self.subslice(from, len).find(suffix);
        if found.is_empty() {
            return self.empty_at_first();
        }
        Self {
            buf: self.buf,
            first: self.first,
            last: found.last,
        }
    }
}

impl PartialEq for RingSlice<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for RingSlice<'_> {}

impl PartialOrd for RingSlice<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by content, like byte strings.
impl Ord for RingSlice<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

macro_rules! impl_literal_eq {
    ($($ty:ty),* $(,)?) => {$(
        impl PartialEq<$ty> for RingSlice<'_> {
            fn eq(&self, other: &$ty) -> bool {
                let other: &[u8] = other.as_ref();
                self.len() == other.len() && self.compare(other) == 0
            }
        }
    )*};
}

impl_literal_eq!(str, &str, [u8], &[u8]);

impl<const N: usize> PartialEq<[u8; N]> for RingSlice<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.len() == N && self.compare(other) == 0
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for RingSlice<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests;
