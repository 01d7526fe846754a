//! The view core: a borrowed window over a circular byte buffer.

use core::{
    fmt,
    iter::{Chain, Copied, FusedIterator},
    slice,
};

use bstr::BStr;

use crate::{
    contract::{
        BUFFER_HOLDS_CAPACITY, CAPACITY_NON_ZERO, FIRST_IN_RANGE, LAST_IN_RANGE,
        NTH_BYTE_IN_RANGE, SPLIT_IN_RANGE, SUBSLICE_FIRST_IN_RANGE, SUBSLICE_LAST_IN_RANGE,
        SUBSLICE_ORDERED, require,
    },
    offset::Wrapping,
};

/// A window `[first, last)` over a ring buffer, possibly wrapping past its
/// physical end.
///
/// `first == last` is the empty slice, so a slice can hold at most
/// `capacity - 1` bytes. The slice never copies or mutates the ring; every
/// narrowing operation returns a new `RingSlice` over the same storage.
///
/// ```rust
/// use ringslice::RingSlice;
///
/// // "abcdefghi" stored with a wrap after 'd'
/// let ring = *b"efghijabcd";
/// let rs = RingSlice::new(&ring, 6, 5);
/// assert_eq!(rs.len(), 9);
/// assert_eq!(rs, "abcdefghi");
/// assert_eq!(rs.find("cdef"), "cdef");
/// ```
#[derive(Clone, Copy)]
pub struct RingSlice<'a> {
    pub(crate) buf: &'a [u8],
    pub(crate) first: usize,
    pub(crate) last: usize,
}

impl<'a> RingSlice<'a> {
    /// Creates a slice over the whole of `buf`, from `first` up to (not
    /// including) `last`.
    #[track_caller]
    pub fn new(buf: &'a [u8], first: usize, last: usize) -> Self {
        Self::with_capacity(buf, buf.len(), first, last)
    }

    /// Creates a slice over a ring that occupies the first `capacity` bytes of
    /// `buf`.
    #[track_caller]
    pub fn with_capacity(buf: &'a [u8], capacity: usize, first: usize, last: usize) -> Self {
        require!(BUFFER_HOLDS_CAPACITY, capacity <= buf.len());
        require!(CAPACITY_NON_ZERO, capacity > 0);
        require!(FIRST_IN_RANGE, first < capacity);
        require!(LAST_IN_RANGE, last < capacity);
        Self {
            buf: &buf[..capacity],
            first,
            last,
        }
    }

    /// Physical offset of the first byte.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Physical offset one past the last byte.
    #[inline]
    pub fn last(&self) -> usize {
        self.last
    }

    /// Size of the underlying ring.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes in the slice.
    #[inline]
    pub fn len(&self) -> usize {
        let capacity = self.capacity();
        (capacity + self.last - self.first) % capacity
    }

    /// `true` when the slice holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }

    /// `true` when the bytes do not wrap past the physical end of the ring.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.first <= self.last
    }

    /// Byte at index `n`, counted from the start of the slice.
    ///
    /// # Panics
    ///
    /// Raises contract violation 104 when `n >= self.len()`.
    #[track_caller]
    pub fn nth_byte(&self, n: usize) -> u8 {
        require!(NTH_BYTE_IN_RANGE, n < self.len());
        self.buf[self.cursor().advance(n).get()]
    }

    /// The bytes `[rel_first, rel_last)` of this slice.
    ///
    /// # Panics
    ///
    /// Raises contract violations 101 to 103 unless
    /// `rel_first <= rel_last`, `rel_first < len` and `rel_last <= len`.
    #[track_caller]
    #[must_use]
    pub fn subslice(&self, rel_first: usize, rel_last: usize) -> Self {
        let len = self.len();
        require!(SUBSLICE_ORDERED, rel_first <= rel_last);
        require!(SUBSLICE_FIRST_IN_RANGE, rel_first < len);
        require!(SUBSLICE_LAST_IN_RANGE, rel_last <= len);
        let capacity = self.capacity();
        Self {
            buf: self.buf,
            first: (self.first + rel_first) % capacity,
            last: (self.first + rel_last) % capacity,
        }
    }

    /// Splits into `[0, mid)` and `[mid, len)`. Either half may be empty.
    ///
    /// # Panics
    ///
    /// Raises contract violation 105 when `mid > self.len()`.
    #[track_caller]
    pub fn split_at(&self, mid: usize) -> (Self, Self) {
        require!(SPLIT_IN_RANGE, mid <= self.len());
        let at = self.cursor().advance(mid).get();
        (
            Self {
                buf: self.buf,
                first: self.first,
                last: at,
            },
            Self {
                buf: self.buf,
                first: at,
                last: self.last,
            },
        )
    }

    /// The slice content as two physical runs; the second is empty unless the
    /// slice wraps.
    pub fn as_slices(&self) -> (&'a [u8], &'a [u8]) {
        if self.is_contiguous() {
            (&self.buf[self.first..self.last], &[])
        } else {
            (&self.buf[self.first..], &self.buf[..self.last])
        }
    }

    /// Iterates over the bytes in logical order.
    pub fn iter(&self) -> Bytes<'a> {
        let (front, back) = self.as_slices();
        Bytes {
            inner: front.iter().chain(back.iter()).copied(),
        }
    }

    /// Empty slice positioned at this slice's start.
    #[inline]
    pub(crate) fn empty_at_first(&self) -> Self {
        Self {
            buf: self.buf,
            first: self.first,
            last: self.first,
        }
    }

    #[inline]
    pub(crate) fn cursor(&self) -> Wrapping {
        Wrapping::new(self.first, self.capacity())
    }
}

impl<'a> IntoIterator for RingSlice<'a> {
    type Item = u8;
    type IntoIter = Bytes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &RingSlice<'a> {
    type Item = u8;
    type IntoIter = Bytes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the bytes of a [`RingSlice`].
#[derive(Clone, Debug)]
pub struct Bytes<'a> {
    inner: Copied<Chain<slice::Iter<'a, u8>, slice::Iter<'a, u8>>>,
}

impl Iterator for Bytes<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Bytes<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<u8> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Bytes<'_> {}

impl FusedIterator for Bytes<'_> {}

impl fmt::Debug for RingSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Escaped<'s, 'a>(&'s RingSlice<'a>);

        impl fmt::Debug for Escaped<'_, '_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let (front, back) = self.0.as_slices();
                write!(f, "\"{}{}\"", front.escape_ascii(), back.escape_ascii())
            }
        }

        f.debug_struct("RingSlice")
            .field("first", &self.first)
            .field("last", &self.last)
            .field("capacity", &self.capacity())
            .field("data", &Escaped(self))
            .finish()
    }
}

/// Writes the content as UTF-8, replacing invalid sequences. A multi-byte
/// character split by the wrap point renders as replacement characters.
impl fmt::Display for RingSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (front, back) = self.as_slices();
        write!(f, "{}{}", BStr::new(front), BStr::new(back))
    }
}
