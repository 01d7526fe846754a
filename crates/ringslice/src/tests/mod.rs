use std::vec::Vec;


/// Lays `content` out in a ring of `capacity` bytes starting at `first`,
/// wrapping past the end. Unused bytes are `_`.
pub(crate) fn ring_with(content: &[u8], capacity: usize, first: usize) -> Vec<u8> {
    assert!(content.len() < capacity, "content must leave one slot free");
    let mut ring = std::vec![b'_'; capacity];
    for (i, &byte) in content.iter().enumerate() {
        ring[(first + i) % capacity] = byte;
    }
    ring
}

/// Last offset of `content` laid out by [`ring_with`].
pub(crate) fn last_of(content: &[u8], capacity: usize, first: usize) -> usize {
    (first + content.len()) % capacity
}
