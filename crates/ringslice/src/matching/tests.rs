use rstest::rstest;

use crate::{
    RingSlice,
    tests::{last_of, ring_with},
};

const CONTIGUOUS: &[u8; 10] = b"abcdefghij";
const WRAPPED: &[u8; 10] = b"efghijabcd";

/// "Hello World!" in a 22-byte ring, wrapped after "Hell".
fn hello_world() -> ([u8; 22], usize, usize) {
    let mut buf = [0u8; 22];
    let end = b"o World!";
    let beg = b"Hell";
    let last = end.len();
    let first = buf.len() - beg.len();
    buf[..end.len()].copy_from_slice(end);
    buf[first..].copy_from_slice(beg);
    (buf, first, last)
}

#[test]
fn compare_simple() {
    let (buf, first, last) = hello_world();
    let rs = RingSlice::new(&buf, first, last);

    assert_eq!(rs.compare("Hello World!"), 0);
    assert!(rs.compare("Hello!") < 0);
    assert!(rs.compare("Hello there") < 0);
    assert!(rs.compare("Hello") > 0);
    assert!(rs.compare("Hello Nick") > 0);
    assert!(rs.compare("Hello World! ") < 0);
}

#[test]
fn compare_every_wrap_point_and_capacity() {
    let text = b"Hello World!";
    for split in 0..text.len() {
        for capacity in text.len() + 1..text.len() + 21 {
            let first = (capacity - split) % capacity;
            let ring = ring_with(text, capacity, first);
            let rs = RingSlice::new(&ring, first, last_of(text, capacity, first));

            assert_eq!(rs.compare(text), 0, "split {split} capacity {capacity}");
            assert!(rs.compare("Hello!") < 0);
            assert!(rs.compare("Hello there") < 0);
            assert!(rs.compare("Hello") > 0);
            assert!(rs.compare("Hello Nick") > 0);
            assert!(rs.compare("Hello World! ") < 0);
        }
    }
}

#[test]
fn compare_magnitude_is_unsigned_byte_difference() {
    let ring = *b"a\xf0c_";
    let rs = RingSlice::new(&ring, 0, 3);
    assert_eq!(rs.compare(b"a\x10c"), 0xf0 - 0x10);
    assert_eq!(rs.compare(b"a\xffc"), 0xf0 - 0xff);
}

#[test]
fn compare_treats_exhaustion_as_ordering() {
    let ring = *b"ab\0_";
    let rs = RingSlice::new(&ring, 0, 3);
    // the slice is longer even though its extra byte is NUL
    assert!(rs.compare("ab") > 0);
    assert!(rs.compare(b"ab\0") == 0);
    assert!(rs.compare(b"ab\0\0") < 0);
}

#[test]
fn empty_slice_orders_first() {
    let rs = RingSlice::new(CONTIGUOUS, 4, 4);
    assert_eq!(rs.compare(""), 0);
    assert!(rs.compare("a") < 0);
    assert!(rs.compare("\x01") < 0);
    assert_eq!(rs.prefix_compare(""), 0);
}

#[test]
fn prefix_compare_wrapped() {
    let (buf, first, last) = hello_world();
    let rs = RingSlice::new(&buf, first, last);

    assert_eq!(rs.prefix_compare("Hello World!"), 0);
    assert_eq!(rs.prefix_compare("Hello World"), 0);
    assert_eq!(rs.prefix_compare("Hello W"), 0);
    assert_eq!(rs.prefix_compare("Hello "), 0);
    assert_eq!(rs.prefix_compare("Hello"), 0);
    assert!(rs.prefix_compare("Hello!") < 0);
    assert!(rs.prefix_compare("Hello there") < 0);
    assert!(rs.prefix_compare("Hello Nick") > 0);
    assert!(rs.prefix_compare("Hello World! ") < 0);

    assert!(rs.starts_with("Hell"));
    assert!(!rs.starts_with("Help"));
}

#[rstest]
#[case("abc")]
#[case("cd")]
#[case("defg")]
#[case("fghi")]
#[case("a")]
#[case("abcdefghi")]
fn find_present(#[case] needle: &str) {
    for rs in [
        RingSlice::new(CONTIGUOUS, 0, 9),
        RingSlice::new(WRAPPED, 6, 5),
    ] {
        let found = rs.find(needle);
        assert_eq!(found, needle, "{rs:?}");
        assert_eq!(found.compare(needle), 0);
    }
}

#[rstest]
#[case("cdfgh")]
#[case("j")]
#[case("abcdefghij")]
#[case("ia")]
fn find_absent(#[case] needle: &str) {
    for rs in [
        RingSlice::new(CONTIGUOUS, 0, 9),
        RingSlice::new(WRAPPED, 6, 5),
    ] {
        let found = rs.find(needle);
        assert!(found.is_empty());
        assert_eq!(found.first(), rs.first());
        // an empty slice is the empty string, less than any needle
        assert!(found.compare(needle) < 0);
    }
}

#[test]
fn find_empty_needle_is_empty_at_start() {
    let rs = RingSlice::new(WRAPPED, 6, 5);
    let found = rs.find("");
    assert!(found.is_empty());
    assert_eq!((found.first(), found.last()), (6, 6));
}

#[test]
fn find_in_empty_slice() {
    let rs = RingSlice::new(WRAPPED, 3, 3);
    assert!(rs.find("e").is_empty());
    assert!(rs.find("").is_empty());
}

#[test]
fn find_partial_match_adjacent_to_wrap() {
    // 'a' is not part of the slice: "bfgh" + "fghij"
    let ring = *b"fghijabfgh";
    let rs = RingSlice::new(&ring, 6, 5);

    let found = rs.find("fghi");
    assert_eq!(found, "fghi");
    assert_eq!((found.first(), found.last()), (0, 4));
}

#[test]
fn find_restarts_inside_a_partial_match() {
    let ring = *b"aaab__";
    let rs = RingSlice::new(&ring, 0, 4);
    let found = rs.find("aab");
    assert_eq!((found.first(), found.last()), (1, 4));

    let ring = *b"b__aaa";
    let rs = RingSlice::new(&ring, 3, 1);
    let found = rs.find("aab");
    assert_eq!((found.first(), found.last()), (4, 1));
}

#[test]
fn find_returns_leftmost() {
    let ring = *b"OK\r\nOK\r\n_";
    let rs = RingSlice::new(&ring, 0, 8);
    let found = rs.find("OK");
    assert_eq!((found.first(), found.last()), (0, 2));
}

#[test]
fn suffix_contiguous() {
    let rs = RingSlice::new(CONTIGUOUS, 0, 9);
    assert_eq!(rs.subslice_with_suffix(0, "hi"), "abcdefghi");
    assert_eq!(rs.subslice_with_suffix(0, "c"), "abc");
}

#[test]
fn suffix_wrapped() {
    let rs = RingSlice::new(WRAPPED, 6, 5);
    assert_eq!(rs.subslice_with_suffix(0, "hi"), "abcdefghi");
    assert_eq!(rs.subslice_with_suffix(2, "de"), "abcde");
}

#[test]
fn suffix_search_starts_at_from() {
    let ring = *b"OK\r\nOK\r\n_";
    let rs = RingSlice::new(&ring, 0, 8);
    assert_eq!(rs.subslice_with_suffix(0, "OK"), "OK");
    assert_eq!(rs.subslice_with_suffix(1, "OK"), "OK\r\nOK");
    assert!(rs.subslice_with_suffix(5, "OK").is_empty());
}

#[test]
fn suffix_absent_or_empty() {
    let rs = RingSlice::new(WRAPPED, 6, 5);
    for suffix in ["", "xy", "ab"] {
        let found = rs.subslice_with_suffix(1, suffix);
        assert!(found.is_empty(), "{suffix:?}");
        assert_eq!(found.first(), rs.first());
    }
    assert!(rs.subslice_with_suffix(rs.len(), "i").is_empty());
}

#[test]
#[should_panic(expected = "ringslice:204 precondition violated")]
fn suffix_from_past_end() {
    let rs = RingSlice::new(WRAPPED, 6, 5);
    let _ = rs.subslice_with_suffix(10, "i");
}

#[test]
fn content_equality_and_ordering_between_slices() {
    let a = RingSlice::new(CONTIGUOUS, 0, 9);
    let b = RingSlice::new(WRAPPED, 6, 5);
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), core::cmp::Ordering::Equal);

    let shorter = b.subslice(0, 4);
    assert!(shorter < a);
    assert!(a.subslice(1, 2) > a);

    assert_eq!(b, *b"abcdefghi");
    assert_eq!(b, &b"abcdefghi"[..]);
    assert_ne!(b, "abcdefgh");
}
