#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ringslice::{RingSlice, offset::Wrapping};

/// A ring plus offsets, reduced modulo the capacity so every input is a valid
/// window.
#[derive(Arbitrary, Debug)]
struct Window {
    ring: Vec<u8>,
    first: u16,
    last: u16,
    needle: Vec<u8>,
    from: u16,
    step: u16,
}

/// The window's content copied out into a linear buffer.
fn linearize(ring: &[u8], first: usize, last: usize) -> Vec<u8> {
    if first <= last {
        ring[first..last].to_vec()
    } else {
        [&ring[first..], &ring[..last]].concat()
    }
}

fn leftmost(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn matching(input: &Window) {
    if input.ring.is_empty() {
        return;
    }
    // A small alphabet keeps partial matches frequent.
    let ring: Vec<u8> = input.ring.iter().map(|b| b'a' + b % 4).collect();
    let needle: Vec<u8> = input.needle.iter().map(|b| b'a' + b % 4).collect();
    let capacity = ring.len();
    let first = usize::from(input.first) % capacity;
    let last = usize::from(input.last) % capacity;

    let rs = RingSlice::new(&ring, first, last);
    let content = linearize(&ring, first, last);
    assert_eq!(rs.len(), content.len());
    assert_eq!(rs.iter().collect::<Vec<_>>(), content);

    let found = rs.find(&needle);
    match leftmost(&content, &needle) {
        Some(at) => {
            assert_eq!(found, needle.as_slice());
            assert_eq!(found.first(), (first + at) % capacity);
        }
        None => assert!(found.is_empty() && found.first() == first),
    }

    assert_eq!(rs.compare(&needle).signum(), content.cmp(&needle) as i32);
    assert_eq!(rs.prefix_compare(&needle) == 0, content.starts_with(&needle));

    let from = usize::from(input.from) % (content.len() + 1);
    let upto = rs.subslice_with_suffix(from, &needle);
    match leftmost(&content[from..], &needle) {
        Some(at) => assert_eq!(upto, content[..from + at + needle.len()]),
        None => assert!(upto.is_empty()),
    }

    let by = usize::from(input.step) % (capacity + 1);
    let pos = Wrapping::new(first, capacity);
    assert_eq!(pos.advance(by).get(), (first + by) % capacity);
    assert_eq!(pos.advance(by).retreat(by), pos);
}

fuzz_target!(|input: Window| matching(&input));
