#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ringslice::{Arg, RingSlice, ScanOptions, validate_template};

/// One template directive, always well formed.
#[derive(Arbitrary, Debug)]
enum Piece {
    Space,
    Literal(u8),
    Percent,
    Decimal { suppress: bool, width: Option<u8> },
    Hex { suppress: bool, width: Option<u8> },
    Scanset { suppress: bool, negate: bool, lo: u8, hi: u8, width: Option<u8> },
}

#[derive(Arbitrary, Debug)]
struct Input {
    ring: Vec<u8>,
    first: u16,
    last: u16,
    pieces: Vec<Piece>,
    reject_hex_prefix: bool,
    keep_leading_whitespace: bool,
}

enum Slot {
    Number,
    Bytes(usize),
}

fn width(out: &mut Vec<u8>, width: Option<u8>) -> Option<usize> {
    let width = width.map(|w| usize::from(w % 16) + 1);
    if let Some(w) = width {
        out.extend_from_slice(w.to_string().as_bytes());
    }
    width
}

/// Renders `pieces` into a template and lists the slots it assigns.
fn render(pieces: &[Piece]) -> (Vec<u8>, Vec<Slot>) {
    let mut template = Vec::new();
    let mut slots = Vec::new();
    for piece in pieces {
        match *piece {
            Piece::Space => template.push(b' '),
            Piece::Literal(b) => {
                let b = b'!' + b % 90;
                template.push(if b == b'%' { b'#' } else { b });
            }
            Piece::Percent => template.extend_from_slice(b"%%"),
            Piece::Decimal { suppress, width: w } | Piece::Hex { suppress, width: w } => {
                template.push(b'%');
                if suppress {
                    template.push(b'*');
                } else {
                    slots.push(Slot::Number);
                }
                width(&mut template, w);
                template.push(if matches!(piece, Piece::Decimal { .. }) { b'd' } else { b'x' });
            }
            Piece::Scanset { suppress, negate, lo, hi, width: w } => {
                template.push(b'%');
                if suppress {
                    template.push(b'*');
                }
                let w = width(&mut template, w);
                if !suppress {
                    slots.push(Slot::Bytes(w.map_or(8, |w| w + 1)));
                }
                template.push(b'[');
                if negate {
                    template.push(b'^');
                }
                let (lo, hi) = (b'0' + lo % 75, b'0' + hi % 75);
                template.extend_from_slice(&[lo, b'-', hi, b']']);
            }
        }
    }
    (template, slots)
}

fn scan(input: &Input) {
    if input.ring.is_empty() {
        return;
    }
    let capacity = input.ring.len();
    let rs = RingSlice::new(
        &input.ring,
        usize::from(input.first) % capacity,
        usize::from(input.last) % capacity,
    );

    let (template, slots) = render(&input.pieces);
    assert_eq!(validate_template(&template), Ok(slots.len()));

    let mut numbers = vec![0i64; slots.len()];
    let mut buffers: Vec<Vec<u8>> = slots
        .iter()
        .map(|slot| match slot {
            Slot::Number => Vec::new(),
            Slot::Bytes(len) => vec![0xAA; *len],
        })
        .collect();
    let mut args: Vec<Arg<'_>> = slots
        .iter()
        .zip(numbers.iter_mut().zip(buffers.iter_mut()))
        .map(|(slot, (number, buffer))| match slot {
            Slot::Number => Arg::from(number),
            Slot::Bytes(_) => Arg::from(buffer.as_mut_slice()),
        })
        .collect();

    let options = ScanOptions {
        reject_hex_prefix: input.reject_hex_prefix,
        keep_leading_whitespace: input.keep_leading_whitespace,
    };
    let assigned = rs.scan_with(options, &template, &mut args);
    assert!(assigned <= slots.len());

    for (slot, buffer) in slots.iter().zip(&buffers).take(assigned) {
        if let Slot::Bytes(_) = slot {
            assert!(buffer.contains(&0), "scanset field is terminated");
        }
    }
}

fuzz_target!(|input: Input| scan(&input));
