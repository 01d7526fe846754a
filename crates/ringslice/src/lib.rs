//! String-like slices over a circular byte buffer.
//!
//! A device driver or interrupt handler fills a fixed ring with bytes from a
//! modem or serial port; the consumer wraps the bytes it wants to look at in a
//! [`RingSlice`] and compares, searches and scans them in place, even when the
//! response wraps past the physical end of the ring. Nothing is copied into a
//! linear buffer and nothing allocates.
//!
//! ```rust
//! use ringslice::{RingSlice, scan};
//!
//! // "+CREG: 1, 2, 0xFFEF" with the wrap after "+CRE"
//! let ring = *b"G: 1, 2, 0xFFEF +CRE";
//! let rs = RingSlice::new(&ring, 16, 15);
//! assert!(rs.starts_with("+CREG:"));
//!
//! let (mut n, mut stat, mut lac) = (0i64, 0i64, 0i64);
//! assert_eq!(scan!(rs, "+CREG:%d,%d,%x\n", &mut n, &mut stat, &mut lac), 3);
//! assert_eq!((n, stat, lac), (1, 2, 0xFFEF));
//! ```
//!
//! Precondition failures (offsets outside the ring, indexing past the end,
//! malformed scan templates) are contract violations; see [`contract`].

#![no_std]

#[cfg(test)]
extern crate std;

pub mod contract;
mod error;
mod matching;
#[cfg(not(feature = "fuzzing"))]
mod offset;
#[cfg(feature = "fuzzing")]
pub mod offset;
mod scan;
mod slice;

#[cfg(test)]
mod tests;

pub use error::TemplateError;
pub use scan::{Arg, ScanOptions, validate_template};
pub use slice::{Bytes, RingSlice};

/// Scans a [`RingSlice`] into plain references, wrapping each one in an
/// [`Arg`].
///
/// ```rust
/// use ringslice::{RingSlice, scan};
///
/// let ring = *b"\"REC UNREAD\"  +CMGR: ";
/// let rs = RingSlice::new(&ring, 14, 12);
/// let mut status = [0u8; 16];
/// assert_eq!(scan!(rs, "+CMGR: \"%15[^\"]\"", &mut status), 1);
/// assert_eq!(&status[..11], b"REC UNREAD\0");
/// ```
#[macro_export]
macro_rules! scan {
    ($slice:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $slice.scan($template, &mut [$($crate::Arg::from($arg)),*])
    };
}
