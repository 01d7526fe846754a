//! Formatted extraction: a restricted `scanf` that reads a [`RingSlice`] in
//! place.
//!
//! Supported directives:
//! - whitespace in the template skips any run of input whitespace, including
//!   none;
//! - any other ordinary byte must match the input exactly;
//! - `%d` reads an optionally signed decimal integer;
//! - `%x` / `%X` reads a hexadecimal integer, with an optional `0x` prefix;
//! - `%[set]` / `%[^set]` reads a non-empty run of bytes in (or not in) `set`;
//! - `%%` matches a literal `%`.
//!
//! Conversions accept a maximum field width (`%15[^"]`) and `*` to consume a
//! field without assigning it (`%*d`). Numeric conversions skip leading
//! whitespace; scansets do not.
//!
//! Scanning stops at the first directive that does not match. The result is
//! the number of slots assigned up to that point; later slots are left
//! untouched.

mod arg;
mod options;
mod template;

pub use arg::Arg;
pub use options::ScanOptions;
use template::{Conversion, ConversionKind, Directive, Directives, is_space};

use crate::{
    RingSlice, TemplateError,
    contract::{Kind, SLOT_CAPACITY, SLOT_KIND, SLOT_PRESENT, TEMPLATE_WELL_FORMED, require, violated},
};

/// Parses a whole template up front and returns how many slots a scan with it
/// would need.
///
/// ```rust
/// use ringslice::{TemplateError, validate_template};
///
/// assert_eq!(validate_template("+CMGR: %d \"%15[A-Z ]\",%*d"), Ok(2));
/// assert_eq!(validate_template("%15[^\""), Err(TemplateError::UnterminatedScanset(3)));
/// ```
pub fn validate_template(template: impl AsRef<[u8]>) -> Result<usize, TemplateError> {
    Directives::new(template.as_ref()).try_fold(0, |slots, directive| {
        Ok(match directive? {
            Directive::Conversion(Conversion {
                suppress: false, ..
            }) => slots + 1,
            _ => slots,
        })
    })
}

impl RingSlice<'_> {
    /// Reads fields described by `template` into `args`, returning how many
    /// were assigned.
    ///
    /// Uses the default [`ScanOptions`]. The [`scan!`](crate::scan!) macro
    /// builds the `args` array from plain references.
    ///
    /// ```rust
    /// use ringslice::{RingSlice, scan};
    ///
    /// // "+CMGR: 42 \"REC UNREAD\", 15 " wrapped inside the ring
    /// let ring = *b"C UNREAD\", 15  +CMGR: 42 \"RE";
    /// let rs = RingSlice::new(&ring, 15, 14);
    ///
    /// let (mut index, mut length) = (0i32, 0u32);
    /// let mut status = [0u8; 16];
    /// let assigned = scan!(rs, "+CMGR: %d \"%15[A-Z ]\",%d", &mut index, &mut status, &mut length);
    /// assert_eq!(assigned, 3);
    /// assert_eq!((index, length), (42, 15));
    /// assert_eq!(&status[..11], b"REC UNREAD\0");
    /// ```
    ///
    /// # Panics
    ///
    /// Raises contract violations when the scan reaches a malformed directive
    /// (301), runs out of slots (302), meets a slot of the wrong kind (303) or
    /// a byte slot too small for the field width and terminator (304).
    pub fn scan(&self, template: impl AsRef<[u8]>, args: &mut [Arg<'_>]) -> usize {
        self.scan_with(ScanOptions::default(), template, args)
    }

    /// [`scan`](Self::scan) with explicit options.
    pub fn scan_with(
        &self,
        options: ScanOptions,
        template: impl AsRef<[u8]>,
        args: &mut [Arg<'_>],
    ) -> usize {
        Scanner {
            rest: *self,
            options,
            args,
            next_arg: 0,
            assigned: 0,
        }
        .run(template.as_ref())
    }
}

struct Scanner<'s, 'a, 'o> {
    /// Input not consumed yet.
    rest: RingSlice<'a>,
    options: ScanOptions,
    args: &'s mut [Arg<'o>],
    next_arg: usize,
    assigned: usize,
}

type Step = Result<(), &'static str>;

impl<'a> Scanner<'_, 'a, '_> {
    fn run(mut self, template: &[u8]) -> usize {
        for (index, directive) in Directives::new(template).enumerate() {
            let directive = match directive {
                Ok(directive) => directive,
                Err(err) => {
                    log::error!("malformed scan template: {err}");
                    violated(Kind::Require, TEMPLATE_WELL_FORMED)
                }
            };
            if let Err(reason) = self.step(directive) {
                log::trace!(
                    "scan stopped at directive {index}: {reason}; {} assigned, rest {:?}",
                    self.assigned,
                    self.rest,
                );
                break;
            }
        }
        self.assigned
    }

    fn step(&mut self, directive: Directive<'_>) -> Step {
        match directive {
            Directive::Whitespace => {
                self.skip_whitespace();
                Ok(())
            }
            Directive::Literal(bytes) => self.literal(bytes),
            Directive::Percent => {
                self.skip_whitespace();
                self.literal(b"%")
            }
            Directive::Conversion(conversion) => self.convert(conversion),
        }
    }

    fn peek(&self, n: usize) -> Option<u8> {
        self.rest.iter().nth(n)
    }

    fn consume(&mut self, n: usize) {
        self.rest = self.rest.split_at(n).1;
    }

    /// Consumes and returns the longest run of at most `limit` bytes matching
    /// `pred`.
    fn take_while(&mut self, limit: usize, pred: impl Fn(u8) -> bool) -> RingSlice<'a> {
        let n = self.rest.iter().take(limit).take_while(|&b| pred(b)).count();
        let (head, tail) = self.rest.split_at(n);
        self.rest = tail;
        head
    }

    fn skip_whitespace(&mut self) {
        self.take_while(usize::MAX, is_space);
    }

    fn literal(&mut self, bytes: &[u8]) -> Step {
        if self.rest.prefix_compare(bytes) != 0 {
            return Err("literal mismatch");
        }
        self.consume(bytes.len());
        Ok(())
    }

    /// Reserves the next slot for `kind`, checking that it fits.
    fn claim_slot(&mut self, kind: &ConversionKind) -> usize {
        let index = self.next_arg;
        require!(SLOT_PRESENT, index < self.args.len());
        let wants_integer = !matches!(kind, ConversionKind::Scanset(_));
        require!(SLOT_KIND, self.args[index].is_integer() == wants_integer);
        self.next_arg += 1;
        index
    }

    fn convert(&mut self, conversion: Conversion) -> Step {
        let slot = (!conversion.suppress).then(|| self.claim_slot(&conversion.kind));

        match conversion.kind {
            ConversionKind::Decimal => {
                let value = self.decimal(conversion.width)?;
                if let Some(index) = slot {
                    if !self.args[index].store_decimal(value) {
                        return Err("decimal out of range for slot");
                    }
                }
            }
            ConversionKind::Hex => {
                let value = self.hex(conversion.width)?;
                if let Some(index) = slot {
                    if !self.args[index].store_hex(value) {
                        return Err("hex out of range for slot");
                    }
                }
            }
            ConversionKind::Scanset(set) => {
                let width = match (conversion.width, slot.map(|index| &self.args[index])) {
                    (Some(width), Some(Arg::Bytes(out))) => {
                        require!(SLOT_CAPACITY, out.len() > width);
                        width
                    }
                    (None, Some(Arg::Bytes(out))) => {
                        require!(SLOT_CAPACITY, !out.is_empty());
                        out.len() - 1
                    }
                    (width, _) => width.unwrap_or(usize::MAX),
                };

                let field = self.take_while(width, |b| set.contains(b));
                if field.is_empty() {
                    return Err("empty scanset field");
                }
                if let Some(index) = slot {
                    if let Arg::Bytes(out) = &mut self.args[index] {
                        for (dst, byte) in out.iter_mut().zip(field) {
                            *dst = byte;
                        }
                        out[field.len()] = 0;
                    }
                }
            }
        }

        if slot.is_some() {
            self.assigned += 1;
        }
        Ok(())
    }

    fn leading_whitespace(&mut self) {
        if !self.options.keep_leading_whitespace {
            self.skip_whitespace();
        }
    }

    fn decimal(&mut self, width: Option<usize>) -> Result<i128, &'static str> {
        self.leading_whitespace();
        let mut limit = width.unwrap_or(usize::MAX);

        let negative = match self.peek(0) {
            Some(sign @ (b'+' | b'-')) => {
                self.consume(1);
                limit -= 1;
                sign == b'-'
            }
            _ => false,
        };

        let digits = self.take_while(limit, |b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err("no decimal digits");
        }
        let magnitude = digits
            .iter()
            .try_fold(0u64, |acc, b| {
                acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
            })
            .ok_or("decimal overflow")?;

        let value = i128::from(magnitude);
        Ok(if negative { -value } else { value })
    }

    fn hex(&mut self, width: Option<usize>) -> Result<u64, &'static str> {
        self.leading_whitespace();
        let mut limit = width.unwrap_or(usize::MAX);

        let prefixed = !self.options.reject_hex_prefix
            && limit > 2
            && self.peek(0) == Some(b'0')
            && matches!(self.peek(1), Some(b'x' | b'X'))
            && self.peek(2).is_some_and(|b| b.is_ascii_hexdigit());
        if prefixed {
            self.consume(2);
            limit -= 2;
        }

        let digits = self.take_while(limit, |b| b.is_ascii_hexdigit());
        if digits.is_empty() {
            return Err("no hex digits");
        }
        digits
            .iter()
            .try_fold(0u64, |acc, b| {
                acc.checked_mul(16)?
                    .checked_add(u64::from(char::from(b).to_digit(16)?))
            })
            .ok_or("hex overflow")
    }
}
