//! Template grammar: splits a scan template into directives.

use crate::TemplateError;

/// One step of a scan template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Directive<'t> {
    /// Any run of template whitespace: skips any run of input whitespace.
    Whitespace,
    /// Ordinary bytes that must appear verbatim.
    Literal(&'t [u8]),
    /// `%%`: optional whitespace, then `%`.
    Percent,
    Conversion(Conversion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Conversion {
    /// `%*…`: consume input without assigning.
    pub suppress: bool,
    pub width: Option<usize>,
    pub kind: ConversionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConversionKind {
    Decimal,
    Hex,
    Scanset(Scanset),
}

/// Membership bitmap for a `%[...]` class, with negation already applied.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scanset {
    bits: [u64; 4],
}

impl Scanset {
    const EMPTY: Self = Self { bits: [0; 4] };

    fn insert(&mut self, byte: u8) {
        self.bits[usize::from(byte >> 6)] |= 1 << (byte & 63);
    }

    fn insert_range(&mut self, lo: u8, hi: u8) {
        for byte in lo..=hi {
            self.insert(byte);
        }
    }

    fn negate(&mut self) {
        for word in &mut self.bits {
            *word = !*word;
        }
    }

    #[inline]
    pub(crate) fn contains(&self, byte: u8) -> bool {
        self.bits[usize::from(byte >> 6)] & (1 << (byte & 63)) != 0
    }
}

impl core::fmt::Debug for Scanset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries((0..=u8::MAX).filter(|&b| self.contains(b)).map(char::from))
            .finish()
    }
}

pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Iterator over the directives of a template.
pub(crate) struct Directives<'t> {
    template: &'t [u8],
    pos: usize,
}

impl<'t> Directives<'t> {
    pub(crate) fn new(template: &'t [u8]) -> Self {
        Self { template, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.template.get(self.pos).copied()
    }

    fn conversion(&mut self, start: usize) -> Result<Directive<'t>, TemplateError> {
        let suppress = self.peek() == Some(b'*');
        if suppress {
            self.pos += 1;
        }

        let width_at = self.pos;
        let mut width: Option<usize> = None;
        while let Some(digit @ b'0'..=b'9') = self.peek() {
            let value = width
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|w| w.checked_add(usize::from(digit - b'0')))
                .ok_or(TemplateError::WidthOverflow(width_at))?;
            width = Some(value);
            self.pos += 1;
        }
        if width == Some(0) {
            return Err(TemplateError::ZeroWidth(width_at));
        }

        let Some(conversion) = self.peek() else {
            return Err(TemplateError::UnexpectedEnd(start));
        };
        self.pos += 1;

        let kind = match conversion {
            b'%' if !suppress && width.is_none() => return Ok(Directive::Percent),
            b'd' => ConversionKind::Decimal,
            b'x' | b'X' => ConversionKind::Hex,
            b'[' => ConversionKind::Scanset(self.scanset(self.pos - 1)?),
            other => {
                return Err(TemplateError::UnknownConversion {
                    offset: self.pos - 1,
                    found: char::from(other),
                });
            }
        };
        Ok(Directive::Conversion(Conversion {
            suppress,
            width,
            kind,
        }))
    }

    /// Parses the class after `[`, leaving `pos` after the closing `]`.
    fn scanset(&mut self, open: usize) -> Result<Scanset, TemplateError> {
        let mut set = Scanset::EMPTY;
        let negated = self.peek() == Some(b'^');
        if negated {
            self.pos += 1;
        }

        // `]` right after `[` or `[^` is a member, not the terminator.
        let mut prev: Option<u8> = None;
        if self.peek() == Some(b']') {
            set.insert(b']');
            prev = Some(b']');
            self.pos += 1;
        }

        loop {
            let Some(byte) = self.peek() else {
                return Err(TemplateError::UnterminatedScanset(open));
            };
            self.pos += 1;
            match byte {
                b']' => break,
                b'-' => match (prev, self.peek()) {
                    (Some(lo), Some(hi)) if hi != b']' && lo <= hi => {
                        set.insert_range(lo, hi);
                        self.pos += 1;
                        prev = None;
                    }
                    _ => {
                        set.insert(b'-');
                        prev = Some(b'-');
                    }
                },
                other => {
                    set.insert(other);
                    prev = Some(other);
                }
            }
        }

        if negated {
            set.negate();
        }
        Ok(set)
    }
}

impl<'t> Iterator for Directives<'t> {
    type Item = Result<Directive<'t>, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let byte = self.peek()?;
        self.pos += 1;

        if is_space(byte) {
            while self.peek().is_some_and(is_space) {
                self.pos += 1;
            }
            return Some(Ok(Directive::Whitespace));
        }
        if byte == b'%' {
            let directive = self.conversion(start);
            if directive.is_err() {
                // Stop after the first error.
                self.pos = self.template.len();
            }
            return Some(directive);
        }

        while self.peek().is_some_and(|b| b != b'%' && !is_space(b)) {
            self.pos += 1;
        }
        Some(Ok(Directive::Literal(&self.template[start..self.pos])))
    }
}
