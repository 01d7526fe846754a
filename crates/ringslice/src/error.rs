use thiserror::Error;

/// Why a scan template could not be parsed. Offsets count bytes from the
/// start of the template.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateError {
    /// The template stops after `%`, a width or `*`.
    #[error("template ends inside the conversion starting at byte {0}")]
    UnexpectedEnd(usize),
    /// A conversion other than `d`, `x`, `X`, `[` or `%`.
    #[error("unknown conversion '{found}' at byte {offset}")]
    UnknownConversion {
        /// Offset of the conversion character.
        offset: usize,
        /// The conversion character, as Latin-1.
        found: char,
    },
    /// `%[` without a closing `]`.
    #[error("scanset starting at byte {0} is never closed")]
    UnterminatedScanset(usize),
    /// An explicit width of `0`.
    #[error("zero field width at byte {0}")]
    ZeroWidth(usize),
    /// A width too large to represent.
    #[error("field width at byte {0} does not fit in usize")]
    WidthOverflow(usize),
}
