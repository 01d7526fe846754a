/// Knobs for [`RingSlice::scan_with`](crate::RingSlice::scan_with).
///
/// # Examples
///
/// ```rust
/// use ringslice::{Arg, RingSlice, ScanOptions, scan};
///
/// let ring = *b"+CSQ: 0x1F_";
/// let rs = RingSlice::new(&ring, 0, 10);
///
/// let mut rssi = 0u32;
/// assert_eq!(scan!(rs, "+CSQ: %x", &mut rssi), 1);
/// assert_eq!(rssi, 0x1F);
///
/// let strict = ScanOptions {
///     reject_hex_prefix: true,
///     ..Default::default()
/// };
/// assert_eq!(rs.scan_with(strict, "+CSQ: %x", &mut [Arg::from(&mut rssi)]), 1);
/// assert_eq!(rssi, 0);
/// ```
///
/// # Default
///
/// All options default to `false`, which gives C `scanf` behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Whether `%x` refuses a leading `0x` or `0X`.
    ///
    /// By default a `0x`/`0X` followed by a hex digit is skipped, so
    /// `0xFFEF` reads as `0xFFEF`. With this set the conversion stops at the
    /// `x` and yields `0`.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_hex_prefix: bool,

    /// Whether `%d` and `%x` must start right at the current input byte.
    ///
    /// By default numeric conversions skip leading whitespace first, like
    /// `scanf`. Scansets never skip whitespace.
    ///
    /// # Default
    ///
    /// `false`
    pub keep_leading_whitespace: bool,
}
