/// Output slot for one assigning conversion of [`RingSlice::scan`].
///
/// Integer slots take `%d` and `%x`; byte slots take `%[...]` and always
/// receive a `0` terminator after the matched bytes.
///
/// [`RingSlice::scan`]: crate::RingSlice::scan
#[derive(Debug)]
pub enum Arg<'a> {
    /// 32-bit signed integer.
    I32(&'a mut i32),
    /// 64-bit signed integer.
    I64(&'a mut i64),
    /// 32-bit unsigned integer.
    U32(&'a mut u32),
    /// 64-bit unsigned integer.
    U64(&'a mut u64),
    /// Byte string output; needs room for the field plus the terminator.
    Bytes(&'a mut [u8]),
}

impl Arg<'_> {
    pub(crate) fn is_integer(&self) -> bool {
        !matches!(self, Arg::Bytes(_))
    }

    /// Stores a decimal result; fails when it is outside the slot's range.
    pub(crate) fn store_decimal(&mut self, value: i128) -> bool {
        fn put<T: TryFrom<i128>>(slot: &mut T, value: i128) -> bool {
            T::try_from(value).map(|v| *slot = v).is_ok()
        }
        match self {
            Arg::I32(slot) => put(&mut **slot, value),
            Arg::I64(slot) => put(&mut **slot, value),
            Arg::U32(slot) => put(&mut **slot, value),
            Arg::U64(slot) => put(&mut **slot, value),
            Arg::Bytes(_) => false,
        }
    }

    /// Stores a hexadecimal result; fails when it needs more bits than the
    /// slot has. Signed slots take the bit pattern as is.
    pub(crate) fn store_hex(&mut self, value: u64) -> bool {
        match self {
            Arg::I32(slot) => u32::try_from(value).map(|v| **slot = v.cast_signed()).is_ok(),
            Arg::I64(slot) => {
                **slot = value.cast_signed();
                true
            }
            Arg::U32(slot) => u32::try_from(value).map(|v| **slot = v).is_ok(),
            Arg::U64(slot) => {
                **slot = value;
                true
            }
            Arg::Bytes(_) => false,
        }
    }
}

impl<'a> From<&'a mut i32> for Arg<'a> {
    fn from(slot: &'a mut i32) -> Self {
        Arg::I32(slot)
    }
}

impl<'a> From<&'a mut i64> for Arg<'a> {
    fn from(slot: &'a mut i64) -> Self {
        Arg::I64(slot)
    }
}

impl<'a> From<&'a mut u32> for Arg<'a> {
    fn from(slot: &'a mut u32) -> Self {
        Arg::U32(slot)
    }
}

impl<'a> From<&'a mut u64> for Arg<'a> {
    fn from(slot: &'a mut u64) -> Self {
        Arg::U64(slot)
    }
}

impl<'a> From<&'a mut [u8]> for Arg<'a> {
    fn from(slot: &'a mut [u8]) -> Self {
        Arg::Bytes(slot)
    }
}

impl<'a, const N: usize> From<&'a mut [u8; N]> for Arg<'a> {
    fn from(slot: &'a mut [u8; N]) -> Self {
        Arg::Bytes(slot)
    }
}
