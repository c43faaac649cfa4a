//! The fixed-width argument slot and the types that can be bound into it.
//!
//! A callback argument travels through the timer service as an [`ArgSlot`],
//! a 4-byte value. [`TickerArg`] narrows a typed value into the slot when a
//! ticker is armed and widens it back when the callback runs. Conversions are
//! value conversions (zero/sign extension, `to_bits`), never reinterpretation
//! of foreign memory.

use crate::callback::TickCallback;

/// Size of the argument slot in bytes.
pub const ARG_SLOT_BYTES: usize = 4;

/// Fixed 4-byte value carried from arm time to every invocation.
///
/// `ArgSlot` is itself a [`TickerArg`], so caller-defined types that are not
/// bindable directly (a `#[repr(u8)]` enum, a packed pair of `u16`s) can be
/// encoded into a `u32` by the caller and decoded inside a `fn(ArgSlot)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArgSlot(u32);

impl ArgSlot {
    /// The empty slot passed to bare callbacks.
    pub const EMPTY: Self = Self(0);

    /// Slot holding `raw`.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw 4-byte payload.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    fn low_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl From<u32> for ArgSlot {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<ArgSlot> for u32 {
    fn from(slot: ArgSlot) -> Self {
        slot.0
    }
}

mod private {
    pub trait Sealed {}
}

/// A value that can be bound to a ticker callback.
///
/// Implemented for the slot-width primitives (`u8`, `i8`, `u16`, `i16`,
/// `u32`, `i32`, `f32`, `bool`, `char`), for `()` and for [`ArgSlot`].
/// Every implementor fits in [`ARG_SLOT_BYTES`]. The trait is sealed, so a
/// wider type has no impl and an arm call binding one fails on the trait
/// bound:
///
/// ```compile_fail
/// use ticker::Ticker;
/// use ticker_test_helpers::ManualTimerService;
///
/// let service = ManualTimerService::new();
/// let mut ticker = Ticker::new(&service);
/// let _ = ticker.arm_periodic_with_arg(10u32, |_: u64| {}, 7u64);
/// ```
pub trait TickerArg: Copy + Send + 'static + private::Sealed {
    /// Narrow the value into the slot.
    fn into_slot(self) -> ArgSlot;

    /// Widen a slot produced by [`into_slot`](TickerArg::into_slot) back to the value.
    fn from_slot(slot: ArgSlot) -> Self;

    /// Wrap a typed callback into the uniform callback.
    fn bind(callback: fn(Self)) -> TickCallback;
}

/// Compile-time guard that `A` fits in the slot.
///
/// Holds for every impl below; the arm operations assert it so a new impl
/// wider than the slot fails to build at the call site.
#[inline(always)]
pub(crate) const fn assert_fits_slot<A>() {
    const {
        assert!(
            size_of::<A>() <= ARG_SLOT_BYTES,
            "ticker callback argument must fit in 4 bytes"
        );
    }
}

macro_rules! impl_ticker_arg {
    ($ty:ty, $variant:ident, |$v:ident| $into:expr, |$s:ident| $from:expr) => {
        impl private::Sealed for $ty {}

        impl TickerArg for $ty {
            #[inline]
            fn into_slot(self) -> ArgSlot {
                let $v = self;
                ArgSlot($into)
            }

            #[inline]
            fn from_slot($s: ArgSlot) -> Self {
                $from
            }

            #[inline]
            fn bind(callback: fn(Self)) -> TickCallback {
                TickCallback::$variant(callback)
            }
        }
    };
}

impl_ticker_arg!(u8, U8, |v| u32::from(v), |s| {
    let [b0, ..] = s.low_bytes();
    b0
});
impl_ticker_arg!(i8, I8, |v| u32::from_le_bytes(i32::from(v).to_le_bytes()), |s| {
    let [b0, ..] = s.low_bytes();
    i8::from_le_bytes([b0])
});
impl_ticker_arg!(u16, U16, |v| u32::from(v), |s| {
    let [b0, b1, ..] = s.low_bytes();
    u16::from_le_bytes([b0, b1])
});
impl_ticker_arg!(i16, I16, |v| u32::from_le_bytes(i32::from(v).to_le_bytes()), |s| {
    let [b0, b1, ..] = s.low_bytes();
    i16::from_le_bytes([b0, b1])
});
impl_ticker_arg!(u32, U32, |v| v, |s| s.0);
impl_ticker_arg!(i32, I32, |v| u32::from_le_bytes(v.to_le_bytes()), |s| {
    i32::from_le_bytes(s.low_bytes())
});
impl_ticker_arg!(f32, F32, |v| v.to_bits(), |s| f32::from_bits(s.0));
impl_ticker_arg!(bool, Bool, |v| u32::from(v), |s| s.0 != 0);
impl_ticker_arg!(char, Char, |v| u32::from(v), |s| {
    char::from_u32(s.0).unwrap_or(char::REPLACEMENT_CHARACTER)
});
impl_ticker_arg!((), Unit, |_v| 0, |_s| ());
impl_ticker_arg!(ArgSlot, Slot, |v| v.0, |s| s);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_values_sign_extend() {
        assert_eq!((-1i8).into_slot().get(), u32::MAX);
        assert_eq!((-2i16).into_slot().get(), u32::MAX - 1);
        assert_eq!(i8::from_slot((-100i8).into_slot()), -100);
        assert_eq!(i16::from_slot(i16::MIN.into_slot()), i16::MIN);
    }

    #[test]
    fn test_float_keeps_bits() {
        let slot = (-0.0f32).into_slot();
        assert!(f32::from_slot(slot).is_sign_negative());
        assert!(f32::from_slot(f32::NAN.into_slot()).is_nan());
    }

    #[test]
    fn test_char_and_bool() {
        assert_eq!(char::from_slot('\u{1F980}'.into_slot()), '\u{1F980}');
        assert!(bool::from_slot(true.into_slot()));
        assert!(!bool::from_slot(ArgSlot::EMPTY));
    }

    #[test]
    fn test_invalid_char_slot_is_replaced() {
        assert_eq!(char::from_slot(ArgSlot::new(0xD800)), char::REPLACEMENT_CHARACTER);
    }

    #[test]
    fn test_slot_is_four_bytes() {
        assert_eq!(size_of::<ArgSlot>(), ARG_SLOT_BYTES);
    }
}
