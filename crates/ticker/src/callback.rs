//! The uniform callback handed to the timer service.

use core::fmt;

use crate::arg::{ArgSlot, TickerArg};

/// A callback in the single shape every timer service understands: one
/// function pointer invoked with one [`ArgSlot`].
///
/// Each variant keeps the caller's typed function pointer, so the slot is
/// decoded with the matching [`TickerArg`] conversion at invocation time.
/// The value is `Copy` and two words wide; nothing is allocated.
#[derive(Clone, Copy)]
pub enum TickCallback {
    /// Callback without an argument; the slot is ignored.
    Bare(fn()),
    /// Callback taking `()`.
    Unit(fn(())),
    /// Callback taking a `u8`.
    U8(fn(u8)),
    /// Callback taking an `i8`.
    I8(fn(i8)),
    /// Callback taking a `u16`.
    U16(fn(u16)),
    /// Callback taking an `i16`.
    I16(fn(i16)),
    /// Callback taking a `u32`.
    U32(fn(u32)),
    /// Callback taking an `i32`.
    I32(fn(i32)),
    /// Callback taking an `f32`.
    F32(fn(f32)),
    /// Callback taking a `bool`.
    Bool(fn(bool)),
    /// Callback taking a `char`.
    Char(fn(char)),
    /// Callback taking the raw slot.
    Slot(fn(ArgSlot)),
}

impl TickCallback {
    /// Wrap a callback without an argument.
    #[must_use]
    pub fn bare(callback: fn()) -> Self {
        Self::Bare(callback)
    }

    /// Wrap a typed callback.
    #[must_use]
    pub fn typed<A: TickerArg>(callback: fn(A)) -> Self {
        A::bind(callback)
    }

    /// Run the callback with the argument decoded from `slot`.
    pub fn invoke(self, slot: ArgSlot) {
        match self {
            Self::Bare(f) => f(),
            Self::Unit(f) => f(<()>::from_slot(slot)),
            Self::U8(f) => f(u8::from_slot(slot)),
            Self::I8(f) => f(i8::from_slot(slot)),
            Self::U16(f) => f(u16::from_slot(slot)),
            Self::I16(f) => f(i16::from_slot(slot)),
            Self::U32(f) => f(u32::from_slot(slot)),
            Self::I32(f) => f(i32::from_slot(slot)),
            Self::F32(f) => f(f32::from_slot(slot)),
            Self::Bool(f) => f(bool::from_slot(slot)),
            Self::Char(f) => f(char::from_slot(slot)),
            Self::Slot(f) => f(slot),
        }
    }

    /// Name of the argument type the callback expects.
    #[must_use]
    pub fn arg_kind(&self) -> &'static str {
        match self {
            Self::Bare(_) => "none",
            Self::Unit(_) => "()",
            Self::U8(_) => "u8",
            Self::I8(_) => "i8",
            Self::U16(_) => "u16",
            Self::I16(_) => "i16",
            Self::U32(_) => "u32",
            Self::I32(_) => "i32",
            Self::F32(_) => "f32",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Slot(_) => "ArgSlot",
        }
    }
}

impl fmt::Debug for TickCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TickCallback").field(&self.arg_kind()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

    static BARE_CALLS: AtomicU32 = AtomicU32::new(0);
    static LAST_I16: AtomicI32 = AtomicI32::new(0);

    fn bare() {
        BARE_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn record_i16(v: i16) {
        LAST_I16.store(i32::from(v), Ordering::SeqCst);
    }

    #[test]
    fn test_bare_ignores_slot() {
        TickCallback::bare(bare).invoke(ArgSlot::new(0xDEAD_BEEF));
        assert_eq!(BARE_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_typed_decodes_slot() {
        let callback = TickCallback::typed::<i16>(record_i16);
        callback.invoke((-1234i16).into_slot());
        assert_eq!(LAST_I16.load(Ordering::SeqCst), -1234);
        assert_eq!(callback.arg_kind(), "i16");
    }

    #[test]
    fn test_debug_names_kind() {
        let callback = TickCallback::typed::<bool>(|_| {});
        assert_eq!(format!("{callback:?}"), "TickCallback(\"bool\")");
    }
}
