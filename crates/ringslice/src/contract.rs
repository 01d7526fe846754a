//! Contract checks.
//!
//! Every public operation guards its preconditions with a check that carries a
//! stable numeric code. A failed check is a programming error on the caller's
//! side (or a broken internal invariant), never an ordinary "not found"
//! outcome, so it is reported through the installed [`ViolationHandler`] and
//! then halts the calling context with a panic.
//!
//! The default handler logs through [`log::error!`]. Tests or firmware can
//! install their own handler with [`set_violation_handler`] to record codes or
//! forward them to a fault log; the panic that follows is not optional.

use core::{
    fmt,
    sync::atomic::{AtomicPtr, Ordering},
};

use thiserror::Error;

/// Module tag attached to every violation raised by this crate.
pub const MODULE: &str = "ringslice";

/// Backing slice is shorter than the declared capacity.
pub const BUFFER_HOLDS_CAPACITY: u16 = 1;
/// Capacity must be non-zero.
pub const CAPACITY_NON_ZERO: u16 = 2;
/// `first` must lie inside the ring.
pub const FIRST_IN_RANGE: u16 = 3;
/// `last` must lie inside the ring.
pub const LAST_IN_RANGE: u16 = 4;
/// Relative start of a subslice must not exceed its end.
pub const SUBSLICE_ORDERED: u16 = 101;
/// Relative start of a subslice must be inside the parent.
pub const SUBSLICE_FIRST_IN_RANGE: u16 = 102;
/// Relative end of a subslice must not run past the parent.
pub const SUBSLICE_LAST_IN_RANGE: u16 = 103;
/// Byte index must be below the slice length.
pub const NTH_BYTE_IN_RANGE: u16 = 104;
/// Split point must not run past the slice.
pub const SPLIT_IN_RANGE: u16 = 105;
/// Suffix search must start inside the slice (or exactly at its end).
pub const SUFFIX_FROM_IN_RANGE: u16 = 204;
/// Scan template must be well formed.
pub const TEMPLATE_WELL_FORMED: u16 = 301;
/// Every assigning conversion needs an output slot.
pub const SLOT_PRESENT: u16 = 302;
/// Output slot kind must fit the conversion.
pub const SLOT_KIND: u16 = 303;
/// String slot must hold the field width plus the terminator.
pub const SLOT_CAPACITY: u16 = 304;
/// Wrapping increment starts from an offset inside the ring.
pub const INCREMENT_FROM_RING: u16 = 666;
/// Wrapping decrement starts from an offset inside the ring.
pub const DECREMENT_FROM_RING: u16 = 667;
/// Wrapping increment lands inside the ring.
pub const INCREMENT_INTO_RING: u16 = 999;
/// Wrapping decrement lands inside the ring.
pub const DECREMENT_INTO_RING: u16 = 998;

/// Which side of the contract was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A precondition supplied by the caller.
    Require,
    /// A postcondition promised by the callee.
    Ensure,
    /// An internal invariant.
    Assert,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Require => "precondition",
            Kind::Ensure => "postcondition",
            Kind::Assert => "assertion",
        })
    }
}

/// A failed contract check.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{module}:{code} {kind} violated")]
pub struct Violation {
    /// Module tag, always [`MODULE`] for this crate.
    pub module: &'static str,
    /// Stable numeric code of the check.
    pub code: u16,
    /// Side of the contract that failed.
    pub kind: Kind,
}

/// Observer called before the core halts on a violation.
pub type ViolationHandler = fn(&Violation);

static HANDLER: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

/// Installs `handler` for every subsequent violation in this process.
pub fn set_violation_handler(handler: ViolationHandler) {
    HANDLER.store(handler as *mut (), Ordering::Release);
}

/// Restores the default, logging handler.
pub fn reset_violation_handler() {
    HANDLER.store(core::ptr::null_mut(), Ordering::Release);
}

fn log_violation(violation: &Violation) {
    log::error!("contract violation: {violation}");
}

fn current_handler() -> ViolationHandler {
    let ptr = HANDLER.load(Ordering::Acquire);
    if ptr.is_null() {
        log_violation
    } else {
        // SAFETY: the only non-null values ever stored come from
        // `set_violation_handler`, which stores a `ViolationHandler`.
        unsafe { core::mem::transmute::<*mut (), ViolationHandler>(ptr) }
    }
}

/// Reports a failed check and halts.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn violated(kind: Kind, code: u16) -> ! {
    let violation = Violation {
        module: MODULE,
        code,
        kind,
    };
    current_handler()(&violation);
    panic!("contract violation: {violation}");
}

/// Checks a caller-supplied precondition.
macro_rules! require {
    ($code:expr, $cond:expr $(,)?) => {
        if !$cond {
            $crate::contract::violated($crate::contract::Kind::Require, $code)
        }
    };
}

/// Checks a postcondition of the current operation.
macro_rules! ensure {
    ($code:expr, $cond:expr $(,)?) => {
        if !$cond {
            $crate::contract::violated($crate::contract::Kind::Ensure, $code)
        }
    };
}

pub(crate) use {ensure, require};
