//! One-shot boot guard.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Why a boot call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Boot was not opted into.
    Disabled,
    /// This controller already admitted a boot.
    AlreadyStarted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => formatter.write_str("boot disabled"),
            Self::AlreadyStarted => formatter.write_str("boot already started"),
        }
    }
}

/// Decision returned by [`BootController::try_begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The caller owns the boot and must run it.
    Proceed,
    /// The call is a no-op.
    Skip(SkipReason),
}

/// Caller-owned guard admitting at most one boot.
#[derive(Debug)]
pub struct BootController {
    want_boot: bool,
    started: AtomicBool,
}

impl BootController {
    /// Builds a controller; boots are only admitted when `want_boot` is set.
    #[must_use]
    pub const fn new(want_boot: bool) -> Self {
        Self {
            want_boot,
            started: AtomicBool::new(false),
        }
    }

    /// Admits the first caller and skips every later one.
    ///
    /// A disabled controller never records a start, so enabling boot is a
    /// matter of building a new controller.
    pub fn try_begin(&self) -> Admission {
        if !self.want_boot {
            return Admission::Skip(SkipReason::Disabled);
        }
        match self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Admission::Proceed,
            Err(_) => Admission::Skip(SkipReason::AlreadyStarted),
        }
    }

    /// Whether a boot has been admitted.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Whether boot was opted into.
    #[must_use]
    pub const fn want_boot(&self) -> bool {
        self.want_boot
    }
}
