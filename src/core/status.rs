//! Enabled/disabled state shared by loggers, outputs, and processors

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Disabled,
    Enabled,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Disabled => write!(f, "Disabled"),
            Status::Enabled => write!(f, "Enabled"),
        }
    }
}

/// Lock-free status cell, starts `Enabled`
#[derive(Debug)]
pub(crate) struct AtomicStatus(AtomicBool);

impl AtomicStatus {
    pub(crate) const fn enabled() -> Self {
        Self(AtomicBool::new(true))
    }

    #[inline]
    pub(crate) fn get(&self) -> Status {
        if self.0.load(Ordering::Acquire) {
            Status::Enabled
        } else {
            Status::Disabled
        }
    }

    #[inline]
    pub(crate) fn set(&self, status: Status) {
        self.0.store(status == Status::Enabled, Ordering::Release);
    }
}

impl Default for AtomicStatus {
    fn default() -> Self {
        Self::enabled()
    }
}
