//! Per-message behaviour flags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overrides the default level gating of a single message.
///
/// - `Force`: processed, and written regardless of level.
/// - `Mute`: processed, never written.
/// - `Skip`: neither processed nor formatted, written subject to level.
/// - `SkipAndForce`: neither processed nor formatted, always written.
/// - `SkipAndMute`: dropped before any output is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Flag {
    #[default]
    None,
    Force,
    Mute,
    Skip,
    SkipAndForce,
    SkipAndMute,
}

impl Flag {
    pub fn to_str(&self) -> &'static str {
        match self {
            Flag::None => "None",
            Flag::Force => "Force",
            Flag::Mute => "Mute",
            Flag::Skip => "Skip",
            Flag::SkipAndForce => "SkipAndForce",
            Flag::SkipAndMute => "SkipAndMute",
        }
    }

    /// Bypasses processors and formatter
    #[inline]
    pub fn skips_processing(&self) -> bool {
        matches!(self, Flag::Skip | Flag::SkipAndForce)
    }

    /// Written regardless of level gating
    #[inline]
    pub fn forces_write(&self) -> bool {
        matches!(self, Flag::Force | Flag::SkipAndForce)
    }

    /// Dropped at the logger, before any output
    #[inline]
    pub fn drops_message(&self) -> bool {
        matches!(self, Flag::SkipAndMute)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
