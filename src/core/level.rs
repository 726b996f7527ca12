//! Level definitions

use super::error::SyplError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verbosity of a message, ordered from least (`None`) to most verbose
/// (`Trace`).
///
/// An output prints a message only if the message level is at or below the
/// output max level, so a max level of `Debug` also lets `Info`, `Warn`,
/// `Error`, and `Fatal` through. `None` is a real level meaning "never
/// printed".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Level {
    None = 0,
    Fatal = 1,
    Error = 2,
    #[default]
    Info = 3,
    Warn = 4,
    Debug = 5,
    Trace = 6,
}

const NAMES: [&str; 7] = ["None", "Fatal", "Error", "Info", "Warn", "Debug", "Trace"];

impl Level {
    /// Every level, in declaration order
    pub const ALL: [Level; 7] = [
        Level::None,
        Level::Fatal,
        Level::Error,
        Level::Info,
        Level::Warn,
        Level::Debug,
        Level::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        NAMES[*self as usize]
    }

    /// Names of every level, in declaration order
    pub fn names() -> &'static [&'static str] {
        &NAMES
    }

    /// Comma separated names of `levels`
    pub fn join(levels: &[Level]) -> String {
        levels
            .iter()
            .map(Level::to_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = SyplError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.to_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SyplError::invalid_level(s))
    }
}
