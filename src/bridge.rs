//! Redirect of the `log` facade into a [`Logger`]
//!
//! Libraries logging through `log` end up in the logger's outputs, going
//! through the same processors and level ceilings as everything else. Only
//! one redirect can be installed per process.

use crate::core::{Level, Logger, Result, SyplError};

enum Mapping {
    /// Every record printed at this level
    Fixed(Level),
    /// Record levels mapped to their namesakes
    ByRecordLevel,
}

struct Redirect {
    logger: Logger,
    mapping: Mapping,
}

impl Redirect {
    fn level_for(&self, record_level: ::log::Level) -> Level {
        match self.mapping {
            Mapping::Fixed(level) => level,
            Mapping::ByRecordLevel => match record_level {
                ::log::Level::Error => Level::Error,
                ::log::Level::Warn => Level::Warn,
                ::log::Level::Info => Level::Info,
                ::log::Level::Debug => Level::Debug,
                ::log::Level::Trace => Level::Trace,
            },
        }
    }
}

impl ::log::Log for Redirect {
    fn enabled(&self, _: &::log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &::log::Record) {
        let content = record.args().to_string();
        let content = content.trim();
        if content.is_empty() {
            return;
        }

        self.logger.println(self.level_for(record.level()), content);
    }

    fn flush(&self) {}
}

/// Print every `log` record to `logger` at `level`
///
/// # Errors
///
/// Fails if `level` is `Level::None`, or if a `log` logger is already set
pub fn redirect(logger: Logger, level: Level) -> Result<()> {
    if level == Level::None {
        return Err(SyplError::invalid_level(level.to_str()));
    }

    install(Redirect {
        logger,
        mapping: Mapping::Fixed(level),
    })
}

/// Print every `log` record to `logger` at the matching level
///
/// # Errors
///
/// Fails if a `log` logger is already set
pub fn redirect_with_levels(logger: Logger) -> Result<()> {
    install(Redirect {
        logger,
        mapping: Mapping::ByRecordLevel,
    })
}

fn install(redirect: Redirect) -> Result<()> {
    ::log::set_boxed_logger(Box::new(redirect))
        .map(|()| ::log::set_max_level(::log::LevelFilter::Trace))
        .map_err(|e| SyplError::config("log", e.to_string()))
}
