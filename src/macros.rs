//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use sypl::prelude::*;
//! use sypl::info;
//!
//! let (output, buffer) = sypl::outputs::safe_buffer(Level::Info, vec![]);
//! let logger = Logger::builder("svc").output(output).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! assert_eq!(buffer.contents(), "Server started\nServer listening on port 8080\n");
//! ```

/// Print a message at `level` with automatic formatting.
///
/// # Examples
///
/// ```
/// # use sypl::prelude::*;
/// # let logger = Logger::new("svc");
/// use sypl::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.print($level, format!($($arg)+))
    };
}

/// Like [`log!`], also adding a line break to the end.
#[macro_export]
macro_rules! logln {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.println($level, format!($($arg)+))
    };
}

/// Print a trace-level message.
///
/// # Examples
///
/// ```
/// # use sypl::prelude::*;
/// # let logger = Logger::new("svc");
/// use sypl::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Print a debug-level message.
///
/// # Examples
///
/// ```
/// # use sypl::prelude::*;
/// # let logger = Logger::new("svc");
/// use sypl::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Print an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Print a warning-level message.
///
/// # Examples
///
/// ```
/// # use sypl::prelude::*;
/// # let logger = Logger::new("svc");
/// use sypl::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Print an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Print a fatal-level message, then run the logger's exit hook.
///
/// # Examples
///
/// ```
/// # use sypl::prelude::*;
/// let logger = Logger::builder("svc").on_exit(|_| {}).build();
/// use sypl::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}
