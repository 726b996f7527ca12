//! # sypl
//!
//! A structured, multi-output logging library.
//!
//! A [`Logger`] has a name and a set of [`Output`]s. Each output owns a
//! destination, a max level, and an ordered chain of [`Processor`]s that
//! transform a message before it's written.
//!
//! ## Features
//!
//! - **Multiple Outputs**: console, stderr, file, rotating file, in-memory buffer
//! - **Processor Chains**: prefixes, colours, level and tag based muting, formatters
//! - **Concurrent Fan-out**: every output gets its own copy, written in parallel
//! - **Runtime Overrides**: `SYPL_DEBUG` and `SYPL_FILTER` change levels and
//!   silence components without touching code
//!
//! ## Example
//!
//! ```
//! use sypl::prelude::*;
//! use sypl::{outputs, processors};
//!
//! let (buffer_output, buffer) = outputs::safe_buffer(Level::Info, vec![processors::prefixer("> ")]);
//! let logger = Logger::builder("svc").output(buffer_output).build();
//!
//! logger.infoln("started").debugln("not shown");
//! logger.print_with_options(&Options::new().with_flag(Flag::Force), Level::Trace, "forced");
//!
//! assert_eq!(buffer.contents(), "> started\n> forced\n");
//! ```

pub mod bridge;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod outputs;
pub mod processors;

pub mod prelude {
    pub use crate::core::{
        ConfigSource, FieldValue, Fields, Flag, Level, Logger, LoggerBuilder, Message,
        MessageToOutput, Options, Output, Processor, Result, Status, SyplError,
    };
    pub use crate::outputs::SafeBuffer;
}

pub use crate::core::{
    ComponentFilter, ConfigSource, Content, DebugResolver, DestinationClosed, FieldValue, Fields,
    Flag, Level, Logger, LoggerBuilder, Message, MessageToOutput, Options, Output, ProcessEnv,
    Processor, Result, StaticConfig, Status, SyplError, Tags,
};
pub use outputs::SafeBuffer;
