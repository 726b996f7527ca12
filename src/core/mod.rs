//! Core types: the message model and the processing pipeline

pub mod config;
pub mod content;
pub mod debug;
pub mod error;
pub mod fields;
pub mod flag;
pub mod level;
pub mod logger;
pub mod message;
pub mod options;
pub mod output;
pub mod processor;
pub mod status;
pub mod tags;

/// Prefix of internal error reports on stderr
pub const ERROR_PREFIX: &str = "[sypl] [Error]";

/// Prefix of internal warnings on stderr
pub const WARN_PREFIX: &str = "[sypl] [Warn]";

pub use config::{ComponentFilter, ConfigSource, ProcessEnv, StaticConfig};
pub use content::Content;
pub use debug::{DebugResolver, Matcher};
pub use error::{DestinationClosed, Result, SyplError};
pub use fields::{FieldValue, Fields};
pub use flag::Flag;
pub use level::Level;
pub use logger::{ExitFn, Logger, LoggerBuilder, MessageToOutput};
pub use message::{LineBreaker, Message};
pub use options::Options;
pub use output::Output;
pub use processor::{Processor, ProcessorFn};
pub use status::Status;
pub use tags::Tags;
