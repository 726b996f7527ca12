//! Main logger implementation

use super::config::{ComponentFilter, ConfigSource, ProcessEnv, DEBUG_ENV_VAR};
use super::debug::DebugResolver;
use super::error::SyplError;
use super::flag::Flag;
use super::level::Level;
use super::message::Message;
use super::options::Options;
use super::output::Output;
use super::status::{AtomicStatus, Status};
use super::ERROR_PREFIX;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::thread;

/// Called with exit code `1` after a Fatal message reached every output
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// Output list shared between a logger and its children
type SharedOutputs = Arc<RwLock<Vec<Arc<Output>>>>;

/// One entry of [`Logger::print_messages_to_outputs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageToOutput {
    pub output_name: String,
    pub level: Level,
    pub content: String,
}

impl MessageToOutput {
    pub fn new(output_name: impl Into<String>, level: Level, content: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            level,
            content: content.into(),
        }
    }
}

/// A named logger fanning messages out to its outputs.
///
/// Every print builds a [`Message`], gives each matching enabled output its
/// own copy, and writes all copies concurrently. The call returns once every
/// output is done. Failures are reported on stderr and never returned.
///
/// # Example
///
/// ```
/// use sypl::prelude::*;
///
/// let (output, buffer) = sypl::outputs::safe_buffer(Level::Info, vec![]);
/// let logger = Logger::builder("svc").output(output).build();
///
/// logger.infoln("started").debugln("hidden");
///
/// assert_eq!(buffer.contents(), "started\n");
/// ```
pub struct Logger {
    name: String,
    outputs: SharedOutputs,
    status: AtomicStatus,
    config: Arc<dyn ConfigSource>,
    on_exit: ExitFn,
}

impl Logger {
    /// Logger with no outputs, reading the process environment
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    /// Logger printing to stdout up to `max_level`, each line prefixed with
    /// timestamp, pid, component, and level.
    #[must_use]
    pub fn new_default(name: impl Into<String>, max_level: Level) -> Self {
        Self::builder(name)
            .output(crate::outputs::console(
                max_level,
                vec![crate::processors::prefix_based_on_mask(
                    crate::processors::DEFAULT_TIMESTAMP_FORMAT,
                )],
            ))
            .build()
    }

    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// New logger named `name` sharing this logger's outputs, configuration,
    /// and exit hook. Outputs added through either logger are seen by both.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outputs: Arc::clone(&self.outputs),
            status: AtomicStatus::enabled(),
            config: Arc::clone(&self.config),
            on_exit: Arc::clone(&self.on_exit),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status.get()
    }

    pub fn set_status(&self, status: Status) -> &Self {
        self.status.set(status);
        self
    }

    pub fn enable(&self) -> &Self {
        self.set_status(Status::Enabled)
    }

    pub fn disable(&self) -> &Self {
        self.set_status(Status::Disabled)
    }

    pub fn add_output(&self, output: Arc<Output>) -> &Self {
        self.outputs.write().push(output);
        self
    }

    pub fn add_outputs<I>(&self, outputs: I) -> &Self
    where
        I: IntoIterator<Item = Arc<Output>>,
    {
        self.outputs.write().extend(outputs);
        self
    }

    /// First output called `name`, ignoring case
    pub fn output(&self, name: &str) -> Option<Arc<Output>> {
        self.outputs
            .read()
            .iter()
            .find(|o| o.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Replace registered outputs by name, ignoring case. Outputs with no
    /// registered namesake are ignored.
    pub fn set_outputs<I>(&self, outputs: I) -> &Self
    where
        I: IntoIterator<Item = Arc<Output>>,
    {
        let mut registered = self.outputs.write();
        for output in outputs {
            for slot in registered
                .iter_mut()
                .filter(|o| o.name().eq_ignore_ascii_case(output.name()))
            {
                *slot = Arc::clone(&output);
            }
        }
        self
    }

    pub fn outputs(&self) -> Vec<Arc<Output>> {
        self.outputs.read().clone()
    }

    pub fn outputs_names(&self) -> Vec<String> {
        self.outputs
            .read()
            .iter()
            .map(|o| o.name().to_string())
            .collect()
    }

    /// Print prebuilt messages, giving full control over each one
    pub fn print_message<I>(&self, messages: I) -> &Self
    where
        I: IntoIterator<Item = Message>,
    {
        self.process(messages.into_iter().collect());
        self
    }

    pub fn print_with_options(
        &self,
        options: &Options,
        level: Level,
        content: impl Into<String>,
    ) -> &Self {
        self.print_message([Message::with_options(options, level, content)])
    }

    pub fn println_with_options(
        &self,
        options: &Options,
        level: Level,
        content: impl Into<String>,
    ) -> &Self {
        self.print_with_options(options, level, with_line_break(content))
    }

    pub fn print(&self, level: Level, content: impl Into<String>) -> &Self {
        self.print_with_options(&Options::default(), level, content)
    }

    pub fn println(&self, level: Level, content: impl Into<String>) -> &Self {
        self.print(level, with_line_break(content))
    }

    /// Print `data` as tab indented JSON. The message skips processing and
    /// ignores level ceilings.
    pub fn print_pretty<T: Serialize + ?Sized>(&self, level: Level, data: &T) -> &Self {
        match prettify(data) {
            Ok(content) => self.print_with_options(
                &Options::new().with_flag(Flag::SkipAndForce),
                level,
                content,
            ),
            Err(e) => {
                eprintln!("{} Failed to prettify data: {}", ERROR_PREFIX, e);
                self
            }
        }
    }

    pub fn println_pretty<T: Serialize + ?Sized>(&self, level: Level, data: &T) -> &Self {
        match prettify(data) {
            Ok(content) => self.println_with_options(
                &Options::new().with_flag(Flag::SkipAndForce),
                level,
                content,
            ),
            Err(e) => {
                eprintln!("{} Failed to prettify data: {}", ERROR_PREFIX, e);
                self
            }
        }
    }

    /// Print each entry at its level to the output it names only. Entries
    /// naming no registered output are dropped.
    pub fn print_messages_to_outputs<I>(&self, messages: I) -> &Self
    where
        I: IntoIterator<Item = MessageToOutput>,
    {
        let messages = messages
            .into_iter()
            .map(|entry| {
                let mut message = Message::new(entry.level, entry.content);
                message.set_outputs_names(vec![entry.output_name]);
                message
            })
            .collect();

        self.process(messages);
        self
    }

    /// Print at Fatal, then call the exit hook
    pub fn fatal(&self, content: impl Into<String>) -> &Self {
        self.print(Level::Fatal, content)
    }

    pub fn fatalln(&self, content: impl Into<String>) -> &Self {
        self.println(Level::Fatal, content)
    }

    pub fn error(&self, content: impl Into<String>) -> &Self {
        self.print(Level::Error, content)
    }

    pub fn errorln(&self, content: impl Into<String>) -> &Self {
        self.println(Level::Error, content)
    }

    /// Print at Error, and return the unprocessed content as an error
    pub fn serror(&self, content: impl Into<String>) -> SyplError {
        let content = content.into();
        self.error(content.as_str());
        SyplError::other(content)
    }

    pub fn serrorln(&self, content: impl Into<String>) -> SyplError {
        let content = content.into();
        self.errorln(content.as_str());
        SyplError::other(content)
    }

    pub fn info(&self, content: impl Into<String>) -> &Self {
        self.print(Level::Info, content)
    }

    pub fn infoln(&self, content: impl Into<String>) -> &Self {
        self.println(Level::Info, content)
    }

    pub fn warn(&self, content: impl Into<String>) -> &Self {
        self.print(Level::Warn, content)
    }

    pub fn warnln(&self, content: impl Into<String>) -> &Self {
        self.println(Level::Warn, content)
    }

    pub fn debug(&self, content: impl Into<String>) -> &Self {
        self.print(Level::Debug, content)
    }

    pub fn debugln(&self, content: impl Into<String>) -> &Self {
        self.println(Level::Debug, content)
    }

    pub fn trace(&self, content: impl Into<String>) -> &Self {
        self.print(Level::Trace, content)
    }

    pub fn traceln(&self, content: impl Into<String>) -> &Self {
        self.println(Level::Trace, content)
    }

    /// Fan `messages` out and wait for every write; exit afterwards if any of
    /// them was Fatal.
    fn process(&self, messages: Vec<Message>) {
        if self.status() == Status::Disabled {
            return;
        }

        if !ComponentFilter::from_source(self.config.as_ref()).allows(&self.name) {
            return;
        }

        // Adding outputs while printing affects the next print only.
        let outputs = self.outputs();
        let debug_content = self.config.lookup(DEBUG_ENV_VAR).unwrap_or_default();

        let mut fatal = false;
        let mut deliveries = Vec::new();

        for message in messages {
            if message.original().is_empty() || message.flag().drops_message() {
                continue;
            }

            fatal |= message.level() == Level::Fatal;

            for output in outputs
                .iter()
                .filter(|o| o.status() == Status::Enabled && is_targeted(&message, o))
            {
                let mut copy = message.copy();
                copy.set_component_name(self.name.as_str())
                    .set_output_name(output.name())
                    .set_debug(Some(DebugResolver::new(
                        self.name.as_str(),
                        output.name(),
                        debug_content.as_str(),
                    )));

                deliveries.push((Arc::clone(output), copy));
            }
        }

        deliver(deliveries);

        if fatal {
            (self.on_exit)(1);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("status", &self.status())
            .field("outputs", &self.outputs_names())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Builder for [`Logger`]
///
/// # Example
/// ```
/// use sypl::prelude::*;
/// use sypl::core::config::{StaticConfig, FILTER_ENV_VAR};
///
/// let logger = Logger::builder("svc")
///     .output(sypl::outputs::console(Level::Info, vec![]))
///     .config(StaticConfig::new().with(FILTER_ENV_VAR, "other"))
///     .on_exit(|code| eprintln!("would exit with {}", code))
///     .build();
///
/// assert_eq!(logger.outputs_names(), vec!["Console".to_string()]);
/// ```
pub struct LoggerBuilder {
    name: String,
    outputs: Vec<Arc<Output>>,
    config: Option<Arc<dyn ConfigSource>>,
    on_exit: Option<ExitFn>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outputs: Vec::new(),
            config: None,
            on_exit: None,
        }
    }

    /// Add an output
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: Arc<Output>) -> Self {
        self.outputs.push(output);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn outputs<I>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = Arc<Output>>,
    {
        self.outputs.extend(outputs);
        self
    }

    /// Where `SYPL_DEBUG` and `SYPL_FILTER` are read from. Defaults to the
    /// process environment.
    #[must_use = "builder methods return a new value"]
    pub fn config<C: ConfigSource + 'static>(mut self, config: C) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    /// Hook run after a Fatal message was written. Defaults to
    /// `std::process::exit`.
    #[must_use = "builder methods return a new value"]
    pub fn on_exit<F>(mut self, on_exit: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.on_exit = Some(Arc::new(on_exit));
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            name: self.name,
            outputs: Arc::new(RwLock::new(self.outputs)),
            status: AtomicStatus::enabled(),
            config: self.config.unwrap_or_else(|| Arc::new(ProcessEnv)),
            on_exit: self
                .on_exit
                .unwrap_or_else(|| Arc::new(|code| std::process::exit(code))),
        }
    }
}

fn with_line_break(content: impl Into<String>) -> String {
    let mut content = content.into();
    content.push('\n');
    content
}

fn prettify<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn is_targeted(message: &Message, output: &Output) -> bool {
    message.outputs_names().is_empty()
        || message
            .outputs_names()
            .iter()
            .any(|name| name.eq_ignore_ascii_case(output.name()))
}

/// Write every (output, message) pair, one thread each, and join them all
fn deliver(deliveries: Vec<(Arc<Output>, Message)>) {
    if deliveries.len() == 1 {
        for (output, mut message) in deliveries {
            write_reporting(&output, &mut message);
        }
        return;
    }

    thread::scope(|scope| {
        let handles: Vec<_> = deliveries
            .into_iter()
            .map(|(output, mut message)| {
                let name = output.name().to_string();
                let handle = scope.spawn(move || write_reporting(&output, &mut message));
                (name, handle)
            })
            .collect();

        for (name, handle) in handles {
            if handle.join().is_err() {
                eprintln!("{} Output \"{}\" panicked while writing", ERROR_PREFIX, name);
            }
        }
    });
}

fn write_reporting(output: &Output, message: &mut Message) {
    if let Err(e) = output.write(message) {
        eprintln!("{} {}", ERROR_PREFIX, e);
    }
}
