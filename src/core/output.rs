//! Outputs: a destination plus its processor chain and level ceiling

use super::config::ProcessEnv;
use super::debug::DebugResolver;
use super::error::{DestinationClosed, Result, SyplError};
use super::flag::Flag;
use super::level::Level;
use super::message::Message;
use super::processor::Processor;
use super::status::{AtomicStatus, Status};
use super::{ERROR_PREFIX, WARN_PREFIX};
use parking_lot::{Mutex, RwLock};
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// A named destination.
///
/// Messages go through [`Output::write`]: processors run in registration
/// order, then the flag, the level ceiling, and any `SYPL_DEBUG` override
/// decide whether the result reaches the writer.
///
/// Outputs are shared as `Arc<Output>` between loggers; all setters take
/// `&self`.
pub struct Output {
    name: String,
    max_level: RwLock<Level>,
    processors: RwLock<Vec<Arc<Processor>>>,
    formatter: RwLock<Option<Arc<Processor>>>,
    writer: Mutex<Box<dyn Write + Send>>,
    status: AtomicStatus,
}

impl Output {
    pub fn new<W>(
        name: impl Into<String>,
        max_level: Level,
        writer: W,
        processors: Vec<Arc<Processor>>,
    ) -> Arc<Self>
    where
        W: Write + Send + 'static,
    {
        Arc::new(Self {
            name: name.into(),
            max_level: RwLock::new(max_level),
            processors: RwLock::new(processors),
            formatter: RwLock::new(None),
            writer: Mutex::new(Box::new(writer)),
            status: AtomicStatus::enabled(),
        })
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

    pub fn max_level(&self) -> Level {
        *self.max_level.read()
    }

    pub fn set_max_level(&self, level: Level) -> &Self {
        *self.max_level.write() = level;
        self
    }

    pub fn add_processors<I>(&self, processors: I) -> &Self
    where
        I: IntoIterator<Item = Arc<Processor>>,
    {
        self.processors.write().extend(processors);
        self
    }

    /// Replace registered processors by name, ignoring case. Processors with
    /// no registered namesake are ignored.
    pub fn set_processors<I>(&self, processors: I) -> &Self
    where
        I: IntoIterator<Item = Arc<Processor>>,
    {
        let mut registered = self.processors.write();
        for processor in processors {
            for slot in registered.iter_mut().filter(|p| p.is_named(processor.name())) {
                *slot = Arc::clone(&processor);
            }
        }
        self
    }

    /// First registered processor called `name`, ignoring case
    pub fn processor(&self, name: &str) -> Option<Arc<Processor>> {
        self.processors
            .read()
            .iter()
            .find(|p| p.is_named(name))
            .cloned()
    }

    pub fn processors(&self) -> Vec<Arc<Processor>> {
        self.processors.read().clone()
    }

    pub fn processors_names(&self) -> Vec<String> {
        self.processors
            .read()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn formatter(&self) -> Option<Arc<Processor>> {
        self.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Arc<Processor>) -> &Self {
        *self.formatter.write() = Some(formatter);
        self
    }

    pub fn clear_formatter(&self) -> &Self {
        *self.formatter.write() = None;
        self
    }

    pub fn set_writer<W>(&self, writer: W) -> &Self
    where
        W: Write + Send + 'static,
    {
        *self.writer.lock() = Box::new(writer);
        self
    }

    /// Process `message` and write it if it passes the flag and level checks.
    ///
    /// Processor and formatter failures are reported on stderr and never stop
    /// the write. Only a failing destination returns an error; a broken pipe
    /// is ignored and a closed destination is only warned about.
    pub fn write(&self, message: &mut Message) -> Result<()> {
        if self.status() == Status::Disabled {
            return Ok(());
        }

        // Structural changes made by processors apply from the next message on.
        let processors = self.processors();

        if message.processors_names().is_empty() {
            message.set_processors_names(processors.iter().map(|p| p.name().to_string()).collect());
        }
        message.set_output_name(self.name.as_str());

        message.strip();

        if !message.flag().skips_processing() {
            for processor in &processors {
                let allowed = message
                    .processors_names()
                    .iter()
                    .any(|name| processor.is_named(name));
                if !allowed {
                    continue;
                }

                self.run_reporting(processor, message);
            }
        }

        if !self.should_write(message) {
            return Ok(());
        }

        if !message.flag().skips_processing() {
            if let Some(formatter) = self.formatter() {
                self.run_reporting(&formatter, message);
            }
        }

        message.restore();

        self.write_to_destination(message.processed())
    }

    /// Flag, level, and debug override checks
    fn should_write(&self, message: &Message) -> bool {
        if message.flag().forces_write() {
            return true;
        }

        if matches!(message.flag(), Flag::Mute | Flag::SkipAndMute) {
            return false;
        }

        let level = message.level();
        level != Level::None && level <= self.effective_max_level(message)
    }

    fn effective_max_level(&self, message: &Message) -> Level {
        // Messages that went through a logger carry its config; only direct
        // writes fall back to the process environment.
        let resolved = match message.debug() {
            Some(debug) => debug.level(),
            None => {
                DebugResolver::from_source(&ProcessEnv, message.component_name(), self.name.as_str())
                    .level()
            }
        };

        resolved
            .map(|(level, _)| level)
            .unwrap_or_else(|| self.max_level())
    }

    fn run_reporting(&self, processor: &Processor, message: &mut Message) {
        message.set_processor_name(processor.name());

        if let Err(e) = processor.run(message) {
            let err = SyplError::processing(&self.name, processor.name(), message.original(), e);
            eprintln!("{} {}", ERROR_PREFIX, err);
        }
    }

    fn write_to_destination(&self, content: &str) -> Result<()> {
        let line: Cow<'_, str> = if content.ends_with('\n') {
            Cow::Borrowed(content)
        } else {
            Cow::Owned(format!("{}\n", content))
        };

        let mut writer = self.writer.lock();
        let result = writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush());

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            Err(e) if DestinationClosed::is(&e) => {
                eprintln!(
                    "{} Attempt to write to closed writer. Output: \"{}\". Error: \"{}\"",
                    WARN_PREFIX, self.name, e
                );
                Ok(())
            }
            Err(e) => Err(SyplError::write(&self.name, e)),
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("name", &self.name)
            .field("max_level", &self.max_level())
            .field("status", &self.status())
            .field("processors", &self.processors_names())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
