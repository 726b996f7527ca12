//! Named units of work run over messages

use super::error::Result;
use super::message::Message;
use super::status::{AtomicStatus, Status};
use std::fmt;
use std::sync::Arc;

/// Function a processor runs over a message
pub type ProcessorFn = Arc<dyn Fn(&mut Message) -> Result<()> + Send + Sync>;

/// A named, switchable step in an output's chain.
///
/// Processors are shared as `Arc<Processor>`: disabling one is seen by every
/// output holding it, on the next message it would run over.
pub struct Processor {
    name: String,
    status: AtomicStatus,
    f: ProcessorFn,
}

impl Processor {
    pub fn new<F>(name: impl Into<String>, f: F) -> Arc<Self>
    where
        F: Fn(&mut Message) -> Result<()> + Send + Sync + 'static,
    {
        Arc::new(Self {
            name: name.into(),
            status: AtomicStatus::enabled(),
            f: Arc::new(f),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status.get()
    }

    pub fn set_status(&self, status: Status) {
        self.status.set(status);
    }

    pub fn enable(&self) {
        self.status.set(Status::Enabled);
    }

    pub fn disable(&self) {
        self.status.set(Status::Disabled);
    }

    /// Run over `message`; a disabled processor does nothing
    pub fn run(&self, message: &mut Message) -> Result<()> {
        if self.status() == Status::Disabled {
            return Ok(());
        }

        (self.f)(message)
    }

    /// Whether `name` names this processor, ignoring case
    pub(crate) fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("name", &self.name)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
