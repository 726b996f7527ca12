//! Message envelope flowing through outputs and processors

use super::content::Content;
use super::debug::DebugResolver;
use super::fields::{FieldValue, Fields};
use super::flag::Flag;
use super::level::Level;
use super::options::Options;
use super::status::Status;
use super::tags::Tags;
use chrono::{DateTime, Utc};
use std::fmt;

/// Line breaks recognized at the end of content, checked in this order
const KNOWN_LINE_BREAKERS: [&str; 2] = ["\n", "\r"];

/// Trailing line breaks removed from the processed content before processing,
/// so processors like a suffixer work on the text itself. They are put back
/// right before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreaker {
    control_chars: Vec<&'static str>,
    status: Status,
}

impl LineBreaker {
    fn new() -> Self {
        Self {
            control_chars: Vec::new(),
            status: Status::Enabled,
        }
    }

    /// Stripped control chars, in the order they were removed (last char first)
    pub fn control_chars(&self) -> &[&'static str] {
        &self.control_chars
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// A log message: content plus everything outputs and processors need to
/// decide what to do with it.
///
/// `id`, `timestamp`, and the original content are fixed at creation.
#[derive(Debug)]
pub struct Message {
    id: String,
    timestamp: DateTime<Utc>,
    level: Level,
    flag: Flag,
    content: Content,
    tags: Tags,
    fields: Fields,
    component_name: String,
    output_name: String,
    outputs_names: Vec<String>,
    processor_name: String,
    processors_names: Vec<String>,
    line_breaker: LineBreaker,
    debug: Option<DebugResolver>,
}

impl Message {
    pub fn new(level: Level, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level,
            flag: Flag::None,
            content: Content::new(content),
            tags: Tags::new(),
            fields: Fields::new(),
            component_name: String::new(),
            output_name: String::new(),
            outputs_names: Vec::new(),
            processor_name: String::new(),
            processors_names: Vec::new(),
            line_breaker: LineBreaker::new(),
            debug: None,
        }
    }

    /// Build a message and apply `options` to it
    pub fn with_options(options: &Options, level: Level, content: impl Into<String>) -> Self {
        let mut message = Self::new(level, content);
        message.apply_options(options);
        message
    }

    /// Copy flag, targets, tags, and fields from `options`.
    ///
    /// Tags are added to the existing ones; fields are merged with `options`
    /// winning on conflicting keys.
    pub fn apply_options(&mut self, options: &Options) {
        self.flag = options.flag;
        self.outputs_names = options.outputs_names.clone();
        self.processors_names = options.processors_names.clone();
        self.tags.extend(options.tags.iter().cloned());
        self.fields.merge(&options.fields);
    }

    /// Independent copy for delivery to one output.
    ///
    /// Keeps id, timestamp, level, flag, tags, fields, and routing names. The
    /// copy's processed content starts from the original content, and its tag
    /// set and line break state are its own.
    pub fn copy(&self) -> Self {
        Self {
            id: self.id.clone(),
            timestamp: self.timestamp,
            level: self.level,
            flag: self.flag,
            content: Content::new(self.content.original()),
            tags: self.tags.clone(),
            fields: self.fields.clone(),
            component_name: self.component_name.clone(),
            output_name: self.output_name.clone(),
            outputs_names: self.outputs_names.clone(),
            processor_name: self.processor_name.clone(),
            processors_names: self.processors_names.clone(),
            line_breaker: self.line_breaker.clone(),
            debug: self.debug.clone(),
        }
    }

    /// Remove every known trailing line break from the processed content.
    ///
    /// `"Test 1\n\r\n"` becomes `"Test 1"`, recording `["\n", "\r", "\n"]`.
    pub fn strip(&mut self) {
        if self.line_breaker.status != Status::Enabled {
            return;
        }

        let processed = self.content.processed_mut();
        while let Some(breaker) = KNOWN_LINE_BREAKERS
            .iter()
            .find(|breaker| processed.ends_with(**breaker))
        {
            processed.truncate(processed.len() - breaker.len());
            self.line_breaker.control_chars.push(breaker);
        }
    }

    /// Put back what `strip` removed, reproducing the original ending.
    ///
    /// The recorded control chars are consumed, so calling it twice doesn't
    /// duplicate them.
    pub fn restore(&mut self) {
        if self.line_breaker.status != Status::Enabled {
            return;
        }

        let processed = self.content.processed_mut();
        for control_char in self.line_breaker.control_chars.drain(..).rev() {
            processed.push_str(control_char);
        }
    }

    pub fn line_breaker(&self) -> &LineBreaker {
        &self.line_breaker
    }

    /// Disabling stops both stripping and restoring
    pub fn set_line_break_status(&mut self, status: Status) -> &mut Self {
        self.line_breaker.status = status;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) -> &mut Self {
        self.level = level;
        self
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn set_flag(&mut self, flag: Flag) -> &mut Self {
        self.flag = flag;
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    pub fn original(&self) -> &str {
        self.content.original()
    }

    pub fn processed(&self) -> &str {
        self.content.processed()
    }

    pub fn set_processed(&mut self, content: impl Into<String>) -> &mut Self {
        self.content.set_processed(content);
        self
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.add(tag);
        self
    }

    pub fn add_tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags);
        self
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn delete_tag(&mut self, tag: &str) -> &mut Self {
        self.tags.remove(tag);
        self
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: Fields) -> &mut Self {
        self.fields = fields;
        self
    }

    pub fn add_field<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key, value);
        self
    }

    /// Name of the logger that printed the message
    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    pub fn set_component_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.component_name = name.into();
        self
    }

    /// Output currently writing the message
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn set_output_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.output_name = name.into();
        self
    }

    /// Outputs the message is restricted to; empty means all
    pub fn outputs_names(&self) -> &[String] {
        &self.outputs_names
    }

    pub fn set_outputs_names(&mut self, names: Vec<String>) -> &mut Self {
        self.outputs_names = names;
        self
    }

    /// Processor currently running over the message
    pub fn processor_name(&self) -> &str {
        &self.processor_name
    }

    pub fn set_processor_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.processor_name = name.into();
        self
    }

    /// Processors allowed to run; empty means all. Once the message reaches
    /// an output this holds the resolved list.
    pub fn processors_names(&self) -> &[String] {
        &self.processors_names
    }

    pub fn set_processors_names(&mut self, names: Vec<String>) -> &mut Self {
        self.processors_names = names;
        self
    }

    pub fn debug(&self) -> Option<&DebugResolver> {
        self.debug.as_ref()
    }

    pub fn set_debug(&mut self, debug: Option<DebugResolver>) -> &mut Self {
        self.debug = debug;
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content.processed())
    }
}
