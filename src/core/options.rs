//! Per-call print options

use super::fields::{FieldValue, Fields};
use super::flag::Flag;

/// Parameters for a single print call: which outputs and processors to use,
/// which flag to carry, and which tags and fields to attach.
///
/// Empty output/processor name lists mean "all registered".
///
/// # Example
///
/// ```
/// use sypl::{Flag, Options};
///
/// let options = Options::new()
///     .with_flag(Flag::Force)
///     .with_outputs(["Console"])
///     .with_tags(["audit"])
///     .with_field("request_id", "abc-123");
///
/// assert_eq!(options.outputs_names, vec!["Console".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub fields: Fields,
    pub flag: Flag,
    pub outputs_names: Vec<String>,
    pub processors_names: Vec<String>,
    pub tags: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flag = flag;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_outputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_processors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.merge(&fields);
        self
    }
}
