//! Original/processed content pair

/// Content of a message.
///
/// `original` is set once when the message is created; `processed` is what
/// processors read and rewrite, and what ends up written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    original: String,
    processed: String,
}

impl Content {
    pub fn new(content: impl Into<String>) -> Self {
        let original = content.into();
        Self {
            processed: original.clone(),
            original,
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn processed(&self) -> &str {
        &self.processed
    }

    pub fn set_processed(&mut self, content: impl Into<String>) {
        self.processed = content.into();
    }

    pub(crate) fn processed_mut(&mut self) -> &mut String {
        &mut self.processed
    }
}
