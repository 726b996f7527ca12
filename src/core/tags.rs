//! Tag set attached to messages

use std::collections::BTreeSet;

/// Unordered set of markers consumed by outputs and processors, e.g. by
/// `print_only_if_tagged`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    inner: BTreeSet<String>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tag; adding an existing tag is a no-op
    pub fn add(&mut self, tag: impl Into<String>) {
        self.inner.insert(tag.into());
    }

    pub fn extend<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.extend(tags.into_iter().map(Into::into));
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.inner.contains(tag)
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        self.inner.remove(tag)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.inner.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::new();
        tags.extend(iter);
        tags
    }
}
