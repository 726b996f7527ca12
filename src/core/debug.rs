//! Environment driven max level overrides
//!
//! `SYPL_DEBUG` holds comma separated rules, each one of:
//!
//! - `level`, e.g. `info`: applies to every component and output (`L`)
//! - `output:level`, e.g. `console:debug`: applies to outputs with that name (`OL`)
//! - `component:output:level`, e.g. `svc:console:trace`: applies to that output
//!   of that component only (`COL`)
//!
//! Names and levels are case-insensitive. For a given component and output,
//! `COL` beats `OL` which beats `L`, regardless of where the rules sit in the
//! variable. Within one class the last matching rule wins. The winning rule
//! must name a valid level, otherwise no override applies.

use super::config::{ConfigSource, DEBUG_ENV_VAR};
use super::level::Level;
use std::fmt;

/// Class of rule that produced an override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Bare `level`
    L,
    /// `output:level`
    OL,
    /// `component:output:level`
    COL,
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::L => write!(f, "Level"),
            Matcher::OL => write!(f, "OutputLevel"),
            Matcher::COL => write!(f, "ComponentOutputLevel"),
        }
    }
}

/// Resolver for one (component, output) pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugResolver {
    component_name: String,
    output_name: String,
    content: String,
}

impl DebugResolver {
    /// Resolver for `component_name`/`output_name` over `content`. Empty
    /// content never overrides.
    pub fn new(
        component_name: impl Into<String>,
        output_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            output_name: output_name.into(),
            content: content.into(),
        }
    }

    /// Read `SYPL_DEBUG` from `source`. Unset reads as empty.
    pub fn from_source(
        source: &dyn ConfigSource,
        component_name: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Self {
        let content = source.lookup(DEBUG_ENV_VAR).unwrap_or_default();
        Self::new(component_name, output_name, content)
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Last bare level rule
    pub fn match_l(&self) -> Option<&str> {
        self.last_match(|parts| match parts {
            [level] => Some(*level),
            _ => None,
        })
    }

    /// Last rule for this output
    pub fn match_ol(&self) -> Option<&str> {
        self.last_match(|parts| match parts {
            [output, level] if output.eq_ignore_ascii_case(&self.output_name) => Some(*level),
            _ => None,
        })
    }

    /// Last rule for this component and output
    pub fn match_col(&self) -> Option<&str> {
        self.last_match(|parts| match parts {
            [component, output, level]
                if component.eq_ignore_ascii_case(&self.component_name)
                    && output.eq_ignore_ascii_case(&self.output_name) =>
            {
                Some(*level)
            }
            _ => None,
        })
    }

    /// Effective override, and the class of rule it came from.
    ///
    /// `None` when the content is empty, nothing matches, or the winning rule
    /// names an unknown level. Note that `Level::None` is a valid override.
    pub fn level(&self) -> Option<(Level, Matcher)> {
        let (raw, matcher) = self
            .match_col()
            .map(|raw| (raw, Matcher::COL))
            .or_else(|| self.match_ol().map(|raw| (raw, Matcher::OL)))
            .or_else(|| self.match_l().map(|raw| (raw, Matcher::L)))?;

        raw.parse::<Level>().ok().map(|level| (level, matcher))
    }

    fn last_match<'a, F>(&'a self, rule: F) -> Option<&'a str>
    where
        F: Fn(&[&'a str]) -> Option<&'a str>,
    {
        self.content
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| {
                let parts: Vec<&str> = token.split(':').collect();
                if parts.iter().any(|part| part.is_empty()) {
                    return None;
                }
                rule(&parts)
            })
            .last()
    }
}
