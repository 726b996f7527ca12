//! Built-in processors
//!
//! Each function returns a ready to register [`Processor`]. Order matters: a
//! processor sees the content as left by the ones registered before it.

use crate::core::{Flag, Level, Message, Processor, SyplError};
use chrono::Local;
use regex::Regex;
use std::sync::{Arc, LazyLock};

#[cfg(feature = "console")]
use colored::{Color, Colorize};
#[cfg(feature = "console")]
use std::collections::HashMap;

/// Timestamp format used by [`Logger::new_default`](crate::Logger::new_default),
/// e.g. `2021-06-22 12:51:46.089`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("Invalid ANSI escape regex"));

/// Target case of [`change_first_char_case`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    Lowercase,
    Uppercase,
}

/// `<timestamp> [<pid>] [<component>] [<Level>] `
fn default_prefix(message: &Message, timestamp_format: &str) -> String {
    format!(
        "{} [{}] [{}] [{}] ",
        message
            .timestamp()
            .with_timezone(&Local)
            .format(timestamp_format),
        std::process::id(),
        message.component_name(),
        message.level()
    )
}

pub fn prefixer(prefix: impl Into<String>) -> Arc<Processor> {
    let prefix = prefix.into();
    Processor::new("Prefixer", move |message: &mut Message| {
        message.content_mut().processed_mut().insert_str(0, &prefix);
        Ok(())
    })
}

pub fn suffixer(suffix: impl Into<String>) -> Arc<Processor> {
    let suffix = suffix.into();
    Processor::new("Suffixer", move |message: &mut Message| {
        message.content_mut().processed_mut().push_str(&suffix);
        Ok(())
    })
}

/// Change the case of the first char. Registered after a prefixer, it
/// changes the prefix instead of the content.
pub fn change_first_char_case(casing: Casing) -> Arc<Processor> {
    Processor::new("ChangeFirstCharCase", move |message: &mut Message| {
        let mut chars = message.processed().chars();
        let Some(first) = chars.next() else {
            return Ok(());
        };

        let changed: String = match casing {
            Casing::Uppercase => first.to_uppercase().chain(chars).collect(),
            Casing::Lowercase => first.to_lowercase().chain(chars).collect(),
        };
        message.set_processed(changed);
        Ok(())
    })
}

/// Colour the whole content according to the message level
#[cfg(feature = "console")]
pub fn colorize_based_on_level(colors: HashMap<Level, Color>) -> Arc<Processor> {
    Processor::new("ColorizeBasedOnLevel", move |message: &mut Message| {
        if let Some(color) = colors.get(&message.level()) {
            let colored = message.processed().color(*color).to_string();
            message.set_processed(colored);
        }
        Ok(())
    })
}

/// Colour the whole content when it contains one of the words. Rules apply in
/// the given order.
#[cfg(feature = "console")]
pub fn colorize_based_on_word<I, S>(colors: I) -> Arc<Processor>
where
    I: IntoIterator<Item = (S, Color)>,
    S: Into<String>,
{
    let colors: Vec<(String, Color)> = colors.into_iter().map(|(w, c)| (w.into(), c)).collect();
    Processor::new("ColorizeBasedOnWord", move |message: &mut Message| {
        for (word, color) in &colors {
            if message.processed().contains(word.as_str()) {
                let colored = message.processed().color(*color).to_string();
                message.set_processed(colored);
            }
        }
        Ok(())
    })
}

/// Strip ANSI colour sequences
pub fn decolourizer() -> Arc<Processor> {
    Processor::new("Decolourizer", |message: &mut Message| {
        let stripped = ANSI_ESCAPE.replace_all(message.processed(), "").into_owned();
        message.set_processed(stripped);
        Ok(())
    })
}

/// Always fails with `msg`
pub fn error_simulator(msg: impl Into<String>) -> Arc<Processor> {
    let msg = msg.into();
    Processor::new("ErrorSimulator", move |_: &mut Message| {
        Err(SyplError::processor(msg.clone()))
    })
}

pub fn force_based_on_level(levels: Vec<Level>) -> Arc<Processor> {
    Processor::new("ForceBasedOnLevel", move |message: &mut Message| {
        if levels.contains(&message.level()) {
            message.set_flag(Flag::Force);
        }
        Ok(())
    })
}

pub fn mute_based_on_level(levels: Vec<Level>) -> Arc<Processor> {
    Processor::new("MuteBasedOnLevel", move |message: &mut Message| {
        if levels.contains(&message.level()) {
            message.set_flag(Flag::Mute);
        }
        Ok(())
    })
}

/// Prefix with timestamp, pid, component, and level, e.g.
/// `2021-06-22 12:51:46.089 [80819] [CLI] [Info] `
pub fn prefix_based_on_mask(timestamp_format: impl Into<String>) -> Arc<Processor> {
    let timestamp_format = timestamp_format.into();
    Processor::new("PrefixBasedOnMask", move |message: &mut Message| {
        let prefix = default_prefix(message, &timestamp_format);
        message.content_mut().processed_mut().insert_str(0, &prefix);
        Ok(())
    })
}

/// [`prefix_based_on_mask`], except for messages at `levels`
pub fn prefix_based_on_mask_except_for_levels(
    timestamp_format: impl Into<String>,
    levels: Vec<Level>,
) -> Arc<Processor> {
    let timestamp_format = timestamp_format.into();
    Processor::new(
        "PrefixBasedOnMaskExceptForLevels",
        move |message: &mut Message| {
            if !levels.contains(&message.level()) {
                let prefix = default_prefix(message, &timestamp_format);
                message.content_mut().processed_mut().insert_str(0, &prefix);
            }
            Ok(())
        },
    )
}

/// Mute messages not at one of `levels`
pub fn print_only_at_level(levels: Vec<Level>) -> Arc<Processor> {
    Processor::new("PrintOnlyAtLevel", move |message: &mut Message| {
        if !levels.contains(&message.level()) {
            message.set_flag(Flag::Mute);
        }
        Ok(())
    })
}

/// Mute messages not tagged with `tag`
pub fn print_only_if_tagged(tag: impl Into<String>) -> Arc<Processor> {
    let tag = tag.into();
    Processor::new("PrintOnlyIfTagged", move |message: &mut Message| {
        if !message.contains_tag(&tag) {
            message.set_flag(Flag::Mute);
        }
        Ok(())
    })
}
