//! Property-based tests for sypl using proptest

use proptest::prelude::*;
use sypl::core::config::{StaticConfig, DEBUG_ENV_VAR};
use sypl::prelude::*;
use sypl::{DebugResolver, SafeBuffer};

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::None),
        Just(Level::Fatal),
        Just(Level::Error),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Debug),
        Just(Level::Trace),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level string conversions roundtrip, in any case
    #[test]
    fn test_level_str_roundtrip(level in any_level(), upper in any::<bool>()) {
        let name = if upper {
            level.to_str().to_uppercase()
        } else {
            level.to_str().to_lowercase()
        };

        let parsed: Level = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Level ordering follows declaration order
    #[test]
    fn test_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Unknown names never parse
    #[test]
    fn test_level_invalid_parse(invalid in "[0-9xyzq]{1,12}") {
        prop_assert!(invalid.parse::<Level>().is_err());
    }
}

// ============================================================================
// Message Tests
// ============================================================================

proptest! {
    /// Restoring after stripping gives back the exact content
    #[test]
    fn test_strip_restore_roundtrip(
        content in "[a-zA-Z0-9 ]{0,32}",
        breaks in proptest::collection::vec(prop_oneof![Just("\n"), Just("\r")], 0..6),
    ) {
        let full = format!("{}{}", content, breaks.concat());
        let mut message = Message::new(Level::Info, full.clone());

        message.strip();
        prop_assert_eq!(message.processed(), content.as_str());
        prop_assert_eq!(message.line_breaker().control_chars().len(), breaks.len());

        message.restore();
        prop_assert_eq!(message.processed(), full.as_str());
        prop_assert_eq!(message.original(), full.as_str());
    }

    /// A copy never shares tags or content with its source
    #[test]
    fn test_copy_isolation(content in ".{1,32}", tag in "[a-z]{1,8}") {
        let original = Message::new(Level::Info, content.clone());
        let mut copy = original.copy();

        copy.add_tag(tag.clone());
        copy.set_processed(format!("{}!", content));

        prop_assert!(!original.contains_tag(&tag));
        prop_assert_eq!(original.processed(), content.as_str());
        prop_assert_eq!(copy.id(), original.id());
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

proptest! {
    /// A message is written iff it's not None and within the max level
    #[test]
    fn test_level_gating(level in any_level(), max_level in any_level()) {
        let buffer = SafeBuffer::new();
        let output = Output::new("Buffer", max_level, buffer.clone(), vec![]);

        let mut message = Message::new(level, "content");
        message.set_debug(Some(DebugResolver::default()));
        output.write(&mut message).unwrap();

        let expected = level != Level::None && level <= max_level;
        prop_assert_eq!(!buffer.contents().is_empty(), expected);
    }

    /// Force writes regardless of levels, Mute never writes
    #[test]
    fn test_flag_precedence(level in any_level(), max_level in any_level()) {
        let buffer = SafeBuffer::new();
        let output = Output::new("Buffer", max_level, buffer.clone(), vec![]);

        let mut forced = Message::new(level, "forced");
        forced.set_flag(Flag::Force).set_debug(Some(DebugResolver::default()));
        output.write(&mut forced).unwrap();

        let mut muted = Message::new(level, "muted");
        muted.set_flag(Flag::Mute).set_debug(Some(DebugResolver::default()));
        output.write(&mut muted).unwrap();

        prop_assert_eq!(buffer.contents(), "forced\n");
    }

    /// Component+output rules beat output rules, which beat bare levels,
    /// wherever they sit in the variable
    #[test]
    fn test_debug_class_precedence(
        l in any_level(),
        ol in any_level(),
        col in any_level(),
        order in Just([0usize, 1, 2]).prop_shuffle(),
    ) {
        let rules = [
            l.to_str().to_string(),
            format!("console:{}", ol.to_str()),
            format!("pod:console:{}", col.to_str()),
        ];
        let content = order.iter().map(|&i| rules[i].as_str()).collect::<Vec<_>>().join(",");
        let config = StaticConfig::new().with(DEBUG_ENV_VAR, content);

        let resolve = |component: &str, output: &str| {
            DebugResolver::from_source(&config, component, output)
                .level()
                .map(|(level, _)| level)
        };

        prop_assert_eq!(resolve("pod", "console"), Some(col));
        prop_assert_eq!(resolve("svc", "console"), Some(ol));
        prop_assert_eq!(resolve("svc", "file"), Some(l));
    }
}
