//! Integration tests for the print pipeline
//!
//! These tests verify:
//! - Fan-out to several outputs, each with its own processors
//! - Fatal messages reaching every output before exit
//! - `SYPL_FILTER` and `SYPL_DEBUG` behaviour through an injected config
//! - Child loggers sharing outputs
//! - File and rotating file outputs
//! - Formatters and structured fields

use sypl::core::config::{StaticConfig, DEBUG_ENV_VAR, FILTER_ENV_VAR};
use sypl::prelude::*;
use sypl::{formatters, outputs, processors};
use std::fs;
use std::sync::Arc;
use parking_lot::Mutex;
use tempfile::TempDir;

fn quiet_builder(name: &str) -> LoggerBuilder {
    Logger::builder(name).config(StaticConfig::new()).on_exit(|_| {})
}

fn named_buffer(name: &str, max_level: Level, processors: Vec<Arc<Processor>>) -> (Arc<Output>, SafeBuffer) {
    let buffer = SafeBuffer::new();
    (Output::new(name, max_level, buffer.clone(), processors), buffer)
}

#[test]
fn test_fan_out_with_per_output_pipelines() {
    let (console, console_buffer) = named_buffer(
        "Console",
        Level::Info,
        vec![processors::prefixer("A-"), processors::suffixer("-B")],
    );
    let (file, file_buffer) = named_buffer("File", Level::Trace, vec![processors::change_first_char_case(processors::Casing::Uppercase)]);
    let logger = quiet_builder("svc").outputs([console, file]).build();

    logger.infoln("x").traceln("detail");

    assert_eq!(console_buffer.contents(), "A-x-B\n");
    assert_eq!(file_buffer.contents(), "X\nDetail\n");
}

#[test]
fn test_duplicate_output_names_are_supported() {
    let (plain, plain_buffer) = named_buffer("Buffer", Level::Trace, vec![]);
    let (prefixed, prefixed_buffer) = named_buffer("Buffer", Level::Trace, vec![processors::prefixer("P ")]);
    let logger = quiet_builder("svc").outputs([plain, prefixed]).build();

    logger.print_with_options(&Options::new().with_outputs(["buffer"]), Level::Info, "both");

    assert_eq!(plain_buffer.contents(), "both\n");
    assert_eq!(prefixed_buffer.contents(), "P both\n");
}

#[test]
fn test_fatal_reaches_every_output_before_exit() {
    const OUTPUTS: usize = 8;

    let pairs: Vec<(Arc<Output>, SafeBuffer)> = (0..OUTPUTS)
        .map(|i| named_buffer(&format!("Output{}", i), Level::Fatal, vec![]))
        .collect();
    let buffers: Vec<SafeBuffer> = pairs.iter().map(|(_, b)| b.clone()).collect();

    let at_exit = Arc::new(Mutex::new(None));
    let recorder = Arc::clone(&at_exit);
    let logger = Logger::builder("svc")
        .outputs(pairs.into_iter().map(|(o, _)| o))
        .config(StaticConfig::new())
        .on_exit(move |code| {
            let written = buffers.iter().filter(|b| b.contents() == "fatal\n").count();
            *recorder.lock() = Some((code, written));
        })
        .build();

    logger.fatalln("fatal");

    assert_eq!(*at_exit.lock(), Some((1, OUTPUTS)));
}

#[test]
fn test_filter_silences_unlisted_components() {
    let (output, buffer) = named_buffer("Console", Level::Trace, vec![]);
    let config = StaticConfig::new().with(FILTER_ENV_VAR, "pod,svc");

    let other = Logger::builder("other").output(Arc::clone(&output)).config(config.clone()).build();
    let pod = Logger::builder("pod").output(output).config(config).build();

    other.errorln("from other").infoln("from other");
    pod.infoln("from pod");

    assert_eq!(buffer.contents(), "from pod\n");
}

#[test]
fn test_debug_override_end_to_end() {
    let config = StaticConfig::new().with(DEBUG_ENV_VAR, "info,console:debug,pod:console:trace");

    let run = |component: &str, output_name: &str| {
        let (output, buffer) = named_buffer(output_name, Level::Error, vec![]);
        let logger = Logger::builder(component).output(output).config(config.clone()).build();

        for level in [Level::Info, Level::Debug, Level::Trace] {
            logger.println(level, level.to_str());
        }
        buffer.contents()
    };

    assert_eq!(run("pod", "console"), "Info\nDebug\nTrace\n");
    assert_eq!(run("svc", "console"), "Info\nDebug\n");
    assert_eq!(run("xyz", "other"), "Info\n");
}

#[test]
fn test_invalid_debug_level_keeps_configured_max_level() {
    let (output, buffer) = named_buffer("console", Level::Error, vec![]);
    let logger = Logger::builder("pod")
        .output(output)
        .config(StaticConfig::new().with(DEBUG_ENV_VAR, "pod:console:loud,trace"))
        .build();

    logger.infoln("hidden").errorln("shown");

    assert_eq!(buffer.contents(), "shown\n");
}

#[test]
fn test_child_logger_shares_outputs() {
    let (first, first_buffer) = named_buffer("First", Level::Trace, vec![processors::prefix_based_on_mask(processors::DEFAULT_TIMESTAMP_FORMAT)]);
    let parent = quiet_builder("parent").output(first).build();
    let child = parent.child("child");

    let (second, second_buffer) = named_buffer("Second", Level::Trace, vec![]);
    parent.add_output(second);

    child.infoln("hello");

    assert!(first_buffer.contents().contains("[child] [Info] hello"));
    assert_eq!(second_buffer.contents(), "hello\n");
    assert_eq!(child.outputs_names(), vec!["First", "Second"]);
}

#[test]
fn test_print_messages_to_outputs() {
    let (a, buffer_a) = named_buffer("A", Level::Trace, vec![processors::prefixer("a: ")]);
    let (b, buffer_b) = named_buffer("B", Level::Trace, vec![processors::prefixer("b: ")]);
    let logger = quiet_builder("svc").outputs([a, b]).build();

    logger.print_messages_to_outputs([
        MessageToOutput::new("A", Level::Info, "first\n"),
        MessageToOutput::new("B", Level::Warn, "second\n"),
        MessageToOutput::new("C", Level::Warn, "nowhere\n"),
    ]);

    assert_eq!(buffer_a.contents(), "a: first\n");
    assert_eq!(buffer_b.contents(), "b: second\n");
}

#[test]
fn test_print_message_with_prebuilt_messages() {
    let (output, buffer) = named_buffer("Buffer", Level::Trace, vec![processors::print_only_if_tagged("audit")]);
    let logger = quiet_builder("svc").output(output).build();

    let mut audited = Message::new(Level::Info, "audited");
    audited.add_tag("audit");
    let plain = Message::new(Level::Info, "plain");

    logger.print_message([audited, plain]);

    assert_eq!(buffer.contents(), "audited\n");
}

#[test]
fn test_flags_through_options() {
    let (output, buffer) = named_buffer("Buffer", Level::Error, vec![processors::prefixer("P ")]);
    let logger = quiet_builder("svc").output(output).build();

    logger
        .print_with_options(&Options::new().with_flag(Flag::Force), Level::Trace, "forced")
        .print_with_options(&Options::new().with_flag(Flag::Mute), Level::Error, "muted")
        .print_with_options(&Options::new().with_flag(Flag::Skip), Level::Error, "skipped")
        .print_with_options(&Options::new().with_flag(Flag::SkipAndForce), Level::Trace, "raw")
        .print_with_options(&Options::new().with_flag(Flag::SkipAndMute), Level::Error, "dropped");

    assert_eq!(buffer.contents(), "P forced\nskipped\nraw\n");
}

#[test]
fn test_processor_toggles_are_shared() {
    let prefixer = processors::prefixer("P ");
    let (a, buffer_a) = named_buffer("A", Level::Trace, vec![Arc::clone(&prefixer)]);
    let (b, buffer_b) = named_buffer("B", Level::Trace, vec![Arc::clone(&prefixer)]);
    let logger = quiet_builder("svc").outputs([a, b]).build();

    prefixer.disable();
    logger.infoln("off");
    prefixer.enable();
    logger.infoln("on");

    assert_eq!(buffer_a.contents(), "off\nP on\n");
    assert_eq!(buffer_b.contents(), "off\nP on\n");
}

#[test]
fn test_processor_errors_are_not_fatal() {
    let (output, buffer) = named_buffer(
        "Buffer",
        Level::Trace,
        vec![processors::error_simulator("Forced Error"), processors::suffixer("!")],
    );
    let logger = quiet_builder("svc").output(output).build();

    logger.infoln("still written");

    assert_eq!(buffer.contents(), "still written!\n");
}

#[test]
fn test_closed_buffer_does_not_affect_other_outputs() {
    let (closed, closed_buffer) = named_buffer("Closed", Level::Trace, vec![]);
    let (open, open_buffer) = named_buffer("Open", Level::Trace, vec![]);
    closed_buffer.close();
    let logger = quiet_builder("svc").outputs([closed, open]).build();

    logger.infoln("hello");

    assert!(closed_buffer.contents().is_empty());
    assert_eq!(open_buffer.contents(), "hello\n");
}

#[test]
fn test_json_formatter_with_fields() {
    let (output, buffer) = named_buffer("Buffer", Level::Trace, vec![]);
    output.set_formatter(formatters::json());
    let logger = quiet_builder("svc").output(output).build();

    logger.print_with_options(
        &Options::new().with_field("request_id", "abc").with_field("attempt", 2),
        Level::Warn,
        "retrying\n",
    );

    let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
    assert_eq!(value["component"], "svc");
    assert_eq!(value["output"], "Buffer");
    assert_eq!(value["level"], "warn");
    assert_eq!(value["message"], "retrying");
    assert_eq!(value["request_id"], "abc");
    assert_eq!(value["attempt"], 2);
}

#[test]
fn test_text_formatter() {
    let (output, buffer) = named_buffer("Console", Level::Trace, vec![]);
    output.set_formatter(formatters::text());
    let logger = quiet_builder("svc").output(output).build();

    logger.print_with_options(&Options::new().with_field("user", "ana"), Level::Info, "login");

    let contents = buffer.contents();
    assert!(contents.starts_with("component=svc output=console level=info timestamp="));
    assert!(contents.ends_with("message=login user=ana\n"));
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("logs").join("app.log");

    let output = outputs::file(&log_file, Level::Info, vec![]).expect("Failed to create output");
    let logger = quiet_builder("svc").output(output).build();

    logger.infoln("first").debugln("hidden").warn("second");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "first\nsecond\n");
}

#[test]
fn test_file_with_rotation_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("rotating.log");

    let output = outputs::file_with_rotation(
        &log_file,
        Level::Trace,
        outputs::RotationOptions::new().with_max_size(36).with_max_backups(2),
        vec![],
    )
    .expect("Failed to create output");
    let logger = quiet_builder("svc").output(output).build();

    for i in 0..6 {
        logger.infoln(format!("message number {:02}", i));
    }

    let current = fs::read_to_string(&log_file).expect("Failed to read log file");
    let backup_1 = fs::read_to_string(temp_dir.path().join("rotating.log.1")).expect("Missing backup 1");
    let backup_2 = fs::read_to_string(temp_dir.path().join("rotating.log.2")).expect("Missing backup 2");

    assert_eq!(current, "message number 04\nmessage number 05\n");
    assert_eq!(backup_1, "message number 02\nmessage number 03\n");
    assert_eq!(backup_2, "message number 00\nmessage number 01\n");
    assert!(!temp_dir.path().join("rotating.log.3").exists());
}

#[test]
fn test_concurrent_logging() {
    let (output, buffer) = named_buffer("Buffer", Level::Info, vec![]);
    let logger = Arc::new(quiet_builder("svc").output(output).build());

    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..10 {
                logger.infoln(format!("Thread {} - Message {}", thread_id, i));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(buffer.contents().lines().count(), 50);
}
