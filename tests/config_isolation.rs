//! Injected configuration vs the process environment
//!
//! Sets `SYPL_DEBUG` on the process, so this file holds a single test.

use sypl::prelude::*;
use sypl::{outputs, ProcessEnv, StaticConfig};

#[test]
fn test_injected_config_ignores_process_env() {
    std::env::set_var("SYPL_DEBUG", "trace");

    let (output, buffer) = outputs::safe_buffer(Level::Info, vec![]);
    let isolated = Logger::builder("isolated")
        .output(output)
        .config(StaticConfig::new())
        .build();

    isolated.traceln("hidden");
    assert!(buffer.contents().is_empty());

    // The process environment still applies to loggers reading it
    let (output, env_buffer) = outputs::safe_buffer(Level::Info, vec![]);
    let from_env = Logger::builder("from_env")
        .output(output)
        .config(ProcessEnv)
        .build();

    from_env.traceln("shown");
    assert_eq!(env_buffer.contents(), "shown\n");

    // And to messages written straight to an output
    let (output, direct_buffer) = outputs::safe_buffer(Level::Info, vec![]);
    output.write(&mut Message::new(Level::Trace, "direct")).unwrap();
    assert_eq!(direct_buffer.contents(), "direct\n");

    std::env::remove_var("SYPL_DEBUG");
}
