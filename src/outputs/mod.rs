//! Built-in outputs
//!
//! File based constructors accept `-` as path, writing to stdout instead.

mod buffer;
mod rotating;

pub use buffer::SafeBuffer;
pub use rotating::{RotatingWriter, RotationOptions};

use crate::core::{Level, Output, Processor, Result, SyplError};
use crate::processors;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Path meaning "write to stdout"
pub const STDOUT_PATH: &str = "-";

/// `Console`: stdout
pub fn console(max_level: Level, processors: Vec<Arc<Processor>>) -> Arc<Output> {
    Output::new("Console", max_level, std::io::stdout(), processors)
}

/// `StdErr`: stderr, printing only Fatal and Error messages
pub fn stderr(mut processors: Vec<Arc<Processor>>) -> Arc<Output> {
    processors.push(processors::print_only_at_level(vec![Level::Fatal, Level::Error]));
    Output::new("StdErr", Level::Error, std::io::stderr(), processors)
}

/// Output named `name` over any writer
pub fn file_based<W>(
    name: impl Into<String>,
    max_level: Level,
    writer: W,
    processors: Vec<Arc<Processor>>,
) -> Arc<Output>
where
    W: Write + Send + 'static,
{
    Output::new(name, max_level, writer, processors)
}

/// `File`: appends to `path`, creating it if needed
///
/// # Errors
///
/// Returns error if the file can't be created or opened
pub fn file<P: AsRef<Path>>(
    path: P,
    max_level: Level,
    processors: Vec<Arc<Processor>>,
) -> Result<Arc<Output>> {
    let path = path.as_ref();
    if path.as_os_str() == STDOUT_PATH {
        return Ok(file_based("File", max_level, std::io::stdout(), processors));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SyplError::file_output(
                path.display().to_string(),
                format!("Failed to create directory '{}': {}", parent.display(), e),
            )
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            SyplError::file_output(path.display().to_string(), format!("Failed to create/open: {}", e))
        })?;

    Ok(file_based("File", max_level, file, processors))
}

/// `FileWithRotation`: like [`file`], rotated according to `options`
///
/// # Errors
///
/// Returns error if the file can't be created or opened
pub fn file_with_rotation<P: AsRef<Path>>(
    path: P,
    max_level: Level,
    options: RotationOptions,
    processors: Vec<Arc<Processor>>,
) -> Result<Arc<Output>> {
    let path = path.as_ref();
    if path.as_os_str() == STDOUT_PATH {
        return Ok(file_based("FileWithRotation", max_level, std::io::stdout(), processors));
    }

    let writer = RotatingWriter::new(path, options)?;
    Ok(file_based("FileWithRotation", max_level, writer, processors))
}

/// `Buffer`: in memory, returned alongside a handle to read it
pub fn safe_buffer(max_level: Level, processors: Vec<Arc<Processor>>) -> (Arc<Output>, SafeBuffer) {
    let buffer = SafeBuffer::new();
    let output = Output::new("Buffer", max_level, buffer.clone(), processors);
    (output, buffer)
}
