//! In-memory destination safe for concurrent writers

use crate::core::DestinationClosed;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    buf: Vec<u8>,
    closed: bool,
}

/// Mutex-serialized byte buffer. Clones share the same storage, so one handle
/// can be given to an output and another kept to read what was written.
///
/// After [`close`](SafeBuffer::close), writes fail with a
/// [`DestinationClosed`] error.
#[derive(Debug, Clone, Default)]
pub struct SafeBuffer {
    inner: Arc<Mutex<Inner>>,
}

impl SafeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().buf).into_owned()
    }

    pub fn reset(&self) {
        self.inner.lock().buf.clear();
    }

    pub fn close(&self) {
        self.inner.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

impl Write for SafeBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(DestinationClosed::io_error());
        }

        inner.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
