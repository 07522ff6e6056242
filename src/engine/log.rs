//! Lifecycle log sinks.
//!
//! The engine reports tree start, state entry and exit, transition firings,
//! failed selections and saturated cascades as formatted lines. Sink errors
//! are logged through `tracing` and otherwise ignored.

use parking_lot::Mutex;
use thiserror::Error;

/// Error reported by a [`LogSink`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("log sink failed: {0}")]
pub struct SinkError(pub String);

/// Destination for the engine's lifecycle messages.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str) -> Result<(), SinkError>;
}

/// Forwards messages to `tracing` at info level. The default sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) -> Result<(), SinkError> {
        tracing::info!(target: "statetree", "{message}");
        Ok(())
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Copy of every line logged so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drop all recorded lines.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str) -> Result<(), SinkError> {
        self.lines.lock().push(message.to_owned());
        Ok(())
    }
}
