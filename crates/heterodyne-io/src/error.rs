//! Device error type (spec.md §7 "DeviceError").

/// A tuner or audio-sink I/O failure.
///
/// Surfaced through the `radio-state` error event (spec.md §6.3); the
/// controller stops the pipeline and awaits re-open rather than attempting
/// local recovery.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The tuner or sink could not be opened or is not present.
    #[error("device not found: {0}")]
    NotFound(String),

    /// A read or write failed after the device was opened.
    #[error("device I/O failure: {0}")]
    Io(String),

    /// An operation was attempted after `close()`.
    #[error("device already closed")]
    Closed,

    /// The underlying audio backend rejected a buffer or configuration.
    #[error("audio sink error: {0}")]
    Sink(String),
}
