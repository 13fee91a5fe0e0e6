//! Controller-level error type (spec.md §7).

use heterodyne_io::DeviceError;

/// Errors a [`crate::controller::DemodController`] can surface to its caller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// `set_mode` was asked for a scheme tag the registry does not know.
    #[error("unknown demodulation scheme: {0}")]
    UnknownScheme(String),

    /// The audio sink rejected a block; fatal for the current session
    /// (spec.md §7 "SinkError").
    #[error("audio sink error: {0}")]
    Sink(#[from] DeviceError),
}
