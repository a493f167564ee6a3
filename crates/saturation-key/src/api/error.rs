//! Error and status types for a render invocation.

use std::fmt;

use crate::describe::ClipId;
use crate::image::PixelFormat;

/// Failure reported by a host collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// The host could not allocate memory for the request
    OutOfMemory,
    /// Any other host-side failure
    Failed(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::OutOfMemory => write!(f, "host is out of memory"),
            HostError::Failed(msg) => write!(f, "host failure: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

/// Why a render did not produce its window.
///
/// A render that was aborted is not an error: see
/// [`RenderOutcome::Aborted`](super::RenderOutcome::Aborted).
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A clip had no image and no abort was requested
    ImageUnavailable {
        /// Clip that returned no image
        clip: ClipId,
    },
    /// A clip's pixel format is not 8-bit RGBA
    UnsupportedFormat {
        /// Offending clip
        clip: ClipId,
        /// Format the clip delivered
        format: PixelFormat,
    },
    /// The threshold parameter had a non-finite value
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Value returned by the host
        value: f64,
    },
    /// Memory for the render could not be allocated
    OutOfMemory,
    /// A host collaborator failed
    Host(String),
    /// Unexpected fault caught at the invocation boundary
    Unknown(String),
}

impl RenderError {
    /// Status code a host would see for this error.
    pub fn status(&self) -> Status {
        match self {
            RenderError::ImageUnavailable { .. } | RenderError::Host(_) => Status::Failed,
            RenderError::UnsupportedFormat { .. } => Status::ErrFormat,
            RenderError::InvalidParameter { .. } => Status::ErrValue,
            RenderError::OutOfMemory => Status::ErrMemory,
            RenderError::Unknown(_) => Status::ErrUnknown,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ImageUnavailable { clip } => {
                write!(f, "no image available on the {} clip", clip)
            }
            RenderError::UnsupportedFormat { clip, format } => {
                write!(
                    f,
                    "unsupported pixel format on the {} clip: {} (expected RGBA 8-bit)",
                    clip, format
                )
            }
            RenderError::InvalidParameter { name, value } => {
                write!(f, "invalid value for parameter '{}': {}", name, value)
            }
            RenderError::OutOfMemory => write!(f, "out of memory"),
            RenderError::Host(msg) => write!(f, "host failure: {}", msg),
            RenderError::Unknown(msg) => write!(f, "unexpected failure: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<HostError> for RenderError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::OutOfMemory => RenderError::OutOfMemory,
            HostError::Failed(msg) => RenderError::Host(msg),
        }
    }
}

/// Status codes returned across a plugin boundary.
///
/// Numeric values follow the OpenFX status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Failed,
    ErrUnknown,
    ErrFormat,
    ErrMemory,
    ErrValue,
}

impl Status {
    pub const fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Failed => 1,
            Status::ErrUnknown => 3,
            Status::ErrFormat => 7,
            Status::ErrMemory => 8,
            Status::ErrValue => 11,
        }
    }
}

impl<T> From<&Result<T, RenderError>> for Status {
    fn from(result: &Result<T, RenderError>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(err) => err.status(),
        }
    }
}
