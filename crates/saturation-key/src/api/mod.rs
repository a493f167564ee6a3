//! Host-facing render entry point.
//!
//! A host implements [`SourceClip`], [`OutputClip`] and [`ParamSource`],
//! lends a [`Dispatch`](crate::schedule::Dispatch) and an
//! [`AbortSignal`](crate::schedule::AbortSignal), and calls
//! [`SaturationFilter::render`] once per frame or window.

mod error;
mod filter;
mod host;

pub use error::{HostError, RenderError, Status};
pub use filter::{RenderArgs, RenderOutcome, SaturationFilter};
pub use host::{Host, OutputClip, ParamSource, SourceClip};
