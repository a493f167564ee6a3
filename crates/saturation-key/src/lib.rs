//! saturation-key: a saturation key for 8-bit RGBA images
//!
//! Every pixel whose HSV saturation is at or below a threshold is keyed to
//! black; every other pixel passes through unchanged (after an 8-bit
//! quantisation round trip). Alpha is always carried over from the source.
//!
//! # Quick Start
//!
//! A host lends the filter its parameters, a dispatcher and an abort
//! signal, then renders windows of an output clip:
//!
//! ```
//! use saturation_key::{
//!     Host, HostError, ImageView, ImageViewMut, NeverAbort, OutputClip, PixelFormat, Rect,
//!     RenderArgs, RenderOutcome, SaturationFilter, SerialDispatcher, SourceClip,
//! };
//!
//! struct Frame(Vec<u8>, u32, u32);
//!
//! impl SourceClip for Frame {
//!     fn source_image(&self, _time: f64) -> Result<Option<ImageView<'_>>, HostError> {
//!         let bounds = Rect::from_size(self.1, self.2);
//!         Ok(ImageView::new(&self.0, bounds, self.1 as usize * 4, PixelFormat::RGBA8).ok())
//!     }
//! }
//!
//! impl OutputClip for Frame {
//!     fn output_image(&mut self, _time: f64) -> Result<Option<ImageViewMut<'_>>, HostError> {
//!         let bounds = Rect::from_size(self.1, self.2);
//!         let stride = self.1 as usize * 4;
//!         Ok(ImageViewMut::new(&mut self.0, bounds, stride, PixelFormat::RGBA8).ok())
//!     }
//! }
//!
//! let params = |_: &str, _: f64| -> Result<f64, HostError> { Ok(0.02) };
//! let dispatcher = SerialDispatcher::new(2);
//! let filter = SaturationFilter::new(Host::new(&params, &dispatcher, &NeverAbort));
//!
//! // One red pixel, one grey pixel
//! let source = Frame(vec![255, 0, 0, 255, 128, 128, 128, 255], 2, 1);
//! let mut output = Frame(vec![0; 8], 2, 1);
//! let args = RenderArgs { time: 0.0, window: Rect::from_size(2, 1) };
//!
//! assert_eq!(filter.render(&source, &mut output, args), Ok(RenderOutcome::Rendered { rows: 1 }));
//! assert_eq!(output.0, [255, 0, 0, 255, 0, 0, 0, 255]);
//! ```
//!
//! # Layers
//!
//! - [`image`]: [`Rect`], [`PixelFormat`] and bounds-checked buffer views.
//!   Rows may carry trailing padding; pixels are addressed in each image's
//!   own coordinate space.
//! - [`kernel`]: the per-pixel [`SaturationKernel`] and its rounding
//!   policies.
//! - [`schedule`]: splits a window into one row band per worker and runs
//!   the kernel through a host-supplied [`Dispatch`], polling an
//!   [`AbortSignal`] before each row.
//! - [`api`]: [`SaturationFilter`], which ties a single render call
//!   together and maps failures to [`Status`] codes.
//! - [`describe`]: the static [`EffectDescriptor`] a host registers.
//!
//! # Partitioning
//!
//! For a window `y1..y2` with `dy = y2 - y1` rows and `n` workers, worker
//! `i` gets rows `y1 + i*dy/n .. y1 + min((i+1)*dy/n, dy)` (integer
//! division). The bands cover the window exactly once, so the output does
//! not depend on `n` or on the order workers run in.
//!
//! # Cancellation
//!
//! Workers check the abort signal before starting each row. An aborted
//! render leaves a prefix of rows written in every band and returns
//! [`RenderOutcome::Aborted`]; it is not an error.

pub mod api;
pub mod describe;
pub mod image;
pub mod kernel;
pub mod schedule;


pub use api::{
    Host, HostError, OutputClip, ParamSource, RenderArgs, RenderError, RenderOutcome,
    SaturationFilter, SourceClip, Status,
};
pub use describe::{ClipId, Context, EffectDescriptor, ParamDescriptor, SATURATION_EFFECT, THRESHOLD_PARAM};
pub use image::{BitDepth, Components, ImageView, ImageViewMut, LayoutError, PixelFormat, Rect};
pub use kernel::{
    HalfAwayFromZero, HalfToEven, Pixel, PixelKernel, Rgba8, Rounding, SaturationKernel, Threshold,
};
pub use schedule::{AbortSignal, Dispatch, NeverAbort, SerialDispatcher, Worker};
