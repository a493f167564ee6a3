//! Capabilities a host lends to a render.

use crate::image::{ImageView, ImageViewMut};

use super::error::HostError;

/// The clip the effect reads from.
pub trait SourceClip {
    /// Fetch the source image at `time`.
    ///
    /// `Ok(None)` means the host has no image for this time, typically
    /// because the render is being cancelled.
    fn source_image(&self, time: f64) -> Result<Option<ImageView<'_>>, HostError>;
}

/// The clip the effect writes to.
pub trait OutputClip {
    /// Fetch the writable output image at `time`.
    ///
    /// The returned view borrows the clip mutably; dropping it releases the
    /// image back to the host.
    fn output_image(&mut self, time: f64) -> Result<Option<ImageViewMut<'_>>, HostError>;
}

/// Animated parameter values.
pub trait ParamSource {
    /// Value of parameter `name` at `time`.
    fn value_at(&self, name: &str, time: f64) -> Result<f64, HostError>;
}

impl<F> ParamSource for F
where
    F: Fn(&str, f64) -> Result<f64, HostError>,
{
    fn value_at(&self, name: &str, time: f64) -> Result<f64, HostError> {
        self(name, time)
    }
}

/// Everything a filter borrows from its host for the lifetime of one
/// render call.
pub struct Host<'h, P: ?Sized, D, A: ?Sized> {
    pub params: &'h P,
    pub dispatcher: &'h D,
    pub abort: &'h A,
}

impl<'h, P: ?Sized, D, A: ?Sized> Host<'h, P, D, A> {
    pub fn new(params: &'h P, dispatcher: &'h D, abort: &'h A) -> Self {
        Self {
            params,
            dispatcher,
            abort,
        }
    }
}

impl<P: ?Sized, D, A: ?Sized> Clone for Host<'_, P, D, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized, D, A: ?Sized> Copy for Host<'_, P, D, A> {}
