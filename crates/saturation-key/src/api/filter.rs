//! One render invocation of the saturation key.

use std::any::Any;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use crate::describe::{ClipId, SATURATION_EFFECT, THRESHOLD_PARAM};
use crate::image::{PixelFormat, Rect};
use crate::kernel::{HalfAwayFromZero, Pixel, Rgba8, Rounding, SaturationKernel, Threshold};
use crate::schedule::{AbortSignal, Dispatch, ScheduleError, TileScheduler};

use super::error::{RenderError, Status};
use super::host::{Host, OutputClip, ParamSource, SourceClip};

/// Per-call render arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderArgs {
    /// Time at which images and parameters are fetched
    pub time: f64,
    /// Region of the output to produce, half-open
    pub window: Rect,
}

/// How a render that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every row of the (clipped) window was written
    Rendered {
        /// Rows written
        rows: u64,
    },
    /// The host asked to stop; rows already written stay written
    Aborted {
        /// Rows written before the stop
        rows_completed: u64,
    },
}

impl RenderOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, RenderOutcome::Aborted { .. })
    }
}

/// The saturation key bound to a host.
///
/// `render` fetches both images and the threshold, validates formats, and
/// sweeps the window through the host's dispatcher. The images are only
/// borrowed for the duration of the call and released on every exit path,
/// including panics inside a worker.
pub struct SaturationFilter<'h, P: ?Sized, D, A: ?Sized, R = HalfAwayFromZero> {
    host: Host<'h, P, D, A>,
    rounding: PhantomData<fn() -> R>,
}

impl<'h, P, D, A> SaturationFilter<'h, P, D, A>
where
    P: ParamSource + ?Sized,
    D: Dispatch,
    A: AbortSignal + ?Sized,
{
    pub fn new(host: Host<'h, P, D, A>) -> Self {
        Self::with_rounding(host)
    }
}

impl<'h, P, D, A, R> SaturationFilter<'h, P, D, A, R>
where
    P: ParamSource + ?Sized,
    D: Dispatch,
    A: AbortSignal + ?Sized,
    R: Rounding,
{
    /// Filter using the rounding policy `R` for channel quantisation.
    pub fn with_rounding(host: Host<'h, P, D, A>) -> Self {
        Self {
            host,
            rounding: PhantomData,
        }
    }

    /// Threshold at `time`, validated.
    pub fn threshold_at(&self, time: f64) -> Result<Threshold, RenderError> {
        let value = self.host.params.value_at(THRESHOLD_PARAM, time)?;
        Threshold::new(value).ok_or(RenderError::InvalidParameter {
            name: THRESHOLD_PARAM,
            value,
        })
    }

    /// Render `args.window` of `output` from `source`.
    ///
    /// A panic anywhere in the invocation, whether in a worker or in a host
    /// callback, is reported as [`RenderError::Unknown`].
    pub fn render<S, O>(
        &self,
        source: &S,
        output: &mut O,
        args: RenderArgs,
    ) -> Result<RenderOutcome, RenderError>
    where
        S: SourceClip + ?Sized,
        O: OutputClip + ?Sized,
    {
        panic::catch_unwind(AssertUnwindSafe(|| self.render_unguarded(source, output, args)))
            .unwrap_or_else(|payload| Err(RenderError::Unknown(panic_message(payload.as_ref()))))
    }

    fn render_unguarded<S, O>(
        &self,
        source: &S,
        output: &mut O,
        args: RenderArgs,
    ) -> Result<RenderOutcome, RenderError>
    where
        S: SourceClip + ?Sized,
        O: OutputClip + ?Sized,
    {
        let Some(destination) = output.output_image(args.time)? else {
            return self.missing_image(ClipId::Output);
        };
        let Some(source_image) = source.source_image(args.time)? else {
            return self.missing_image(ClipId::Source);
        };

        let threshold = self.threshold_at(args.time)?;

        check_format(ClipId::Source, source_image.format())?;
        check_format(ClipId::Output, destination.format())?;

        let kernel = SaturationKernel::<R>::with_rounding(threshold);
        let scheduler = TileScheduler::<Rgba8, _>::new(&kernel);
        let abort = self.host.abort;

        let report = scheduler
            .run(
                Some(source_image),
                destination,
                args.window,
                self.host.dispatcher,
                &abort,
            )
            .map_err(|err| match err {
                ScheduleError::OutOfMemory(_) => RenderError::OutOfMemory,
                ScheduleError::FormatMismatch { found, .. } => RenderError::UnsupportedFormat {
                    clip: ClipId::Output,
                    format: found,
                },
            })?;

        if report.is_complete() {
            Ok(RenderOutcome::Rendered {
                rows: report.rows_completed,
            })
        } else {
            Ok(RenderOutcome::Aborted {
                rows_completed: report.rows_completed,
            })
        }
    }

    /// [`render`](Self::render), collapsed to a status code.
    pub fn render_status<S, O>(&self, source: &S, output: &mut O, args: RenderArgs) -> Status
    where
        S: SourceClip + ?Sized,
        O: OutputClip + ?Sized,
    {
        Status::from(&self.render(source, output, args))
    }

    fn missing_image(&self, clip: ClipId) -> Result<RenderOutcome, RenderError> {
        if self.host.abort.is_aborted() {
            Ok(RenderOutcome::Aborted { rows_completed: 0 })
        } else {
            Err(RenderError::ImageUnavailable { clip })
        }
    }
}

fn check_format(clip: ClipId, format: PixelFormat) -> Result<(), RenderError> {
    if SATURATION_EFFECT.supports(format) && format == Rgba8::FORMAT {
        Ok(())
    } else {
        Err(RenderError::UnsupportedFormat { clip, format })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "render panicked".to_string()
    }
}
