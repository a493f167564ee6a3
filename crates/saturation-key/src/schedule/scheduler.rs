//! Banded, multi-worker kernel sweep over a render window.

use std::collections::TryReserveError;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::image::{ImageView, ImageViewMut, PixelFormat, Rect};
use crate::kernel::{Pixel, PixelKernel};

use super::abort::AbortSignal;
use super::dispatch::Dispatch;
use super::tile::{tiles, Tile};

/// What a scheduler run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleReport {
    /// Number of bands the window was split into
    pub tiles: usize,
    /// Rows of the window that were fully written
    pub rows_completed: u64,
    /// Rows of the window that were requested
    pub rows_requested: u64,
}

impl ScheduleReport {
    /// Whether every requested row was written.
    pub fn is_complete(&self) -> bool {
        self.rows_completed == self.rows_requested
    }
}

/// Error from [`TileScheduler::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Band bookkeeping could not be allocated
    OutOfMemory(TryReserveError),
    /// A buffer does not hold the kernel's pixel type
    FormatMismatch {
        /// Format the kernel works on
        expected: PixelFormat,
        /// Format of the offending buffer
        found: PixelFormat,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::OutOfMemory(err) => write!(f, "out of memory: {}", err),
            ScheduleError::FormatMismatch { expected, found } => {
                write!(f, "kernel expects {} pixels, buffer holds {}", expected, found)
            }
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScheduleError::OutOfMemory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for ScheduleError {
    fn from(err: TryReserveError) -> Self {
        ScheduleError::OutOfMemory(err)
    }
}

/// Splits a window into one row band per worker and sweeps a kernel over
/// each band through the host's [`Dispatch`].
///
/// The destination is cut into disjoint mutable views before dispatch, so
/// every worker owns its rows outright: no locks, no shared writes. The
/// source is shared read-only. Workers poll the [`AbortSignal`] before each
/// row and stop their band as soon as it fires; rows already written stay
/// written.
pub struct TileScheduler<'k, P, K> {
    kernel: &'k K,
    pixel: PhantomData<fn() -> P>,
}

impl<'k, P, K> TileScheduler<'k, P, K>
where
    P: Pixel,
    K: PixelKernel<P>,
{
    pub fn new(kernel: &'k K) -> Self {
        Self {
            kernel,
            pixel: PhantomData,
        }
    }

    /// Produce `window` of `destination` from `source`.
    ///
    /// The window is clipped to the destination bounds. Destination pixels
    /// with no source counterpart get the kernel's output for a missing
    /// source.
    pub fn run<D, A>(
        &self,
        source: Option<ImageView<'_>>,
        destination: ImageViewMut<'_>,
        window: Rect,
        dispatcher: &D,
        abort: &A,
    ) -> Result<ScheduleReport, ScheduleError>
    where
        D: Dispatch,
        A: AbortSignal,
    {
        for format in source
            .iter()
            .map(|s| s.format())
            .chain(std::iter::once(destination.format()))
        {
            if format != P::FORMAT {
                return Err(ScheduleError::FormatMismatch {
                    expected: P::FORMAT,
                    found: format,
                });
            }
        }

        let window = window.intersect(&destination.bounds());
        let count = dispatcher.worker_count().max(1);
        if window.is_empty() {
            return Ok(ScheduleReport {
                tiles: count,
                ..ScheduleReport::default()
            });
        }
        let mut report = ScheduleReport {
            tiles: count,
            rows_completed: 0,
            rows_requested: window.height() as u64,
        };

        let bands = destination.split_rows(tiles(window, count).map(|t| t.rows()))?;
        let mut units: Vec<(Tile, ImageViewMut<'_>)> = Vec::new();
        units.try_reserve_exact(count)?;
        units.extend(tiles(window, count).zip(bands));

        let completed = AtomicU64::new(0);
        let kernel = self.kernel;
        let columns = window.x1..window.x2;

        dispatcher.run(units, |_worker, (tile, mut band)| {
            if tile.is_empty() {
                return;
            }
            let rows =
                sweep_band::<P, K, A>(kernel, source.as_ref(), &mut band, columns.clone(), abort);
            completed.fetch_add(rows, Ordering::Relaxed);
        });

        report.rows_completed = completed.into_inner();
        Ok(report)
    }
}

/// Run `kernel` over every pixel of `band` in `columns`, row by row.
///
/// Returns the number of rows fully written before the band finished or
/// `abort` fired.
pub fn sweep_band<P, K, A>(
    kernel: &K,
    source: Option<&ImageView<'_>>,
    band: &mut ImageViewMut<'_>,
    columns: Range<i32>,
    abort: &A,
) -> u64
where
    P: Pixel,
    K: PixelKernel<P> + ?Sized,
    A: AbortSignal + ?Sized,
{
    let rows = band.bounds();
    let mut completed = 0;

    for y in rows.y1..rows.y2 {
        if abort.is_aborted() {
            break;
        }
        for x in columns.clone() {
            let src = source.and_then(|s| s.pixel(x, y)).map(P::read);
            if let Some(dst) = band.pixel_mut(x, y) {
                kernel.apply(src).write(dst);
            }
        }
        completed += 1;
    }

    completed
}
