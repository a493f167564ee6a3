//! Work partitioning, dispatch and cancellation.
//!
//! A render window is split into one horizontal band per worker
//! ([`tiles`]). The [`TileScheduler`] hands each band, together with an
//! exclusive view of the destination rows it covers, to the host's
//! [`Dispatch`] implementation. Workers poll an [`AbortSignal`] before each
//! row.

mod abort;
mod dispatch;
mod scheduler;
mod tile;

pub use abort::{AbortSignal, NeverAbort};
pub use dispatch::{Dispatch, SerialDispatcher, Worker};
pub use scheduler::{sweep_band, ScheduleError, ScheduleReport, TileScheduler};
pub use tile::{tile_for, tiles, Tile};
