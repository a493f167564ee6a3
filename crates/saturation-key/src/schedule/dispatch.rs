//! Parallel dispatch capability supplied by the host.

/// Identity of a worker inside one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    /// Zero-based worker index
    pub index: usize,
    /// Total number of workers in this dispatch
    pub count: usize,
}

/// "Run this work N ways."
///
/// The host decides how many workers a render gets and how they are run;
/// the engine never creates threads itself. `run` hands each worker exactly
/// one owned unit of work and must return only once every worker has
/// finished.
pub trait Dispatch {
    /// Number of workers the host wants this render split into.
    fn worker_count(&self) -> usize;

    /// Call `work` once per unit, potentially concurrently.
    ///
    /// Unit `i` of `units` is passed together with `Worker { index: i, count:
    /// units.len() }`.
    fn run<T, F>(&self, units: Vec<T>, work: F)
    where
        T: Send,
        F: Fn(Worker, T) + Sync;
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn worker_count(&self) -> usize {
        (**self).worker_count()
    }

    fn run<T, F>(&self, units: Vec<T>, work: F)
    where
        T: Send,
        F: Fn(Worker, T) + Sync,
    {
        (**self).run(units, work)
    }
}

/// Runs every unit on the calling thread, in index order.
///
/// Still reports `workers` so the window is banded exactly as a parallel
/// host would band it.
#[derive(Debug, Clone, Copy)]
pub struct SerialDispatcher {
    workers: usize,
}

impl SerialDispatcher {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Default for SerialDispatcher {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Dispatch for SerialDispatcher {
    fn worker_count(&self) -> usize {
        self.workers
    }

    fn run<T, F>(&self, units: Vec<T>, work: F)
    where
        T: Send,
        F: Fn(Worker, T) + Sync,
    {
        let count = units.len();
        for (index, unit) in units.into_iter().enumerate() {
            work(Worker { index, count }, unit);
        }
    }
}
