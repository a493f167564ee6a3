use rayon::prelude::*;
use saturation_key::{Dispatch, Worker};

/// Runs render bands on a dedicated rayon pool.
pub struct RayonDispatcher {
    pool: rayon::ThreadPool,
}

impl RayonDispatcher {
    /// Build a pool with `threads` workers, or rayon's default when `None`.
    pub fn new(threads: Option<usize>) -> Result<Self, rayon::ThreadPoolBuildError> {
        let mut builder = rayon::ThreadPoolBuilder::new()
            .thread_name(|i| format!("satkey-worker-{i}"));
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build()?;
        tracing::debug!(threads = pool.current_num_threads(), "Worker pool ready");
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Dispatch for RayonDispatcher {
    fn worker_count(&self) -> usize {
        self.threads()
    }

    fn run<T, F>(&self, units: Vec<T>, work: F)
    where
        T: Send,
        F: Fn(Worker, T) + Sync,
    {
        let count = units.len();
        self.pool.install(|| {
            units
                .into_par_iter()
                .enumerate()
                .for_each(|(index, unit)| work(Worker { index, count }, unit));
        });
    }
}
