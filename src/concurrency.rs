//! Bounded worker pool for CPU-bound fan-out
//!
//! Jobs run on tokio's blocking pool, at most `size` at a time. Each job owns
//! its output; results come back in submission order regardless of which job
//! finishes first.

use crate::error::ApiError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Number of workers to use when none is configured
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Semaphore-bounded pool of blocking jobs
pub struct BoundedPool {
    /// One permit per job allowed to run concurrently
    semaphore: Arc<Semaphore>,
    size: usize,
}

impl BoundedPool {
    /// Create a pool with `size` workers; zero means available parallelism
    pub fn new(size: usize) -> Self {
        let size = if size == 0 {
            default_worker_count()
        } else {
            size
        };
        Self {
            semaphore: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run every job and return their outputs in the order the jobs were given.
    ///
    /// Waits for all jobs; a panicking job surfaces as `ApiError::Runtime`.
    pub async fn run_ordered<T, F>(&self, jobs: Vec<F>) -> Result<Vec<T>, ApiError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let job_count = jobs.len();
        let mut handles = Vec::with_capacity(job_count);
        for job in jobs {
            let permit = Arc::clone(&self.semaphore)
                .acquire_owned()
                .await
                .map_err(|_| ApiError::Runtime("Worker pool closed".to_string()))?;
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job()
            }));
        }
        debug!(jobs = job_count, workers = self.size, "Submitted jobs to worker pool");

        let mut results = Vec::with_capacity(job_count);
        for handle in handles {
            let output = handle
                .await
                .map_err(|e| ApiError::Runtime(format!("Worker failed: {}", e)))?;
            results.push(output);
        }
        Ok(results)
    }
}

impl Default for BoundedPool {
    fn default() -> Self {
        Self::new(0)
    }
}
