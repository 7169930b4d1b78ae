//! Bounded-concurrency dispatch of request units.
//!
//! A counting semaphore of capacity C gates entry into execution; each unit
//! holds one permit for the duration of its round trip and releases it
//! unconditionally on completion, so failures cannot leak permits and starve
//! the pool. Completion order is unordered; samples carry the unit id so
//! callers can reconstruct the original order.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::warn;

use crate::metrics::Sample;
use crate::shutdown::ShutdownSender;


/// Outcome of one dispatch run: the collected samples plus whether shutdown
/// cut the run short before every unit produced a sample.
#[derive(Debug)]
pub struct DispatchReport {
    pub samples: Vec<Sample>,
    pub interrupted: bool,
}

/// Runs every unit through `execute` with at most `limit` in flight at any
/// instant, collecting one sample per completed unit.
///
/// Units that have not yet acquired a permit when the shutdown channel fires
/// abandon without executing; in-flight units run to completion. The permit
/// pool never resizes mid-run.
pub async fn run_bounded<T, F, Fut>(
    units: Vec<T>,
    limit: usize,
    shutdown_tx: &ShutdownSender,
    execute: F,
) -> DispatchReport
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Sample> + Send + 'static,
{
    let total = units.len();
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let (sample_tx, mut sample_rx) = mpsc::channel::<Sample>(total.max(1));

    let mut worker_handles = Vec::with_capacity(total);
    for unit in units {
        let permits = Arc::clone(&permits);
        let mut shutdown_rx = shutdown_tx.subscribe();
        let execute = execute.clone();
        let sample_tx = sample_tx.clone();

        worker_handles.push(tokio::spawn(async move {
            // Shutdown wins over a freed permit when both are ready, so no
            // new unit is admitted after the signal.
            let permit_result = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => return,
                permit = permits.acquire_owned() => permit,
            };
            let _permit = match permit_result {
                Ok(permit) => permit,
                Err(_) => return,
            };
            let sample = execute(unit).await;
            drop(sample_tx.send(sample).await);
        }));
    }
    drop(sample_tx);

    let mut samples = Vec::with_capacity(total);
    while let Some(sample) = sample_rx.recv().await {
        samples.push(sample);
    }
    for handle in worker_handles {
        if handle.await.is_err() {
            warn!("Dispatch worker ended abnormally.");
        }
    }

    let interrupted = samples.len() < total;
    DispatchReport {
        samples,
        interrupted,
    }
}
