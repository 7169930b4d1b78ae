use std::path::PathBuf;

use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::AppResult;

use super::types::{Sample, TRANSPORT_FAILURE_STATUS};

/// Buffered channel size between workers and the log writer. Workers send
/// with `try_send` and drop lines under backpressure; the log is diagnostics,
/// not accounting.
const LOG_CHANNEL_CAPACITY: usize = 1024;

#[must_use]
pub fn sample_log_channel() -> (mpsc::Sender<Sample>, mpsc::Receiver<Sample>) {
    mpsc::channel(LOG_CHANNEL_CAPACITY)
}

/// Spawns the per-request log writer: one CSV line per completed unit.
///
/// The task finishes once every sender is dropped and the file is flushed.
pub fn setup_sample_logger(
    path: PathBuf,
    mut sample_rx: mpsc::Receiver<Sample>,
) -> JoinHandle<AppResult<()>> {
    tokio::spawn(async move {
        let file = tokio::fs::File::create(&path).await?;
        let mut writer = BufWriter::new(file);
        writer.write_all(b"id,elapsed_ms,status,success\n").await?;
        while let Some(sample) = sample_rx.recv().await {
            let line = format!(
                "{},{:.3},{},{}\n",
                sample.id,
                sample.elapsed_ms(),
                sample.status_code.unwrap_or(TRANSPORT_FAILURE_STATUS),
                sample.success
            );
            writer.write_all(line.as_bytes()).await?;
        }
        writer.flush().await?;
        Ok(())
    })
}
