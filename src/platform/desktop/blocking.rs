use anyhow::{anyhow, Result};

/// Runs database-bound work off the UI thread and waits for it without blocking.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| anyhow!("background task failed: {err}"))
}
