use std::io;
use tokio::runtime::{Builder, Runtime};

/// Single-threaded runtime for the one network call of a run
pub fn current_thread_runtime() -> io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

/// Execute an async function on a fresh current-thread runtime.
///
/// Must not be called from inside another tokio runtime.
pub fn block_on<F, T>(future: F) -> io::Result<T>
where
    F: std::future::Future<Output = T>,
{
    Ok(current_thread_runtime()?.block_on(future))
}
