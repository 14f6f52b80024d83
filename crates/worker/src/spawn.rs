use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tokio_util::task::AbortOnDropHandle;

use crate::TaskClass;

/// Runtime that engine tasks land on: the caller's, or a small process-wide
/// fallback when called from plain threads.
pub(crate) fn runtime_handle() -> Handle {
	Handle::try_current().unwrap_or_else(|_| fallback_runtime().handle().clone())
}

fn fallback_runtime() -> &'static Runtime {
	static FALLBACK: OnceLock<Runtime> = OnceLock::new();
	FALLBACK.get_or_init(|| {
		Builder::new_multi_thread()
			.enable_all()
			.worker_threads(2)
			.thread_name("lumen-fetch")
			.build()
			.expect("failed to start the lumen fallback runtime")
	})
}

/// Spawns a detached engine task.
///
/// The task runs to completion unless it watches a cancellation signal of
/// its own (see [`crate::GenerationGate`]).
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	runtime_handle().spawn(fut)
}

/// Spawns an engine task tied to its handle: dropping the handle aborts the
/// task. Panics surface as a [`tokio::task::JoinError`] when awaited.
pub fn spawn_scoped<F>(class: TaskClass, fut: F) -> AbortOnDropHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn_scoped");
	AbortOnDropHandle::new(runtime_handle().spawn(fut))
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::time::Duration;

	use super::*;

	#[test]
	fn spawn_outside_a_runtime_uses_the_fallback() {
		let (tx, rx) = std::sync::mpsc::channel();
		let _task = spawn(TaskClass::Background, async move {
			let _ = tx.send(7u8);
		});
		assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(7));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn dropping_a_scoped_handle_aborts_the_task() {
		let finished = Arc::new(AtomicBool::new(false));
		let flag = Arc::clone(&finished);
		let handle = spawn_scoped(TaskClass::Interactive, async move {
			tokio::time::sleep(Duration::from_millis(50)).await;
			flag.store(true, Ordering::SeqCst);
		});
		drop(handle);

		tokio::time::sleep(Duration::from_millis(200)).await;
		assert!(!finished.load(Ordering::SeqCst));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn scoped_handle_yields_the_output() {
		let handle = spawn_scoped(TaskClass::Interactive, async { "page" });
		assert_eq!(handle.await.ok(), Some("page"));
	}
}
