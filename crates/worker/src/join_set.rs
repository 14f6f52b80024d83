use std::future::Future;

use tokio::task::{JoinError, JoinSet};

use crate::TaskClass;

/// Fallible tasks whose values are collected in spawn order.
///
/// Completion order is irrelevant to the result. Dropping the set (or the
/// [`join_ordered`](Self::join_ordered) future) aborts every task still
/// running.
#[derive(Debug)]
pub struct OrderedJoinSet<T, E> {
	class: TaskClass,
	inner: JoinSet<(usize, Result<T, E>)>,
	parts: usize,
}

impl<T, E> OrderedJoinSet<T, E>
where
	T: Send + 'static,
	E: Send + 'static,
{
	pub fn new(class: TaskClass) -> Self {
		Self {
			class,
			inner: JoinSet::new(),
			parts: 0,
		}
	}

	/// Number of tasks spawned so far.
	pub fn parts(&self) -> usize {
		self.parts
	}

	/// Spawns the next part; its value lands at index [`parts`](Self::parts)
	/// as it was before the call.
	pub fn spawn<F>(&mut self, fut: F)
	where
		F: Future<Output = Result<T, E>> + Send + 'static,
	{
		let index = self.parts;
		self.parts += 1;
		tracing::trace!(worker_class = self.class.as_str(), part = index, "worker.join_set.spawn");
		self.inner.spawn_on(async move { (index, fut.await) }, &crate::runtime_handle());
	}

	/// Waits for every part and returns the values in spawn order.
	///
	/// The first failure to complete aborts the remaining parts and is
	/// returned. A part that panics or is cancelled fails through
	/// `on_join_error`.
	pub async fn join_ordered(mut self, on_join_error: impl Fn(JoinError) -> E) -> Result<Vec<T>, E> {
		let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(self.parts).collect();
		while let Some(joined) = self.inner.join_next().await {
			let (index, result) = match joined {
				Ok(tagged) => tagged,
				Err(err) => {
					self.inner.abort_all();
					return Err(on_join_error(err));
				}
			};
			match result {
				Ok(value) => {
					if let Some(slot) = slots.get_mut(index) {
						*slot = Some(value);
					}
				}
				Err(err) => {
					tracing::debug!(worker_class = self.class.as_str(), part = index, "worker.join_set.part_failed");
					self.inner.abort_all();
					return Err(err);
				}
			}
		}
		// Every part either filled its slot or returned early above.
		Ok(slots.into_iter().flatten().collect())
	}
}
