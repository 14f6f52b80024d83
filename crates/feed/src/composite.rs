//! Concurrent composite loads for a feature's first render.
//!
//! Independent reads (topics, the first page of collections, the first page
//! of images) are spawned together and joined in input order. The join fails
//! as a whole on the first failing part; the remaining parts are aborted and
//! any finished values are discarded. Parts that may fail without sinking
//! the whole load are wrapped in [`optional`].

use std::future::Future;

use lumen_primitives::{BoxFutureStatic, FetchError, FetchResult};
use lumen_worker::{OrderedJoinSet, TaskClass, join_error_message};
use tokio::task::JoinError;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, warn};

/// Joins independent fetches spawned on the worker runtime.
#[derive(Debug, Clone, Copy)]
pub struct CompositeLoader {
	class: TaskClass,
}

impl Default for CompositeLoader {
	fn default() -> Self {
		Self::new(TaskClass::Interactive)
	}
}

impl CompositeLoader {
	pub fn new(class: TaskClass) -> Self {
		Self { class }
	}

	/// Runs homogeneous fetches concurrently, returning their values in
	/// input order.
	pub async fn load_all<T, I, Fut>(&self, fetches: I) -> FetchResult<Vec<T>>
	where
		I: IntoIterator<Item = Fut>,
		Fut: Future<Output = FetchResult<T>> + Send + 'static,
		T: Send + 'static,
	{
		let mut set = OrderedJoinSet::new(self.class);
		for fetch in fetches {
			set.spawn(fetch);
		}
		debug!(parts = set.parts(), worker_class = self.class.as_str(), "composite.load_all");
		set.join_ordered(aborted).await
	}

	/// Runs a tuple of heterogeneous fetches concurrently, returning a tuple
	/// of their values in input order.
	pub async fn join<J: FetchTuple>(&self, fetches: J) -> FetchResult<J::Output> {
		debug!(worker_class = self.class.as_str(), "composite.join");
		fetches.join_all(self.class).await
	}
}

/// Tuple of independent fetch futures joinable by [`CompositeLoader::join`].
///
/// Implemented for tuples of two to five futures.
pub trait FetchTuple {
	/// Tuple of the fetched values.
	type Output: Send + 'static;

	/// Spawns every fetch and joins them in order, failing fast.
	fn join_all(self, class: TaskClass) -> BoxFutureStatic<FetchResult<Self::Output>>;
}

macro_rules! impl_fetch_tuple {
	($($fut:ident $out:ident $idx:tt),+) => {
		impl<$($fut, $out),+> FetchTuple for ($($fut,)+)
		where
			$($fut: Future<Output = FetchResult<$out>> + Send + 'static, $out: Send + 'static,)+
		{
			type Output = ($($out,)+);

			fn join_all(self, class: TaskClass) -> BoxFutureStatic<FetchResult<Self::Output>> {
				Box::pin(async move {
					tokio::try_join!($(settle(lumen_worker::spawn_scoped(class, self.$idx))),+)
				})
			}
		}
	};
}

impl_fetch_tuple!(F0 T0 0, F1 T1 1);
impl_fetch_tuple!(F0 T0 0, F1 T1 1, F2 T2 2);
impl_fetch_tuple!(F0 T0 0, F1 T1 1, F2 T2 2, F3 T3 3);
impl_fetch_tuple!(F0 T0 0, F1 T1 1, F2 T2 2, F3 T3 3, F4 T4 4);

async fn settle<T>(handle: AbortOnDropHandle<FetchResult<T>>) -> FetchResult<T> {
	handle.await.unwrap_or_else(|err| Err(aborted(err)))
}

fn aborted(err: JoinError) -> FetchError {
	FetchError::Aborted(join_error_message(err))
}

/// Turns a failing part into `T::default()` so it cannot fail the
/// surrounding composite load.
pub async fn optional<T, Fut>(part: &'static str, fetch: Fut) -> FetchResult<T>
where
	Fut: Future<Output = FetchResult<T>>,
	T: Default,
{
	match fetch.await {
		Ok(value) => Ok(value),
		Err(err) => {
			warn!(part, error = %err, "composite.optional_part_failed");
			Ok(T::default())
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::time::Duration;

	use pretty_assertions::assert_eq;

	use super::*;

	async fn after<T>(millis: u64, result: FetchResult<T>) -> FetchResult<T> {
		tokio::time::sleep(Duration::from_millis(millis)).await;
		result
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn join_preserves_input_order() {
		let loader = CompositeLoader::default();
		let joined = loader
			.join((after(30, Ok("A")), after(10, Ok(2u32)), after(20, Ok(vec!['C']))))
			.await;
		assert_eq!(joined, Ok(("A", 2, vec!['C'])));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn join_fails_when_any_part_fails() {
		let loader = CompositeLoader::default();
		let joined = loader
			.join((
				after(30, Ok("A")),
				after(10, Err::<&str, _>(FetchError::transport("timeout"))),
				after(20, Ok("C")),
			))
			.await;
		assert_eq!(joined, Err(FetchError::transport("timeout")));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn failure_aborts_remaining_parts() {
		let finished = Arc::new(AtomicBool::new(false));
		let flag = Arc::clone(&finished);
		let slow = async move {
			tokio::time::sleep(Duration::from_millis(100)).await;
			flag.store(true, Ordering::SeqCst);
			Ok::<_, FetchError>(())
		};

		let loader = CompositeLoader::default();
		let joined = loader.join((slow, after(5, Err::<(), _>(FetchError::other("boom"))))).await;
		assert!(joined.is_err());

		tokio::time::sleep(Duration::from_millis(500)).await;
		assert!(!finished.load(Ordering::SeqCst), "sibling fetch must be aborted");
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn panicking_part_reports_aborted() {
		let loader = CompositeLoader::default();
		let exploding = async {
			if true {
				panic!("decoder exploded");
			}
			Ok::<u8, FetchError>(0)
		};
		let joined = loader.join((after(10, Ok(1u8)), exploding)).await;
		match joined {
			Err(FetchError::Aborted(message)) => assert!(message.contains("decoder exploded"), "{message}"),
			other => panic!("expected aborted error, got {other:?}"),
		}
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn load_all_preserves_input_order() {
		let loader = CompositeLoader::new(TaskClass::Background);
		let values = loader.load_all([after(30, Ok('A')), after(10, Ok('B')), after(20, Ok('C'))]).await;
		assert_eq!(values, Ok(vec!['A', 'B', 'C']));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn load_all_fails_as_a_whole() {
		let loader = CompositeLoader::default();
		let values = loader
			.load_all([after(30, Ok('A')), after(10, Err(FetchError::transport("reset"))), after(20, Ok('C'))])
			.await;
		assert_eq!(values, Err(FetchError::transport("reset")));
	}

	#[tokio::test]
	async fn load_all_of_nothing_is_empty() {
		let loader = CompositeLoader::default();
		let values = loader.load_all(Vec::<BoxFutureStatic<FetchResult<u8>>>::new()).await;
		assert_eq!(values, Ok(Vec::new()));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn optional_part_defaults_on_failure() {
		let loader = CompositeLoader::default();
		let joined = loader
			.join((
				optional("topics", after(10, Err::<Vec<&str>, _>(FetchError::transport("offline")))),
				after(20, Ok(vec![1u8, 2])),
			))
			.await;
		assert_eq!(joined, Ok((Vec::new(), vec![1, 2])));
	}
}
