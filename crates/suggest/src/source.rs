use std::future::Future;

use lumen_primitives::{BoxFutureStatic, FetchResult};

/// Injected suggestion lookup for a (trimmed, non-empty) query.
pub trait SuggestionSource<S>: Send + Sync + 'static {
	fn suggest(&self, query: String) -> BoxFutureStatic<FetchResult<Vec<S>>>;
}

impl<S, F, Fut> SuggestionSource<S> for F
where
	F: Fn(String) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = FetchResult<Vec<S>>> + Send + 'static,
{
	fn suggest(&self, query: String) -> BoxFutureStatic<FetchResult<Vec<S>>> {
		Box::pin(self(query))
	}
}
