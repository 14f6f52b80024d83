use std::future::Future;

use lumen_primitives::{BoxFutureSend, FetchResult};

use crate::{Page, PageRequest};

/// Injected page fetch: a remote catalog call, a fixture, or a test stub.
///
/// Implementations report failures through the result rather than returning
/// empty pages, and must tolerate the same request being issued again.
pub trait FetchPage<T>: Send + Sync {
	/// Fetches the page described by `request`.
	fn fetch(&self, request: PageRequest) -> BoxFutureSend<'_, FetchResult<Page<T>>>;
}

impl<T, F, Fut> FetchPage<T> for F
where
	F: Fn(PageRequest) -> Fut + Send + Sync,
	Fut: Future<Output = FetchResult<Page<T>>> + Send + 'static,
{
	fn fetch(&self, request: PageRequest) -> BoxFutureSend<'_, FetchResult<Page<T>>> {
		Box::pin(self(request))
	}
}
