use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use lumen_feed::{Page, PageRequest};
use lumen_primitives::{FetchError, FetchResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Collection, Image, Topic, TrendKeyword, User};

/// Snapshot of a catalog, as stored in a JSON fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFixture {
	pub topics: Vec<Topic>,
	pub collections: Vec<Collection>,
	pub images: Vec<Image>,
	pub users: Vec<User>,
	pub trends: Vec<TrendKeyword>,
}

impl CatalogFixture {
	/// Decodes a fixture document.
	pub fn from_json(source: &str) -> FetchResult<Self> {
		serde_json::from_str(source).map_err(|err| FetchError::decode(format!("line {}, column {}", err.line(), err.column()), err.to_string()))
	}

	/// Reads and decodes the fixture at `path`.
	pub fn load(path: &Path) -> FetchResult<Self> {
		let source = std::fs::read_to_string(path).map_err(|err| FetchError::other(format!("{}: {err}", path.display())))?;
		let fixture = Self::from_json(&source)?;
		debug!(
			path = %path.display(),
			topics = fixture.topics.len(),
			collections = fixture.collections.len(),
			images = fixture.images.len(),
			trends = fixture.trends.len(),
			"catalog.fixture_loaded"
		);
		Ok(fixture)
	}

	/// Trend and topic titles starting with `query`, case-insensitively,
	/// trends first, without repeats.
	pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
		let needle = query.trim().to_lowercase();
		if needle.is_empty() {
			return Vec::new();
		}
		let mut out: Vec<String> = Vec::new();
		let candidates = self.trends.iter().map(|t| &t.title).chain(self.topics.iter().map(|t| &t.title));
		for title in candidates {
			if out.len() >= limit {
				break;
			}
			let lower = title.to_lowercase();
			if lower.starts_with(&needle) && !out.iter().any(|seen| seen.to_lowercase() == lower) {
				out.push(title.clone());
			}
		}
		out
	}
}

/// Serves the page of `items` described by `request`.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
	let start = (request.number.saturating_sub(1) as usize).saturating_mul(request.size);
	let slice = items.get(start..).unwrap_or_default();
	request.page(slice.iter().take(request.size).cloned().collect())
}

/// Fetch thunks over a shared [`CatalogFixture`], with optional simulated
/// latency.
#[derive(Debug, Clone)]
pub struct FixtureSource {
	fixture: Arc<CatalogFixture>,
	latency: Duration,
}

impl FixtureSource {
	pub fn new(fixture: CatalogFixture) -> Self {
		Self {
			fixture: Arc::new(fixture),
			latency: Duration::ZERO,
		}
	}

	/// Delays every answer by `latency`.
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = latency;
		self
	}

	pub fn fixture(&self) -> &CatalogFixture {
		&self.fixture
	}

	pub fn topics(&self) -> impl Future<Output = FetchResult<Vec<Topic>>> + Send + 'static + use<> {
		let this = self.clone();
		async move {
			this.wait().await;
			Ok(this.fixture.topics.clone())
		}
	}

	pub fn images(&self, request: PageRequest) -> impl Future<Output = FetchResult<Page<Image>>> + Send + 'static + use<> {
		let this = self.clone();
		async move {
			this.wait().await;
			Ok(paginate(&this.fixture.images, request))
		}
	}

	pub fn collections(&self, request: PageRequest) -> impl Future<Output = FetchResult<Page<Collection>>> + Send + 'static + use<> {
		let this = self.clone();
		async move {
			this.wait().await;
			Ok(paginate(&this.fixture.collections, request))
		}
	}

	pub fn suggestions(&self, query: String, limit: usize) -> impl Future<Output = FetchResult<Vec<String>>> + Send + 'static + use<> {
		let this = self.clone();
		async move {
			this.wait().await;
			Ok(this.fixture.suggest(&query, limit))
		}
	}

	async fn wait(&self) {
		if !self.latency.is_zero() {
			tokio::time::sleep(self.latency).await;
		}
	}
}
