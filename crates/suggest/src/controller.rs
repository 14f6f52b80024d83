//! Debounce and supersede logic for suggestion lookups.
//!
//! Every non-empty query change cancels the previous generation (its timer
//! or its in-flight lookup) and arms a new one: a task that sleeps for the
//! debounce window, then calls the source. Results come back over a channel
//! tagged with their generation and query; anything not matching the latest
//! generation and the current query is dropped on arrival.

use std::sync::Arc;
use std::time::Duration;

use lumen_primitives::{FetchError, FetchResult};
use lumen_worker::{GenerationGate, GenerationToken, TaskClass, join_error_message};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::SuggestionSource;

/// Quiet period after the last keystroke before a lookup is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Outcome of applying a lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionUpdate {
	/// Suggestions were replaced with `count` entries for `query`.
	Applied { query: String, count: usize },
	/// The lookup for `query` failed; previous suggestions are kept.
	Failed { query: String, error: FetchError },
}

struct Arrival<S> {
	generation: u64,
	query: String,
	result: FetchResult<Vec<S>>,
}

/// Drives a search box's suggestion list.
///
/// Owned by one screen; dropping it cancels any pending timer and lookup.
pub struct DebouncedQueryController<S> {
	source: Arc<dyn SuggestionSource<S>>,
	debounce: Duration,
	query: String,
	suggestions: Option<Vec<S>>,
	gate: GenerationGate,
	tx: mpsc::UnboundedSender<Arrival<S>>,
	rx: mpsc::UnboundedReceiver<Arrival<S>>,
}

impl<S: Send + 'static> DebouncedQueryController<S> {
	pub fn new(source: impl SuggestionSource<S>) -> Self {
		Self::with_debounce(source, DEFAULT_DEBOUNCE)
	}

	pub fn with_debounce(source: impl SuggestionSource<S>, debounce: Duration) -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		Self {
			source: Arc::new(source),
			debounce,
			query: String::new(),
			suggestions: None,
			gate: GenerationGate::new(),
			tx,
			rx,
		}
	}

	/// Text as last typed, untrimmed.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Suggestions for the most recently answered query; `None` once the
	/// query is cleared.
	pub fn suggestions(&self) -> Option<&[S]> {
		self.suggestions.as_deref()
	}

	/// Whether a debounce timer or lookup is outstanding.
	pub fn is_pending(&self) -> bool {
		self.gate.is_active()
	}

	pub fn debounce(&self) -> Duration {
		self.debounce
	}

	/// Records a keystroke.
	///
	/// The query is updated immediately. An empty (or whitespace-only) query
	/// clears the suggestions and cancels outstanding work; anything else
	/// restarts the debounce window.
	pub fn on_query_changed(&mut self, query: impl Into<String>) {
		self.query = query.into();
		self.cancel_active();

		let trimmed = self.query.trim();
		if trimmed.is_empty() {
			if self.suggestions.take().is_some() {
				debug!("suggest.cleared");
			}
			return;
		}

		let token = self.gate.arm();
		trace!(generation = token.generation(), query = trimmed, "suggest.armed");
		lumen_worker::spawn(
			TaskClass::Interactive,
			debounced_lookup(
				token,
				self.debounce,
				Arc::clone(&self.source),
				trimmed.to_string(),
				self.tx.clone(),
			),
		);
	}

	/// Applies every lookup result that has already arrived, without
	/// waiting.
	pub fn apply_ready(&mut self) -> Vec<SuggestionUpdate> {
		let mut updates = Vec::new();
		while let Ok(arrival) = self.rx.try_recv() {
			updates.extend(self.apply(arrival));
		}
		updates
	}

	/// Waits for the outstanding lookup and applies it.
	///
	/// Returns `None` immediately when nothing is outstanding.
	pub async fn next_update(&mut self) -> Option<SuggestionUpdate> {
		while self.gate.is_active() {
			let arrival = self.rx.recv().await?;
			if let Some(update) = self.apply(arrival) {
				return Some(update);
			}
		}
		None
	}

	/// Cancels any pending timer and in-flight lookup.
	pub fn shutdown(&mut self) {
		self.cancel_active();
	}

	fn cancel_active(&mut self) {
		if let Some(generation) = self.gate.cancel() {
			trace!(generation, "suggest.cancelled");
		}
	}

	fn apply(&mut self, arrival: Arrival<S>) -> Option<SuggestionUpdate> {
		if arrival.query != self.query.trim() || !self.gate.settle(arrival.generation) {
			trace!(generation = arrival.generation, query = %arrival.query, "suggest.stale_dropped");
			return None;
		}

		match arrival.result {
			Ok(suggestions) => {
				let count = suggestions.len();
				debug!(query = %arrival.query, count, "suggest.applied");
				self.suggestions = Some(suggestions);
				Some(SuggestionUpdate::Applied { query: arrival.query, count })
			}
			Err(error) => {
				warn!(query = %arrival.query, error = %error, "suggest.failed");
				Some(SuggestionUpdate::Failed { query: arrival.query, error })
			}
		}
	}
}

async fn debounced_lookup<S: Send + 'static>(
	token: GenerationToken,
	debounce: Duration,
	source: Arc<dyn SuggestionSource<S>>,
	query: String,
	tx: mpsc::UnboundedSender<Arrival<S>>,
) {
	tokio::select! {
		biased;
		_ = token.cancelled() => return,
		_ = tokio::time::sleep(debounce) => {}
	}

	debug!(generation = token.generation(), query = %query, "suggest.lookup");
	// A panicking source still yields an arrival, as `Aborted`.
	let lookup = lumen_worker::spawn_scoped(TaskClass::Interactive, source.suggest(query.clone()));
	let result = tokio::select! {
		biased;
		_ = token.cancelled() => return,
		joined = lookup => joined.unwrap_or_else(|err| Err(FetchError::Aborted(join_error_message(err)))),
	};

	// The controller may be gone; a closed channel is fine.
	let _ = tx.send(Arrival {
		generation: token.generation(),
		query,
		result,
	});
}
