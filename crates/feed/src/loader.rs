//! Paginated loader: first page, next pages and the load-state guard.
//!
//! The loader can be driven two ways:
//!
//! - `load_first_page` / `load_next_page` await an injected [`FetchPage`]
//!   inline.
//! - `begin_first_page` / `begin_next_page` hand out a [`LoadTicket`] whose
//!   request the caller fetches elsewhere (a worker task, an event loop
//!   bridge) and later applies with [`PaginatedLoader::finish`].
//!
//! Both paths share the same guard: a request is only issued when the list
//! is idle (and, for next pages, when more pages exist). Rejected requests
//! are no-ops returning the unchanged list.

use lumen_primitives::{FetchResult, Identify};
use tracing::{debug, trace, warn};

use crate::dedupe::{dedupe, merge_into};
use crate::{AccumulatedList, FetchPage, LoadState, Page, PageRequest};

/// Handle for one started load; [`PaginatedLoader::finish`] only accepts
/// the ticket of the load currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
	request: PageRequest,
	generation: u64,
}

impl LoadTicket {
	/// Page to fetch for this load.
	pub fn request(&self) -> PageRequest {
		self.request
	}

	pub fn number(&self) -> u32 {
		self.request.number
	}

	/// Wraps fetched items into the page answering this load.
	pub fn page<T>(&self, items: Vec<T>) -> Page<T> {
		self.request.page(items)
	}
}

/// Controller owning one feature's [`AccumulatedList`].
#[derive(Debug)]
pub struct PaginatedLoader<T> {
	list: AccumulatedList<T>,
	page_size: usize,
	generation: u64,
	pending: Option<LoadTicket>,
}

impl<T: Identify> Default for PaginatedLoader<T> {
	fn default() -> Self {
		Self::new(Self::DEFAULT_PAGE_SIZE)
	}
}

impl<T: Identify> PaginatedLoader<T> {
	/// Page size used by the catalog API when none is configured.
	pub const DEFAULT_PAGE_SIZE: usize = 30;

	/// Creates an empty idle loader. A zero page size is clamped to 1.
	pub fn new(page_size: usize) -> Self {
		Self {
			list: AccumulatedList::default(),
			page_size: page_size.max(1),
			generation: 0,
			pending: None,
		}
	}

	/// Changes the size of subsequent page requests. Zero is clamped to 1.
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size.max(1);
		self
	}

	pub fn page_size(&self) -> usize {
		self.page_size
	}

	/// Read-only snapshot for rendering.
	pub fn list(&self) -> &AccumulatedList<T> {
		&self.list
	}

	pub fn items(&self) -> &[T] {
		self.list.items()
	}

	pub fn load_state(&self) -> LoadState {
		self.list.load_state
	}

	/// Drops all accumulated items, e.g. when the feature's query changes.
	///
	/// A load still in flight is forgotten; its late [`finish`](Self::finish)
	/// is ignored, even after a new load has started.
	pub fn reset(&mut self) {
		debug!(discarded = self.list.len(), "feed.reset");
		self.list = AccumulatedList::default();
		self.pending = None;
	}

	/// Starts a first-page load, returning its ticket.
	///
	/// Returns `None` while any load is active.
	pub fn begin_first_page(&mut self) -> Option<LoadTicket> {
		if self.list.load_state.is_loading() {
			trace!(state = self.list.load_state.as_str(), "feed.first_page_rejected");
			return None;
		}
		self.list.load_state = LoadState::LoadingInitial;
		Some(self.issue(PageRequest::first(self.page_size)))
	}

	/// Starts a next-page load, returning its ticket.
	///
	/// Returns `None` unless the list is idle and a next page exists.
	pub fn begin_next_page(&mut self) -> Option<LoadTicket> {
		if self.list.load_state.is_loading() || !self.list.has_next_page {
			trace!(
				state = self.list.load_state.as_str(),
				has_next_page = self.list.has_next_page,
				"feed.next_page_rejected"
			);
			return None;
		}
		let request = PageRequest {
			number: self.list.current_page.saturating_add(1),
			size: self.page_size,
		};
		self.list.load_state = LoadState::LoadingMore;
		Some(self.issue(request))
	}

	fn issue(&mut self, request: PageRequest) -> LoadTicket {
		self.generation = self.generation.wrapping_add(1);
		let ticket = LoadTicket {
			request,
			generation: self.generation,
		};
		self.pending = Some(ticket);
		debug!(
			page = request.number,
			size = request.size,
			generation = ticket.generation,
			phase = self.list.load_state.as_str(),
			"feed.load_started"
		);
		ticket
	}

	/// Applies the outcome of the load identified by `ticket`.
	///
	/// On failure the list is left untouched apart from returning to
	/// [`LoadState::Idle`], and the error is returned. Tickets that are not
	/// the load in flight (reset, or superseded) are ignored, successful or
	/// not.
	pub fn finish(&mut self, ticket: LoadTicket, result: FetchResult<Page<T>>) -> FetchResult<&AccumulatedList<T>> {
		if self.pending != Some(ticket) {
			trace!(
				page = ticket.request.number,
				generation = ticket.generation,
				current = self.pending.map(|p| p.generation),
				"feed.stale_finish_ignored"
			);
			return Ok(&self.list);
		}
		self.pending = None;
		let request = ticket.request;
		let phase = std::mem::replace(&mut self.list.load_state, LoadState::Idle);

		let page = match result {
			Ok(page) => page,
			Err(err) => {
				warn!(page = request.number, phase = phase.as_str(), error = %err, "feed.page_failed");
				return Err(err);
			}
		};

		if page.number() != request.number {
			debug!(requested = request.number, received = page.number(), "feed.page_number_mismatch");
		}

		let number = page.number();
		// A zero-item page ends the stream even if the previous page was full.
		let has_next_page = !page.is_at_end() && !page.is_empty();
		let received = page.len();

		let appended = match phase {
			LoadState::LoadingMore => merge_into(&mut self.list.items, page.into_items()),
			LoadState::LoadingInitial | LoadState::Idle => {
				self.list.items = dedupe(page.into_items());
				self.list.items.len()
			}
		};
		self.list.current_page = number;
		self.list.has_next_page = has_next_page;

		debug!(
			page = number,
			received,
			appended,
			total = self.list.len(),
			has_next_page,
			"feed.page_applied"
		);
		Ok(&self.list)
	}

	/// Loads the first page, replacing any accumulated items.
	///
	/// A no-op returning the current list while another load is active.
	pub async fn load_first_page<F>(&mut self, fetch: &F) -> FetchResult<&AccumulatedList<T>>
	where
		F: FetchPage<T> + ?Sized,
	{
		match self.begin_first_page() {
			Some(ticket) => self.run(ticket, fetch).await,
			None => Ok(&self.list),
		}
	}

	/// Loads the page after `current_page` and merges it.
	///
	/// A no-op returning the current list (without calling `fetch`) while a
	/// load is active or once the last page has been seen.
	pub async fn load_next_page<F>(&mut self, fetch: &F) -> FetchResult<&AccumulatedList<T>>
	where
		F: FetchPage<T> + ?Sized,
	{
		match self.begin_next_page() {
			Some(ticket) => self.run(ticket, fetch).await,
			None => Ok(&self.list),
		}
	}

	async fn run<F>(&mut self, ticket: LoadTicket, fetch: &F) -> FetchResult<&AccumulatedList<T>>
	where
		F: FetchPage<T> + ?Sized,
	{
		let result = {
			let guard = AbandonOnDrop { loader: &mut *self };
			let result = fetch.fetch(ticket.request).await;
			guard.disarm();
			result
		};
		self.finish(ticket, result)
	}

	fn abandon(&mut self) {
		if let Some(ticket) = self.pending.take() {
			debug!(page = ticket.request.number, generation = ticket.generation, "feed.load_abandoned");
		}
		self.list.load_state = LoadState::Idle;
	}
}

/// Returns the loader to idle if an inline fetch is dropped or unwinds
/// before completing.
struct AbandonOnDrop<'a, T: Identify> {
	loader: &'a mut PaginatedLoader<T>,
}

impl<T: Identify> AbandonOnDrop<'_, T> {
	fn disarm(self) {
		std::mem::forget(self);
	}
}

impl<T: Identify> Drop for AbandonOnDrop<'_, T> {
	fn drop(&mut self) {
		self.loader.abandon();
	}
}
