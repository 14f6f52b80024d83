/// Loading phase of one accumulated list.
///
/// At most one load is active at a time; requests arriving while a load is
/// active are rejected as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
	/// No fetch in flight.
	#[default]
	Idle,
	/// The first page is being fetched.
	LoadingInitial,
	/// A next page is being fetched.
	LoadingMore,
}

impl LoadState {
	pub const fn is_idle(self) -> bool {
		matches!(self, Self::Idle)
	}

	pub const fn is_loading(self) -> bool {
		!self.is_idle()
	}

	/// Stable label for tracing fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::LoadingInitial => "loading_initial",
			Self::LoadingMore => "loading_more",
		}
	}
}

/// Feature-visible list state maintained by a
/// [`PaginatedLoader`](crate::PaginatedLoader).
///
/// Items are de-duplicated by identity and kept in discovery order. Only the
/// loader mutates this; views read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatedList<T> {
	pub(crate) items: Vec<T>,
	pub(crate) current_page: u32,
	pub(crate) has_next_page: bool,
	pub(crate) load_state: LoadState,
}

impl<T> Default for AccumulatedList<T> {
	fn default() -> Self {
		Self {
			items: Vec::new(),
			current_page: 0,
			has_next_page: false,
			load_state: LoadState::Idle,
		}
	}
}

impl<T> AccumulatedList<T> {
	/// Items in discovery order.
	pub fn items(&self) -> &[T] {
		&self.items
	}

	/// Last applied page number; `0` before the first load.
	pub fn current_page(&self) -> u32 {
		self.current_page
	}

	pub fn has_next_page(&self) -> bool {
		self.has_next_page
	}

	pub fn load_state(&self) -> LoadState {
		self.load_state
	}

	/// Whether a "loading more" indicator should be shown.
	pub fn is_loading_more(&self) -> bool {
		self.load_state == LoadState::LoadingMore
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Returns true when the item at `index` appearing on screen should
	/// trigger a next-page load: it is the last item, the list is idle and
	/// more pages exist.
	pub fn wants_more(&self, index: usize) -> bool {
		self.load_state.is_idle() && self.has_next_page && index + 1 >= self.items.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_list_is_idle_and_exhausted() {
		let list: AccumulatedList<u8> = AccumulatedList::default();
		assert_eq!(list.load_state(), LoadState::Idle);
		assert_eq!(list.current_page(), 0);
		assert!(!list.has_next_page());
		assert!(!list.wants_more(0));
	}

	#[test]
	fn only_last_item_wants_more() {
		let list = AccumulatedList {
			items: vec![1u8, 2, 3],
			current_page: 1,
			has_next_page: true,
			load_state: LoadState::Idle,
		};
		assert!(!list.wants_more(1));
		assert!(list.wants_more(2));

		let busy = AccumulatedList {
			load_state: LoadState::LoadingMore,
			..list
		};
		assert!(!busy.wants_more(2));
		assert!(busy.is_loading_more());
	}
}
