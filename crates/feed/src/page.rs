/// Arguments handed to a page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
	/// 1-based page index.
	pub number: u32,
	/// Requested number of items per page.
	pub size: usize,
}

impl PageRequest {
	/// Request for the first page.
	pub const fn first(size: usize) -> Self {
		Self { number: 1, size }
	}

	/// Request for the page following this one.
	pub const fn next(self) -> Self {
		Self {
			number: self.number.saturating_add(1),
			size: self.size,
		}
	}

	/// Wraps fetched items into the [`Page`] answering this request.
	pub fn page<T>(self, items: Vec<T>) -> Page<T> {
		Page::new(self.number, items, self.size)
	}
}

/// One fetched page of items.
///
/// `is_at_end` is derived once, at construction, from the item count and
/// the requested page size: a short page is taken as the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
	number: u32,
	items: Vec<T>,
	is_at_end: bool,
}

impl<T> Page<T> {
	/// Creates a page, marking it final when fewer than
	/// `requested_page_size` items were returned.
	pub fn new(number: u32, items: Vec<T>, requested_page_size: usize) -> Self {
		debug_assert!(number >= 1, "page numbers are 1-based");
		let is_at_end = items.len() < requested_page_size;
		Self { number, items, is_at_end }
	}

	/// 1-based page index.
	pub fn number(&self) -> u32 {
		self.number
	}

	/// Items in server order.
	pub fn items(&self) -> &[T] {
		&self.items
	}

	/// Whether this page was shorter than requested.
	pub fn is_at_end(&self) -> bool {
		self.is_at_end
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Consumes the page, yielding its items.
	pub fn into_items(self) -> Vec<T> {
		self.items
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_page_is_not_at_end() {
		let page = Page::new(1, vec![0u8; 30], 30);
		assert!(!page.is_at_end());
	}

	#[test]
	fn short_page_is_at_end() {
		let page = PageRequest::first(30).page(vec![0u8; 12]);
		assert!(page.is_at_end());
		assert_eq!(page.number(), 1);
		assert_eq!(page.len(), 12);
	}

	#[test]
	fn empty_page_is_at_end() {
		let page: Page<u8> = PageRequest::first(30).next().page(Vec::new());
		assert!(page.is_at_end());
		assert_eq!(page.number(), 2);
	}

	#[test]
	fn next_request_keeps_size() {
		let request = PageRequest::first(24).next().next();
		assert_eq!(request, PageRequest { number: 3, size: 24 });
	}
}
