use std::fmt::Debug;
use std::hash::Hash;

use lumen_primitives::{Dimensions, Identify};

use crate::{MasonryAssignment, distribute};

/// Identity of an input sequence as far as layout caching is concerned.
///
/// Only the ends of the sequence are compared: an interior item changing
/// without the count changing keeps the cached layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutKey<Id> {
	first: Option<Id>,
	last: Option<Id>,
	count: usize,
	columns: usize,
	spacing_bits: u64,
}

impl<Id> LayoutKey<Id> {
	pub fn new<T>(items: &[T], columns: usize, spacing: f64) -> Self
	where
		T: Identify<Id = Id>,
	{
		Self {
			first: items.first().map(|item| item.id()),
			last: items.last().map(|item| item.id()),
			count: items.len(),
			columns,
			// `-0.0 + 0.0` is `+0.0`, so both zeros share a key.
			spacing_bits: (spacing + 0.0).to_bits(),
		}
	}
}

/// Last computed [`MasonryAssignment`], rebuilt from scratch whenever the
/// [`LayoutKey`] of the input changes.
#[derive(Debug, Clone)]
pub struct MasonryLayout<Id> {
	key: Option<LayoutKey<Id>>,
	assignment: MasonryAssignment<Id>,
	rebuilds: u64,
}

impl<Id> Default for MasonryLayout<Id> {
	fn default() -> Self {
		Self {
			key: None,
			assignment: MasonryAssignment::empty(),
			rebuilds: 0,
		}
	}
}

impl<Id> MasonryLayout<Id>
where
	Id: Clone + Eq + Hash + Debug,
{
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the assignment for `items`, recomputing it if the key changed.
	///
	/// `spacing` is the rendered gap between items; it only participates in
	/// the key.
	pub fn assignment<T>(&mut self, items: &[T], columns: usize, spacing: f64) -> &MasonryAssignment<Id>
	where
		T: Identify<Id = Id> + Dimensions,
	{
		let key = LayoutKey::new(items, columns, spacing);
		if self.key.as_ref() != Some(&key) {
			self.assignment = distribute(items, columns);
			self.key = Some(key);
			self.rebuilds += 1;
			tracing::debug!(items = items.len(), columns, rebuilds = self.rebuilds, "masonry.rebuild");
		}
		&self.assignment
	}

	/// Number of full recomputations performed so far.
	pub fn rebuilds(&self) -> u64 {
		self.rebuilds
	}

	/// Forces the next call to recompute.
	pub fn invalidate(&mut self) {
		self.key = None;
	}
}
