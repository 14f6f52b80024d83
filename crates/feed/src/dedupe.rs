use std::collections::HashSet;

use lumen_primitives::Identify;

/// Removes repeated identities, keeping the first occurrence of each and the
/// relative order of first occurrences.
pub fn dedupe<T: Identify>(items: impl IntoIterator<Item = T>) -> Vec<T> {
	let items = items.into_iter();
	let mut seen = HashSet::with_capacity(items.size_hint().0);
	items.filter(|item| seen.insert(item.id())).collect()
}

/// Returns `dedupe(existing ++ incoming)`.
///
/// Existing items keep their positions; incoming items already present are
/// dropped, so appending never moves visible items.
pub fn merge<T: Identify>(existing: Vec<T>, incoming: impl IntoIterator<Item = T>) -> Vec<T> {
	dedupe(existing.into_iter().chain(incoming))
}

/// Appends the incoming items whose identity is not yet in `existing`.
///
/// `existing` must already be free of duplicates. Returns the number of
/// appended items.
pub fn merge_into<T: Identify>(existing: &mut Vec<T>, incoming: impl IntoIterator<Item = T>) -> usize {
	let before = existing.len();
	let mut seen: HashSet<T::Id> = existing.iter().map(|item| item.id()).collect();
	existing.extend(incoming.into_iter().filter(|item| seen.insert(item.id())));
	existing.len() - before
}
