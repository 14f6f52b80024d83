use lumen_primitives::{Dimensions, Identify};

/// Column-by-column item identities plus the predicted height used to
/// choose each placement.
#[derive(Debug, Clone, PartialEq)]
pub struct MasonryAssignment<Id> {
	columns: Vec<Vec<Id>>,
	heights: Vec<f64>,
}

impl<Id> MasonryAssignment<Id> {
	/// An assignment with no columns.
	pub fn empty() -> Self {
		Self {
			columns: Vec::new(),
			heights: Vec::new(),
		}
	}

	/// Item identities per column, top to bottom.
	pub fn columns(&self) -> &[Vec<Id>] {
		&self.columns
	}

	pub fn column(&self, index: usize) -> Option<&[Id]> {
		self.columns.get(index).map(Vec::as_slice)
	}

	/// Predicted per-column height, in units of column width.
	pub fn heights(&self) -> &[f64] {
		&self.heights
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	pub fn item_count(&self) -> usize {
		self.columns.iter().map(Vec::len).sum()
	}

	/// Difference between the tallest and shortest predicted column.
	pub fn imbalance(&self) -> f64 {
		let max = self.heights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
		let min = self.heights.iter().copied().fold(f64::INFINITY, f64::min);
		if self.heights.is_empty() { 0.0 } else { max - min }
	}

	/// Returns the column holding `id`.
	pub fn column_of(&self, id: &Id) -> Option<usize>
	where
		Id: PartialEq,
	{
		self.columns.iter().position(|column| column.contains(id))
	}
}

/// Height of an item rendered at unit width.
///
/// Degenerate sizes (non-positive width, non-finite ratio) weigh 1, i.e. are
/// treated as squares.
pub fn height_weight(width: f64, height: f64) -> f64 {
	if width <= 0.0 || width.is_nan() {
		return 1.0;
	}
	let weight = height / width;
	if weight.is_finite() && weight >= 0.0 { weight } else { 1.0 }
}

/// Deals `items` into `columns` columns, shortest column first.
///
/// Ties go to the leftmost column. `columns <= 1` yields a single column in
/// input order; an empty input yields empty columns.
pub fn distribute<I>(items: I, columns: usize) -> MasonryAssignment<<I::Item as Identify>::Id>
where
	I: IntoIterator,
	I::Item: Identify + Dimensions,
{
	let count = columns.max(1);
	let mut assignment = MasonryAssignment {
		columns: vec![Vec::new(); count],
		heights: vec![0.0; count],
	};

	for item in items {
		let (width, height) = item.dimensions();
		let target = shortest_column(&assignment.heights);
		assignment.columns[target].push(item.id());
		assignment.heights[target] += height_weight(width, height);
	}

	tracing::trace!(
		columns = count,
		items = assignment.item_count(),
		imbalance = assignment.imbalance(),
		"masonry.distribute"
	);
	assignment
}

fn shortest_column(heights: &[f64]) -> usize {
	let mut best = 0;
	for (index, height) in heights.iter().enumerate().skip(1) {
		if *height < heights[best] {
			best = index;
		}
	}
	best
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;

	#[derive(Debug, Clone)]
	struct Tile {
		id: u32,
		width: f64,
		height: f64,
	}

	impl Identify for Tile {
		type Id = u32;

		fn id(&self) -> u32 {
			self.id
		}
	}

	impl Dimensions for Tile {
		fn dimensions(&self) -> (f64, f64) {
			(self.width, self.height)
		}
	}

	fn weighted(weights: &[f64]) -> Vec<Tile> {
		weights
			.iter()
			.enumerate()
			.map(|(index, weight)| Tile {
				id: index as u32 + 1,
				width: 100.0,
				height: weight * 100.0,
			})
			.collect()
	}

	#[test]
	fn equal_squares_split_evenly() {
		let assignment = distribute(&weighted(&[1.0; 6]), 2);
		assert_eq!(assignment.columns(), &[vec![1, 3, 5], vec![2, 4, 6]]);
		assert_eq!(assignment.heights(), &[3.0, 3.0]);
	}

	#[test]
	fn ties_go_to_leftmost_column() {
		let assignment = distribute(&weighted(&[1.0, 1.0, 1.0, 1.0, 5.0]), 2);
		assert_eq!(assignment.columns(), &[vec![1, 3, 5], vec![2, 4]]);
		assert_eq!(assignment.heights(), &[7.0, 2.0]);
	}

	#[test]
	fn tall_items_are_balanced_by_short_ones() {
		let assignment = distribute(&weighted(&[3.0, 1.0, 1.0, 1.0, 1.0]), 2);
		assert_eq!(assignment.columns(), &[vec![1, 5], vec![2, 3, 4]]);
	}

	#[test]
	fn single_column_keeps_input_order() {
		for columns in [0, 1] {
			let assignment = distribute(&weighted(&[2.0, 0.5, 1.0]), columns);
			assert_eq!(assignment.columns(), &[vec![1, 2, 3]]);
		}
	}

	#[test]
	fn empty_input_yields_empty_columns() {
		let assignment = distribute(Vec::<Tile>::new(), 4);
		assert_eq!(assignment.column_count(), 4);
		assert!(assignment.columns().iter().all(Vec::is_empty));
		assert_eq!(assignment.imbalance(), 0.0);
	}

	#[test]
	fn more_columns_than_items() {
		let assignment = distribute(&weighted(&[1.0, 2.0]), 5);
		assert_eq!(assignment.columns(), &[vec![1], vec![2], vec![], vec![], vec![]]);
		assert_eq!(assignment.column_of(&2), Some(1));
	}

	#[test]
	fn degenerate_width_weighs_one() {
		assert_eq!(height_weight(0.0, 500.0), 1.0);
		assert_eq!(height_weight(-10.0, 500.0), 1.0);
		assert_eq!(height_weight(f64::NAN, 500.0), 1.0);
		assert_eq!(height_weight(200.0, 300.0), 1.5);
	}

	proptest! {
		#[test]
		fn prop_every_item_placed_once(weights in prop::collection::vec(0.1f64..4.0, 0..80), columns in 1usize..8) {
			let tiles = weighted(&weights);
			let assignment = distribute(&tiles, columns);
			prop_assert_eq!(assignment.column_count(), columns);
			prop_assert_eq!(assignment.item_count(), tiles.len());

			let mut placed: Vec<u32> = assignment.columns().iter().flatten().copied().collect();
			placed.sort_unstable();
			let expected: Vec<u32> = tiles.iter().map(|t| t.id).collect();
			prop_assert_eq!(placed, expected);

			for column in assignment.columns() {
				prop_assert!(column.windows(2).all(|pair| pair[0] < pair[1]), "columns keep input order");
			}
		}

		#[test]
		fn prop_spread_bounded_by_heaviest_item(weights in prop::collection::vec(0.1f64..4.0, 1..80), columns in 1usize..8) {
			let assignment = distribute(&weighted(&weights), columns);
			let heaviest = weights.iter().copied().fold(0.0, f64::max);
			prop_assert!(assignment.imbalance() <= heaviest + 1e-9);
		}
	}
}
