/// Responsive column count and the resulting column width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
	pub columns: usize,
	pub column_width: f64,
}

/// Fits as many columns of at least `min_column_width` as the available
/// width allows, between 1 and `max_columns`, separated by `spacing`.
pub fn columns_for_width(available_width: f64, min_column_width: f64, spacing: f64, max_columns: usize) -> ColumnLayout {
	let available = if available_width.is_finite() { available_width.max(0.0) } else { 0.0 };
	let spacing = if spacing.is_finite() { spacing.max(0.0) } else { 0.0 };
	let max_columns = max_columns.max(1);

	let columns = if min_column_width > 0.0 && min_column_width.is_finite() {
		(((available + spacing) / (min_column_width + spacing)).floor() as usize).clamp(1, max_columns)
	} else {
		max_columns
	};
	let gaps = spacing * columns.saturating_sub(1) as f64;
	let column_width = ((available - gaps) / columns as f64).max(0.0);

	ColumnLayout { columns, column_width }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wider_viewports_get_more_columns() {
		let narrow = columns_for_width(500.0, 220.0, 8.0, 6);
		let wide = columns_for_width(1400.0, 220.0, 8.0, 6);
		assert_eq!(narrow.columns, 2);
		assert_eq!(wide.columns, 6);
		assert!(wide.column_width >= 220.0);
	}

	#[test]
	fn exact_fit_counts_spacing() {
		let layout = columns_for_width(456.0, 220.0, 16.0, 6);
		assert_eq!(layout.columns, 2);
		assert_eq!(layout.column_width, 220.0);
	}

	#[test]
	fn tiny_or_invalid_width_gets_one_column() {
		assert_eq!(columns_for_width(50.0, 220.0, 8.0, 6).columns, 1);
		assert_eq!(columns_for_width(f64::NAN, 220.0, 8.0, 6), ColumnLayout { columns: 1, column_width: 0.0 });
	}

	#[test]
	fn max_columns_caps_count() {
		assert_eq!(columns_for_width(10_000.0, 100.0, 0.0, 4).columns, 4);
		assert_eq!(columns_for_width(10_000.0, 100.0, 0.0, 0).columns, 1);
	}
}
