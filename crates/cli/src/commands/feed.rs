use std::fmt::Write as _;
use std::time::Duration;

use lumen_catalog::{CatalogFixture, FixtureSource, Image};
use lumen_config::EngineConfig;
use lumen_feed::{CompositeLoader, PageRequest, PaginatedLoader, optional};
use lumen_masonry::{MasonryLayout, columns_for_width};
use tracing::info;

use crate::cli::FeedArgs;

pub async fn run(config: &EngineConfig, args: FeedArgs) -> anyhow::Result<String> {
	let fixture = CatalogFixture::load(&args.fixture)?;
	let source = FixtureSource::new(fixture).with_latency(Duration::from_millis(args.latency_ms));
	render(config, &source, args.width, args.max_pages).await
}

/// Loads the home feed and renders a text summary of the masonry grid.
pub(crate) async fn render(config: &EngineConfig, source: &FixtureSource, width: f64, max_pages: Option<u32>) -> anyhow::Result<String> {
	let first = PageRequest::first(config.page_size.max(1));
	let (topics, collections, images) = CompositeLoader::default()
		.join((optional("topics", source.topics()), source.collections(first), source.images(first)))
		.await?;

	let mut loader = PaginatedLoader::<Image>::default().with_page_size(config.page_size);
	if let Some(ticket) = loader.begin_first_page() {
		loader.finish(ticket, Ok(images))?;
	}
	let page_limit = max_pages.unwrap_or(u32::MAX);
	while loader.list().has_next_page() && loader.list().current_page() < page_limit {
		loader.load_next_page(&|request: PageRequest| source.images(request)).await?;
	}
	info!(
		images = loader.items().len(),
		pages = loader.list().current_page(),
		exhausted = !loader.list().has_next_page(),
		"feed.loaded"
	);

	let masonry = &config.masonry;
	let grid = columns_for_width(width, masonry.min_column_width, masonry.spacing, masonry.max_columns);
	let mut layout = MasonryLayout::new();
	let assignment = layout.assignment(loader.items(), grid.columns, masonry.spacing);

	let mut out = String::new();
	let titles: Vec<&str> = topics.iter().map(|topic| topic.title.as_str()).collect();
	writeln!(out, "topics: {}", titles.join(", "))?;
	writeln!(out, "collections: {}", collections.len())?;
	writeln!(
		out,
		"images: {} over {} page(s){}",
		loader.items().len(),
		loader.list().current_page(),
		if loader.list().has_next_page() { ", more available" } else { "" }
	)?;
	writeln!(out, "grid: {} column(s) of {:.0}px", grid.columns, grid.column_width)?;
	for (index, (ids, weight)) in assignment.columns().iter().zip(assignment.heights()).enumerate() {
		let gaps = ids.len().saturating_sub(1) as f64 * masonry.spacing;
		writeln!(out, "  [{index}] ~{:.0}px  {}", weight * grid.column_width + gaps, ids.join(" "))?;
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::commands::TEST_FIXTURE;

	fn source() -> FixtureSource {
		FixtureSource::new(CatalogFixture::from_json(TEST_FIXTURE).expect("fixture"))
	}

	fn config(page_size: usize) -> EngineConfig {
		EngineConfig {
			page_size,
			..EngineConfig::default()
		}
	}

	#[tokio::test(flavor = "current_thread")]
	async fn loads_every_page_and_lays_out_columns() {
		let out = render(&config(4), &source(), 700.0, None).await.expect("render");
		let lines: Vec<&str> = out.lines().collect();
		assert_eq!(lines[0], "topics: Nature, Night, Architecture");
		assert_eq!(lines[1], "collections: 2");
		assert_eq!(lines[2], "images: 10 over 3 page(s)");
		assert_eq!(lines[3], "grid: 3 column(s) of 228px");
		assert_eq!(lines.len(), 7);
	}

	#[tokio::test(flavor = "current_thread")]
	async fn stops_at_page_limit() {
		let out = render(&config(4), &source(), 300.0, Some(1)).await.expect("render");
		assert!(out.contains("images: 4 over 1 page(s), more available"), "{out}");
		assert!(out.contains("grid: 1 column(s)"), "{out}");
	}
}
