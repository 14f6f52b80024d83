use std::fmt::Write as _;
use std::time::Duration;

use lumen_catalog::{CatalogFixture, FixtureSource};
use lumen_config::EngineConfig;
use lumen_suggest::{DebouncedQueryController, SuggestionUpdate};
use tracing::warn;

use crate::cli::SuggestArgs;

pub async fn run(config: &EngineConfig, args: SuggestArgs) -> anyhow::Result<String> {
	let fixture = CatalogFixture::load(&args.fixture)?;
	let source = FixtureSource::new(fixture);
	let typing = Typing {
		keystrokes: args.keystrokes,
		interval: Duration::from_millis(args.interval_ms),
		limit: args.limit,
	};
	render(config, source, typing).await
}

pub(crate) struct Typing {
	pub keystrokes: Vec<String>,
	pub interval: Duration,
	pub limit: usize,
}

/// Replays `typing` into a suggestion box and renders what it showed.
pub(crate) async fn render(config: &EngineConfig, source: FixtureSource, typing: Typing) -> anyhow::Result<String> {
	let limit = typing.limit;
	let mut controller = DebouncedQueryController::with_debounce(
		move |query: String| source.suggestions(query, limit),
		config.suggestion_debounce(),
	);

	let mut out = String::new();
	for keystroke in typing.keystrokes {
		controller.on_query_changed(keystroke);
		tokio::time::sleep(typing.interval).await;
		for update in controller.apply_ready() {
			describe(&mut out, &update)?;
		}
	}
	while let Some(update) = controller.next_update().await {
		describe(&mut out, &update)?;
	}

	writeln!(out, "query: {:?}", controller.query())?;
	match controller.suggestions() {
		Some(suggestions) if !suggestions.is_empty() => {
			for suggestion in suggestions {
				writeln!(out, "  {suggestion}")?;
			}
		}
		Some(_) => writeln!(out, "  (no matches)")?,
		None => writeln!(out, "  (no suggestions)")?,
	}
	controller.shutdown();
	Ok(out)
}

fn describe(out: &mut String, update: &SuggestionUpdate) -> std::fmt::Result {
	match update {
		SuggestionUpdate::Applied { query, count } => writeln!(out, "lookup {query:?}: {count} suggestion(s)"),
		SuggestionUpdate::Failed { query, error } => {
			warn!(query = %query, error = %error, "suggest.lookup_failed");
			writeln!(out, "lookup {query:?} failed: {error}")
		}
	}
}
