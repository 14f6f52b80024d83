use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Paginated feed loading, masonry layout and typeahead over a catalog fixture")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Engine configuration file (defaults to the platform config dir)
	#[arg(long, short = 'c', global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging (overridden by RUST_LOG)
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Load a home feed page by page and print its masonry columns
	Feed(FeedArgs),
	/// Type queries into the debounced suggestion box
	Suggest(SuggestArgs),
}

#[derive(Args, Debug)]
pub struct FeedArgs {
	/// Catalog fixture (JSON)
	pub fixture: PathBuf,

	/// Viewport width in pixels used to pick the column count
	#[arg(long, default_value_t = 1200.0)]
	pub width: f64,

	/// Stop after this many pages
	#[arg(long)]
	pub max_pages: Option<u32>,

	/// Simulated latency per fetch, in milliseconds
	#[arg(long, default_value_t = 0)]
	pub latency_ms: u64,
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
	/// Catalog fixture (JSON)
	pub fixture: PathBuf,

	/// Successive contents of the search box, e.g. `n na nat`
	#[arg(required = true)]
	pub keystrokes: Vec<String>,

	/// Delay between keystrokes, in milliseconds
	#[arg(long, default_value_t = 120)]
	pub interval_ms: u64,

	/// Maximum number of suggestions per lookup
	#[arg(long, default_value_t = 8)]
	pub limit: usize,
}
