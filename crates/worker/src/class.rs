/// Execution classes used to tag engine tasks in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Work the user is actively waiting on: first-page loads and typeahead lookups.
	Interactive,
	/// Work that can lag behind the UI, such as next-page prefetches.
	Background,
}

impl TaskClass {
	/// Stable label for tracing fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Interactive => "interactive",
			Self::Background => "background",
		}
	}
}
