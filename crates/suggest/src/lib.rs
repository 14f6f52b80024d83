//! Search-as-you-type suggestions.
//!
//! [`DebouncedQueryController`] echoes every keystroke immediately, waits
//! for typing to pause before asking the [`SuggestionSource`], and makes sure
//! only the newest query's answer ever lands in its suggestion list.

mod controller;
mod source;

pub use controller::{DEFAULT_DEBOUNCE, DebouncedQueryController, SuggestionUpdate};
pub use source::SuggestionSource;
