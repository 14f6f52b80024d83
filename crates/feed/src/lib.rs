//! Incremental collection loading for list-backed feeds.
//!
//! A feature (home feed, search results, topic detail) owns one
//! [`PaginatedLoader`] that fetches pages through an injected [`FetchPage`],
//! merges them into an [`AccumulatedList`] by item identity, and guards
//! against overlapping requests with [`LoadState`]. Independent first-render
//! reads are joined with [`CompositeLoader`].

mod composite;
mod dedupe;
mod fetch;
mod loader;
mod page;
mod state;

pub use composite::{CompositeLoader, FetchTuple, optional};
pub use dedupe::{dedupe, merge, merge_into};
pub use fetch::FetchPage;
pub use loader::{LoadTicket, PaginatedLoader};
pub use lumen_primitives::{FetchError, FetchResult, Identify};
pub use page::{Page, PageRequest};
pub use state::{AccumulatedList, LoadState};
