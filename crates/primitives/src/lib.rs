//! Shared vocabulary for the Lumen loading engine: item identity, item
//! geometry, boxed futures and the fetch failure type.

/// Fetch failure taxonomy.
pub mod error;
/// Async future aliases.
pub mod future;
/// Identity and geometry projections over catalog items.
pub mod item;

pub use error::{FetchError, FetchResult};
pub use future::{BoxFutureSend, BoxFutureStatic};
pub use item::{Dimensions, Identify};
