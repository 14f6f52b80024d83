//! Photo catalog entities and a local, fixture-backed catalog.

/// Catalog entity types.
pub mod entity;
/// In-memory catalog loaded from a JSON fixture.
pub mod fixture;

pub use entity::{Collection, Image, Topic, TrendKeyword, User};
pub use fixture::{CatalogFixture, FixtureSource, paginate};
