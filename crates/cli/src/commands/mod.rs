pub mod feed;
pub mod suggest;

#[cfg(test)]
pub(crate) const TEST_FIXTURE: &str = include_str!("../../fixtures/catalog.json");
