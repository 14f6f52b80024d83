use lumen_primitives::{Dimensions, Identify};
use serde::{Deserialize, Serialize};

/// Photo author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: String,
	pub username: String,
	#[serde(default)]
	pub name: Option<String>,
}

/// One photo with its intrinsic pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
	pub id: String,
	pub width: u32,
	pub height: u32,
	#[serde(default)]
	pub description: Option<String>,
	/// Dominant color as `#rrggbb`, used as a placeholder while loading.
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub updated_at: Option<String>,
	#[serde(default)]
	pub user: Option<User>,
}

/// Curated set of photos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub total_photos: u32,
	#[serde(default)]
	pub cover_photo: Option<Image>,
}

/// Editorial topic (e.g. "Nature", "Architecture").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
	pub id: String,
	pub slug: String,
	pub title: String,
}

/// Trending search keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendKeyword {
	pub title: String,
}

impl Identify for User {
	type Id = String;

	fn id(&self) -> String {
		self.id.clone()
	}
}

impl Identify for Image {
	type Id = String;

	fn id(&self) -> String {
		self.id.clone()
	}
}

impl Identify for Collection {
	type Id = String;

	fn id(&self) -> String {
		self.id.clone()
	}
}

impl Identify for Topic {
	type Id = String;

	fn id(&self) -> String {
		self.id.clone()
	}
}

impl Identify for TrendKeyword {
	type Id = String;

	fn id(&self) -> String {
		self.title.to_lowercase()
	}
}

impl Dimensions for Image {
	fn dimensions(&self) -> (f64, f64) {
		(f64::from(self.width), f64::from(self.height))
	}
}

impl Dimensions for Collection {
	/// Collections render with their cover photo; coverless ones as squares.
	fn dimensions(&self) -> (f64, f64) {
		self.cover_photo.as_ref().map_or((1.0, 1.0), Dimensions::dimensions)
	}
}
