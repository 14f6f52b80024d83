use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// Stable identity projection used for de-duplication and layout keys.
///
/// Two values with equal ids are the same catalog entity even when their
/// mutable fields (timestamps, like counts) differ. The id must not change
/// over the lifetime of a value.
pub trait Identify {
	/// Identity key type, usually the catalog id.
	type Id: Clone + Eq + Hash + Debug;

	/// Returns the identity key.
	fn id(&self) -> Self::Id;
}

/// Intrinsic pixel size projection used by the masonry distributor.
pub trait Dimensions {
	/// Returns `(width, height)`.
	fn dimensions(&self) -> (f64, f64);
}

impl<T: Identify + ?Sized> Identify for &T {
	type Id = T::Id;

	fn id(&self) -> Self::Id {
		(**self).id()
	}
}

impl<T: Identify + ?Sized> Identify for Arc<T> {
	type Id = T::Id;

	fn id(&self) -> Self::Id {
		(**self).id()
	}
}

impl<T: Identify + ?Sized> Identify for Rc<T> {
	type Id = T::Id;

	fn id(&self) -> Self::Id {
		(**self).id()
	}
}

impl<T: Dimensions + ?Sized> Dimensions for &T {
	fn dimensions(&self) -> (f64, f64) {
		(**self).dimensions()
	}
}

impl<T: Dimensions + ?Sized> Dimensions for Arc<T> {
	fn dimensions(&self) -> (f64, f64) {
		(**self).dimensions()
	}
}
