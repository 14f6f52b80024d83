//! Error type shared by every fetch seam of the engine.

use std::fmt::Display;

use thiserror::Error;

/// Failure reported by an injected fetch (page, composite part or
/// suggestion lookup).
///
/// Loaders never mutate accumulated state when they observe one of these;
/// retry policy belongs to the fetch implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// Connection-level failure (DNS, TLS, reset, timeout).
	#[error("transport error: {0}")]
	Transport(String),

	/// The remote catalog answered with a non-success status.
	#[error("remote returned status {code}: {message}")]
	Status {
		/// HTTP-like status code.
		code: u16,
		/// Response summary.
		message: String,
	},

	/// A response body could not be decoded into the expected entity.
	#[error("decode error at `{path}`: {message}")]
	Decode {
		/// Field path of the offending value, e.g. `results[3].width`.
		path: String,
		/// Decoder message.
		message: String,
	},

	/// The task running the fetch panicked or was aborted.
	#[error("fetch task aborted: {0}")]
	Aborted(String),

	/// Any other failure surfaced by a fetch implementation.
	#[error("{0}")]
	Other(String),
}

impl FetchError {
	/// Builds a [`FetchError::Transport`].
	pub fn transport(message: impl Into<String>) -> Self {
		Self::Transport(message.into())
	}

	/// Builds a [`FetchError::Decode`].
	pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Decode {
			path: path.into(),
			message: message.into(),
		}
	}

	/// Builds a [`FetchError::Other`] from any displayable error.
	pub fn other(error: impl Display) -> Self {
		Self::Other(error.to_string())
	}

	/// Returns true for failures a caller may reasonably retry as-is.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::Transport(_) => true,
			Self::Status { code, .. } => *code == 429 || (500..600).contains(code),
			Self::Decode { .. } | Self::Aborted(_) | Self::Other(_) => false,
		}
	}
}

/// Result alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
