//! Worker primitives for the loading engine.
//!
//! Fetches issued by the engine run as tokio tasks tagged with a
//! [`TaskClass`] for tracing. Concurrent parts of one load are joined in
//! spawn order by an [`OrderedJoinSet`]; superseded work is cancelled
//! through a [`GenerationGate`].

mod class;
mod join_set;
mod spawn;
mod token;

use std::any::Any;

use tokio::task::JoinError;

pub use class::TaskClass;
pub use join_set::OrderedJoinSet;
pub(crate) use spawn::runtime_handle;
pub use spawn::{spawn, spawn_scoped};
pub use token::{GenerationGate, GenerationToken};

/// Extracts the panic payload of a failed task as text.
///
/// Returns `None` when the task was cancelled rather than panicking.
pub fn join_error_panic_message(err: JoinError) -> Option<String> {
	if !err.is_panic() {
		return None;
	}
	Some(panic_payload_message(err.into_panic()))
}

/// Describes a failed task for error reporting.
pub fn join_error_message(err: JoinError) -> String {
	if err.is_cancelled() {
		return "task cancelled".to_string();
	}
	join_error_panic_message(err).map_or_else(|| "task failed".to_string(), |msg| format!("task panicked: {msg}"))
}

fn panic_payload_message(payload: Box<dyn Any + Send>) -> String {
	match payload.downcast::<&'static str>() {
		Ok(msg) => (*msg).to_string(),
		Err(payload) => match payload.downcast::<String>() {
			Ok(msg) => *msg,
			Err(_) => "non-string panic payload".to_string(),
		},
	}
}
