use tokio_util::sync::CancellationToken;

/// Cancellation handle for one generation of supersedable work.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Resolves once a newer generation is armed or the gate cancels this one.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}

/// Keeps at most one generation of work alive: arming the next generation
/// cancels the current one.
///
/// Generations start at 1 and only grow. Dropping the gate cancels the
/// active generation.
#[derive(Debug, Default)]
pub struct GenerationGate {
	issued: u64,
	active: Option<GenerationToken>,
}

impl GenerationGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Cancels the active generation, if any, and arms a fresh one.
	pub fn arm(&mut self) -> GenerationToken {
		self.cancel();
		self.issued = self.issued.wrapping_add(1);
		let token = GenerationToken {
			generation: self.issued,
			cancel: CancellationToken::new(),
		};
		self.active = Some(token.clone());
		token
	}

	/// Cancels the active generation, returning its number.
	pub fn cancel(&mut self) -> Option<u64> {
		let token = self.active.take()?;
		token.cancel.cancel();
		tracing::trace!(generation = token.generation, "worker.generation_cancelled");
		Some(token.generation)
	}

	/// Generation still awaiting its result.
	pub fn active(&self) -> Option<u64> {
		self.active.as_ref().map(GenerationToken::generation)
	}

	pub fn is_active(&self) -> bool {
		self.active.is_some()
	}

	/// Retires `generation` once its result is in.
	///
	/// Returns `false`, leaving the gate untouched, unless `generation` is the
	/// active one.
	pub fn settle(&mut self, generation: u64) -> bool {
		if self.active() != Some(generation) {
			return false;
		}
		self.active = None;
		true
	}
}

impl Drop for GenerationGate {
	fn drop(&mut self) {
		self.cancel();
	}
}
