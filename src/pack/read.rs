use tracing::debug;

use crate::pack::session::{Attempt, grow_buffer};
use crate::pack::wire::{PackReader, Status};
use crate::pack::{BufferKind, ContainerKind, Decoder, PackError, PackLimits, Result, Value};

/// Owns the scratch buffer used to open and walk serialized input.
///
/// A scratch shortfall during open or while descending into nested items doubles the buffer and
/// restarts the whole open-and-decode attempt.
#[derive(Debug)]
pub struct ReadSession {
	limits: PackLimits,
}

impl ReadSession {
	/// Create a session; scratch is allocated per call to [`ReadSession::deserialize`].
	pub fn new(limits: PackLimits) -> Self {
		Self { limits }
	}

	/// Decode `bytes` into an object value.
	///
	/// Input shorter than [`PackLimits::min_input`] or longer than [`PackLimits::max_capacity`]
	/// is rejected before any scratch is allocated.
	pub fn deserialize(self, bytes: &[u8]) -> Result<Value> {
		if bytes.len() < self.limits.min_input {
			return Err(PackError::InputTooSmall {
				len: bytes.len(),
				min: self.limits.min_input,
			});
		}
		if bytes.len() > self.limits.max_capacity {
			return Err(PackError::InputTooLarge {
				len: bytes.len(),
				max: self.limits.max_capacity,
			});
		}

		let decoder = Decoder::new(self.limits.max_depth);
		let mut scratch = vec![0_u8; self.limits.scratch_capacity(self.limits.default_capacity)];
		let mut attempts = 0_u32;
		loop {
			attempts += 1;
			match attempt(&decoder, bytes, &mut scratch) {
				Attempt::Done(value) => {
					debug!(size = bytes.len(), attempts, scratch = scratch.len(), "pack deserialized");
					return Ok(value);
				}
				Attempt::Grow(kind) => self.grow_for_retry(kind, &mut scratch)?,
				Attempt::Fatal(err) => return Err(err),
			}
		}
	}

	/// Only a scratch shortfall is retried; reading never writes to a main buffer.
	fn grow_for_retry(&self, kind: BufferKind, scratch: &mut Vec<u8>) -> Result<()> {
		match kind {
			BufferKind::Scratch => grow_buffer(&self.limits, BufferKind::Scratch, scratch),
			BufferKind::Main => Err(PackError::NoSpace),
		}
	}
}

fn attempt(decoder: &Decoder, bytes: &[u8], scratch: &mut [u8]) -> Attempt<Value> {
	let mut reader = match PackReader::open(bytes, scratch) {
		Ok(reader) => reader,
		Err(Status::NoTempSpace) => return Attempt::Grow(BufferKind::Scratch),
		Err(status) => return Attempt::Fatal(PackError::OpenFailed { status }),
	};

	match decoder.decode(&mut reader.root(), ContainerKind::Object) {
		Ok(value) => Attempt::Done(value),
		Err(err) => Attempt::from_error(err),
	}
}
