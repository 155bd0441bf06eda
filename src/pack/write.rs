use tracing::debug;

use crate::pack::session::{Attempt, grow_buffer};
use crate::pack::wire::{PackWriter, Status};
use crate::pack::{BufferKind, Encoder, ObjectValue, PackError, PackLimits, PackVersion, Result, Value};

/// Owns the main and scratch buffers for one serialization.
///
/// Each attempt re-encodes the whole tree from the root; a full buffer is doubled (up to
/// [`PackLimits::max_capacity`]) and the attempt restarts.
#[derive(Debug)]
pub struct WriteSession {
	limits: PackLimits,
	version: PackVersion,
	main: Vec<u8>,
	scratch: Vec<u8>,
}

impl WriteSession {
	/// Allocate both buffers for an encode starting at `initial_capacity` bytes.
	///
	/// Fails with [`PackError::SizeExceeded`] before allocating when the request is above the cap.
	pub fn new(limits: PackLimits, version: PackVersion, initial_capacity: usize) -> Result<Self> {
		if initial_capacity > limits.max_capacity {
			return Err(PackError::SizeExceeded {
				requested: initial_capacity,
				max: limits.max_capacity,
			});
		}

		Ok(Self {
			limits,
			version,
			main: vec![0_u8; initial_capacity],
			scratch: vec![0_u8; limits.scratch_capacity(initial_capacity)],
		})
	}

	/// Current main-buffer capacity.
	pub fn main_capacity(&self) -> usize {
		self.main.len()
	}

	/// Current scratch-buffer capacity.
	pub fn scratch_capacity(&self) -> usize {
		self.scratch.len()
	}

	/// Encode `root`, growing buffers as needed, and return the serialized bytes.
	pub fn serialize(mut self, root: &Value) -> Result<Vec<u8>> {
		let Value::Object(object) = root else {
			return Err(PackError::BadParameter {
				detail: format!("root value must be an object, got {}", root.kind_name()),
			});
		};

		let encoder = Encoder::new(self.limits.max_depth);
		let mut attempts = 0_u32;
		loop {
			attempts += 1;
			match self.attempt(&encoder, object) {
				Attempt::Done(size) => {
					debug!(size, attempts, version = self.version.as_str(), "pack serialized");
					let mut out = self.main;
					out.truncate(size);
					return Ok(out);
				}
				Attempt::Grow(BufferKind::Main) => grow_buffer(&self.limits, BufferKind::Main, &mut self.main)?,
				Attempt::Grow(BufferKind::Scratch) => grow_buffer(&self.limits, BufferKind::Scratch, &mut self.scratch)?,
				Attempt::Fatal(err) => return Err(err),
			}
		}
	}

	fn attempt(&mut self, encoder: &Encoder, object: &ObjectValue) -> Attempt<usize> {
		let mut writer = match PackWriter::open(self.version, &mut self.main, &mut self.scratch) {
			Ok(writer) => writer,
			Err(Status::NoSpace) => return Attempt::Grow(BufferKind::Main),
			Err(Status::NoTempSpace) => return Attempt::Grow(BufferKind::Scratch),
			Err(status) => return Attempt::Fatal(PackError::OpenFailed { status }),
		};

		if let Err(err) = encoder.encode_object(&mut writer.root(), object, 0) {
			return Attempt::from_error(err);
		}
		if let Err(status) = writer.close() {
			return Attempt::Fatal(PackError::CloseFailed { status });
		}
		match writer.size() {
			Ok(size) => Attempt::Done(size),
			Err(status) => Attempt::Fatal(PackError::SizeQueryFailed { status }),
		}
	}
}

#[cfg(test)]
mod tests;
