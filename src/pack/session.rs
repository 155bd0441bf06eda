use tracing::{debug, warn};

use crate::pack::{BufferKind, PackError, PackLimits, Result};

/// Outcome of one encode or decode attempt inside a growth loop.
#[derive(Debug)]
pub(crate) enum Attempt<T> {
	/// Attempt succeeded.
	Done(T),
	/// Attempt ran out of room in the named buffer; grow it and retry from the root.
	Grow(BufferKind),
	/// Attempt failed for good.
	Fatal(PackError),
}

impl<T> Attempt<T> {
	/// Route a codec error: space conditions become growth requests, everything else is fatal.
	pub(crate) fn from_error(err: PackError) -> Self {
		match err {
			PackError::NoSpace => Self::Grow(BufferKind::Main),
			PackError::NoTempSpace => Self::Grow(BufferKind::Scratch),
			other => Self::Fatal(other),
		}
	}
}

/// Replace `buf` with a zeroed buffer of double its size, or fail at the hard cap.
pub(crate) fn grow_buffer(limits: &PackLimits, kind: BufferKind, buf: &mut Vec<u8>) -> Result<()> {
	let current = buf.len();
	if current >= limits.max_capacity {
		warn!(buffer = kind.as_str(), capacity = current, "pack buffer reached hard cap");
		return Err(PackError::Exhausted { buffer: kind, capacity: current });
	}

	let next = limits.grown(current);
	debug!(buffer = kind.as_str(), from = current, to = next, "growing pack buffer");
	*buf = vec![0_u8; next];
	Ok(())
}
