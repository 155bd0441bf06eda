use super::{HANDLE_SIZE, Status};

/// Bookkeeping kept in scratch for one open handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HandleRecord {
	/// Writer: offset of the container's length field. Reader: first body byte.
	pub(crate) start: u32,
	/// Reader: one past the last body byte. Unused by the writer.
	pub(crate) end: u32,
	/// Items written (writer) or declared (reader).
	pub(crate) count: u32,
	/// Container tag.
	pub(crate) tag: u8,
}

impl HandleRecord {
	fn to_bytes(self) -> [u8; HANDLE_SIZE] {
		let mut out = [0_u8; HANDLE_SIZE];
		out[0..4].copy_from_slice(&self.start.to_le_bytes());
		out[4..8].copy_from_slice(&self.end.to_le_bytes());
		out[8..12].copy_from_slice(&self.count.to_le_bytes());
		out[12] = self.tag;
		out
	}

	fn from_bytes(raw: &[u8]) -> Self {
		let word = |at: usize| u32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]]);
		Self {
			start: word(0),
			end: word(4),
			count: word(8),
			tag: raw[12],
		}
	}
}

/// Stack of handle records laid out in the caller's scratch buffer.
pub(crate) struct HandleArena<'s> {
	buf: &'s mut [u8],
	used: usize,
}

impl<'s> HandleArena<'s> {
	pub(crate) fn new(buf: &'s mut [u8]) -> Self {
		Self { buf, used: 0 }
	}

	/// Number of open handles.
	pub(crate) fn depth(&self) -> usize {
		self.used / HANDLE_SIZE
	}

	/// Push a record and return its slot.
	pub(crate) fn acquire(&mut self, record: HandleRecord) -> Result<usize, Status> {
		let end = self.used + HANDLE_SIZE;
		if end > self.buf.len() {
			return Err(Status::NoTempSpace);
		}

		self.buf[self.used..end].copy_from_slice(&record.to_bytes());
		let slot = self.depth();
		self.used = end;
		Ok(slot)
	}

	pub(crate) fn get(&self, slot: usize) -> Result<HandleRecord, Status> {
		let at = self.offset(slot)?;
		Ok(HandleRecord::from_bytes(&self.buf[at..at + HANDLE_SIZE]))
	}

	pub(crate) fn set(&mut self, slot: usize, record: HandleRecord) -> Result<(), Status> {
		let at = self.offset(slot)?;
		self.buf[at..at + HANDLE_SIZE].copy_from_slice(&record.to_bytes());
		Ok(())
	}

	/// Pop `slot`, which must be the most recently acquired record.
	pub(crate) fn release(&mut self, slot: usize) -> Result<(), Status> {
		if slot + 1 != self.depth() {
			return Err(Status::BadState);
		}
		self.used -= HANDLE_SIZE;
		Ok(())
	}

	fn offset(&self, slot: usize) -> Result<usize, Status> {
		if slot >= self.depth() {
			return Err(Status::BadState);
		}
		Ok(slot * HANDLE_SIZE)
	}
}

#[cfg(test)]
mod tests {
	use super::{HandleArena, HandleRecord};
	use crate::pack::wire::{HANDLE_SIZE, Status};

	fn record(start: u32) -> HandleRecord {
		HandleRecord {
			start,
			end: start + 8,
			count: 0,
			tag: 0x10,
		}
	}

	#[test]
	fn records_round_trip_through_scratch() {
		let mut scratch = [0_u8; HANDLE_SIZE * 2];
		let mut arena = HandleArena::new(&mut scratch);
		let slot = arena.acquire(record(10)).expect("fits");
		let mut updated = arena.get(slot).expect("slot is live");
		updated.count = 7;
		arena.set(slot, updated).expect("slot is live");
		assert_eq!(arena.get(slot).expect("slot is live"), HandleRecord { count: 7, ..record(10) });
	}

	#[test]
	fn acquire_past_capacity_is_no_temp_space() {
		let mut scratch = [0_u8; HANDLE_SIZE + 3];
		let mut arena = HandleArena::new(&mut scratch);
		arena.acquire(record(0)).expect("first fits");
		assert_eq!(arena.acquire(record(1)), Err(Status::NoTempSpace));
	}

	#[test]
	fn release_is_lifo() {
		let mut scratch = [0_u8; HANDLE_SIZE * 2];
		let mut arena = HandleArena::new(&mut scratch);
		let outer = arena.acquire(record(0)).expect("fits");
		let inner = arena.acquire(record(1)).expect("fits");
		assert_eq!(arena.release(outer), Err(Status::BadState));
		arena.release(inner).expect("inner is top");
		arena.release(outer).expect("outer is top");
		assert_eq!(arena.depth(), 0);
		assert_eq!(arena.get(outer), Err(Status::BadState));
	}
}
