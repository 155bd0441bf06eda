use super::arena::{HandleArena, HandleRecord};
use super::{
	ItemKind, MAX_KEY_LEN, SHORT_FLAG, Status, TAG_ARRAY, TAG_BOOL, TAG_DOUBLE, TAG_FLOAT, TAG_INT32, TAG_INT64, TAG_NULL, TAG_OBJECT,
	TAG_PACK_HEADER, TAG_RAW, TAG_STR, TAG_UINT32, TAG_UINT64, V1_MAGIC,
};
use crate::pack::PackVersion;

/// Container length plus item count.
const CONTAINER_HEADER: usize = 8;

/// Write handle over a fixed main buffer and scratch buffer.
///
/// The root pack is reached through [`PackWriter::root`]; nested packs borrow their parent
/// exclusively, so at most one pack is writable at any time.
pub struct PackWriter<'b> {
	buf: &'b mut [u8],
	len: usize,
	arena: HandleArena<'b>,
	version: PackVersion,
	root: usize,
	closed: bool,
}

impl<'b> PackWriter<'b> {
	/// Open a pack for writing and emit the root header.
	pub fn open(version: PackVersion, buf: &'b mut [u8], scratch: &'b mut [u8]) -> Result<Self, Status> {
		let mut writer = Self {
			buf,
			len: 0,
			arena: HandleArena::new(scratch),
			version,
			root: 0,
			closed: false,
		};

		let lead: &[u8] = match version {
			PackVersion::V1 => &V1_MAGIC,
			PackVersion::V2 => &[TAG_OBJECT, 0],
		};
		writer.ensure(lead.len() + CONTAINER_HEADER)?;
		writer.push(lead);
		let start = writer.len;
		writer.push(&[0; CONTAINER_HEADER]);

		writer.root = writer.arena.acquire(HandleRecord {
			start: offset_u32(start)?,
			end: 0,
			count: 0,
			tag: TAG_OBJECT,
		})?;

		if version == PackVersion::V1 {
			writer.append_item(writer.root, TAG_PACK_HEADER, None, &[&version.number().to_le_bytes()[..]])?;
		}

		Ok(writer)
	}

	/// Version this writer emits.
	pub fn version(&self) -> PackVersion {
		self.version
	}

	/// Handle for the root object.
	pub fn root(&mut self) -> Pack<'_, 'b> {
		let slot = self.root;
		Pack {
			writer: self,
			slot,
			tag: TAG_OBJECT,
			nested: false,
			finished: false,
		}
	}

	/// Finalize the root header. Every nested pack must already be finished.
	pub fn close(&mut self) -> Result<(), Status> {
		if self.closed || self.arena.depth() != 1 {
			return Err(Status::BadState);
		}
		self.finish_slot(self.root)?;
		self.closed = true;
		Ok(())
	}

	/// Occupied length of the main buffer after [`PackWriter::close`].
	pub fn size(&self) -> Result<usize, Status> {
		if !self.closed {
			return Err(Status::BadState);
		}
		Ok(self.len)
	}

	fn ensure(&self, extra: usize) -> Result<(), Status> {
		match self.len.checked_add(extra) {
			Some(end) if end <= self.buf.len() => Ok(()),
			_ => Err(Status::NoSpace),
		}
	}

	fn push(&mut self, bytes: &[u8]) {
		let end = self.len + bytes.len();
		self.buf[self.len..end].copy_from_slice(bytes);
		self.len = end;
	}

	/// Write one complete item into the container at `slot`.
	fn append_item(&mut self, slot: usize, tag: u8, key: Option<&str>, body: &[&[u8]]) -> Result<(), Status> {
		if self.closed {
			return Err(Status::BadState);
		}

		let key_len = key.map_or(0, |key| key.len() + 1);
		let body_len: usize = body.iter().map(|part| part.len()).sum();
		self.ensure(2 + key_len + body_len)?;

		let mut record = self.arena.get(slot)?;
		self.push(&[tag, key_len as u8]);
		if let Some(key) = key {
			self.push(key.as_bytes());
			self.push(&[0]);
		}
		for part in body {
			self.push(part);
		}

		record.count += 1;
		self.arena.set(slot, record)
	}

	/// Start a nested container item and return its slot.
	fn open_container(&mut self, parent: usize, tag: u8, key: Option<&str>) -> Result<usize, Status> {
		self.append_item(parent, tag, key, &[&[0_u8; CONTAINER_HEADER][..]])?;
		let start = self.len - CONTAINER_HEADER;
		self.arena.acquire(HandleRecord {
			start: offset_u32(start)?,
			end: 0,
			count: 0,
			tag,
		})
	}

	/// Patch the container header at `slot` and release it.
	fn finish_slot(&mut self, slot: usize) -> Result<(), Status> {
		let record = self.arena.get(slot)?;
		let start = record.start as usize;
		let content = self.len - (start + CONTAINER_HEADER);
		self.buf[start..start + 4].copy_from_slice(&offset_u32(content)?.to_le_bytes());
		self.buf[start + 4..start + 8].copy_from_slice(&record.count.to_le_bytes());
		self.arena.release(slot)
	}
}

fn offset_u32(value: usize) -> Result<u32, Status> {
	u32::try_from(value).map_err(|_| Status::NoSpace)
}

/// Writable object or array within a [`PackWriter`].
///
/// Object packs take non-empty keys; array packs take none. A nested pack is finalized by
/// [`Pack::finish`] or, failing that, when dropped.
pub struct Pack<'w, 'b> {
	writer: &'w mut PackWriter<'b>,
	slot: usize,
	tag: u8,
	nested: bool,
	finished: bool,
}

impl<'b> Pack<'_, 'b> {
	/// Container kind of this pack.
	pub fn kind(&self) -> ItemKind {
		ItemKind::from_tag(self.tag)
	}

	/// Write a null item.
	pub fn put_null(&mut self, key: Option<&str>) -> Result<(), Status> {
		self.put_fixed(TAG_NULL, key, &[0])
	}

	/// Write a boolean item.
	pub fn put_bool(&mut self, key: Option<&str>, value: bool) -> Result<(), Status> {
		self.put_fixed(TAG_BOOL, key, &[u8::from(value)])
	}

	/// Write a signed 32-bit item.
	pub fn put_i32(&mut self, key: Option<&str>, value: i32) -> Result<(), Status> {
		self.put_fixed(TAG_INT32, key, &value.to_le_bytes())
	}

	/// Write an unsigned 32-bit item.
	pub fn put_u32(&mut self, key: Option<&str>, value: u32) -> Result<(), Status> {
		self.put_fixed(TAG_UINT32, key, &value.to_le_bytes())
	}

	/// Write a signed 64-bit item.
	pub fn put_i64(&mut self, key: Option<&str>, value: i64) -> Result<(), Status> {
		self.put_fixed(TAG_INT64, key, &value.to_le_bytes())
	}

	/// Write an unsigned 64-bit item.
	pub fn put_u64(&mut self, key: Option<&str>, value: u64) -> Result<(), Status> {
		self.put_fixed(TAG_UINT64, key, &value.to_le_bytes())
	}

	/// Write a 32-bit float item.
	pub fn put_f32(&mut self, key: Option<&str>, value: f32) -> Result<(), Status> {
		self.put_fixed(TAG_FLOAT, key, &value.to_le_bytes())
	}

	/// Write a 64-bit float item.
	pub fn put_f64(&mut self, key: Option<&str>, value: f64) -> Result<(), Status> {
		self.put_fixed(TAG_DOUBLE, key, &value.to_le_bytes())
	}

	/// Write NUL-terminated text. Text containing NUL is rejected with `BadType`.
	pub fn put_str(&mut self, key: Option<&str>, value: &[u8]) -> Result<(), Status> {
		if value.contains(&0) {
			return Err(Status::BadType);
		}
		self.put_variable(TAG_STR, key, value, true)
	}

	/// Write length-prefixed bytes.
	pub fn put_raw(&mut self, key: Option<&str>, value: &[u8]) -> Result<(), Status> {
		self.put_variable(TAG_RAW, key, value, false)
	}

	/// Open a nested object under `key`.
	pub fn put_object(&mut self, key: Option<&str>) -> Result<Pack<'_, 'b>, Status> {
		self.put_container(TAG_OBJECT, key)
	}

	/// Open a nested array under `key`.
	pub fn put_array(&mut self, key: Option<&str>) -> Result<Pack<'_, 'b>, Status> {
		self.put_container(TAG_ARRAY, key)
	}

	/// Finalize a nested pack. The root pack is finalized by [`PackWriter::close`].
	pub fn finish(mut self) -> Result<(), Status> {
		self.release()
	}

	fn put_container(&mut self, tag: u8, key: Option<&str>) -> Result<Pack<'_, 'b>, Status> {
		self.check_key(key)?;
		let slot = self.writer.open_container(self.slot, tag, key)?;
		Ok(Pack {
			writer: &mut *self.writer,
			slot,
			tag,
			nested: true,
			finished: false,
		})
	}

	fn put_fixed(&mut self, tag: u8, key: Option<&str>, value: &[u8]) -> Result<(), Status> {
		self.check_key(key)?;
		self.writer.append_item(self.slot, tag, key, &[value])
	}

	fn put_variable(&mut self, tag: u8, key: Option<&str>, value: &[u8], nul: bool) -> Result<(), Status> {
		self.check_key(key)?;
		let terminator: &[u8] = if nul { &[0] } else { &[] };
		let len = value.len() + terminator.len();

		if self.writer.version == PackVersion::V2 && len <= usize::from(u8::MAX) {
			let short = [len as u8];
			return self.writer.append_item(self.slot, tag | SHORT_FLAG, key, &[&short[..], value, terminator]);
		}

		let long = offset_u32(len)?.to_le_bytes();
		self.writer.append_item(self.slot, tag, key, &[&long[..], value, terminator])
	}

	fn check_key(&self, key: Option<&str>) -> Result<(), Status> {
		match (self.tag, key) {
			(TAG_OBJECT, Some(key)) if !key.is_empty() && key.len() <= MAX_KEY_LEN && !key.as_bytes().contains(&0) => Ok(()),
			(TAG_ARRAY, None) => Ok(()),
			_ => Err(Status::BadParam),
		}
	}

	fn release(&mut self) -> Result<(), Status> {
		if !self.nested || self.finished {
			return Ok(());
		}
		self.finished = true;
		self.writer.finish_slot(self.slot)
	}
}

impl Drop for Pack<'_, '_> {
	fn drop(&mut self) {
		let _ = self.release();
	}
}
