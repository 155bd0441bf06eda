use super::arena::{HandleArena, HandleRecord};
use super::{ItemKind, PayloadSize, SHORT_FLAG, Status, TAG_ARRAY, TAG_OBJECT, V1_MAGIC, payload_size};
use crate::pack::PackVersion;

/// One unit yielded by a [`PackView`] cursor.
#[derive(Debug, Clone, Copy)]
pub struct Item<'a> {
	/// Decoded tag kind.
	pub kind: ItemKind,
	/// Item key, if the item carries one.
	pub key: Option<&'a str>,
	/// Payload bytes. Text includes its NUL terminator; containers expose their body.
	pub value: &'a [u8],
	/// Declared element count for containers, zero otherwise.
	pub count: u32,
	value_at: usize,
	next: usize,
}

/// Read handle over caller-owned pack bytes plus a scratch buffer.
pub struct PackReader<'a, 's> {
	data: &'a [u8],
	arena: HandleArena<'s>,
	version: PackVersion,
}

impl<'a, 's> PackReader<'a, 's> {
	/// Validate the root header and reserve the root handle in `scratch`.
	pub fn open(data: &'a [u8], scratch: &'s mut [u8]) -> Result<Self, Status> {
		if u32::try_from(data.len()).is_err() {
			return Err(Status::BadParam);
		}

		let (version, header_at) = detect_version(data)?;
		let (start, end, count) = container_bounds(data, header_at, data.len())?;
		if end != data.len() {
			return Err(Status::BadData);
		}

		let mut arena = HandleArena::new(scratch);
		arena.acquire(HandleRecord {
			start: start as u32,
			end: end as u32,
			count,
			tag: TAG_OBJECT,
		})?;

		Ok(Self { data, arena, version })
	}

	/// Version detected from the leading bytes.
	pub fn version(&self) -> PackVersion {
		self.version
	}

	/// View over the root object.
	pub fn root(&mut self) -> PackView<'_, 'a, 's> {
		PackView {
			data: self.data,
			arena: &mut self.arena,
			slot: 0,
			nested: false,
			finished: false,
		}
	}
}

/// Readable object or array within a [`PackReader`].
///
/// Nested views borrow their parent exclusively and release their scratch record on
/// [`PackView::finish`] or drop.
pub struct PackView<'v, 'a, 's> {
	data: &'a [u8],
	arena: &'v mut HandleArena<'s>,
	slot: usize,
	nested: bool,
	finished: bool,
}

impl<'a, 's> PackView<'_, 'a, 's> {
	/// Container kind of this view.
	pub fn kind(&self) -> Result<ItemKind, Status> {
		Ok(ItemKind::from_tag(self.arena.get(self.slot)?.tag))
	}

	/// Declared number of items.
	pub fn item_count(&self) -> Result<u32, Status> {
		Ok(self.arena.get(self.slot)?.count)
	}

	/// First item, or `NotFound` for an empty pack.
	pub fn first_item(&self) -> Result<Item<'a>, Status> {
		let record = self.arena.get(self.slot)?;
		self.item_at(record.start as usize, record.end as usize)
	}

	/// Item following `prev`, or `NotFound` at the end.
	pub fn next_item(&self, prev: &Item<'a>) -> Result<Item<'a>, Status> {
		let record = self.arena.get(self.slot)?;
		self.item_at(prev.next, record.end as usize)
	}

	/// Open a nested view over an object or array item.
	pub fn sub_pack(&mut self, item: &Item<'a>) -> Result<PackView<'_, 'a, 's>, Status> {
		let tag = match item.kind {
			ItemKind::Object => TAG_OBJECT,
			ItemKind::Array => TAG_ARRAY,
			_ => return Err(Status::BadType),
		};
		let slot = self.arena.acquire(HandleRecord {
			start: item.value_at as u32,
			end: item.next as u32,
			count: item.count,
			tag,
		})?;

		Ok(PackView {
			data: self.data,
			arena: &mut *self.arena,
			slot,
			nested: true,
			finished: false,
		})
	}

	/// Release a nested view.
	pub fn finish(mut self) -> Result<(), Status> {
		self.release()
	}

	fn item_at(&self, at: usize, end: usize) -> Result<Item<'a>, Status> {
		if at >= end {
			return Err(Status::NotFound);
		}
		parse_item(self.data, at, end)
	}

	fn release(&mut self) -> Result<(), Status> {
		if !self.nested || self.finished {
			return Ok(());
		}
		self.finished = true;
		self.arena.release(self.slot)
	}
}

impl Drop for PackView<'_, '_, '_> {
	fn drop(&mut self) {
		let _ = self.release();
	}
}

fn detect_version(data: &[u8]) -> Result<(PackVersion, usize), Status> {
	if data.starts_with(&V1_MAGIC) {
		return Ok((PackVersion::V1, V1_MAGIC.len()));
	}
	match data {
		[TAG_OBJECT, 0, ..] => Ok((PackVersion::V2, 2)),
		[] | [TAG_OBJECT] => Err(Status::Truncated),
		_ => Err(Status::BadVersion),
	}
}

/// Read a container header at `at`, returning `(body_start, body_end, count)`.
fn container_bounds(data: &[u8], at: usize, limit: usize) -> Result<(usize, usize, u32), Status> {
	let header = slice(data, at, 8, limit)?;
	let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
	let count = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
	let start = at + 8;
	slice(data, start, len, limit)?;
	Ok((start, start + len, count))
}

fn parse_item(data: &[u8], at: usize, end: usize) -> Result<Item<'_>, Status> {
	let head = slice(data, at, 2, end)?;
	let tag = head[0];
	let key_len = usize::from(head[1]);
	let mut pos = at + 2;

	let key = if key_len == 0 {
		None
	} else {
		let raw = slice(data, pos, key_len, end)?;
		pos += key_len;
		let (terminator, name) = raw.split_last().ok_or(Status::BadData)?;
		if *terminator != 0 || name.contains(&0) {
			return Err(Status::BadData);
		}
		Some(std::str::from_utf8(name).map_err(|_| Status::BadData)?)
	};

	let kind = ItemKind::from_tag(tag);
	let (value_at, value_len, count) = match payload_size(tag)? {
		PayloadSize::Fixed(size) => (pos, size, 0),
		PayloadSize::Variable if kind.is_container() => {
			if tag & SHORT_FLAG != 0 {
				return Err(Status::BadData);
			}
			let (start, body_end, count) = container_bounds(data, pos, end)?;
			(start, body_end - start, count)
		}
		PayloadSize::Variable if tag & SHORT_FLAG != 0 => {
			let len = slice(data, pos, 1, end)?[0];
			(pos + 1, usize::from(len), 0)
		}
		PayloadSize::Variable => {
			let raw = slice(data, pos, 4, end)?;
			let len = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
			(pos + 4, len, 0)
		}
	};

	let value = slice(data, value_at, value_len, end)?;
	Ok(Item {
		kind,
		key,
		value,
		count,
		value_at,
		next: value_at + value_len,
	})
}

fn slice(data: &[u8], at: usize, len: usize, limit: usize) -> Result<&[u8], Status> {
	match at.checked_add(len) {
		Some(stop) if stop <= limit && stop <= data.len() => Ok(&data[at..stop]),
		_ => Err(Status::Truncated),
	}
}
