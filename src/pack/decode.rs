use crate::pack::wire::{Item, ItemKind, PackView, Status};
use crate::pack::{ObjectValue, PackError, PackLimits, Result, Value};

/// Container shape the decoder builds for a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
	/// Keyed mapping; every item must carry a key.
	Object,
	/// Positional sequence; item keys are ignored.
	Array,
}

/// Depth-first reader from an open pack view into a [`Value`] tree.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
	max_depth: u32,
}

impl Default for Decoder {
	fn default() -> Self {
		Self::new(PackLimits::MAX_DEPTH)
	}
}

impl Decoder {
	/// Create a decoder that rejects containers nested deeper than `max_depth`.
	pub fn new(max_depth: u32) -> Self {
		Self { max_depth }
	}

	/// Rebuild the container at `view` as `kind`.
	///
	/// Pack-header items are skipped. The first failing item aborts the whole container.
	pub fn decode(&self, view: &mut PackView<'_, '_, '_>, kind: ContainerKind) -> Result<Value> {
		self.decode_at(view, kind, 0)
	}

	fn decode_at<'a>(&self, view: &mut PackView<'_, 'a, '_>, kind: ContainerKind, depth: u32) -> Result<Value> {
		let mut object = ObjectValue::new();
		let mut items = Vec::new();

		let mut cursor = view.first_item();
		loop {
			let item = match cursor {
				Ok(item) => item,
				Err(Status::NotFound) => break,
				Err(status) => return Err(status.into()),
			};

			if item.kind != ItemKind::PackHeader {
				match kind {
					ContainerKind::Object => {
						let Some(key) = item.key else {
							return Err(PackError::BadData {
								detail: format!("{} item in object has no key", item.kind.as_str()),
							});
						};
						let value = self.item_value(view, &item, depth)?;
						object.insert(key, value);
					}
					ContainerKind::Array => items.push(self.item_value(view, &item, depth)?),
				}
			}

			cursor = view.next_item(&item);
		}

		Ok(match kind {
			ContainerKind::Object => Value::Object(object),
			ContainerKind::Array => Value::Array(items),
		})
	}

	fn item_value<'a>(&self, view: &mut PackView<'_, 'a, '_>, item: &Item<'a>, depth: u32) -> Result<Value> {
		let wire = |status: Status| PackError::at_key(status, item.key);

		let value = match item.kind {
			ItemKind::Object | ItemKind::Array => {
				let depth = self.descend(depth)?;
				let kind = if item.kind == ItemKind::Object { ContainerKind::Object } else { ContainerKind::Array };
				let mut child = view.sub_pack(item).map_err(wire)?;
				let value = self.decode_at(&mut child, kind, depth)?;
				child.finish().map_err(wire)?;
				value
			}
			ItemKind::Str => {
				let end = item.value.iter().position(|byte| *byte == 0).unwrap_or(item.value.len());
				Value::from_text_bytes(&item.value[..end])
			}
			ItemKind::Raw => Value::Raw(item.value.to_vec()),
			ItemKind::Int32 => Value::Int32(i32::from_le_bytes(fixed(item)?)),
			ItemKind::UInt32 => Value::UInt32(u32::from_le_bytes(fixed(item)?)),
			ItemKind::Int64 => Value::Int64(i64::from_le_bytes(fixed(item)?)),
			ItemKind::UInt64 => Value::UInt64(u64::from_le_bytes(fixed(item)?)),
			ItemKind::Float => Value::Float(f32::from_le_bytes(fixed(item)?)),
			ItemKind::Double => Value::Double(f64::from_le_bytes(fixed(item)?)),
			ItemKind::Bool => Value::Bool(fixed::<1>(item)?[0] != 0),
			ItemKind::Null => Value::Null,
			ItemKind::PackHeader => {
				return Err(PackError::BadData {
					detail: "pack header item has no value".to_owned(),
				});
			}
			ItemKind::Unknown(tag) => {
				return Err(PackError::BadData {
					detail: format!("unsupported item tag 0x{tag:02x} at key {:?}", item.key),
				});
			}
		};
		Ok(value)
	}

	fn descend(&self, depth: u32) -> Result<u32> {
		let next = depth + 1;
		if next > self.max_depth {
			return Err(PackError::DepthExceeded { max_depth: self.max_depth });
		}
		Ok(next)
	}
}

fn fixed<const N: usize>(item: &Item<'_>) -> Result<[u8; N]> {
	item.value.try_into().map_err(|_| PackError::BadData {
		detail: format!("{} item holds {} bytes, expected {N}", item.kind.as_str(), item.value.len()),
	})
}
