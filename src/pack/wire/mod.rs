//! Pack primitives: item tags, status codes, and scoped write/read handles.
//!
//! Layout summary (all integers little-endian):
//!
//! - item: `tag u8`, `key_len u8` (0 = keyless, else key bytes plus NUL), payload
//! - tag low nibble non-zero: fixed payload of that many bytes
//! - tag low nibble zero: variable payload, `u8` length when [`SHORT_FLAG`] is set, else `u32`
//! - containers: `u32` content length, `u32` item count, then items
//! - `V2` root: keyless object item; `V1` root: [`V1_MAGIC`], length, count, header item, items
//!
//! Every open handle (root or nested) holds a [`HANDLE_SIZE`] record in the scratch buffer.

mod arena;
mod reader;
mod writer;

use thiserror::Error;

pub use reader::{Item, PackReader, PackView};
pub use writer::{Pack, PackWriter};

/// Scratch bytes reserved per open handle.
pub const HANDLE_SIZE: usize = 16;
/// Leading bytes of a `V1` pack.
pub const V1_MAGIC: [u8; 4] = *b"PCK\x01";
/// Longest accepted key in bytes, excluding the NUL terminator.
pub const MAX_KEY_LEN: usize = 254;
/// Variable-length item uses a one-byte length.
pub const SHORT_FLAG: u8 = 0x80;

pub(crate) const TAG_OBJECT: u8 = 0x10;
pub(crate) const TAG_ARRAY: u8 = 0x20;
pub(crate) const TAG_STR: u8 = 0x50;
pub(crate) const TAG_RAW: u8 = 0x60;
pub(crate) const TAG_INT32: u8 = 0x14;
pub(crate) const TAG_INT64: u8 = 0x18;
pub(crate) const TAG_UINT32: u8 = 0x24;
pub(crate) const TAG_UINT64: u8 = 0x28;
pub(crate) const TAG_BOOL: u8 = 0x31;
pub(crate) const TAG_FLOAT: u8 = 0x44;
pub(crate) const TAG_DOUBLE: u8 = 0x48;
pub(crate) const TAG_NULL: u8 = 0x61;
pub(crate) const TAG_PACK_HEADER: u8 = 0x74;

/// Primitive status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Status {
	/// Cursor reached the end of a pack.
	#[error("item not found")]
	NotFound,
	/// Key or argument does not fit the container.
	#[error("bad parameter")]
	BadParam,
	/// Value does not fit the requested item type.
	#[error("bad type")]
	BadType,
	/// Malformed item data.
	#[error("bad data")]
	BadData,
	/// Main buffer is full.
	#[error("no space in pack buffer")]
	NoSpace,
	/// Scratch buffer is full.
	#[error("no space in temp buffer")]
	NoTempSpace,
	/// Leading bytes match no known version.
	#[error("unsupported pack version")]
	BadVersion,
	/// Declared lengths run past the end of the input.
	#[error("pack data truncated")]
	Truncated,
	/// Handle used in the wrong state.
	#[error("pack handle in wrong state")]
	BadState,
}

impl Status {
	/// Stable negative code for this status.
	pub fn code(self) -> i32 {
		match self {
			Self::NotFound => -1,
			Self::BadParam => -2,
			Self::BadType => -3,
			Self::BadData => -4,
			Self::NoSpace => -5,
			Self::NoTempSpace => -6,
			Self::BadVersion => -7,
			Self::Truncated => -8,
			Self::BadState => -9,
		}
	}
}

/// Item kind decoded from a tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
	/// Keyed container.
	Object,
	/// Positional container.
	Array,
	/// NUL-terminated text.
	Str,
	/// Length-prefixed bytes.
	Raw,
	/// Signed 32-bit integer.
	Int32,
	/// Unsigned 32-bit integer.
	UInt32,
	/// Signed 64-bit integer.
	Int64,
	/// Unsigned 64-bit integer.
	UInt64,
	/// 32-bit float.
	Float,
	/// 64-bit float.
	Double,
	/// Boolean.
	Bool,
	/// Null marker.
	Null,
	/// Framing item carrying the format version; holds no user value.
	PackHeader,
	/// Structurally valid item with a tag outside the known set.
	Unknown(u8),
}

impl ItemKind {
	/// Classify a tag byte, ignoring the short-length flag on variable items.
	pub fn from_tag(tag: u8) -> Self {
		let base = if tag & 0x0f == 0 { tag & !SHORT_FLAG } else { tag };
		match base {
			TAG_OBJECT => Self::Object,
			TAG_ARRAY => Self::Array,
			TAG_STR => Self::Str,
			TAG_RAW => Self::Raw,
			TAG_INT32 => Self::Int32,
			TAG_UINT32 => Self::UInt32,
			TAG_INT64 => Self::Int64,
			TAG_UINT64 => Self::UInt64,
			TAG_FLOAT => Self::Float,
			TAG_DOUBLE => Self::Double,
			TAG_BOOL => Self::Bool,
			TAG_NULL => Self::Null,
			TAG_PACK_HEADER => Self::PackHeader,
			_ => Self::Unknown(tag),
		}
	}

	/// Render the kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Object => "object",
			Self::Array => "array",
			Self::Str => "str",
			Self::Raw => "raw",
			Self::Int32 => "int32",
			Self::UInt32 => "uint32",
			Self::Int64 => "int64",
			Self::UInt64 => "uint64",
			Self::Float => "float",
			Self::Double => "double",
			Self::Bool => "bool",
			Self::Null => "null",
			Self::PackHeader => "pack_header",
			Self::Unknown(_) => "unknown",
		}
	}

	/// Whether the kind is an object or array.
	pub fn is_container(self) -> bool {
		matches!(self, Self::Object | Self::Array)
	}
}

/// Payload size class encoded in a tag's low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PayloadSize {
	Fixed(usize),
	Variable,
}

pub(crate) fn payload_size(tag: u8) -> Result<PayloadSize, Status> {
	match tag & 0x0f {
		0 => Ok(PayloadSize::Variable),
		size @ (1 | 2 | 4 | 8) => Ok(PayloadSize::Fixed(usize::from(size))),
		_ => Err(Status::BadData),
	}
}

#[cfg(test)]
mod tests;
