mod api;
mod compression;
mod decode;
mod directive;
mod encode;
mod error;
mod guess;
mod limits;
mod read;
mod session;
mod value;
pub mod wire;
mod write;

/// Top-level encode/decode entry points.
pub use api::{array_to_pack, pack_to_array};
/// Compression detection and zstd helpers.
pub use compression::{Compression, ZSTD_MAGIC, decode_bytes, encode_zstd};
/// Item-stream decoder.
pub use decode::{ContainerKind, Decoder};
/// Key type directive parsing.
pub use directive::{ScalarType, TypeDirective, parse_directive};
/// Value-tree encoder.
pub use encode::Encoder;
/// Error and result aliases.
pub use error::{BufferKind, ErrorKind, PackError, Result};
/// Numeric wire-type inference.
pub use guess::{Number, guess_number_type};
/// Buffer limits and format version selection.
pub use limits::{PackLimits, PackVersion};
/// Growable read session.
pub use read::ReadSession;
/// Dynamic value model.
pub use value::{FieldValue, ObjectValue, Value};
/// Growable write session.
pub use write::WriteSession;
