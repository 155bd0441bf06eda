use std::io::Read;

use crate::pack::{PackError, Result};

/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression wrapping detected on stored pack bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Bare pack bytes.
	None,
	/// Pack bytes inside a zstd frame.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Unwrap a zstd frame if present, returning `(mode, pack_bytes)`.
///
/// Decompressed output above `limit` bytes fails with [`PackError::DecompressedTooLarge`].
pub fn decode_bytes(raw: Vec<u8>, limit: usize) -> Result<(Compression, Vec<u8>)> {
	if !raw.starts_with(&ZSTD_MAGIC) {
		return Ok((Compression::None, raw));
	}

	let out = decode_zstd(&raw, limit)?;
	Ok((Compression::Zstd, out))
}

/// Wrap `bytes` in a zstd frame at `level`.
pub fn encode_zstd(bytes: &[u8], level: i32) -> Result<Vec<u8>> {
	Ok(zstd::stream::encode_all(bytes, level)?)
}

fn decode_zstd(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(PackError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
