use std::io::Write;
use std::path::Path;

use mcpack::pack::{Compression, PackLimits, Result, decode_bytes};

/// Pretty-print a serializable payload to stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload)?;
	let mut stdout = std::io::stdout().lock();
	writeln!(stdout, "{text}")?;
	Ok(())
}

/// Read a pack file, unwrapping a zstd frame when present.
///
/// Returns `(stored_len, compression, pack_bytes)`.
pub(crate) fn read_pack_file(path: &Path) -> Result<(usize, Compression, Vec<u8>)> {
	let raw = std::fs::read(path)?;
	let stored = raw.len();
	let (compression, bytes) = decode_bytes(raw, PackLimits::MAX_CAPACITY)?;
	Ok((stored, compression, bytes))
}

/// Shorten `text` to at most `max_chars` characters, marking the cut.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.to_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::truncate;

	#[test]
	fn truncate_counts_chars_not_bytes() {
		assert_eq!(truncate("héllo", 10), "héllo");
		assert_eq!(truncate("héllo", 2), "hé...");
		assert_eq!(truncate("", 0), "");
	}
}
