use crate::pack::{PackLimits, PackVersion, ReadSession, Result, Value, WriteSession};

/// Serialize an object value into pack bytes.
///
/// `size_hint` replaces the default initial capacity; a hint above the hard cap fails with
/// [`crate::pack::PackError::SizeExceeded`]. `version` must be exactly `MC_PACK_V1` or
/// `MC_PACK_V2`; anything else selects `V1`.
pub fn array_to_pack(value: &Value, size_hint: Option<usize>, version: Option<&str>) -> Result<Vec<u8>> {
	let limits = PackLimits::default();
	let capacity = size_hint.unwrap_or(limits.default_capacity);
	WriteSession::new(limits, PackVersion::from_arg(version), capacity)?.serialize(value)
}

/// Deserialize pack bytes of either version into an object value.
pub fn pack_to_array(bytes: &[u8]) -> Result<Value> {
	ReadSession::new(PackLimits::default()).deserialize(bytes)
}
