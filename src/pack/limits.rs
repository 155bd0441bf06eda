/// Buffer sizing and nesting limits shared by write and read sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLimits {
	/// Initial main-buffer capacity when the caller gives no size hint.
	pub default_capacity: usize,
	/// Hard cap for every buffer and for accepted input.
	pub max_capacity: usize,
	/// Floor for the scratch buffer regardless of requested size.
	pub min_scratch: usize,
	/// Shortest serialized input accepted for decoding.
	pub min_input: usize,
	/// Maximum container nesting depth below the root object.
	pub max_depth: u32,
}

impl Default for PackLimits {
	fn default() -> Self {
		Self {
			default_capacity: Self::DEFAULT_CAPACITY,
			max_capacity: Self::MAX_CAPACITY,
			min_scratch: Self::MIN_SCRATCH,
			min_input: Self::MIN_INPUT,
			max_depth: Self::MAX_DEPTH,
		}
	}
}

impl PackLimits {
	/// Default initial capacity in bytes.
	pub const DEFAULT_CAPACITY: usize = 100_000;
	/// Hard cap in bytes (15 MiB).
	pub const MAX_CAPACITY: usize = 15_728_640;
	/// Minimum scratch working size in bytes.
	pub const MIN_SCRATCH: usize = 8_196;
	/// Minimum header prefix in bytes.
	pub const MIN_INPUT: usize = 4;
	/// Default nesting ceiling.
	pub const MAX_DEPTH: u32 = 256;

	/// Clamp a requested scratch size into `[min_scratch, max_capacity]`.
	pub fn scratch_capacity(&self, requested: usize) -> usize {
		requested.max(self.min_scratch).min(self.max_capacity)
	}

	/// Next capacity after doubling `current`, capped at `max_capacity`.
	pub fn grown(&self, current: usize) -> usize {
		current.saturating_mul(2).max(1).min(self.max_capacity)
	}
}

/// Wire-format version used when writing.
///
/// Reading detects the version from the buffer, so this only matters on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackVersion {
	/// Version 1 framing (`PCK` magic plus a header item).
	#[default]
	V1,
	/// Version 2 framing (root is a keyless object item, short lengths allowed).
	V2,
}

impl PackVersion {
	/// Literal selecting [`PackVersion::V1`].
	pub const V1_NAME: &'static str = "MC_PACK_V1";
	/// Literal selecting [`PackVersion::V2`].
	pub const V2_NAME: &'static str = "MC_PACK_V2";

	/// Select a version from an optional caller argument.
	///
	/// Matching is exact and case-sensitive; anything else falls back to `V1`.
	pub fn from_arg(arg: Option<&str>) -> Self {
		match arg {
			Some(Self::V2_NAME) => Self::V2,
			_ => Self::V1,
		}
	}

	/// Render the version as its literal name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::V1 => Self::V1_NAME,
			Self::V2 => Self::V2_NAME,
		}
	}

	/// Numeric version stored in `V1` header items.
	pub fn number(self) -> u32 {
		match self {
			Self::V1 => 1,
			Self::V2 => 2,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{PackLimits, PackVersion};

	#[test]
	fn version_literals_are_exact() {
		assert_eq!(PackVersion::from_arg(None), PackVersion::V1);
		assert_eq!(PackVersion::from_arg(Some("MC_PACK_V1")), PackVersion::V1);
		assert_eq!(PackVersion::from_arg(Some("MC_PACK_V2")), PackVersion::V2);
		assert_eq!(PackVersion::from_arg(Some("mc_pack_v2")), PackVersion::V1);
		assert_eq!(PackVersion::from_arg(Some("MC_PACK")), PackVersion::V1);
	}

	#[test]
	fn scratch_is_floored_and_capped() {
		let limits = PackLimits::default();
		assert_eq!(limits.scratch_capacity(10), PackLimits::MIN_SCRATCH);
		assert_eq!(limits.scratch_capacity(100_000), 100_000);
		assert_eq!(limits.scratch_capacity(usize::MAX), PackLimits::MAX_CAPACITY);
	}

	#[test]
	fn growth_doubles_up_to_cap() {
		let limits = PackLimits::default();
		assert_eq!(limits.grown(0), 1);
		assert_eq!(limits.grown(100_000), 200_000);
		assert_eq!(limits.grown(10_000_000), PackLimits::MAX_CAPACITY);
	}
}
