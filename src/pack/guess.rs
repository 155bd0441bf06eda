use crate::pack::ScalarType;

/// Exclusive upper bound of `u64` as an `f64` (2^64).
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Numeric payload with its source representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
	/// Signed integer source.
	Signed(i64),
	/// Unsigned integer source.
	Unsigned(u64),
	/// Floating-point source.
	Real(f64),
}

impl Number {
	/// Convert with `as` semantics (wrapping integers, saturating floats).
	pub fn as_i32(self) -> i32 {
		match self {
			Self::Signed(v) => v as i32,
			Self::Unsigned(v) => v as i32,
			Self::Real(v) => v as i32,
		}
	}

	/// See [`Number::as_i32`].
	pub fn as_u32(self) -> u32 {
		match self {
			Self::Signed(v) => v as u32,
			Self::Unsigned(v) => v as u32,
			Self::Real(v) => v as u32,
		}
	}

	/// See [`Number::as_i32`].
	pub fn as_i64(self) -> i64 {
		match self {
			Self::Signed(v) => v,
			Self::Unsigned(v) => v as i64,
			Self::Real(v) => v as i64,
		}
	}

	/// See [`Number::as_i32`].
	pub fn as_u64(self) -> u64 {
		match self {
			Self::Signed(v) => v as u64,
			Self::Unsigned(v) => v,
			Self::Real(v) => v as u64,
		}
	}

	/// See [`Number::as_i32`].
	pub fn as_f32(self) -> f32 {
		match self {
			Self::Signed(v) => v as f32,
			Self::Unsigned(v) => v as f32,
			Self::Real(v) => v as f32,
		}
	}

	/// See [`Number::as_i32`].
	pub fn as_f64(self) -> f64 {
		match self {
			Self::Signed(v) => v as f64,
			Self::Unsigned(v) => v as f64,
			Self::Real(v) => v,
		}
	}
}

/// Choose the narrowest wire type for a number that has no directive.
///
/// Integral values test `i32 -> u32 -> i64 -> u64` (non-negative) or `i32 -> i64`
/// (negative). Anything with a fractional part, or outside the integral ranges, is `Double`;
/// `Float` is never inferred.
pub fn guess_number_type(number: Number) -> ScalarType {
	match number {
		Number::Unsigned(v) => classify_unsigned(v),
		Number::Signed(v) if v >= 0 => classify_unsigned(v as u64),
		Number::Signed(v) => classify_signed(v),
		Number::Real(v) => guess_real(v),
	}
}

fn guess_real(d: f64) -> ScalarType {
	if d >= 0.0 {
		let unsigned = d as u64;
		if d < U64_LIMIT && unsigned as f64 == d {
			return classify_unsigned(unsigned);
		}
	} else {
		let signed = d as i64;
		if signed as f64 == d {
			return classify_signed(signed);
		}
	}

	ScalarType::Double
}

fn classify_unsigned(v: u64) -> ScalarType {
	if v <= i32::MAX as u64 {
		ScalarType::Int32
	} else if v <= u64::from(u32::MAX) {
		ScalarType::UInt32
	} else if v <= i64::MAX as u64 {
		ScalarType::Int64
	} else {
		ScalarType::UInt64
	}
}

fn classify_signed(v: i64) -> ScalarType {
	if v >= i64::from(i32::MIN) { ScalarType::Int32 } else { ScalarType::Int64 }
}
