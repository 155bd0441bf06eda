use crate::pack::{PackError, Result};

/// Scalar wire types a key directive can force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
	/// Length-prefixed bytes.
	Raw,
	/// NUL-terminated text.
	Str,
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
}

impl ScalarType {
	/// Every scalar type, in directive-table order.
	pub const ALL: [Self; 9] = [
		Self::Raw,
		Self::Str,
		Self::Int32,
		Self::UInt32,
		Self::Int64,
		Self::UInt64,
		Self::Float,
		Self::Double,
		Self::Bool,
	];

	/// Directive name as written inside the brackets.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Raw => "raw",
			Self::Str => "str",
			Self::Int32 => "int32",
			Self::UInt32 => "uint32",
			Self::Int64 => "int64",
			Self::UInt64 => "uint64",
			Self::Float => "float",
			Self::Double => "double",
			Self::Bool => "bool",
		}
	}

	/// Whether this type is one of the six numeric kinds.
	pub fn is_numeric(self) -> bool {
		matches!(
			self,
			Self::Int32 | Self::UInt32 | Self::Int64 | Self::UInt64 | Self::Float | Self::Double
		)
	}
}

/// Explicit wire type attached to an object key, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeDirective {
	/// No prefix; the encoder infers the type.
	#[default]
	Unspecified,
	/// Prefix forcing one scalar type.
	Explicit(ScalarType),
}

/// Split a `(type)name` prefix off an object key.
///
/// The prefix is matched case-insensitively. The remaining key may be empty. Keys without a
/// recognized prefix are returned unchanged.
pub fn parse_directive(key: &str) -> Result<(TypeDirective, &str)> {
	if key.is_empty() {
		return Err(PackError::BadParameter {
			detail: "object key is empty".to_owned(),
		});
	}

	let Some(rest) = key.strip_prefix('(') else {
		return Ok((TypeDirective::Unspecified, key));
	};
	let Some(close) = rest.find(')') else {
		return Ok((TypeDirective::Unspecified, key));
	};

	let name = &rest[..close];
	match ScalarType::ALL.into_iter().find(|ty| ty.as_str().eq_ignore_ascii_case(name)) {
		Some(ty) => Ok((TypeDirective::Explicit(ty), &rest[close + 1..])),
		None => Ok((TypeDirective::Unspecified, key)),
	}
}
