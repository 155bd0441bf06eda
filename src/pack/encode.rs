use crate::pack::wire::{Pack, Status};
use crate::pack::{Number, ObjectValue, PackError, PackLimits, Result, ScalarType, TypeDirective, Value, guess_number_type, parse_directive};

/// Depth-first writer from a [`Value`] tree into an open pack.
///
/// Space conditions from the primitives surface unchanged as [`PackError::NoSpace`] /
/// [`PackError::NoTempSpace`] so the owning session can grow and retry.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
	max_depth: u32,
}

impl Default for Encoder {
	fn default() -> Self {
		Self::new(PackLimits::MAX_DEPTH)
	}
}

impl Encoder {
	/// Create an encoder that rejects containers nested deeper than `max_depth`.
	pub fn new(max_depth: u32) -> Self {
		Self { max_depth }
	}

	/// Encode every field of `object` into the object pack `pack`.
	///
	/// Keys may carry a `(type)` directive, which is stripped before writing.
	pub fn encode_object(&self, pack: &mut Pack<'_, '_>, object: &ObjectValue, depth: u32) -> Result<()> {
		for (name, value) in object.iter() {
			let (directive, key) = parse_directive(name)?;
			self.encode_value(pack, Some(key), directive, value, depth)?;
		}
		Ok(())
	}

	/// Encode `items` positionally into the array pack `pack`.
	pub fn encode_array(&self, pack: &mut Pack<'_, '_>, items: &[Value], depth: u32) -> Result<()> {
		for item in items {
			self.encode_value(pack, None, TypeDirective::Unspecified, item, depth)?;
		}
		Ok(())
	}

	fn encode_value(&self, pack: &mut Pack<'_, '_>, key: Option<&str>, directive: TypeDirective, value: &Value, depth: u32) -> Result<()> {
		let wire = move |status: Status| PackError::at_key(status, key);

		match value {
			Value::Null => pack.put_null(key).map_err(wire),
			Value::Bool(flag) => match directive {
				TypeDirective::Unspecified | TypeDirective::Explicit(ScalarType::Bool) => pack.put_bool(key, *flag).map_err(wire),
				TypeDirective::Explicit(ty) => Err(conflict(ty, value, key)),
			},
			Value::Str(text) => encode_bytes(pack, key, directive, value, text.as_bytes()),
			Value::Raw(bytes) => encode_bytes(pack, key, directive, value, bytes),
			Value::Object(object) => {
				if let TypeDirective::Explicit(ty) = directive {
					return Err(conflict(ty, value, key));
				}
				let depth = self.descend(depth)?;
				let mut child = pack.put_object(key).map_err(wire)?;
				self.encode_object(&mut child, object, depth)?;
				child.finish().map_err(wire)
			}
			Value::Array(items) => {
				if let TypeDirective::Explicit(ty) = directive {
					return Err(conflict(ty, value, key));
				}
				let depth = self.descend(depth)?;
				let mut child = pack.put_array(key).map_err(wire)?;
				self.encode_array(&mut child, items, depth)?;
				child.finish().map_err(wire)
			}
			Value::Int32(_) | Value::UInt32(_) | Value::Int64(_) | Value::UInt64(_) | Value::Float(_) | Value::Double(_) => {
				let Some(number) = value.as_number() else {
					return Err(PackError::BadData {
						detail: format!("{} value is not numeric", value.kind_name()),
					});
				};
				let ty = match directive {
					TypeDirective::Unspecified => guess_number_type(number),
					TypeDirective::Explicit(ty) if ty.is_numeric() => ty,
					TypeDirective::Explicit(ty) => return Err(conflict(ty, value, key)),
				};
				put_number(pack, key, ty, number).map_err(wire)
			}
		}
	}

	fn descend(&self, depth: u32) -> Result<u32> {
		let next = depth + 1;
		if next > self.max_depth {
			return Err(PackError::DepthExceeded { max_depth: self.max_depth });
		}
		Ok(next)
	}
}

/// Write string-like bytes as text or binary.
///
/// Without a directive, bytes that are valid UTF-8 and free of NUL go out as text.
fn encode_bytes(pack: &mut Pack<'_, '_>, key: Option<&str>, directive: TypeDirective, value: &Value, bytes: &[u8]) -> Result<()> {
	let as_text = match directive {
		TypeDirective::Explicit(ScalarType::Str) => true,
		TypeDirective::Explicit(ScalarType::Raw) => false,
		TypeDirective::Unspecified => !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok(),
		TypeDirective::Explicit(ty) => return Err(conflict(ty, value, key)),
	};

	let written = if as_text { pack.put_str(key, bytes) } else { pack.put_raw(key, bytes) };
	written.map_err(|status| PackError::at_key(status, key))
}

fn put_number(pack: &mut Pack<'_, '_>, key: Option<&str>, ty: ScalarType, number: Number) -> std::result::Result<(), Status> {
	match ty {
		ScalarType::Int32 => pack.put_i32(key, number.as_i32()),
		ScalarType::UInt32 => pack.put_u32(key, number.as_u32()),
		ScalarType::Int64 => pack.put_i64(key, number.as_i64()),
		ScalarType::UInt64 => pack.put_u64(key, number.as_u64()),
		ScalarType::Float => pack.put_f32(key, number.as_f32()),
		ScalarType::Double => pack.put_f64(key, number.as_f64()),
		ScalarType::Raw | ScalarType::Str | ScalarType::Bool => Err(Status::BadType),
	}
}

fn conflict(ty: ScalarType, value: &Value, key: Option<&str>) -> PackError {
	PackError::BadType {
		detail: format!("directive ({}) does not apply to {} value at key {key:?}", ty.as_str(), value.kind_name()),
	}
}
