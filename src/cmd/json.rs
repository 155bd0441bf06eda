use mcpack::pack::{ObjectValue, PackError, Result, Value};

/// Convert a parsed JSON document into a value tree.
///
/// Integral numbers become `Int64` (or `UInt64` above `i64::MAX`), others `Double`. Strings
/// holding NUL become `Raw`.
pub(crate) fn json_to_value(json: &serde_json::Value) -> Result<Value> {
	let value = match json {
		serde_json::Value::Null => Value::Null,
		serde_json::Value::Bool(flag) => Value::Bool(*flag),
		serde_json::Value::Number(number) => match (number.as_i64(), number.as_u64(), number.as_f64()) {
			(Some(v), _, _) => Value::Int64(v),
			(_, Some(v), _) => Value::UInt64(v),
			(_, _, Some(v)) => Value::Double(v),
			_ => {
				return Err(PackError::BadData {
					detail: format!("unrepresentable JSON number {number}"),
				});
			}
		},
		serde_json::Value::String(text) => Value::from_text_bytes(text.as_bytes()),
		serde_json::Value::Array(items) => Value::Array(items.iter().map(json_to_value).collect::<Result<Vec<_>>>()?),
		serde_json::Value::Object(map) => Value::Object(
			map.iter()
				.map(|(key, value)| Ok((key.as_str(), json_to_value(value)?)))
				.collect::<Result<ObjectValue>>()?,
		),
	};
	Ok(value)
}

/// Convert a value tree into JSON. `Raw` bytes render as an array of numbers.
pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Null => serde_json::Value::Null,
		Value::Bool(flag) => serde_json::Value::Bool(*flag),
		Value::Int32(v) => serde_json::Value::from(*v),
		Value::UInt32(v) => serde_json::Value::from(*v),
		Value::Int64(v) => serde_json::Value::from(*v),
		Value::UInt64(v) => serde_json::Value::from(*v),
		Value::Float(v) => serde_json::Value::from(*v),
		Value::Double(v) => serde_json::Value::from(*v),
		Value::Str(text) => serde_json::Value::String(text.clone()),
		Value::Raw(bytes) => serde_json::Value::Array(bytes.iter().map(|byte| serde_json::Value::from(*byte)).collect()),
		Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
		Value::Object(object) => serde_json::Value::Object(object.iter().map(|(key, value)| (key.to_owned(), value_to_json(value))).collect()),
	}
}
