use crate::pack::guess::Number;

/// Dynamic value tree carried through the codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed 32-bit integer.
	Int32(i32),
	/// Unsigned 32-bit integer.
	UInt32(u32),
	/// Signed 64-bit integer.
	Int64(i64),
	/// Unsigned 64-bit integer.
	UInt64(u64),
	/// 32-bit float.
	Float(f32),
	/// 64-bit float.
	Double(f64),
	/// Text without interior NUL bytes.
	Str(String),
	/// Arbitrary bytes, may embed NUL.
	Raw(Vec<u8>),
	/// Keyed container.
	Object(ObjectValue),
	/// Positional container.
	Array(Vec<Value>),
}

/// Insertion-ordered mapping with unique string keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectValue {
	fields: Vec<FieldValue>,
}

/// One named entry of an [`ObjectValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field key.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
}

impl Value {
	/// Build a string-like value from decoded text bytes.
	///
	/// Valid UTF-8 without NUL becomes `Str`; anything else stays `Raw`.
	pub fn from_text_bytes(bytes: &[u8]) -> Self {
		if bytes.contains(&0) {
			return Self::Raw(bytes.to_vec());
		}
		match std::str::from_utf8(bytes) {
			Ok(text) => Self::Str(text.to_owned()),
			Err(_) => Self::Raw(bytes.to_vec()),
		}
	}

	/// Short lowercase label for the value's kind.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int32(_) => "int32",
			Self::UInt32(_) => "uint32",
			Self::Int64(_) => "int64",
			Self::UInt64(_) => "uint64",
			Self::Float(_) => "float",
			Self::Double(_) => "double",
			Self::Str(_) => "str",
			Self::Raw(_) => "raw",
			Self::Object(_) => "object",
			Self::Array(_) => "array",
		}
	}

	/// Numeric payload for number variants.
	pub fn as_number(&self) -> Option<Number> {
		match *self {
			Self::Int32(v) => Some(Number::Signed(i64::from(v))),
			Self::UInt32(v) => Some(Number::Unsigned(u64::from(v))),
			Self::Int64(v) => Some(Number::Signed(v)),
			Self::UInt64(v) => Some(Number::Unsigned(v)),
			Self::Float(v) => Some(Number::Real(f64::from(v))),
			Self::Double(v) => Some(Number::Real(v)),
			_ => None,
		}
	}

	/// Borrow the mapping of an `Object`.
	pub fn as_object(&self) -> Option<&ObjectValue> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}

	/// Borrow the elements of an `Array`.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}
}

impl ObjectValue {
	/// Create an empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace `name`, returning the previous value.
	///
	/// Replacing keeps the original insertion position.
	pub fn insert(&mut self, name: impl Into<Box<str>>, value: Value) -> Option<Value> {
		let name = name.into();
		if let Some(field) = self.fields.iter_mut().find(|field| field.name == name) {
			return Some(std::mem::replace(&mut field.value, value));
		}
		self.fields.push(FieldValue { name, value });
		None
	}

	/// Look up a value by key.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the object has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Entries in insertion order.
	pub fn fields(&self) -> &[FieldValue] {
		&self.fields
	}

	/// Iterate `(key, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|field| (&*field.name, &field.value))
	}
}

impl<K: Into<Box<str>>> FromIterator<(K, Value)> for ObjectValue {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		let mut object = Self::new();
		for (name, value) in iter {
			object.insert(name, value);
		}
		object
	}
}

impl From<ObjectValue> for Value {
	fn from(value: ObjectValue) -> Self {
		Self::Object(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int32(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::UInt64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Double(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}
