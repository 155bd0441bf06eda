use mcpack::pack::Value;

use crate::cmd::util::truncate;

/// Output truncation limits for printed value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single object.
	pub max_fields_per_object: usize,
	/// Maximum number of characters printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays and raw byte previews.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_object: 200,
			max_string_len: 200,
			max_array_items: 64,
			max_print_depth: 32,
		}
	}
}

/// Print one value tree, tagging numbers with their wire kind.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Null => println!("{pad}null"),
		Value::Bool(v) => println!("{pad}{v}"),
		Value::Int32(v) => println!("{pad}{v} (int32)"),
		Value::UInt32(v) => println!("{pad}{v} (uint32)"),
		Value::Int64(v) => println!("{pad}{v} (int64)"),
		Value::UInt64(v) => println!("{pad}{v} (uint64)"),
		Value::Float(v) => println!("{pad}{v} (float)"),
		Value::Double(v) => println!("{pad}{v} (double)"),
		Value::Str(v) => println!("{pad}{:?}", truncate(v, options.max_string_len)),
		Value::Raw(v) => println!("{pad}raw[{}] {}", v.len(), hex_preview(v, options.max_array_items)),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{pad}  ... {} more", items.len() - options.max_array_items);
			}
			println!("{pad}]");
		}
		Value::Object(object) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{ ... {} fields }}", object.len());
				return;
			}
			println!("{pad}{{");
			for (name, field) in object.iter().take(options.max_fields_per_object) {
				print!("{pad}  {name} = ");
				if matches!(field, Value::Object(_) | Value::Array(_)) {
					println!();
					print_value(field, indent + 4, depth + 1, options);
				} else {
					print_value(field, 0, depth + 1, options);
				}
			}
			if object.len() > options.max_fields_per_object {
				println!("{pad}  ... {} more fields", object.len() - options.max_fields_per_object);
			}
			println!("{pad}}}");
		}
	}
}

fn hex_preview(bytes: &[u8], max: usize) -> String {
	let mut out: Vec<String> = bytes.iter().take(max).map(|byte| format!("{byte:02x}")).collect();
	if bytes.len() > max {
		out.push("..".to_owned());
	}
	out.join(" ")
}

#[cfg(test)]
mod tests {
	use super::hex_preview;

	#[test]
	fn hex_preview_marks_cut() {
		assert_eq!(hex_preview(&[0, 0xab, 7], 8), "00 ab 07");
		assert_eq!(hex_preview(&[1, 2, 3], 2), "01 02 ..");
	}
}
