#![allow(missing_docs)]

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::{Value, json};

#[test]
fn encode_then_decode_json_applies_directives() {
	let dir = scratch_dir("directives");
	let input = dir.join("doc.json");
	let packed = dir.join("doc.pack");
	std::fs::write(&input, r#"{"a": 1, "(float)f": 2, "s": "hi", "nested": {"list": [true, null]}}"#).expect("write input");

	run_ok(&["encode", path_arg(&input).as_str(), "-o", path_arg(&packed).as_str(), "--version", "MC_PACK_V2"]);
	let json = run_json(&["decode", path_arg(&packed).as_str(), "--json"]);

	assert_eq!(json, json!({"a": 1, "f": 2.0, "s": "hi", "nested": {"list": [true, null]}}));
}

#[test]
fn object_key_order_survives_encode_and_decode() {
	let dir = scratch_dir("key_order");
	let input = dir.join("doc.json");
	let packed = dir.join("doc.pack");
	std::fs::write(&input, r#"{"zeta": 1, "alpha": {"y": true, "x": null}, "mid": "m"}"#).expect("write input");

	run_ok(&["encode", path_arg(&input).as_str(), "-o", path_arg(&packed).as_str()]);
	let json = run_json(&["decode", path_arg(&packed).as_str(), "--json"]);

	let keys: Vec<&str> = json.as_object().expect("object root").keys().map(String::as_str).collect();
	assert_eq!(keys, ["zeta", "alpha", "mid"]);
	let nested: Vec<&str> = json["alpha"].as_object().expect("nested object").keys().map(String::as_str).collect();
	assert_eq!(nested, ["y", "x"]);
}

#[test]
fn zstd_output_is_detected_by_info() {
	let dir = scratch_dir("zstd");
	let input = dir.join("doc.json");
	let packed = dir.join("doc.pack.zst");
	std::fs::write(&input, r#"{"k": "v", "arr": [1, [2, {}]]}"#).expect("write input");

	run_ok(&["encode", path_arg(&input).as_str(), "-o", path_arg(&packed).as_str(), "--zstd"]);
	let json = run_json(&["info", path_arg(&packed).as_str(), "--json"]);

	assert_eq!(json["compression"], "zstd");
	assert_eq!(json["version"], "MC_PACK_V1");
	assert_eq!(json["top_level_items"], 3);
	assert_eq!(json["max_depth"], 3);
	assert!(json["kinds"].as_array().is_some_and(|kinds| !kinds.is_empty()), "expected kind histogram");
}

#[test]
fn non_object_root_fails_with_message() {
	let dir = scratch_dir("bad_root");
	let input = dir.join("doc.json");
	std::fs::write(&input, "[1, 2]").expect("write input");

	let output = run(&["encode", path_arg(&input).as_str(), "-o", path_arg(&dir.join("out.pack")).as_str()]);
	assert!(!output.status.success(), "command should fail");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.starts_with("error: bad parameter"), "unexpected stderr: {stderr}");
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_mcpack")).args(args).output().expect("command executes")
}

fn run_ok(args: &[&str]) {
	let output = run(args);
	assert!(output.status.success(), "command should succeed: {}", String::from_utf8_lossy(&output.stderr));
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(output.status.success(), "command should succeed: {}", String::from_utf8_lossy(&output.stderr));
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn scratch_dir(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("mcpack_cli_{}_{name}", std::process::id()));
	std::fs::create_dir_all(&dir).expect("create scratch dir");
	dir
}

fn path_arg(path: &std::path::Path) -> String {
	path.display().to_string()
}
