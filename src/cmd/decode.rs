use std::path::PathBuf;

use mcpack::pack::{Result, pack_to_array};

use crate::cmd::json::value_to_json;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, read_pack_file};

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Deserialize a pack file and print its value tree.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;

	let (_, _, bytes) = read_pack_file(&input)?;
	let value = pack_to_array(&bytes)?;

	if json {
		return emit_json(&value_to_json(&value));
	}

	print_value(&value, 0, 0, PrintOptions::default());
	Ok(())
}
