use std::io::Write;
use std::path::PathBuf;

use mcpack::pack::{Result, array_to_pack, encode_zstd};
use tracing::debug;

use crate::cmd::json::json_to_value;

const ZSTD_LEVEL: i32 = 3;

#[derive(clap::Args)]
pub struct Args {
	/// JSON document whose root is an object.
	pub input: PathBuf,
	/// Output file; pack bytes go to stdout when omitted.
	#[arg(short, long)]
	pub output: Option<PathBuf>,
	/// Initial main-buffer capacity in bytes.
	#[arg(long = "size-hint")]
	pub size_hint: Option<usize>,
	/// `MC_PACK_V1` or `MC_PACK_V2`; anything else selects V1.
	#[arg(long = "version")]
	pub pack_version: Option<String>,
	/// Wrap the output in a zstd frame.
	#[arg(long)]
	pub zstd: bool,
}

/// Serialize a JSON document into pack bytes.
pub fn run(args: Args) -> Result<()> {
	let Args {
		input,
		output,
		size_hint,
		pack_version,
		zstd,
	} = args;

	let text = std::fs::read_to_string(&input)?;
	let json: serde_json::Value = serde_json::from_str(&text)?;
	let value = json_to_value(&json)?;

	let mut bytes = array_to_pack(&value, size_hint, pack_version.as_deref())?;
	debug!(input = %input.display(), size = bytes.len(), "encoded pack");
	if zstd {
		bytes = encode_zstd(&bytes, ZSTD_LEVEL)?;
	}

	match output {
		Some(path) => std::fs::write(path, &bytes)?,
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout.write_all(&bytes)?;
			stdout.flush()?;
		}
	}
	Ok(())
}
