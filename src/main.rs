#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "mcpack", about = "MC Pack encode, decode, and inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Serialize a JSON document into pack bytes.
	Encode(cmd::encode::Args),
	/// Deserialize pack bytes and print the value tree.
	Decode(cmd::decode::Args),
	/// Summarize the item stream of a pack.
	Info(cmd::info::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run() -> mcpack::pack::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Info(args) => cmd::info::run(args),
	}
}
