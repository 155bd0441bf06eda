use std::collections::BTreeMap;
use std::path::PathBuf;

use mcpack::pack::wire::{PackReader, PackView, Status};
use mcpack::pack::{PackError, PackLimits, PackVersion, Result};

use crate::cmd::util::{emit_json, read_pack_file};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print framing details and item statistics for a pack file.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let (stored_size, compression, bytes) = read_pack_file(&path)?;
	let stats = scan_pack(&bytes, &PackLimits::default())?;

	let mut kinds: Vec<_> = stats.kinds.iter().map(|(kind, count)| (*kind, *count)).collect();
	kinds.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(right.0)));

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: compression.as_str(),
			version: stats.version.as_str(),
			stored_size,
			pack_size: bytes.len(),
			top_level_items: stats.top_level_items,
			total_items: stats.total_items,
			max_depth: stats.max_depth,
			kinds: kinds.iter().map(|(kind, count)| KindCountJson { kind, count: *count }).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("compression: {}", compression.as_str());
	println!("version: {}", stats.version.as_str());
	println!("stored_size: {stored_size}");
	println!("pack_size: {}", bytes.len());
	println!("top_level_items: {}", stats.top_level_items);
	println!("total_items: {}", stats.total_items);
	println!("max_depth: {}", stats.max_depth);
	println!("kinds:");
	for (kind, count) in kinds {
		println!("  {kind}: {count}");
	}

	Ok(())
}

/// Item statistics gathered by walking a pack without building values.
#[derive(Debug)]
pub(crate) struct PackStats {
	pub(crate) version: PackVersion,
	pub(crate) top_level_items: u32,
	pub(crate) total_items: usize,
	pub(crate) max_depth: u32,
	pub(crate) kinds: BTreeMap<&'static str, usize>,
}

pub(crate) fn scan_pack(bytes: &[u8], limits: &PackLimits) -> Result<PackStats> {
	let mut scratch = vec![0_u8; limits.scratch_capacity(limits.default_capacity)];
	let mut reader = PackReader::open(bytes, &mut scratch).map_err(|status| PackError::OpenFailed { status })?;

	let version = reader.version();
	let mut root = reader.root();
	let mut stats = PackStats {
		version,
		top_level_items: root.item_count()?,
		total_items: 0,
		max_depth: 0,
		kinds: BTreeMap::new(),
	};
	walk(&mut root, 0, limits.max_depth, &mut stats)?;
	Ok(stats)
}

fn walk(view: &mut PackView<'_, '_, '_>, depth: u32, max_depth: u32, stats: &mut PackStats) -> Result<()> {
	stats.max_depth = stats.max_depth.max(depth);

	let mut cursor = view.first_item();
	loop {
		let item = match cursor {
			Ok(item) => item,
			Err(Status::NotFound) => break,
			Err(status) => return Err(status.into()),
		};

		stats.total_items += 1;
		*stats.kinds.entry(item.kind.as_str()).or_default() += 1;

		if item.kind.is_container() {
			if depth >= max_depth {
				return Err(PackError::DepthExceeded { max_depth });
			}
			let mut child = view.sub_pack(&item)?;
			walk(&mut child, depth + 1, max_depth, stats)?;
			child.finish()?;
		}

		cursor = view.next_item(&item);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct KindCountJson<'a> {
	kind: &'a str,
	count: usize,
}

#[derive(serde::Serialize)]
struct InfoJson<'a> {
	path: String,
	compression: &'static str,
	version: &'static str,
	stored_size: usize,
	pack_size: usize,
	top_level_items: u32,
	total_items: usize,
	max_depth: u32,
	kinds: Vec<KindCountJson<'a>>,
}
