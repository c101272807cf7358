use std::path::PathBuf;

use mc3mesh::container::{DecodeOptions, Result};

use crate::cmd::util::{WarningJson, addr_hex, emit_json, open_catalog, warnings_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub strict_magic: bool,
	#[arg(long)]
	pub json: bool,
}

/// Print every catalog entry with its 1-based selection index.
pub fn run(args: Args) -> Result<()> {
	let Args { path, strict_magic, json } = args;

	let (_, report) = open_catalog(&path, &DecodeOptions { strict_magic })?;

	if json {
		let payload = ListJson {
			package_count: report.catalog.len(),
			packages: report
				.catalog
				.entries()
				.iter()
				.map(|entry| PackageJson {
					index: entry.index,
					address: entry.address.map(addr_hex),
					name: entry.name.as_text().map(str::to_owned),
				})
				.collect(),
			warnings: warnings_json(&report.warnings),
		};
		emit_json(&payload);
		return Ok(());
	}

	for entry in report.catalog.entries() {
		let address = entry.address.map(addr_hex).unwrap_or_else(|| "-".to_owned());
		println!("{:>4}  {}  {}", entry.index, address, entry.name);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct PackageJson {
	index: usize,
	address: Option<String>,
	name: Option<String>,
}

#[derive(serde::Serialize)]
struct ListJson {
	package_count: usize,
	packages: Vec<PackageJson>,
	warnings: Vec<WarningJson>,
}
