use std::path::PathBuf;

use mc3mesh::container::{DecodeOptions, GROUP_LIST_MAGIC, PACKAGE_LIST_MAGIC, Result};

use crate::cmd::util::{WarningJson, addr_hex, emit_json, magic_hex, open_catalog, signed_hex, warnings_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub strict_magic: bool,
	#[arg(long)]
	pub json: bool,
}

/// Print relocation, directory pointers, and magic verification.
pub fn run(args: Args) -> Result<()> {
	let Args { path, strict_magic, json } = args;

	let (file, report) = open_catalog(&path, &DecodeOptions { strict_magic })?;
	let directory = &report.directory;

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			file_len: file.len(),
			relocation_offset: report.relocation.offset(),
			group_list: addr_hex(directory.group_list),
			group_list_verified: directory.group_list_verified,
			package_list: addr_hex(directory.package_list),
			package_list_verified: directory.package_list_verified,
			package_count: directory.package_count,
			package_mesh_list: signed_hex(directory.package_mesh_list),
			package_name_list: signed_hex(directory.package_name_list),
			warnings: warnings_json(&report.warnings),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("file_len: {}", file.len());
	println!("relocation_offset: {}", signed_hex(report.relocation.offset()));
	println!(
		"group_list: {} ({})",
		addr_hex(directory.group_list),
		verify_label(directory.group_list_verified, GROUP_LIST_MAGIC)
	);
	println!(
		"package_list: {} ({})",
		addr_hex(directory.package_list),
		verify_label(directory.package_list_verified, PACKAGE_LIST_MAGIC)
	);
	println!("package_count: {}", directory.package_count);
	println!("package_mesh_list: {}", signed_hex(directory.package_mesh_list));
	println!("package_name_list: {}", signed_hex(directory.package_name_list));

	Ok(())
}

fn verify_label(verified: bool, magic: [u8; 4]) -> String {
	if verified {
		format!("magic {}", magic_hex(magic))
	} else {
		format!("magic differs from {}", magic_hex(magic))
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	file_len: usize,
	relocation_offset: i64,
	group_list: String,
	group_list_verified: bool,
	package_list: String,
	package_list_verified: bool,
	package_count: u8,
	package_mesh_list: String,
	package_name_list: String,
	warnings: Vec<WarningJson>,
}
