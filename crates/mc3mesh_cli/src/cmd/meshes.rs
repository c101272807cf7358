use std::path::PathBuf;

use mc3mesh::container::{
	ContainerError, DecodeOptions, Diagnostics, Result, enumerate_members, expand_group, read_mesh_entries,
};

use crate::cmd::util::{WarningJson, addr_hex, emit_json, open_catalog, signed_hex, warnings_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// 1-based catalog index.
	#[arg(long)]
	pub package: usize,
	#[arg(long)]
	pub strict_magic: bool,
	#[arg(long)]
	pub json: bool,
}

/// Print the group header and mesh entry table of one package.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		package,
		strict_magic,
		json,
	} = args;

	let (file, report) = open_catalog(&path, &DecodeOptions { strict_magic })?;
	let entry = report.catalog.select(package)?;
	let address = entry.address.ok_or(ContainerError::UnresolvedPackage { index: entry.index })?;

	let mut diag = if strict_magic { Diagnostics::strict() } else { Diagnostics::new() };
	let group = expand_group(&file, address, &mut diag)?;
	let members = enumerate_members(&file, &group, &mut diag);
	let meshes = read_mesh_entries(&file, &members, &mut diag);

	if json {
		let payload = MeshesJson {
			package: entry.index,
			name: entry.name.as_text().map(str::to_owned),
			group: addr_hex(group.address),
			group_verified: group.verified,
			member_count: group.member_count,
			member_list: signed_hex(group.member_list),
			members: members.iter().map(|member| addr_hex(member.address)).collect(),
			meshes: meshes
				.iter()
				.map(|mesh| MeshEntryJson {
					ordinal: mesh.ordinal,
					start: signed_hex(mesh.start),
					size: mesh.size_bytes,
					vertex_total: mesh.vertex_total,
					end: signed_hex(mesh.end),
				})
				.collect(),
			warnings: warnings_json(diag.warnings()),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("package: {} {}", entry.index, entry.name);
	println!("group: {} (verified: {})", addr_hex(group.address), group.verified);
	println!("member_count: {}", group.member_count);
	println!("member_list: {}", signed_hex(group.member_list));
	println!("members:");
	for member in &members {
		println!("  {}: {}", member.slot, addr_hex(member.address));
	}
	println!("meshes:");
	for mesh in &meshes {
		println!(
			"  {}. start: {} | size: 0x{:04X} | vtx_total: {} | end: {}",
			mesh.ordinal,
			signed_hex(mesh.start),
			mesh.size_bytes,
			mesh.vertex_total,
			signed_hex(mesh.end)
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct MeshEntryJson {
	ordinal: usize,
	start: String,
	size: u32,
	vertex_total: u16,
	end: String,
}

#[derive(serde::Serialize)]
struct MeshesJson {
	package: usize,
	name: Option<String>,
	group: String,
	group_verified: bool,
	member_count: u8,
	member_list: String,
	members: Vec<String>,
	meshes: Vec<MeshEntryJson>,
	warnings: Vec<WarningJson>,
}
