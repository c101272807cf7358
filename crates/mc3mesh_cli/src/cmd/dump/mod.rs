use std::path::PathBuf;

use mc3mesh::container::{DecodeOptions, DecodedMesh, GeometryBlock, Result, VertexGroup, decode_package};

use crate::cmd::util::{WarningJson, emit_json, open_catalog, signed_hex, warnings_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// 1-based catalog index.
	#[arg(long)]
	pub package: usize,
	/// Include vertex, uv, and face arrays.
	#[arg(long)]
	pub geometry: bool,
	#[arg(long)]
	pub strict_magic: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode one package and print its blocks, vertex groups, and combined totals.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		package,
		geometry,
		strict_magic,
		json,
	} = args;

	let options = DecodeOptions { strict_magic };
	let (file, report) = open_catalog(&path, &options)?;
	let decoded = decode_package(&file, &report.catalog, package, &options)?;
	let combined = decoded.combined();

	if json {
		let payload = DumpJson {
			package: decoded.package.index,
			name: decoded.package.name.as_text().map(str::to_owned),
			meshes: decoded.meshes.iter().map(|mesh| mesh_json(mesh, geometry)).collect(),
			combined: CombinedJson {
				vertex_count: combined.vertices.len(),
				uv_count: combined.uvs.len(),
				face_count: combined.faces.len(),
				faces: geometry.then(|| combined.faces.iter().map(|face| FaceJson { indices: face.indices, mesh: face.mesh }).collect()),
			},
			warnings: warnings_json(&decoded.warnings),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("package: {} {}", decoded.package.index, decoded.package.name);
	for mesh in &decoded.meshes {
		println!(
			"mesh {}: start {} end {} vtx_total {}",
			mesh.entry.ordinal,
			signed_hex(mesh.entry.start),
			signed_hex(mesh.entry.end),
			mesh.entry.vertex_total
		);
		for block in mesh.geometry.blocks() {
			println!("  {}", block_line(&block));
		}
		for group in &mesh.groups {
			println!(
				"  group {}{}: vertices {} uvs {} faces {} active {}",
				group.channel.as_str(),
				group.ordinal,
				group.vertices.len(),
				group.uvs.len(),
				group.faces.len(),
				group.active_faces().count()
			);
			if geometry {
				print_group_geometry(group);
			}
		}
	}
	println!(
		"combined: vertices {} uvs {} faces {}",
		combined.vertices.len(),
		combined.uvs.len(),
		combined.faces.len()
	);
	for warning in &decoded.warnings {
		println!("warning: {warning}");
	}

	Ok(())
}

fn block_line(block: &GeometryBlock<'_>) -> String {
	let mut line = format!(
		"{} {} @0x{:04X} count {}",
		block.channel().as_str(),
		block.kind().as_str(),
		block.offset(),
		block.requested()
	);
	if block.is_truncated() {
		line.push_str(&format!(" (decoded {})", block.decoded()));
	}
	line
}

fn print_group_geometry(group: &VertexGroup) {
	for (i, vertex) in group.vertices.iter().enumerate() {
		let uv = group.uvs.get(i).copied().unwrap_or([0, 0]);
		println!("    v{i}: {} {} {} | uv {} {}", vertex[0], vertex[1], vertex[2], uv[0], uv[1]);
	}
	for face in &group.faces {
		let state = if face.active { "on" } else { "off" };
		println!("    f: {} {} {} {state}", face.indices[0], face.indices[1], face.indices[2]);
	}
}

fn mesh_json(mesh: &DecodedMesh, geometry: bool) -> MeshJson {
	MeshJson {
		ordinal: mesh.entry.ordinal,
		start: signed_hex(mesh.entry.start),
		end: signed_hex(mesh.entry.end),
		vertex_total: mesh.entry.vertex_total,
		blocks: mesh
			.geometry
			.blocks()
			.iter()
			.map(|block| BlockJson {
				channel: block.channel().as_str(),
				kind: block.kind().as_str(),
				offset: block.offset(),
				requested: block.requested(),
				decoded: block.decoded(),
			})
			.collect(),
		groups: mesh
			.groups
			.iter()
			.map(|group| GroupJson {
				channel: group.channel.as_str(),
				ordinal: group.ordinal,
				vertex_count: group.vertices.len(),
				uv_count: group.uvs.len(),
				face_count: group.faces.len(),
				active_face_count: group.active_faces().count(),
				vertices: geometry.then(|| group.vertices.clone()),
				uvs: geometry.then(|| group.uvs.clone()),
				faces: geometry.then(|| {
					group
						.faces
						.iter()
						.map(|face| GroupFaceJson {
							indices: face.indices,
							active: face.active,
						})
						.collect()
				}),
			})
			.collect(),
	}
}

#[derive(serde::Serialize)]
struct BlockJson {
	channel: &'static str,
	kind: &'static str,
	offset: usize,
	requested: usize,
	decoded: usize,
}

#[derive(serde::Serialize)]
struct GroupFaceJson {
	indices: [u32; 3],
	active: bool,
}

#[derive(serde::Serialize)]
struct GroupJson {
	channel: &'static str,
	ordinal: usize,
	vertex_count: usize,
	uv_count: usize,
	face_count: usize,
	active_face_count: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	vertices: Option<Vec<[i16; 3]>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	uvs: Option<Vec<[i16; 2]>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	faces: Option<Vec<GroupFaceJson>>,
}

#[derive(serde::Serialize)]
struct MeshJson {
	ordinal: usize,
	start: String,
	end: String,
	vertex_total: u16,
	blocks: Vec<BlockJson>,
	groups: Vec<GroupJson>,
}

#[derive(serde::Serialize)]
struct FaceJson {
	indices: [u32; 3],
	mesh: usize,
}

#[derive(serde::Serialize)]
struct CombinedJson {
	vertex_count: usize,
	uv_count: usize,
	face_count: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	faces: Option<Vec<FaceJson>>,
}

#[derive(serde::Serialize)]
struct DumpJson {
	package: usize,
	name: Option<String>,
	meshes: Vec<MeshJson>,
	combined: CombinedJson,
	warnings: Vec<WarningJson>,
}
