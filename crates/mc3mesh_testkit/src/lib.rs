//! Shared test helpers for workspace crates.
//!
//! No real game containers ship with the repository, so tests build
//! synthetic ones with [`ContainerBuilder`] and the geometry block helpers.

use std::fs;
use std::path::{Path, PathBuf};

/// File offset referenced by the stored load address word.
pub const LOAD_BASE: u32 = 0x80;
/// Default stored load address used by [`ContainerBuilder::new`].
pub const DEFAULT_LOAD_ADDRESS: u32 = 0x0040_0080;
/// File offset of the stored group-list pointer.
pub const GROUP_LIST_PTR_AT: usize = 0x1A8;
/// Group-list magic.
pub const GROUP_LIST_MAGIC: [u8; 4] = [0x20, 0x94, 0x7A, 0x00];
/// Package-list magic, stored at `package list + 0x04`.
pub const PACKAGE_LIST_MAGIC: [u8; 4] = [0xF0, 0x0E, 0x7A, 0x00];
/// Group header magic.
pub const GROUP_MAGIC: [u8; 4] = [0x98, 0x0F, 0x7A, 0x00];

/// Channel A vertex block tag.
pub const VERTEX_TAG_A: [u8; 2] = [0xEE, 0x00];
/// Channel B vertex block tag.
pub const VERTEX_TAG_B: [u8; 2] = [0x1B, 0x02];
/// Channel A uv block tag.
pub const UV_TAG_A: [u8; 2] = [0xC4, 0x00];
/// Channel B uv block tag.
pub const UV_TAG_B: [u8; 2] = [0xF1, 0x01];
/// Channel A face flag block tag.
pub const FLAG_TAG_A: [u8; 2] = [0x9A, 0x00];
/// Channel B face flag block tag.
pub const FLAG_TAG_B: [u8; 2] = [0xC7, 0x01];

/// Encode a vertex block: tag, count, `0x69`, then `(x, y, z)` as LE `i16`.
pub fn vertex_block(tag: [u8; 2], vertices: &[[i16; 3]]) -> Vec<u8> {
	let mut out = vec![tag[0], tag[1], count_byte(vertices.len()), 0x69];
	for vertex in vertices {
		for axis in vertex {
			out.extend_from_slice(&axis.to_le_bytes());
		}
	}
	out
}

/// Encode an inline uv block (type `0x65`) with `(u, v)` as LE `i16`.
pub fn uv_block(tag: [u8; 2], uvs: &[[i16; 2]]) -> Vec<u8> {
	let mut out = vec![tag[0], tag[1], count_byte(uvs.len()), 0x65];
	for uv in uvs {
		for axis in uv {
			out.extend_from_slice(&axis.to_le_bytes());
		}
	}
	out
}

/// Encode a uv block header of type `0x66`, which carries no decoded payload.
pub fn empty_uv_block(tag: [u8; 2], count: u8) -> Vec<u8> {
	vec![tag[0], tag[1], count, 0x66]
}

/// Encode a face flag block: raw count is `flags.len() + 2`, six filler
/// bytes, then one flag byte per 3-byte unit.
pub fn flag_block(tag: [u8; 2], flags: &[u8]) -> Vec<u8> {
	let mut out = vec![tag[0], tag[1], count_byte(flags.len() + 2), 0x6A];
	out.extend_from_slice(&[0_u8; 6]);
	for flag in flags {
		out.extend_from_slice(&[*flag, 0, 0]);
	}
	out
}

fn count_byte(count: usize) -> u8 {
	u8::try_from(count).expect("block count fits a byte")
}

/// Low-level writer for relocatable container images.
#[derive(Debug, Clone)]
pub struct ImageWriter {
	bytes: Vec<u8>,
	relocation: i64,
}

impl ImageWriter {
	/// Size of the zeroed header area reserved by [`ImageWriter::new`].
	pub const HEADER_LEN: usize = 0x200;

	/// Start an image with the given stored load address and a zeroed header.
	pub fn new(load_address: u32) -> Self {
		let mut bytes = vec![0_u8; Self::HEADER_LEN];
		bytes[0..4].copy_from_slice(&load_address.to_le_bytes());
		Self {
			bytes,
			relocation: i64::from(load_address) - i64::from(LOAD_BASE),
		}
	}

	/// Relocation offset implied by the load address.
	pub fn relocation(&self) -> i64 {
		self.relocation
	}

	/// Current image length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return whether the image is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Reserve `len` zeroed bytes at the next `align` boundary.
	pub fn alloc(&mut self, len: usize, align: usize) -> usize {
		let at = self.bytes.len().next_multiple_of(align.max(1));
		self.bytes.resize(at + len, 0);
		at
	}

	/// Append `data` at the next `align` boundary.
	pub fn append(&mut self, data: &[u8], align: usize) -> usize {
		let at = self.alloc(data.len(), align);
		self.write(at, data);
		at
	}

	/// Overwrite bytes at `at`.
	pub fn write(&mut self, at: usize, data: &[u8]) {
		self.bytes[at..at + data.len()].copy_from_slice(data);
	}

	/// Write one byte.
	pub fn write_u8(&mut self, at: usize, value: u8) {
		self.write(at, &[value]);
	}

	/// Write a little-endian `u16`.
	pub fn write_u16(&mut self, at: usize, value: u16) {
		self.write(at, &value.to_le_bytes());
	}

	/// Write a little-endian `u32`.
	pub fn write_u32(&mut self, at: usize, value: u32) {
		self.write(at, &value.to_le_bytes());
	}

	/// Store a pointer that relocates to file address `target`.
	pub fn write_ptr(&mut self, at: usize, target: i64) {
		self.write_u32(at, stored_ptr(target, self.relocation));
	}

	/// Finish the image.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}
}

fn stored_ptr(target: i64, relocation: i64) -> u32 {
	(target + relocation) as u32
}

/// One mesh entry to place in a synthetic package.
#[derive(Debug, Clone, Default)]
pub struct MeshSpec {
	/// Raw geometry stream; padded with zeros to a multiple of 16 bytes.
	pub data: Vec<u8>,
	/// Value stored in the vertex-total field.
	pub vertex_total: u16,
}

impl From<Vec<u8>> for MeshSpec {
	fn from(data: Vec<u8>) -> Self {
		Self { data, vertex_total: 0 }
	}
}

#[derive(Debug, Clone)]
struct PackageSpec {
	name: Vec<u8>,
	meshes: Vec<MeshSpec>,
}

/// Builder for well-formed synthetic containers.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
	load_address: u32,
	packages: Vec<PackageSpec>,
}

impl Default for ContainerBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ContainerBuilder {
	/// Start a container with [`DEFAULT_LOAD_ADDRESS`].
	pub fn new() -> Self {
		Self {
			load_address: DEFAULT_LOAD_ADDRESS,
			packages: Vec::new(),
		}
	}

	/// Override the stored load address.
	pub fn load_address(mut self, load_address: u32) -> Self {
		self.load_address = load_address;
		self
	}

	/// Add a package with a NUL-terminated name.
	pub fn package<M: Into<MeshSpec>>(self, name: &str, meshes: impl IntoIterator<Item = M>) -> Self {
		let mut raw = name.as_bytes().to_vec();
		raw.push(0);
		self.package_raw_name(raw, meshes)
	}

	/// Add a package whose name bytes (terminator included) are stored verbatim.
	pub fn package_raw_name<M: Into<MeshSpec>>(mut self, name: Vec<u8>, meshes: impl IntoIterator<Item = M>) -> Self {
		self.packages.push(PackageSpec {
			name,
			meshes: meshes.into_iter().map(Into::into).collect(),
		});
		self
	}

	/// Lay out the container image.
	pub fn build(&self) -> BuiltContainer {
		let mut w = ImageWriter::new(self.load_address);
		let count = self.packages.len();

		let group_list = w.alloc(0x20, 16);
		w.write(group_list, &GROUP_LIST_MAGIC);
		w.write_ptr(GROUP_LIST_PTR_AT, group_list as i64);

		let package_list = w.alloc(0x10, 16);
		w.write_u8(package_list + 0x02, u8::try_from(count).expect("package count fits a byte"));
		w.write(package_list + 0x04, &PACKAGE_LIST_MAGIC);
		w.write_ptr(group_list + 0x10, package_list as i64);

		let package_mesh_list = w.alloc(4 * count, 4);
		let package_name_list = w.alloc(4 * count, 4);
		w.write_ptr(package_list + 0x08, package_mesh_list as i64);
		w.write_ptr(package_list + 0x0C, package_name_list as i64);

		let mut packages = Vec::with_capacity(count);
		for (i, package) in self.packages.iter().enumerate() {
			let name = w.append(&package.name, 1);
			w.write_ptr(package_name_list + i * 4, name as i64);

			let group = w.alloc(0x20, 16);
			w.write(group, &GROUP_MAGIC);
			w.write_u8(group + 0x08, u8::try_from(package.meshes.len()).expect("member count fits a byte"));
			w.write_ptr(package_mesh_list + i * 4, group as i64);

			let member_list = w.alloc(8 * package.meshes.len(), 8);
			w.write_ptr(group + 0x10, member_list as i64);

			let mut mesh_records = Vec::with_capacity(package.meshes.len());
			let mut mesh_regions = Vec::with_capacity(package.meshes.len());
			for (j, mesh) in package.meshes.iter().enumerate() {
				let record = w.alloc(8, 8);
				w.write_ptr(member_list + j * 8, record as i64);

				let mut data = mesh.data.clone();
				data.resize(data.len().next_multiple_of(16), 0);
				let start = w.append(&data, 16);
				w.write_ptr(record, start as i64);
				w.write_u16(record + 4, u16::try_from(data.len() / 16).expect("mesh size fits the size field"));
				w.write_u16(record + 6, mesh.vertex_total);

				mesh_records.push(record);
				mesh_regions.push((start, start + data.len()));
			}

			packages.push(PackageLayout {
				group,
				name,
				member_list,
				mesh_records,
				mesh_regions,
			});
		}

		BuiltContainer {
			relocation: w.relocation(),
			bytes: w.into_bytes(),
			layout: Layout {
				group_list,
				package_list,
				package_mesh_list,
				package_name_list,
				packages,
			},
		}
	}
}

/// File offsets of the structures placed by [`ContainerBuilder::build`].
#[derive(Debug, Clone)]
pub struct Layout {
	/// Group list.
	pub group_list: usize,
	/// Package list.
	pub package_list: usize,
	/// Package index table.
	pub package_mesh_list: usize,
	/// Package name-pointer table.
	pub package_name_list: usize,
	/// Per-package structures in catalog order.
	pub packages: Vec<PackageLayout>,
}

/// File offsets of one synthetic package.
#[derive(Debug, Clone)]
pub struct PackageLayout {
	/// Group header.
	pub group: usize,
	/// Name string.
	pub name: usize,
	/// Member pointer list.
	pub member_list: usize,
	/// Mesh entry records in member order.
	pub mesh_records: Vec<usize>,
	/// Padded `[start, end)` mesh data regions in member order.
	pub mesh_regions: Vec<(usize, usize)>,
}

/// Synthetic container image plus its layout.
#[derive(Debug, Clone)]
pub struct BuiltContainer {
	/// Image bytes.
	pub bytes: Vec<u8>,
	/// Relocation offset used for stored pointers.
	pub relocation: i64,
	/// Structure offsets.
	pub layout: Layout,
}

impl BuiltContainer {
	/// Overwrite bytes at `at`.
	pub fn patch(&mut self, at: usize, data: &[u8]) {
		self.bytes[at..at + data.len()].copy_from_slice(data);
	}

	/// Overwrite the pointer stored at `at` so it relocates to `target`.
	pub fn patch_ptr(&mut self, at: usize, target: i64) {
		let stored = stored_ptr(target, self.relocation);
		self.patch(at, &stored.to_le_bytes());
	}
}

/// Two-package container exercising both geometry channels.
///
/// Package 1 `car_body` has two meshes:
/// - mesh 1, channel A: a 4-vertex group with 4 uvs and flags `[0, 1]`,
///   then a 3-vertex group with no uv or flag block; channel B: a 5-vertex
///   group with a `0x66` uv block and flags `[0, 0, 1]`.
/// - mesh 2, channel A: a 3-vertex group with an empty flag block.
///
/// Package 2 `wheel` has one mesh with a 4-vertex channel A group, 2 uvs
/// and flags `[2, 4]`.
pub fn sample_container() -> BuiltContainer {
	let mut mesh1 = Vec::new();
	mesh1.extend(vertex_block(VERTEX_TAG_A, &[[0, 0, 0], [10, 0, 0], [0, 10, 0], [10, 10, 0]]));
	mesh1.extend(uv_block(UV_TAG_A, &[[0, 0], [256, 0], [0, 256], [256, 256]]));
	mesh1.extend(flag_block(FLAG_TAG_A, &[0x00, 0x01]));
	mesh1.extend(vertex_block(VERTEX_TAG_A, &[[1, 2, 3], [-1, -2, -3], [100, 200, 300]]));
	mesh1.extend(vertex_block(VERTEX_TAG_B, &[[0, 0, 5], [5, 0, 5], [0, 5, 5], [5, 5, 5], [10, 5, 5]]));
	mesh1.extend(empty_uv_block(UV_TAG_B, 5));
	mesh1.extend(flag_block(FLAG_TAG_B, &[0x00, 0x00, 0x01]));

	let mut mesh2 = Vec::new();
	mesh2.extend(vertex_block(VERTEX_TAG_A, &[[7, 7, 7], [8, 7, 7], [7, 8, 7]]));
	mesh2.extend(flag_block(FLAG_TAG_A, &[]));

	let mut wheel = Vec::new();
	wheel.extend(vertex_block(VERTEX_TAG_A, &[[-4, -4, 0], [4, -4, 0], [-4, 4, 0], [4, 4, 0]]));
	wheel.extend(uv_block(UV_TAG_A, &[[16, 16], [32, 16]]));
	wheel.extend(flag_block(FLAG_TAG_A, &[0x02, 0x04]));

	ContainerBuilder::new()
		.package(
			"car_body",
			[
				MeshSpec {
					data: mesh1,
					vertex_total: 12,
				},
				MeshSpec {
					data: mesh2,
					vertex_total: 3,
				},
			],
		)
		.package(
			"wheel",
			[MeshSpec {
				data: wheel,
				vertex_total: 4,
			}],
		)
		.build()
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Write container bytes under `<target>/mc3mesh-fixtures/` and return the path.
pub fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("mc3mesh-fixtures");
	fs::create_dir_all(&dir).expect("fixture directory is creatable");
	let path = dir.join(name);
	fs::write(&path, bytes).expect("fixture is writable");
	path
}
