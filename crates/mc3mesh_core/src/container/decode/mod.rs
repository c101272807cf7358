use crate::container::{
	Catalog, CombinedMesh, ContainerError, ContainerFile, Diagnostics, Directory, Group, GroupMember, MeshEntry, MeshGeometry, PackageEntry, Relocation, Result,
	VertexGroup, Warning, assemble_groups, enumerate_members, expand_group, mesh_region, read_mesh_entries, resolve_catalog, scan_geometry,
	walk_directory,
};

/// Decoder behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
	/// Treat magic mismatches as fatal [`ContainerError::FormatMismatch`] errors.
	pub strict_magic: bool,
}

impl DecodeOptions {
	fn diagnostics(&self) -> Diagnostics {
		if self.strict_magic { Diagnostics::strict() } else { Diagnostics::new() }
	}
}

/// Directory and catalog of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
	/// Pointer relocation.
	pub relocation: Relocation,
	/// Top-level pointer chain.
	pub directory: Directory,
	/// Selectable packages.
	pub catalog: Catalog,
	/// Soft failures met while reading the catalog.
	pub warnings: Vec<Warning>,
}

/// Read the directory and package catalog.
pub fn read_catalog(file: &ContainerFile, options: &DecodeOptions) -> Result<CatalogReport> {
	let mut diag = options.diagnostics();
	let directory = walk_directory(file, &mut diag)?;
	let catalog = resolve_catalog(file, &directory, &mut diag);

	Ok(CatalogReport {
		relocation: file.relocation(),
		directory,
		catalog,
		warnings: diag.into_warnings(),
	})
}

/// One mesh entry with its decoded geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMesh {
	/// Mesh entry record.
	pub entry: MeshEntry,
	/// Blocks found in the entry's region.
	pub geometry: MeshGeometry,
	/// Channel A groups followed by channel B groups.
	pub groups: Vec<VertexGroup>,
}

/// Scan and assemble the geometry of one mesh entry.
pub fn decode_mesh(file: &ContainerFile, entry: &MeshEntry, diag: &mut Diagnostics) -> DecodedMesh {
	let region = mesh_region(file, entry, diag);
	let geometry = scan_geometry(region);
	geometry.report_truncation(entry.ordinal, diag);
	let groups = assemble_groups(&geometry);

	tracing::debug!(
		mesh = entry.ordinal,
		region_len = region.len(),
		groups = groups.len(),
		"mesh decoded"
	);

	DecodedMesh {
		entry: *entry,
		geometry,
		groups,
	}
}

/// Everything decoded for one selected package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPackage {
	/// Selected catalog entry.
	pub package: PackageEntry,
	/// Group header.
	pub group: Group,
	/// Resolved member slots.
	pub members: Vec<GroupMember>,
	/// Decoded mesh entries in member order.
	pub meshes: Vec<DecodedMesh>,
	/// Soft failures met while decoding the package.
	pub warnings: Vec<Warning>,
}

impl DecodedPackage {
	/// Merge every group of every mesh into one triangle list of active faces.
	pub fn combined(&self) -> CombinedMesh {
		let mut combined = CombinedMesh::default();
		for mesh in &self.meshes {
			combined.extend_mesh(mesh.entry.ordinal, &mesh.groups);
		}
		combined
	}
}

/// Decode the package at 1-based `selection` of `catalog`.
pub fn decode_package(file: &ContainerFile, catalog: &Catalog, selection: usize, options: &DecodeOptions) -> Result<DecodedPackage> {
	let package = catalog.select(selection)?.clone();
	let address = package.address.ok_or(ContainerError::UnresolvedPackage { index: package.index })?;

	let mut diag = options.diagnostics();
	let group = expand_group(file, address, &mut diag)?;
	let members = enumerate_members(file, &group, &mut diag);
	let entries = read_mesh_entries(file, &members, &mut diag);
	let meshes = entries.iter().map(|entry| decode_mesh(file, entry, &mut diag)).collect();

	tracing::debug!(
		package = package.index,
		name = %package.name,
		members = members.len(),
		meshes = entries.len(),
		"package decoded"
	);

	Ok(DecodedPackage {
		package,
		group,
		members,
		meshes,
		warnings: diag.into_warnings(),
	})
}

#[cfg(test)]
mod tests;
