mod bytes;
mod catalog;
mod combine;
mod decode;
mod diag;
mod directory;
mod error;
mod faces;
mod file;
mod group;
mod mesh;
mod reloc;
mod scan;

/// Bounded byte cursor.
pub use bytes::Cursor;
/// Package catalog types and resolver.
pub use catalog::{Catalog, NAME_PLACEHOLDER, NAME_TERMINATORS, PackageEntry, PackageName, decode_name, resolve_catalog};
/// Package-wide merged geometry.
pub use combine::{CombinedFace, CombinedMesh};
/// Decode session entry points and options.
pub use decode::{CatalogReport, DecodeOptions, DecodedMesh, DecodedPackage, decode_mesh, decode_package, read_catalog};
/// Soft-failure channel.
pub use diag::{Diagnostics, MagicCheck, Warning};
/// Top-level pointer chain.
pub use directory::{Directory, GROUP_LIST_MAGIC, GROUP_LIST_PTR_AT, PACKAGE_LIST_MAGIC, walk_directory};
/// Error and result aliases.
pub use error::{ContainerError, Result};
/// Face synthesis and group assembly.
pub use faces::{Face, VertexGroup, assemble_channel, assemble_groups, synthesize_faces};
/// In-memory container file.
pub use file::ContainerFile;
/// Group header and member enumeration.
pub use group::{GROUP_MAGIC, Group, GroupMember, MEMBER_STRIDE, enumerate_members, expand_group};
/// Mesh entry records and regions.
pub use mesh::{MESH_SIZE_UNIT, MeshEntry, mesh_region, read_mesh_entries};
/// Pointer relocation.
pub use reloc::Relocation;
/// Geometry stream scanner.
pub use scan::{
	BlockKind, Channel, ChannelGeometry, FACE_FLAG_TYPE, FaceFlagBlock, GeometryBlock, MAX_BLOCK_COUNT, MeshGeometry, RawBlock, TagRow, UV_EMPTY, UV_INLINE,
	UvBlock, VERTEX_TYPE, VertexBlock, scan_geometry, scan_row,
};
