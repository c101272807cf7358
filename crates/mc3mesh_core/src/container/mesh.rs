use crate::container::reloc::file_offset;
use crate::container::{ContainerError, ContainerFile, Diagnostics, GroupMember, Result, Warning};

/// Multiplier applied to the stored mesh size field.
pub const MESH_SIZE_UNIT: u32 = 0x10;

/// Mesh entry record: the extent of one raw geometry stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshEntry {
	/// 1-based position among the entries read for a group.
	pub ordinal: usize,
	/// Member slot the record was reached through.
	pub member: usize,
	/// File offset of the record.
	pub address: usize,
	/// Relocated start of the geometry stream.
	pub start: i64,
	/// Stream length in bytes.
	pub size_bytes: u32,
	/// Vertex total stored in the record.
	pub vertex_total: u16,
	/// Exclusive end of the geometry stream.
	pub end: i64,
}

impl MeshEntry {
	/// Return whether the entry describes no bytes.
	pub fn is_empty(&self) -> bool {
		self.end <= self.start
	}
}

fn read_record(file: &ContainerFile, member: GroupMember) -> Result<(i64, u32, u16)> {
	let mut cursor = file.cursor_at(member.address);
	let start = file.relocation().apply(cursor.read_u32_le()?);
	let size_bytes = u32::from(cursor.read_u16_le()?) * MESH_SIZE_UNIT;
	let vertex_total = cursor.read_u16_le()?;
	Ok((start, size_bytes, vertex_total))
}

/// Read the mesh entry record of every member.
///
/// A short record skips only that member.
pub fn read_mesh_entries(file: &ContainerFile, members: &[GroupMember], diag: &mut Diagnostics) -> Vec<MeshEntry> {
	let mut entries = Vec::with_capacity(members.len());

	for member in members {
		match read_record(file, *member) {
			Ok((start, size_bytes, vertex_total)) => entries.push(MeshEntry {
				ordinal: entries.len() + 1,
				member: member.slot,
				address: member.address,
				start,
				size_bytes,
				vertex_total,
				end: start + i64::from(size_bytes),
			}),
			Err(err) => diag.skip(&err, |reason| Warning::MeshEntrySkipped {
				member: member.slot,
				address: member.address,
				reason,
			}),
		}
	}

	entries
}

/// Borrow the geometry stream bytes of `entry`.
///
/// Empty entries give an empty slice. A stream that starts outside the file
/// is reported and treated as empty; one that runs past the end is shortened.
pub fn mesh_region<'a>(file: &'a ContainerFile, entry: &MeshEntry, diag: &mut Diagnostics) -> &'a [u8] {
	if entry.is_empty() {
		return &[];
	}

	let start = match file_offset(entry.start, "mesh start") {
		Ok(start) if start < file.len() => start,
		Ok(start) => {
			let err = ContainerError::TruncatedRead {
				at: start,
				need: entry.size_bytes as usize,
				rem: 0,
			};
			diag.skip(&err, |reason| Warning::MeshRegionUnreadable { mesh: entry.ordinal, reason });
			return &[];
		}
		Err(err) => {
			diag.skip(&err, |reason| Warning::MeshRegionUnreadable { mesh: entry.ordinal, reason });
			return &[];
		}
	};

	let end = start + entry.size_bytes as usize;
	if end > file.len() {
		diag.push(Warning::MeshRegionClamped {
			mesh: entry.ordinal,
			declared_end: entry.end,
			available_end: file.len(),
		});
	}
	file.region(start, end)
}
