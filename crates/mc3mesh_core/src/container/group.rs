use crate::container::reloc::file_offset;
use crate::container::{ContainerFile, Diagnostics, Result, Warning};

/// Magic expected at the start of a group header.
pub const GROUP_MAGIC: [u8; 4] = [0x98, 0x0F, 0x7A, 0x00];

/// Byte distance between consecutive member pointer slots.
pub const MEMBER_STRIDE: usize = 8;

/// Group header of one selected package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
	/// File offset of the group header.
	pub address: usize,
	/// Whether the group magic matched.
	pub verified: bool,
	/// Number of member pointer slots.
	pub member_count: u8,
	/// Relocated address of the member pointer list.
	pub member_list: i64,
}

/// Resolved pointer to one mesh entry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMember {
	/// 1-based member slot.
	pub slot: usize,
	/// File offset of the mesh entry record.
	pub address: usize,
}

/// Read the group header at `address`.
pub fn expand_group(file: &ContainerFile, address: usize, diag: &mut Diagnostics) -> Result<Group> {
	let verified = diag.verify(file.read_magic_at(address, GROUP_MAGIC, "group")?)?;
	let member_count = file.read_u8_at(address + 0x08)?;
	let member_list = file.read_ptr_at(address + 0x10)?;

	Ok(Group {
		address,
		verified,
		member_count,
		member_list,
	})
}

/// Resolve each member pointer slot of `group`.
///
/// Slots that are negative or unreadable are skipped with a warning.
pub fn enumerate_members(file: &ContainerFile, group: &Group, diag: &mut Diagnostics) -> Vec<GroupMember> {
	let mut members = Vec::with_capacity(usize::from(group.member_count));

	for i in 0..usize::from(group.member_count) {
		let slot = i + 1;
		let resolved = file_offset(group.member_list + (i * MEMBER_STRIDE) as i64, "group member slot")
			.and_then(|at| file.read_file_ptr_at(at, "group member"));

		match resolved {
			Ok(address) => members.push(GroupMember { slot, address }),
			Err(err) => diag.skip(&err, |reason| Warning::MemberSkipped { slot, reason }),
		}
	}

	members
}
