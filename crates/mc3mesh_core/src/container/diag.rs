use std::fmt;

use crate::container::{BlockKind, Channel, ContainerError, Result};

/// Result of comparing four bytes at a known offset against an expected magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicCheck {
	/// Structure whose magic was checked.
	pub structure: &'static str,
	/// File offset of the magic.
	pub at: usize,
	/// Expected byte sequence.
	pub expected: [u8; 4],
	/// Bytes actually present.
	pub found: [u8; 4],
}

impl MagicCheck {
	/// Return whether the found bytes equal the expected magic.
	pub fn matches(&self) -> bool {
		self.found == self.expected
	}
}

/// Soft failure recorded while decoding continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
	/// A magic check failed; the address was used as given.
	MagicMismatch(MagicCheck),
	/// A catalog entry's package pointer could not be resolved.
	PackageAddressSkipped {
		/// 1-based catalog index.
		index: usize,
		/// Rendered underlying error.
		reason: String,
	},
	/// A catalog entry's name could not be resolved.
	PackageNameSkipped {
		/// 1-based catalog index.
		index: usize,
		/// Rendered underlying error.
		reason: String,
	},
	/// A group member pointer slot was skipped.
	MemberSkipped {
		/// 1-based member slot.
		slot: usize,
		/// Rendered underlying error.
		reason: String,
	},
	/// A mesh entry record could not be read.
	MeshEntrySkipped {
		/// 1-based member ordinal the record belongs to.
		member: usize,
		/// File offset of the record.
		address: usize,
		/// Rendered underlying error.
		reason: String,
	},
	/// A mesh entry's byte region starts outside the file.
	MeshRegionUnreadable {
		/// 1-based mesh ordinal.
		mesh: usize,
		/// Rendered underlying error.
		reason: String,
	},
	/// A mesh entry's byte region ends past the file and was shortened.
	MeshRegionClamped {
		/// 1-based mesh ordinal.
		mesh: usize,
		/// Declared exclusive end.
		declared_end: i64,
		/// End actually scanned.
		available_end: usize,
	},
	/// A geometry block declared more units than its region holds.
	BlockTruncated {
		/// 1-based mesh ordinal.
		mesh: usize,
		/// Geometry channel of the block.
		channel: Channel,
		/// Block family.
		kind: BlockKind,
		/// Tag offset inside the mesh region.
		offset: usize,
		/// Units announced by the block's count byte.
		declared: usize,
		/// Units decoded before the region ended.
		decoded: usize,
	},
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MagicMismatch(check) => write!(
				f,
				"{} magic mismatch at 0x{:08X}: expected {:02X?}, found {:02X?}",
				check.structure, check.at, check.expected, check.found
			),
			Self::PackageAddressSkipped { index, reason } => write!(f, "package {index}: address skipped ({reason})"),
			Self::PackageNameSkipped { index, reason } => write!(f, "package {index}: name skipped ({reason})"),
			Self::MemberSkipped { slot, reason } => write!(f, "group member {slot} skipped ({reason})"),
			Self::MeshEntrySkipped { member, address, reason } => {
				write!(f, "mesh entry for member {member} at 0x{address:08X} skipped ({reason})")
			}
			Self::MeshRegionUnreadable { mesh, reason } => write!(f, "mesh {mesh}: region unreadable ({reason})"),
			Self::MeshRegionClamped {
				mesh,
				declared_end,
				available_end,
			} => write!(f, "mesh {mesh}: region end 0x{declared_end:08X} clamped to 0x{available_end:08X}"),
			Self::BlockTruncated {
				mesh,
				channel,
				kind,
				offset,
				declared,
				decoded,
			} => write!(
				f,
				"mesh {mesh}: {} {} block at +0x{offset:X} truncated ({decoded} of {declared})",
				kind.as_str(),
				channel.as_str()
			),
		}
	}
}

/// Collector for soft failures, mirrored to the `tracing` warning level.
#[derive(Debug, Default)]
pub struct Diagnostics {
	strict_magic: bool,
	warnings: Vec<Warning>,
}

impl Diagnostics {
	/// Create an empty collector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a collector that turns magic mismatches into errors.
	pub fn strict() -> Self {
		Self {
			strict_magic: true,
			warnings: Vec::new(),
		}
	}

	/// Record a warning and log it.
	pub fn push(&mut self, warning: Warning) {
		tracing::warn!("{warning}");
		self.warnings.push(warning);
	}

	/// Record a skipped item with its error rendered as the reason.
	pub(crate) fn skip(&mut self, err: &ContainerError, make: impl FnOnce(String) -> Warning) {
		self.push(make(err.to_string()));
	}

	/// Evaluate a magic check, returning the verified flag.
	///
	/// Mismatches are warnings unless the collector is strict.
	pub fn verify(&mut self, check: MagicCheck) -> Result<bool> {
		if check.matches() {
			return Ok(true);
		}
		if self.strict_magic {
			return Err(ContainerError::FormatMismatch {
				structure: check.structure,
				at: check.at,
				expected: check.expected,
				found: check.found,
			});
		}
		self.push(Warning::MagicMismatch(check));
		Ok(false)
	}

	/// Recorded warnings in order.
	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}

	/// Consume the collector and return its warnings.
	pub fn into_warnings(self) -> Vec<Warning> {
		self.warnings
	}
}
