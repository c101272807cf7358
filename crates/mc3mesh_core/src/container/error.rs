use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Errors produced while reading and traversing a mesh container.
#[derive(Debug, Error)]
pub enum ContainerError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("truncated read at offset 0x{at:08X}, need {need} bytes, remaining {rem}")]
	TruncatedRead {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// A relocated pointer landed before the start of the file.
	#[error("negative address for {field}: {addr}")]
	NegativeAddress {
		/// Logical field the address was derived from.
		field: &'static str,
		/// Relocated signed address.
		addr: i64,
	},
	/// A relocated pointer does not fit the platform address width.
	#[error("address out of range for {field}: {addr}")]
	AddressOutOfRange {
		/// Logical field the address was derived from.
		field: &'static str,
		/// Relocated signed address.
		addr: i64,
	},
	/// Magic bytes did not match while strict checking was requested.
	#[error("{structure} magic mismatch at 0x{at:08X}: expected {expected:02X?}, found {found:02X?}")]
	FormatMismatch {
		/// Structure whose magic was checked.
		structure: &'static str,
		/// File offset of the magic.
		at: usize,
		/// Expected byte sequence.
		expected: [u8; 4],
		/// Bytes actually present.
		found: [u8; 4],
	},
	/// Package selection index was outside the catalog.
	#[error("invalid package selection {index} (catalog holds {count} entries)")]
	InvalidSelection {
		/// Requested 1-based index.
		index: usize,
		/// Number of catalog entries.
		count: usize,
	},
	/// Selected catalog entry has no usable address.
	#[error("package {index} has no resolvable address")]
	UnresolvedPackage {
		/// 1-based catalog index.
		index: usize,
	},
}
