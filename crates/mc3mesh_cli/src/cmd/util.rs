use std::path::Path;

use mc3mesh::container::{CatalogReport, ContainerFile, DecodeOptions, Result, Warning, read_catalog};

/// Open a container and read its catalog.
pub(crate) fn open_catalog(path: &Path, options: &DecodeOptions) -> Result<(ContainerFile, CatalogReport)> {
	let file = ContainerFile::open(path)?;
	let report = read_catalog(&file, options)?;
	tracing::debug!(
		path = %path.display(),
		len = file.len(),
		packages = report.catalog.len(),
		"container opened"
	);
	Ok((file, report))
}

/// Render a file offset as zero-padded hex.
pub(crate) fn addr_hex(addr: usize) -> String {
	format!("0x{addr:08X}")
}

/// Render a signed relocated address as hex, keeping the sign.
pub(crate) fn signed_hex(addr: i64) -> String {
	if addr < 0 {
		format!("-0x{:08X}", addr.unsigned_abs())
	} else {
		format!("0x{addr:08X}")
	}
}

/// Render magic bytes as spaced hex pairs.
pub(crate) fn magic_hex(bytes: [u8; 4]) -> String {
	bytes.iter().map(|byte| format!("{byte:02X}")).collect::<Vec<_>>().join(" ")
}

/// Stable label for a warning variant.
pub(crate) fn warning_kind(warning: &Warning) -> &'static str {
	match warning {
		Warning::MagicMismatch(_) => "magic_mismatch",
		Warning::PackageAddressSkipped { .. } => "package_address_skipped",
		Warning::PackageNameSkipped { .. } => "package_name_skipped",
		Warning::MemberSkipped { .. } => "member_skipped",
		Warning::MeshEntrySkipped { .. } => "mesh_entry_skipped",
		Warning::MeshRegionUnreadable { .. } => "mesh_region_unreadable",
		Warning::MeshRegionClamped { .. } => "mesh_region_clamped",
		Warning::BlockTruncated { .. } => "block_truncated",
	}
}

#[derive(serde::Serialize)]
pub(crate) struct WarningJson {
	kind: &'static str,
	message: String,
}

/// Convert warnings into JSON rows.
pub(crate) fn warnings_json(warnings: &[Warning]) -> Vec<WarningJson> {
	warnings
		.iter()
		.map(|warning| WarningJson {
			kind: warning_kind(warning),
			message: warning.to_string(),
		})
		.collect()
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

#[cfg(test)]
mod tests {
	use super::{addr_hex, magic_hex, signed_hex};

	#[test]
	fn hex_helpers_render_fixed_width() {
		assert_eq!(addr_hex(0x1A8), "0x000001A8");
		assert_eq!(signed_hex(0x20), "0x00000020");
		assert_eq!(signed_hex(-0x20), "-0x00000020");
		assert_eq!(magic_hex([0x20, 0x94, 0x7A, 0x00]), "20 94 7A 00");
	}
}
