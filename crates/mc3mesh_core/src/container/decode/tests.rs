use mc3mesh_testkit::{ContainerBuilder, MeshSpec, sample_container};

use crate::container::{
	Channel, CombinedFace, ContainerError, ContainerFile, DecodeOptions, PackageName, Warning, decode_package, read_catalog,
};

fn open_sample() -> ContainerFile {
	ContainerFile::from_bytes(sample_container().bytes).expect("container opens")
}

#[test]
fn catalog_report_carries_relocation_and_entries() {
	let file = open_sample();
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");

	assert_eq!(report.relocation.offset(), 0x0040_0000);
	assert_eq!(report.directory.package_count, 2);
	assert_eq!(report.catalog.len(), 2);
	assert!(report.warnings.is_empty());
}

#[test]
fn decodes_both_channels_of_selected_package() {
	let file = open_sample();
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");
	let package = decode_package(&file, &report.catalog, 1, &DecodeOptions::default()).expect("package decodes");

	assert_eq!(package.package.name, PackageName::Text("car_body".to_owned()));
	assert!(package.group.verified);
	assert_eq!(package.members.len(), 2);
	assert_eq!(package.meshes.len(), 2);
	assert!(package.warnings.is_empty());

	let first = &package.meshes[0];
	assert_eq!(first.entry.vertex_total, 12);
	assert_eq!(first.geometry.a.vertex_blocks.len(), 2);
	assert_eq!(first.geometry.a.uv_blocks.len(), 1);
	assert_eq!(first.geometry.a.flag_blocks.len(), 1);
	assert_eq!(first.geometry.b.vertex_blocks.len(), 1);
	assert_eq!(first.geometry.b.uv_blocks[0].kind, 0x66);

	let summary: Vec<_> = first
		.groups
		.iter()
		.map(|group| (group.channel, group.ordinal, group.vertices.len(), group.faces.iter().map(|face| face.active).collect::<Vec<_>>()))
		.collect();
	assert_eq!(
		summary,
		vec![
			(Channel::A, 1, 4, vec![true, false]),
			(Channel::A, 2, 3, vec![true]),
			(Channel::B, 1, 5, vec![true, true, false]),
		]
	);
	assert_eq!(first.groups[1].vertices, vec![[1, 2, 3], [-1, -2, -3], [100, 200, 300]]);
	assert_eq!(first.groups[0].uvs, vec![[0, 0], [256, 0], [0, 256], [256, 256]]);
	assert_eq!(first.groups[2].uvs, vec![[0, 0]; 5]);

	let second = &package.meshes[1];
	assert_eq!(second.groups.len(), 1);
	assert_eq!(second.geometry.a.flag_blocks[0].raw_count, 2);
	assert!(second.groups[0].faces[0].active);
}

#[test]
fn combined_mesh_keeps_active_faces_with_global_indices() {
	let file = open_sample();
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");
	let combined = decode_package(&file, &report.catalog, 1, &DecodeOptions::default())
		.expect("package decodes")
		.combined();

	assert_eq!(combined.vertices.len(), 15);
	assert_eq!(combined.uvs.len(), 15);
	assert_eq!(
		combined.faces,
		vec![
			CombinedFace { indices: [0, 1, 2], mesh: 1 },
			CombinedFace { indices: [4, 5, 6], mesh: 1 },
			CombinedFace { indices: [7, 8, 9], mesh: 1 },
			CombinedFace { indices: [8, 9, 10], mesh: 1 },
			CombinedFace { indices: [12, 13, 14], mesh: 2 },
		]
	);
}

#[test]
fn short_uv_list_is_padded_and_even_flags_enable() {
	let file = open_sample();
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");
	let package = decode_package(&file, &report.catalog, 2, &DecodeOptions::default()).expect("package decodes");

	let group = &package.meshes[0].groups[0];
	assert_eq!(group.uvs, vec![[16, 16], [32, 16], [0, 0], [0, 0]]);
	assert!(group.faces.iter().all(|face| face.active));
}

#[test]
fn out_of_range_selection_is_rejected() {
	let file = open_sample();
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");

	for selection in [0, 3] {
		let err = decode_package(&file, &report.catalog, selection, &DecodeOptions::default()).expect_err("out of range");
		assert!(matches!(err, ContainerError::InvalidSelection { count: 2, .. }));
	}
}

#[test]
fn selecting_unresolved_package_fails() {
	let mut built = sample_container();
	let slot = built.layout.package_mesh_list;
	built.patch_ptr(slot, -8);
	let file = ContainerFile::from_bytes(built.bytes).expect("container opens");
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");

	let err = decode_package(&file, &report.catalog, 1, &DecodeOptions::default()).expect_err("no address");
	assert!(matches!(err, ContainerError::UnresolvedPackage { index: 1 }));
	decode_package(&file, &report.catalog, 2, &DecodeOptions::default()).expect("sibling still decodes");
}

#[test]
fn empty_mesh_entry_decodes_to_empty_geometry() {
	let built = ContainerBuilder::new().package("blank", [MeshSpec::default()]).build();
	let file = ContainerFile::from_bytes(built.bytes).expect("container opens");
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");
	let package = decode_package(&file, &report.catalog, 1, &DecodeOptions::default()).expect("package decodes");

	assert_eq!(package.meshes.len(), 1);
	assert!(package.meshes[0].geometry.is_empty());
	assert!(package.meshes[0].groups.is_empty());
	assert!(package.combined().is_empty());
	assert!(package.warnings.is_empty());
}

#[test]
fn strict_options_fail_on_group_magic() {
	let mut built = sample_container();
	let group = built.layout.packages[0].group;
	built.patch(group, &[0; 4]);
	let file = ContainerFile::from_bytes(built.bytes).expect("container opens");
	let strict = DecodeOptions { strict_magic: true };
	let report = read_catalog(&file, &strict).expect("directory magic is intact");

	let err = decode_package(&file, &report.catalog, 1, &strict).expect_err("strict");
	assert!(matches!(err, ContainerError::FormatMismatch { structure: "group", .. }));

	let lenient = decode_package(&file, &report.catalog, 1, &DecodeOptions::default()).expect("lenient");
	assert!(!lenient.group.verified);
	assert!(matches!(lenient.warnings.as_slice(), [Warning::MagicMismatch(_)]));
	assert_eq!(lenient.meshes.len(), 2);
}

#[test]
fn decoding_is_repeatable() {
	let file = open_sample();
	let options = DecodeOptions::default();

	let first_report = read_catalog(&file, &options).expect("catalog reads");
	let second_report = read_catalog(&file, &options).expect("catalog reads");
	assert_eq!(first_report, second_report);

	let first = decode_package(&file, &first_report.catalog, 1, &options).expect("decodes");
	let second = decode_package(&file, &second_report.catalog, 1, &options).expect("decodes");
	assert_eq!(first, second);
	assert_eq!(first.combined(), second.combined());
}
