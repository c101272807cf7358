#![allow(missing_docs)]

use mc3mesh::container::{ContainerError, ContainerFile, DecodeOptions, PackageName, Warning, decode_package, read_catalog};
use mc3mesh_testkit::{ContainerBuilder, DEFAULT_LOAD_ADDRESS, FLAG_TAG_A, VERTEX_TAG_A, flag_block, sample_container, vertex_block, write_fixture};

#[test]
fn open_from_disk_and_decode_every_package() {
	let built = sample_container();
	let path = write_fixture("integration_sample.mc3", &built.bytes);

	let file = ContainerFile::open(&path).expect("fixture opens");
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");
	let names: Vec<_> = report.catalog.entries().iter().map(|entry| entry.name.to_string()).collect();
	assert_eq!(names, vec!["car_body", "wheel"]);

	for entry in report.catalog.entries() {
		let package = decode_package(&file, &report.catalog, entry.index, &DecodeOptions::default()).expect("package decodes");
		assert!(!package.combined().is_empty(), "package {} should produce faces", entry.index);
	}
}

#[test]
fn missing_file_is_an_io_error() {
	let err = ContainerFile::open("/nonexistent/mc3mesh/container.bin").expect_err("missing file");
	assert!(matches!(err, ContainerError::Io(_)));
}

#[test]
fn relocation_follows_load_address() {
	for load_address in [0x80_u32, 0x1000_0080, DEFAULT_LOAD_ADDRESS] {
		let built = ContainerBuilder::new()
			.load_address(load_address)
			.package("solo", [vertex_block(VERTEX_TAG_A, &[[0, 0, 0], [1, 0, 0], [0, 1, 0]])])
			.build();
		let file = ContainerFile::from_bytes(built.bytes).expect("container opens");
		let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");

		assert_eq!(report.relocation.offset(), i64::from(load_address) - 0x80);
		assert_eq!(report.catalog.entries()[0].name, PackageName::Text("solo".to_owned()));
		let package = decode_package(&file, &report.catalog, 1, &DecodeOptions::default()).expect("decodes");
		assert_eq!(package.meshes[0].groups[0].faces.len(), 1);
	}
}

#[test]
fn corrupt_member_does_not_hide_siblings() {
	let mut mesh = vertex_block(VERTEX_TAG_A, &[[0, 0, 0], [2, 0, 0], [0, 2, 0], [2, 2, 0]]);
	mesh.extend(flag_block(FLAG_TAG_A, &[0x01, 0x00]));

	let mut built = ContainerBuilder::new().package("pair", [mesh.clone(), mesh]).build();
	let member_list = built.layout.packages[0].member_list;
	let len = built.bytes.len() as i64;
	built.patch_ptr(member_list, len + 0x100);

	let file = ContainerFile::from_bytes(built.bytes).expect("container opens");
	let report = read_catalog(&file, &DecodeOptions::default()).expect("catalog reads");
	let package = decode_package(&file, &report.catalog, 1, &DecodeOptions::default()).expect("decodes");

	assert_eq!(package.members.len(), 2);
	assert_eq!(package.meshes.len(), 1);
	assert_eq!(package.meshes[0].entry.member, 2);
	assert!(matches!(package.warnings.as_slice(), [Warning::MeshEntrySkipped { member: 1, .. }]));

	let active: Vec<_> = package.meshes[0].groups[0].faces.iter().map(|face| face.active).collect();
	assert_eq!(active, vec![false, true]);
}
