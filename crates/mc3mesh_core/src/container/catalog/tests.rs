use mc3mesh_testkit::{ContainerBuilder, sample_container};

use crate::container::{
	Catalog, ContainerError, ContainerFile, Diagnostics, PackageEntry, PackageName, Warning, decode_name, resolve_catalog, walk_directory,
};

fn catalog_of(bytes: Vec<u8>) -> (Catalog, Vec<Warning>) {
	let file = ContainerFile::from_bytes(bytes).expect("container opens");
	let mut diag = Diagnostics::new();
	let directory = walk_directory(&file, &mut diag).expect("directory resolves");
	let catalog = resolve_catalog(&file, &directory, &mut diag);
	(catalog, diag.into_warnings())
}

#[test]
fn pairs_addresses_with_names_in_order() {
	let built = sample_container();
	let (catalog, warnings) = catalog_of(built.bytes.clone());

	assert!(warnings.is_empty());
	assert_eq!(
		catalog.entries(),
		&[
			PackageEntry {
				index: 1,
				address: Some(built.layout.packages[0].group),
				name: PackageName::Text("car_body".to_owned()),
			},
			PackageEntry {
				index: 2,
				address: Some(built.layout.packages[1].group),
				name: PackageName::Text("wheel".to_owned()),
			},
		]
	);
}

#[test]
fn names_stop_at_cd_and_replace_non_printable_bytes() {
	let built = ContainerBuilder::new()
		.package_raw_name(b"ab\x01c\xCDtail\0".to_vec(), Vec::<Vec<u8>>::new())
		.package_raw_name(b"hood\xE9\0".to_vec(), Vec::<Vec<u8>>::new())
		.build();
	let (catalog, _) = catalog_of(built.bytes);

	assert_eq!(catalog.entries()[0].name, PackageName::Text("ab?c".to_owned()));
	assert_eq!(catalog.entries()[1].name, PackageName::Text("hood?".to_owned()));
}

#[test]
fn negative_name_pointer_gives_sentinel_without_aborting() {
	let mut built = sample_container();
	let slot = built.layout.package_name_list;
	built.patch_ptr(slot, -4);
	let (catalog, warnings) = catalog_of(built.bytes.clone());

	assert_eq!(catalog.len(), 2);
	assert_eq!(catalog.entries()[0].name, PackageName::InvalidPointer);
	assert_eq!(catalog.entries()[0].name.to_string(), "<invalid pointer>");
	assert_eq!(catalog.entries()[0].address, Some(built.layout.packages[0].group));
	assert_eq!(catalog.entries()[1].name.as_text(), Some("wheel"));
	assert!(matches!(warnings.as_slice(), [Warning::PackageNameSkipped { index: 1, .. }]));
}

#[test]
fn negative_package_pointer_leaves_address_empty() {
	let mut built = sample_container();
	let slot = built.layout.package_mesh_list + 4;
	built.patch_ptr(slot, -0x10);
	let (catalog, warnings) = catalog_of(built.bytes);

	assert_eq!(catalog.entries()[1].address, None);
	assert_eq!(catalog.entries()[1].name.as_text(), Some("wheel"));
	assert!(matches!(warnings.as_slice(), [Warning::PackageAddressSkipped { index: 2, .. }]));
}

#[test]
fn selection_is_one_based_and_bounded() {
	let (catalog, _) = catalog_of(sample_container().bytes);

	assert_eq!(catalog.select(1).expect("first").name.as_text(), Some("car_body"));
	assert_eq!(catalog.select(2).expect("second").index, 2);
	assert!(matches!(catalog.select(0), Err(ContainerError::InvalidSelection { index: 0, count: 2 })));
	assert!(matches!(catalog.select(3), Err(ContainerError::InvalidSelection { index: 3, count: 2 })));
}

#[test]
fn decode_name_keeps_printable_ascii() {
	assert_eq!(decode_name(b"Car 01_body-LOD"), "Car 01_body-LOD");
	assert_eq!(decode_name(&[0x7F, b'a', 0x80]), "?a?");
}
