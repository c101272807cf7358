use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use mc3mesh_testkit::{sample_container, target_dir as workspace_target_dir, write_fixture as write_shared_fixture};

static MC3MESH_BIN: OnceLock<PathBuf> = OnceLock::new();
static SAMPLE_FIXTURE: OnceLock<String> = OnceLock::new();

/// Path of the shared two-package sample container, written once per test run.
pub(crate) fn sample_fixture() -> String {
	SAMPLE_FIXTURE
		.get_or_init(|| write_fixture("cli_sample.mc3", &sample_container().bytes))
		.clone()
}

pub(crate) fn write_fixture(name: &str, bytes: &[u8]) -> String {
	write_shared_fixture(name, bytes).to_string_lossy().into_owned()
}

pub(crate) fn run_mc3mesh(args: &[&str]) -> Output {
	Command::new(mc3mesh_bin()).args(args).output().expect("mc3mesh command executes")
}

pub(crate) fn run_mc3mesh_json(args: &[&str]) -> serde_json::Value {
	let output = run_mc3mesh(args);
	assert!(
		output.status.success(),
		"mc3mesh command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn mc3mesh_bin() -> &'static PathBuf {
	MC3MESH_BIN.get_or_init(resolve_mc3mesh_bin)
}

fn resolve_mc3mesh_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_mc3mesh") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "mc3mesh.exe" } else { "mc3mesh" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "mc3mesh"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build mc3mesh binary at {}", bin.display());

	bin
}
