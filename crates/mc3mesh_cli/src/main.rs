#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "mc3mesh", about = "Midnight Club 3 mesh container inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print relocation and directory pointers.
	Info(cmd::info::Args),
	/// List the package catalog.
	List(cmd::list::Args),
	/// Print the group header and mesh entries of one package.
	Meshes(cmd::meshes::Args),
	/// Decode the geometry of one package.
	Dump(cmd::dump::Args),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();
}

fn run() -> mc3mesh::container::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::List(args) => cmd::list::run(args),
		Commands::Meshes(args) => cmd::meshes::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
	}
}
