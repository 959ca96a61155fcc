//! Interactive shell over an octree point index.
//!
//! Reads one command per line from stdin. Startup settings come from an
//! optional TOML file; see `config.rs` for the layout.
//!
//! ```text
//! octree --config octree.toml --points points.txt
//! > insert 10 10 10
//! > step 10 10 10 w
//! > nearest 0 0 0 3
//! ```

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use octree_index::{loader, GameIndex, Octree};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use commands::Flow;
use config::Config;

/// Interactive shell for the octree point index.
#[derive(Parser, Debug)]
#[command(name = "octree", version)]
#[command(about = "Insert, query and move 3-D points in an octree")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Point list to bulk-load at startup (overrides `[data] initial_points`).
	#[arg(short, long)]
	points: Option<PathBuf>,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	log::debug!("Using config: {config:?}");

	let mut tree = Octree::new(config.octree.clone()).context("Invalid octree configuration")?;
	if let Some(path) = args.points.or(config.data.initial_points) {
		let report = loader::load_into(&mut tree, &path);
		if !report.unreadable {
			println!(
				"Loaded {} point(s) from {} ({} malformed line(s) skipped)",
				report.loaded,
				path.display(),
				report.skipped
			);
		}
	}

	let index = GameIndex::new(tree, config.game).context("Invalid game configuration")?;
	run_shell(&index, io::stdin().lock(), &mut io::stdout().lock())
}

/// Read commands until `quit` or end of input.
fn run_shell(index: &GameIndex, input: impl BufRead, out: &mut impl Write) -> Result<()> {
	writeln!(out, "Type `help` for a list of commands.")?;
	write!(out, "> ")?;
	out.flush()?;

	for line in input.lines() {
		let line = line.context("Failed to read from stdin")?;
		match commands::parse(&line) {
			Ok(Some(command)) => {
				if commands::execute(index, command, out)? == Flow::Quit {
					return Ok(());
				}
			}
			Ok(None) => {}
			Err(err) => writeln!(out, "error: {err}")?,
		}
		write!(out, "> ")?;
		out.flush()?;
	}
	writeln!(out)?;
	Ok(())
}
