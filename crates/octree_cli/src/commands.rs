//! Shell command parsing and execution.
//!
//! One command per line. Coordinates are plain whitespace-separated
//! numbers, so `move 0 0 0 50 0 0` moves (0, 0, 0) to (50, 0, 0).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use octree_index::loader::write_points;
use octree_index::{Direction, DirectionError, GameIndex, MoveOutcome, ParsePointError, Point};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  insert x y z                   add a point (duplicates are skipped)
  delete x y z                   remove a point
  search x y z                   look a point up
  range x1 y1 z1 x2 y2 z2 [file] points inside the box, optionally saved
  nearest x y z [k]              k nearest points (default 1)
  points                         list every point
  structure                      dump the node tree as JSON
  stats                          node and point counts
  move x1 y1 z1 x2 y2 z2         collision-checked move
  step x y z dir                 move one step: w/s/a/d/e/f
  collision x y z                check a position against the radius
  save file                      write every point to a file
  help                           show this text
  quit                           leave the shell";

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	Insert(Point),
	Delete(Point),
	Search(Point),
	Range {
		min: Point,
		max: Point,
		output: Option<PathBuf>,
	},
	Nearest {
		target: Point,
		k: usize,
	},
	Points,
	Structure,
	Stats,
	Move {
		from: Point,
		to: Point,
	},
	Step {
		current: Point,
		direction: Direction,
	},
	Collision(Point),
	Save(PathBuf),
	Help,
	Quit,
}

/// Malformed command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
	#[error("unknown command {0:?}, type `help` for a list")]
	Unknown(String),

	#[error("usage: {0}")]
	Usage(&'static str),

	#[error(transparent)]
	Point(#[from] ParsePointError),

	#[error(transparent)]
	Direction(#[from] DirectionError),

	#[error("invalid neighbour count {0:?}")]
	InvalidCount(String),
}

/// Whether the shell keeps reading after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
	let mut tokens = line.split_whitespace();
	let Some(name) = tokens.next() else {
		return Ok(None);
	};
	let args: Vec<&str> = tokens.collect();

	let command = match name.to_ascii_lowercase().as_str() {
		"insert" => Command::Insert(exact_point(&args, "insert x y z")?),
		"delete" => Command::Delete(exact_point(&args, "delete x y z")?),
		"search" => Command::Search(exact_point(&args, "search x y z")?),
		"collision" => Command::Collision(exact_point(&args, "collision x y z")?),
		"range" => {
			const USAGE: &str = "range x1 y1 z1 x2 y2 z2 [file]";
			if !(6..=7).contains(&args.len()) {
				return Err(CommandError::Usage(USAGE));
			}
			Command::Range {
				min: point_at(&args, 0)?,
				max: point_at(&args, 3)?,
				output: args.get(6).map(PathBuf::from),
			}
		}
		"nearest" => {
			const USAGE: &str = "nearest x y z [k]";
			if !(3..=4).contains(&args.len()) {
				return Err(CommandError::Usage(USAGE));
			}
			let k = match args.get(3) {
				Some(raw) => raw
					.parse()
					.map_err(|_| CommandError::InvalidCount(raw.to_string()))?,
				None => 1,
			};
			Command::Nearest {
				target: point_at(&args, 0)?,
				k,
			}
		}
		"move" => {
			if args.len() != 6 {
				return Err(CommandError::Usage("move x1 y1 z1 x2 y2 z2"));
			}
			Command::Move {
				from: point_at(&args, 0)?,
				to: point_at(&args, 3)?,
			}
		}
		"step" => {
			if args.len() != 4 {
				return Err(CommandError::Usage("step x y z dir"));
			}
			Command::Step {
				current: point_at(&args, 0)?,
				direction: args[3].parse()?,
			}
		}
		"save" => match args.as_slice() {
			[path] => Command::Save(PathBuf::from(path)),
			_ => return Err(CommandError::Usage("save file")),
		},
		"points" => no_args(&args, Command::Points, "points")?,
		"structure" => no_args(&args, Command::Structure, "structure")?,
		"stats" => no_args(&args, Command::Stats, "stats")?,
		"help" | "?" => Command::Help,
		"quit" | "exit" | "q" => Command::Quit,
		other => return Err(CommandError::Unknown(other.to_string())),
	};
	Ok(Some(command))
}

fn exact_point(args: &[&str], usage: &'static str) -> Result<Point, CommandError> {
	if args.len() != 3 {
		return Err(CommandError::Usage(usage));
	}
	point_at(args, 0)
}

/// Parse the three coordinates starting at `start`; the caller has
/// checked the length.
fn point_at(args: &[&str], start: usize) -> Result<Point, CommandError> {
	Ok(args[start..start + 3].join(" ").parse()?)
}

fn no_args(args: &[&str], command: Command, usage: &'static str) -> Result<Command, CommandError> {
	if args.is_empty() {
		Ok(command)
	} else {
		Err(CommandError::Usage(usage))
	}
}

/// Run `command` against `index`, writing human-readable output to `out`.
///
/// Only failures writing to `out` are errors; negative outcomes and
/// failed file saves are printed.
pub fn execute(index: &GameIndex, command: Command, out: &mut impl Write) -> Result<Flow> {
	match command {
		Command::Insert(point) => {
			if index.with_tree_mut(|tree| tree.insert_unique(point)) {
				writeln!(out, "Inserted {point}")?;
			} else {
				writeln!(out, "Point {point} already exists")?;
			}
		}
		Command::Delete(point) => {
			if index.delete(&point) {
				writeln!(out, "Deleted {point}")?;
			} else {
				writeln!(out, "Point {point} not found")?;
			}
		}
		Command::Search(point) => match index.search(&point) {
			Some(found) => writeln!(out, "Found {found}")?,
			None => writeln!(out, "Point {point} not found")?,
		},
		Command::Range { min, max, output } => {
			let found = index.range(&min, &max);
			write_list(out, &found)?;
			writeln!(out, "{} point(s) in range", found.len())?;
			if let Some(path) = output {
				save_points(out, &path, &found)?;
			}
		}
		Command::Nearest { target, k } => {
			let found = index.nearest(&target, k);
			if found.is_empty() {
				writeln!(out, "No neighbours")?;
			}
			for p in &found {
				writeln!(out, "{p}  distance {:.3}", target.distance_to(p))?;
			}
		}
		Command::Points => {
			let all = index.all_points();
			write_list(out, &all)?;
			writeln!(out, "{} point(s)", all.len())?;
		}
		Command::Structure => {
			serde_json::to_writer_pretty(&mut *out, &index.structure())?;
			writeln!(out)?;
		}
		Command::Stats => {
			let stats = index.stats();
			writeln!(
				out,
				"points {} | nodes {} (leaves {}, internal {}) | depth {} | fullest leaf {}",
				stats.points, stats.nodes, stats.leaves, stats.internal, stats.max_depth, stats.fullest_leaf
			)?;
		}
		Command::Move { from, to } => write_outcome(out, index.move_point(&from, to))?,
		Command::Step { current, direction } => write_outcome(out, index.step(&current, direction))?,
		Command::Collision(point) => {
			let radius = index.config().collision_radius;
			if index.check_collision(&point) {
				writeln!(out, "Collision within {radius} of {point}")?;
			} else {
				writeln!(out, "No collision within {radius} of {point}")?;
			}
		}
		Command::Save(path) => {
			save_points(out, &path, &index.all_points())?;
		}
		Command::Help => writeln!(out, "{HELP}")?,
		Command::Quit => return Ok(Flow::Quit),
	}
	Ok(Flow::Continue)
}

fn save_points(out: &mut impl Write, path: &Path, points: &[Point]) -> std::io::Result<()> {
	match write_points(path, points) {
		Ok(()) => writeln!(out, "Wrote {} point(s) to {}", points.len(), path.display()),
		Err(err) => writeln!(out, "error: {err}"),
	}
}

fn write_list(out: &mut impl Write, points: &[Point]) -> std::io::Result<()> {
	for p in points {
		writeln!(out, "  {p}")?;
	}
	Ok(())
}

fn write_outcome(out: &mut impl Write, outcome: MoveOutcome) -> std::io::Result<()> {
	match outcome {
		MoveOutcome::Moved { from, to } => writeln!(out, "Moved {from} -> {to}"),
		MoveOutcome::Collision { current, blocked } => {
			writeln!(out, "Collision at {blocked}, {current} stays put")
		}
		MoveOutcome::NotFound { requested } => writeln!(out, "Point {requested} not found"),
	}
}
