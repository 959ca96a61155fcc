//! Bulk load and save of plain-text point lists.
//!
//! Format: one point per line, three whitespace-separated coordinates.
//!
//! ```text
//! 10 10 10
//! -250.5 0 33
//! ```
//!
//! Loading is best-effort. Blank lines are ignored, malformed lines are
//! skipped with a warning, and an unreadable file yields an empty load
//! rather than an error. Parsing runs in parallel via rayon; insertion is
//! sequential and keeps file order.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use rayon::prelude::*;
use web_time::Instant;

use crate::error::LoadError;
use crate::octree::Octree;
use crate::point::Point;

/// Outcome of a best-effort load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
  /// Points parsed (and, for [`load_into`], inserted).
  pub loaded: usize,
  /// Non-blank lines that failed to parse.
  pub skipped: usize,
  /// Whether the file could not be read at all.
  pub unreadable: bool,
}

/// Parse every line of `text`, collecting good points and per-line errors.
///
/// Line numbers in the errors are 1-based.
pub fn parse_points(text: &str) -> (Vec<Point>, Vec<LoadError>) {
  let lines: Vec<&str> = text.lines().collect();
  let parsed: Vec<Option<Result<Point, LoadError>>> = lines
    .par_iter()
    .enumerate()
    .map(|(index, line)| {
      let line = line.trim();
      if line.is_empty() {
        return None;
      }
      Some(line.parse::<Point>().map_err(|source| LoadError::Parse {
        line: index + 1,
        source,
      }))
    })
    .collect();

  let mut points = Vec::with_capacity(parsed.len());
  let mut errors = Vec::new();
  for result in parsed.into_iter().flatten() {
    match result {
      Ok(point) => points.push(point),
      Err(err) => errors.push(err),
    }
  }
  (points, errors)
}

/// Read a point list, logging and skipping malformed lines.
///
/// Fails only if the file cannot be read.
pub fn read_points(path: &Path) -> Result<(Vec<Point>, LoadReport), LoadError> {
  let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let (points, errors) = parse_points(&text);
  for err in &errors {
    tracing::warn!(path = %path.display(), error = %err, "skipping malformed point line");
  }
  let report = LoadReport {
    loaded: points.len(),
    skipped: errors.len(),
    unreadable: false,
  };
  Ok((points, report))
}

/// Insert every readable point from `path` into `tree`.
///
/// Never fails: an unreadable file is logged and reported as
/// `unreadable`, with the tree left untouched.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_into(tree: &mut Octree, path: &Path) -> LoadReport {
  let start = Instant::now();
  let (points, mut report) = match read_points(path) {
    Ok(read) => read,
    Err(err) => {
      tracing::warn!(error = %err, "point file unreadable, starting without it");
      return LoadReport {
        unreadable: true,
        ..LoadReport::default()
      };
    }
  };

  report.loaded = 0;
  for point in points {
    if tree.insert(point) {
      report.loaded += 1;
    }
  }

  tracing::info!(
    loaded = report.loaded,
    skipped = report.skipped,
    elapsed_us = start.elapsed().as_micros() as u64,
    "bulk load finished"
  );
  report
}

/// Write `points` as one `x y z` line each, replacing any existing file.
pub fn write_points(path: &Path, points: &[Point]) -> Result<(), LoadError> {
  let write_err = |source| LoadError::Write {
    path: path.to_path_buf(),
    source,
  };
  let file = fs::File::create(path).map_err(write_err)?;
  let mut writer = BufWriter::new(file);
  for p in points {
    writeln!(writer, "{} {} {}", p.x, p.y, p.z).map_err(write_err)?;
  }
  writer.flush().map_err(write_err)?;
  Ok(())
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;
