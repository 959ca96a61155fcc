//! Error types for the point index.
//!
//! Ordinary negative outcomes (point not found, move blocked by a collision)
//! are plain values on the operations themselves. The enums here cover
//! malformed input and invalid configuration only.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

use crate::point::Point;

/// Invalid octree configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
  #[error("root size must be finite and positive, got {0}")]
  InvalidSize(f64),

  #[error("root center must be finite, got {0}")]
  InvalidCenter(Point),

  #[error("max_points must be at least 1")]
  ZeroLeafCapacity,

  #[error("collision radius must be finite and non-negative, got {0}")]
  InvalidCollisionRadius(f64),

  #[error("step must be finite, got {0}")]
  InvalidStep(f64),

  #[error("max_depth {max_depth} shrinks cells of a {size}-unit root below representable size")]
  DepthTooDeep { max_depth: u32, size: f64 },
}

/// Malformed `"x y z"` text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsePointError {
  #[error("missing coordinate for axis {axis}")]
  MissingCoordinate { axis: usize },

  #[error("invalid coordinate {field:?}: {source}")]
  InvalidCoordinate {
    field: String,
    #[source]
    source: ParseFloatError,
  },

  #[error("unexpected trailing input {0:?}")]
  TrailingInput(String),

  #[error("coordinates must be finite, got {0}")]
  NonFinite(Point),
}

/// Unrecognized movement direction token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid direction {0:?}, use w/a/s/d/e/f")]
pub struct DirectionError(pub String);

/// Failure reading or writing a point list.
#[derive(Error, Debug)]
pub enum LoadError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("line {line}: {source}")]
  Parse {
    line: usize,
    #[source]
    source: ParsePointError,
  },
}
