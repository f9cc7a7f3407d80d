use thiserror::Error;

use crate::Real;

/// Invalid setup, reported before any simulation work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
	#[error("grid dimensions must be positive, got {width}x{height}")]
	EmptyGrid { width: usize, height: usize },
	#[error("seed position ({x}, {y}) lies outside the {width}x{height} grid")]
	SeedOutOfBounds { x: usize, y: usize, width: usize, height: usize },
	#[error("seed position ({x}, {y}) is already occupied by a cancer cell")]
	SeedOccupied { x: usize, y: usize },
	#[error("{name} must be finite and non-negative, got {value}")]
	InvalidParameter { name: &'static str, value: Real },
}

/// Why a cell could not be written to a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
	#[error("site ({x}, {y}) is already occupied by a cancer cell")]
	Conflict { x: usize, y: usize },
	#[error("site ({x}, {y}) lies outside the grid")]
	OutOfBounds { x: usize, y: usize },
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("failed to read config: {0}")]
	Io(#[from] std::io::Error),
	#[error("failed to parse config: {0}")]
	Parse(#[from] serde_json::Error),
	#[error(transparent)]
	Invalid(#[from] ConfigurationError),
}
