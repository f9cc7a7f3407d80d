use ndarray::Array2;
use serde::Serialize;

use crate::cell::{Cell, Position, Subtype};
use crate::error::{ConfigurationError, PlacementError};

// Moore neighborhood as (dx, dy), clockwise from north. Tie-breaking depends on this order.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
	(0, -1),
	(1, -1),
	(1, 0),
	(1, 1),
	(0, 1),
	(-1, 1),
	(-1, 0),
	(-1, -1),
];

/// What a site shows to a viewer: plain tissue, or the dominant subtype of its cancer cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SiteState {
	Normal,
	Cancer(Subtype),
}

impl SiteState {
	pub fn code(self) -> u8 {
		match self {
			SiteState::Normal => 0,
			SiteState::Cancer(subtype) => subtype.code(),
		}
	}
}

/// Dense tissue grid, indexed `[[y, x]]`. Every site holds exactly one cell.
#[derive(Clone, Debug)]
pub struct Environment {
	grid: Array2<Cell>,
}

impl Environment {
	pub fn new(width: usize, height: usize) -> Result<Self, ConfigurationError> {
		if width == 0 || height == 0 {
			return Err(ConfigurationError::EmptyGrid { width, height });
		}
		let grid = Array2::from_shape_fn((height, width), |(y, x)| Cell::normal((x, y)));
		Ok(Environment { grid })
	}

	pub fn width(&self) -> usize {
		self.grid.ncols()
	}

	pub fn height(&self) -> usize {
		self.grid.nrows()
	}

	pub fn in_bounds(&self, x: isize, y: isize) -> bool {
		x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
	}

	pub fn contains(&self, (x, y): Position) -> bool {
		x < self.width() && y < self.height()
	}

	pub fn cell(&self, (x, y): Position) -> Option<&Cell> {
		self.grid.get([y, x])
	}

	pub(crate) fn cell_mut(&mut self, (x, y): Position) -> Option<&mut Cell> {
		self.grid.get_mut([y, x])
	}

	pub fn cells(&self) -> impl Iterator<Item = &Cell> {
		self.grid.iter()
	}

	/// In-bounds Moore neighbors of `position`, in `NEIGHBOR_OFFSETS` order.
	pub fn neighbor_positions(&self, (x, y): Position) -> impl Iterator<Item = Position> + '_ {
		NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
			let (nx, ny) = (x as isize + dx, y as isize + dy);
			if self.in_bounds(nx, ny) {
				Some((nx as usize, ny as usize))
			} else {
				None
			}
		})
	}

	pub fn neighbors(&self, position: Position) -> Vec<&Cell> {
		self.neighbor_positions(position)
			.map(|(x, y)| &self.grid[[y, x]])
			.collect()
	}

	pub fn is_occupied_by_cancer(&self, position: Position) -> bool {
		self.cell(position).map_or(false, Cell::is_cancerous)
	}

	pub fn cancer_neighbor_count(&self, position: Position) -> usize {
		self.neighbor_positions(position)
			.filter(|&p| self.is_occupied_by_cancer(p))
			.count()
	}

	/// Writes `cell` at its own position unless a cancer cell already lives there.
	pub fn place(&mut self, cell: Cell) -> Result<(), PlacementError> {
		let (x, y) = cell.position();
		match self.grid.get_mut([y, x]) {
			None => Err(PlacementError::OutOfBounds { x, y }),
			Some(site) if site.is_cancerous() => Err(PlacementError::Conflict { x, y }),
			Some(site) => {
				*site = cell;
				Ok(())
			}
		}
	}

	pub fn count_cancer(&self) -> usize {
		self.grid.iter().filter(|c| c.is_cancerous()).count()
	}

	//row-major
	pub fn cancer_positions(&self) -> Vec<Position> {
		self.grid
			.indexed_iter()
			.filter(|(_, c)| c.is_cancerous())
			.map(|((y, x), _)| (x, y))
			.collect()
	}

	pub fn snapshot(&self) -> Array2<SiteState> {
		self.grid.map(|c| match c.as_cancer() {
			Some(cancer) => SiteState::Cancer(cancer.dominant_subtype()),
			None => SiteState::Normal,
		})
	}

	pub fn snapshot_codes(&self) -> Array2<u8> {
		self.snapshot().map(|s| s.code())
	}
}
