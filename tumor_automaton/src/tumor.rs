use ndarray::Array2;
use rand::prelude::*;
use rand_pcg::Pcg64;
use tracing::{debug, info, trace};

use crate::cell::{CancerCell, Cell, ChancePolicy, Position};
use crate::config::SimulationConfig;
use crate::environment::{Environment, SiteState};
use crate::error::{ConfigurationError, PlacementError};
use crate::history::{History, StepRecord};
use crate::Real;

//chance a division fills the most enclosed gap instead of a random free neighbor
pub const GAP_FILL_BIAS: Real = 0.8;

//Contains state of tumor. Sole writer of the grid's cancer cells and of the population list
pub struct Tumor {
	environment: Environment,
	cells: Vec<Position>,
	history: History,
	iteration: u64,
	policy: ChancePolicy,
	rng: Pcg64,
}

impl Tumor {
	/// Takes over `environment`; cancer cells already on it join the population in row-major order.
	pub fn new(environment: Environment, rng: Pcg64) -> Self {
		let cells = environment.cancer_positions();
		Tumor {
			environment,
			cells,
			history: History::new(),
			iteration: 0,
			policy: ChancePolicy::default(),
			rng,
		}
	}

	pub fn with_chance_policy(mut self, policy: ChancePolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
		config.validate()?;
		let environment = Environment::new(config.width, config.height)?;
		let seed = config.rng_seed.unwrap_or_else(rand::random);
		info!(width = config.width, height = config.height, rng_seed = seed, "initializing tumor");
		let mut tumor = Tumor::new(environment, Pcg64::seed_from_u64(seed)).with_chance_policy(config.chance_policy());
		tumor.seed(config.seed_cell())?;
		Ok(tumor)
	}

	pub fn seed(&mut self, cell: CancerCell) -> Result<(), ConfigurationError> {
		let position = cell.position();
		match self.environment.place(cell.into()) {
			Ok(()) => {
				self.cells.push(position);
				Ok(())
			}
			Err(PlacementError::OutOfBounds { x, y }) => Err(ConfigurationError::SeedOutOfBounds {
				x,
				y,
				width: self.environment.width(),
				height: self.environment.height(),
			}),
			Err(PlacementError::Conflict { x, y }) => Err(ConfigurationError::SeedOccupied { x, y }),
		}
	}

	pub fn environment(&self) -> &Environment {
		&self.environment
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn iteration(&self) -> u64 {
		self.iteration
	}

	pub fn chance_policy(&self) -> ChancePolicy {
		self.policy
	}

	/// Positions of every cancer cell, in the order they joined the tumor.
	pub fn population(&self) -> &[Position] {
		&self.cells
	}

	pub fn cancer_cells(&self) -> impl Iterator<Item = &CancerCell> + '_ {
		self.cells
			.iter()
			.filter_map(move |&p| self.environment.cell(p).and_then(Cell::as_cancer))
	}

	pub fn snapshot(&self) -> Array2<SiteState> {
		self.environment.snapshot()
	}

	/// Advances every cancer cell once, in a fresh random order: age and
	/// mutate, then try to divide under the current local pressure. Daughters
	/// born during the step are first processed in the next one.
	pub fn step(&mut self) {
		self.iteration += 1;

		let mut order = self.cells.clone();
		order.shuffle(&mut self.rng);

		for position in order {
			let cell = match self.environment.cell_mut(position) {
				Some(cell) => cell,
				None => continue,
			};
			cell.grow(&mut self.rng);
			if !cell.is_cancerous() {
				continue;
			}

			let pressure = self.local_pressure(position);
			let divides = match self.environment.cell(position).and_then(Cell::as_cancer) {
				Some(cancer) => cancer.should_divide(pressure, self.policy, &mut self.rng),
				None => false,
			};
			if divides {
				self.divide_cell(position);
			}
		}

		debug!(step = self.iteration, population = self.cells.len(), "step complete");
		self.store_step();
	}

	pub fn run(&mut self, steps: usize) {
		for _ in 0..steps {
			self.step();
		}
	}

	//fraction of in-bounds neighbors that are cancerous; 1 when there are none
	pub fn local_pressure(&self, position: Position) -> Real {
		let neighbors = self.environment.neighbors(position);
		if neighbors.is_empty() {
			return 1.;
		}
		let cancerous = neighbors.iter().filter(|c| c.is_cancerous()).count();
		cancerous as Real / neighbors.len() as Real
	}

	pub fn cancer_neighbor_count(&self, position: Position) -> usize {
		self.environment.cancer_neighbor_count(position)
	}

	/// Clones the cancer cell at `position` into a free neighboring site.
	/// Returns false when the cell is walled in or nothing could be placed.
	pub fn divide_cell(&mut self, position: Position) -> bool {
		let parent = match self.environment.cell(position).and_then(Cell::as_cancer) {
			Some(parent) => parent,
			None => return false,
		};
		if self.local_pressure(position) >= 1. {
			return false;
		}

		let candidates: Vec<Position> = self
			.environment
			.neighbor_positions(position)
			.filter(|&p| !self.environment.is_occupied_by_cancer(p))
			.collect();
		if candidates.is_empty() {
			return false;
		}

		let target = if self.rng.gen::<Real>() < GAP_FILL_BIAS {
			self.most_enclosed(&candidates)
		} else {
			candidates[self.rng.gen_range(0..candidates.len())]
		};

		let daughter = parent.clone_at(target);
		match self.environment.place(daughter.into()) {
			Ok(()) => {
				self.cells.push(target);
				trace!(from = ?position, to = ?target, "cell divided");
				true
			}
			Err(err) => {
				trace!(%err, "division blocked");
				false
			}
		}
	}

	// first candidate with the most cancerous neighbors; ties go to neighbor order
	fn most_enclosed(&self, candidates: &[Position]) -> Position {
		let mut best = candidates[0];
		let mut best_count = self.environment.cancer_neighbor_count(best);
		for &candidate in &candidates[1..] {
			let count = self.environment.cancer_neighbor_count(candidate);
			if count > best_count {
				best = candidate;
				best_count = count;
			}
		}
		best
	}

	fn store_step(&mut self) {
		let record = StepRecord::aggregate(self.iteration, self.cancer_cells());
		self.history.push(record);
	}
}

/// Builds, seeds and runs a tumor for `config.steps` steps.
pub fn simulate(config: &SimulationConfig) -> Result<Tumor, ConfigurationError> {
	let mut tumor = Tumor::from_config(config)?;
	tumor.run(config.steps);
	info!(steps = config.steps, population = tumor.population().len(), "simulation finished");
	Ok(tumor)
}
