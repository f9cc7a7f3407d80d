use std::collections::BTreeSet;

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::mutation::{Attribute, Effect, Mutation};
use crate::Real;

/// Grid coordinate `(x, y)`.
pub type Position = (usize, usize);

pub const DEFAULT_MUTATION_RATE: Real = 0.01;
pub const DEFAULT_PROLIFERATION_CHANCE: Real = 0.3;
pub const DEFAULT_AGGRESSIVENESS: Real = 1.2;

// phenotype thresholds
const PROLIFERATIVE_ABOVE: Real = 0.35;
const MUTATOR_ABOVE: Real = 0.02;
const RESISTANT_ABOVE: Real = 0.1;
const AGGRESSIVE_ABOVE: Real = 1.5;
const INSENSITIVE_BELOW: Real = 0.7;

/// Derived phenotype label. Declaration order is display priority.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subtype {
	Proliferative,
	Mutator,
	Resistant,
	Aggressive,
	Insensitive,
	Unclassified,
}

impl Subtype {
	pub const PRIORITY: [Subtype; 6] = [
		Subtype::Proliferative,
		Subtype::Mutator,
		Subtype::Resistant,
		Subtype::Aggressive,
		Subtype::Insensitive,
		Subtype::Unclassified,
	];

	//0 is reserved for normal tissue
	pub fn code(self) -> u8 {
		self as u8 + 1
	}
}

/// Ordered by priority, so the first entry is the dominant subtype.
pub type SubtypeSet = BTreeSet<Subtype>;

/// How the division probability is treated once mutations push it outside `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChancePolicy {
	/// Raw `proliferation_chance * (1 - pressure * pressure_sensitivity)`.
	Unclamped,
	/// Same value clamped to `[0, 1]`.
	Clamped,
}

impl Default for ChancePolicy {
	fn default() -> Self {
		ChancePolicy::Unclamped
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NormalCell {
	position: Position,
	age: u64,
}

impl NormalCell {
	pub fn new(position: Position) -> Self {
		NormalCell { position, age: 0 }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct CancerCell {
	position: Position,
	age: u64,
	mutations: BTreeSet<Mutation>,
	mutation_rate: Real,
	proliferation_chance: Real,
	aggressiveness: Real,
	resistance: Real,
	pressure_sensitivity: Real,
	subtypes: SubtypeSet,
}

impl CancerCell {
	pub fn new(position: Position, mutation_rate: Real, proliferation_chance: Real, aggressiveness: Real) -> Self {
		CancerCell {
			position,
			age: 0,
			mutations: BTreeSet::new(),
			mutation_rate,
			proliferation_chance,
			aggressiveness,
			resistance: 0.,
			pressure_sensitivity: 1.,
			subtypes: SubtypeSet::new(),
		}
	}

	pub fn with_default_parameters(position: Position) -> Self {
		CancerCell::new(position, DEFAULT_MUTATION_RATE, DEFAULT_PROLIFERATION_CHANCE, DEFAULT_AGGRESSIVENESS)
	}

	pub fn with_resistance(mut self, resistance: Real) -> Self {
		self.resistance = resistance;
		self
	}

	pub fn with_pressure_sensitivity(mut self, pressure_sensitivity: Real) -> Self {
		self.pressure_sensitivity = pressure_sensitivity.max(0.);
		self
	}

	pub fn position(&self) -> Position {
		self.position
	}

	pub fn age(&self) -> u64 {
		self.age
	}

	pub fn mutations(&self) -> &BTreeSet<Mutation> {
		&self.mutations
	}

	pub fn mutation_count(&self) -> usize {
		self.mutations.len()
	}

	pub fn mutation_rate(&self) -> Real {
		self.mutation_rate
	}

	pub fn proliferation_chance(&self) -> Real {
		self.proliferation_chance
	}

	pub fn aggressiveness(&self) -> Real {
		self.aggressiveness
	}

	pub fn resistance(&self) -> Real {
		self.resistance
	}

	pub fn pressure_sensitivity(&self) -> Real {
		self.pressure_sensitivity
	}

	pub fn subtypes(&self) -> &SubtypeSet {
		&self.subtypes
	}

	/// Highest-priority tag; a cell that never mutated reports `Unclassified`.
	pub fn dominant_subtype(&self) -> Subtype {
		self.subtypes.iter().next().copied().unwrap_or(Subtype::Unclassified)
	}

	pub fn grow<R: Rng>(&mut self, rng: &mut R) -> Option<Mutation> {
		self.age += 1;
		self.mutate(rng)
	}

	/// One Bernoulli trial with probability `mutation_rate * aggressiveness`.
	/// A successful trial picks uniformly among mutations not yet acquired, and
	/// does nothing once the catalog is exhausted.
	pub fn mutate<R: Rng>(&mut self, rng: &mut R) -> Option<Mutation> {
		if rng.gen::<Real>() >= self.mutation_rate * self.aggressiveness {
			return None;
		}
		let available: Vec<Mutation> = Mutation::ALL
			.iter()
			.copied()
			.filter(|m| !self.mutations.contains(m))
			.collect();
		let mutation = *available.choose(rng)?;
		self.acquire(mutation);
		trace!(mutation = mutation.name(), x = self.position.0, y = self.position.1, "acquired mutation");
		Some(mutation)
	}

	/// Folds the mutation's deltas into the attributes. Returns false, changing
	/// nothing, if the mutation was already acquired.
	pub fn acquire(&mut self, mutation: Mutation) -> bool {
		if !self.mutations.insert(mutation) {
			return false;
		}
		for effect in mutation.effects() {
			self.apply(effect);
		}
		self.determine_subtypes();
		true
	}

	fn apply(&mut self, effect: &Effect) {
		match effect.attribute {
			Attribute::ProliferationChance => self.proliferation_chance += effect.delta,
			Attribute::MutationRate => self.mutation_rate += effect.delta,
			Attribute::Resistance => self.resistance += effect.delta,
			Attribute::Aggressiveness => self.aggressiveness += effect.delta,
			Attribute::PressureSensitivity => {
				self.pressure_sensitivity = (self.pressure_sensitivity + effect.delta).max(0.)
			}
		}
	}

	pub fn determine_subtypes(&mut self) {
		let mut subtypes = SubtypeSet::new();
		if self.proliferation_chance > PROLIFERATIVE_ABOVE {
			subtypes.insert(Subtype::Proliferative);
		}
		if self.mutation_rate > MUTATOR_ABOVE {
			subtypes.insert(Subtype::Mutator);
		}
		if self.resistance > RESISTANT_ABOVE {
			subtypes.insert(Subtype::Resistant);
		}
		if self.aggressiveness > AGGRESSIVE_ABOVE {
			subtypes.insert(Subtype::Aggressive);
		}
		if self.pressure_sensitivity < INSENSITIVE_BELOW {
			subtypes.insert(Subtype::Insensitive);
		}
		if subtypes.is_empty() {
			subtypes.insert(Subtype::Unclassified);
		}
		self.subtypes = subtypes;
	}

	pub fn division_chance(&self, pressure: Real, policy: ChancePolicy) -> Real {
		let chance = self.proliferation_chance * (1. - pressure * self.pressure_sensitivity);
		match policy {
			ChancePolicy::Unclamped => chance,
			ChancePolicy::Clamped => chance.clamp(0., 1.),
		}
	}

	pub fn should_divide<R: Rng>(&self, pressure: Real, policy: ChancePolicy, rng: &mut R) -> bool {
		rng.gen::<Real>() < self.division_chance(pressure, policy)
	}

	/// Daughter cell at `position`: same mutation state and subtypes, age reset.
	pub fn clone_at(&self, position: Position) -> CancerCell {
		CancerCell {
			position,
			age: 0,
			..self.clone()
		}
	}
}

/// Occupant of a grid site.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
	Normal(NormalCell),
	Cancer(CancerCell),
}

impl Cell {
	pub fn normal(position: Position) -> Self {
		Cell::Normal(NormalCell::new(position))
	}

	pub fn position(&self) -> Position {
		match self {
			Cell::Normal(c) => c.position,
			Cell::Cancer(c) => c.position,
		}
	}

	pub fn age(&self) -> u64 {
		match self {
			Cell::Normal(c) => c.age,
			Cell::Cancer(c) => c.age,
		}
	}

	pub fn is_cancerous(&self) -> bool {
		matches!(self, Cell::Cancer(_))
	}

	pub fn as_cancer(&self) -> Option<&CancerCell> {
		match self {
			Cell::Cancer(c) => Some(c),
			Cell::Normal(_) => None,
		}
	}

	pub fn as_cancer_mut(&mut self) -> Option<&mut CancerCell> {
		match self {
			Cell::Cancer(c) => Some(c),
			Cell::Normal(_) => None,
		}
	}

	//each growth step is one round of self-renewal
	pub fn grow<R: Rng>(&mut self, rng: &mut R) -> Option<Mutation> {
		match self {
			Cell::Normal(c) => {
				c.age += 1;
				None
			}
			Cell::Cancer(c) => c.grow(rng),
		}
	}
}

impl From<CancerCell> for Cell {
	fn from(cell: CancerCell) -> Self {
		Cell::Cancer(cell)
	}
}
