use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::cell::CancerCell;
use crate::Real;

pub const HISTORY_COLUMNS: [&str; 4] = ["step", "population_count", "average_age", "average_mutation_count"];

/// Population statistics at the end of one step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepRecord {
	pub step: u64,
	pub population_count: usize,
	pub average_age: Real,
	pub average_mutation_count: Real,
}

impl StepRecord {
	//empty populations average to 0
	pub fn aggregate<'a>(step: u64, cells: impl Iterator<Item = &'a CancerCell>) -> StepRecord {
		let (ages, mutations): (Vec<Real>, Vec<Real>) = cells
			.map(|c| (c.age() as Real, c.mutation_count() as Real))
			.unzip();
		StepRecord {
			step,
			population_count: ages.len(),
			average_age: Array1::from(ages).mean().unwrap_or(0.),
			average_mutation_count: Array1::from(mutations).mean().unwrap_or(0.),
		}
	}
}

/// Append-only, one record per step.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History {
	records: Vec<StepRecord>,
}

impl History {
	pub fn new() -> Self {
		History::default()
	}

	pub(crate) fn push(&mut self, record: StepRecord) {
		self.records.push(record);
	}

	pub fn records(&self) -> &[StepRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn last(&self) -> Option<&StepRecord> {
		self.records.last()
	}

	/// One row per step, columns as in `HISTORY_COLUMNS`.
	pub fn to_array(&self) -> Array2<Real> {
		let mut table = Array2::<Real>::zeros((self.records.len(), HISTORY_COLUMNS.len()));
		for (mut row, r) in table.rows_mut().into_iter().zip(&self.records) {
			row[0] = r.step as Real;
			row[1] = r.population_count as Real;
			row[2] = r.average_age;
			row[3] = r.average_mutation_count;
		}
		table
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}
