use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cell::{
	CancerCell, ChancePolicy, Position, DEFAULT_AGGRESSIVENESS, DEFAULT_MUTATION_RATE, DEFAULT_PROLIFERATION_CHANCE,
};
use crate::error::{ConfigLoadError, ConfigurationError};
use crate::Real;

/// Everything needed to run one simulation. Plain scalars so sweep and
/// calibration drivers can construct it directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	pub width: usize,
	pub height: usize,
	/// Defaults to the grid center.
	pub seed_position: Option<Position>,
	pub mutation_rate: Real,
	pub proliferation_chance: Real,
	pub aggressiveness: Real,
	pub steps: usize,
	/// Drawn from entropy when absent.
	pub rng_seed: Option<u64>,
	pub clamp_division_chance: bool,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		SimulationConfig {
			width: 100,
			height: 100,
			seed_position: None,
			mutation_rate: DEFAULT_MUTATION_RATE,
			proliferation_chance: DEFAULT_PROLIFERATION_CHANCE,
			aggressiveness: DEFAULT_AGGRESSIVENESS,
			steps: 50,
			rng_seed: None,
			clamp_division_chance: false,
		}
	}
}

impl SimulationConfig {
	pub fn from_json_str(json: &str) -> Result<Self, ConfigLoadError> {
		let config: SimulationConfig = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
		Self::from_json_str(&fs::read_to_string(path)?)
	}

	pub fn seed_position(&self) -> Position {
		self.seed_position.unwrap_or((self.width / 2, self.height / 2))
	}

	pub fn chance_policy(&self) -> ChancePolicy {
		if self.clamp_division_chance {
			ChancePolicy::Clamped
		} else {
			ChancePolicy::Unclamped
		}
	}

	pub fn seed_cell(&self) -> CancerCell {
		CancerCell::new(self.seed_position(), self.mutation_rate, self.proliferation_chance, self.aggressiveness)
	}

	pub fn validate(&self) -> Result<(), ConfigurationError> {
		if self.width == 0 || self.height == 0 {
			return Err(ConfigurationError::EmptyGrid { width: self.width, height: self.height });
		}
		let (x, y) = self.seed_position();
		if x >= self.width || y >= self.height {
			return Err(ConfigurationError::SeedOutOfBounds { x, y, width: self.width, height: self.height });
		}
		for (name, value) in [
			("mutation_rate", self.mutation_rate),
			("proliferation_chance", self.proliferation_chance),
			("aggressiveness", self.aggressiveness),
		] {
			if !value.is_finite() || value < 0. {
				return Err(ConfigurationError::InvalidParameter { name, value });
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_seed_the_center() {
		let config = SimulationConfig::default();
		assert_eq!(config.seed_position(), (50, 50));
		assert_eq!(config.chance_policy(), ChancePolicy::Unclamped);
		assert!(config.validate().is_ok());
		let cell = config.seed_cell();
		assert_eq!(cell.position(), (50, 50));
		assert_eq!(cell.proliferation_chance(), DEFAULT_PROLIFERATION_CHANCE);
	}

	#[test]
	fn rejects_bad_geometry() {
		let config = SimulationConfig { width: 0, ..SimulationConfig::default() };
		assert_eq!(config.validate(), Err(ConfigurationError::EmptyGrid { width: 0, height: 100 }));

		let config = SimulationConfig { width: 10, height: 10, seed_position: Some((3, 10)), ..SimulationConfig::default() };
		assert_eq!(
			config.validate(),
			Err(ConfigurationError::SeedOutOfBounds { x: 3, y: 10, width: 10, height: 10 })
		);
	}

	#[test]
	fn rejects_negative_rates() {
		let config = SimulationConfig { mutation_rate: -0.1, ..SimulationConfig::default() };
		assert!(matches!(
			config.validate(),
			Err(ConfigurationError::InvalidParameter { name: "mutation_rate", .. })
		));
		let config = SimulationConfig { aggressiveness: Real::NAN, ..SimulationConfig::default() };
		assert!(config.validate().is_err());
	}

	#[test]
	fn json_fills_missing_fields_with_defaults() {
		let config = SimulationConfig::from_json_str(
			r#"{"width": 20, "height": 20, "seed_position": [10, 10], "steps": 120, "rng_seed": 42, "clamp_division_chance": true}"#,
		)
		.unwrap();
		assert_eq!(config.seed_position(), (10, 10));
		assert_eq!(config.steps, 120);
		assert_eq!(config.rng_seed, Some(42));
		assert_eq!(config.mutation_rate, DEFAULT_MUTATION_RATE);
		assert_eq!(config.chance_policy(), ChancePolicy::Clamped);

		assert!(matches!(
			SimulationConfig::from_json_str(r#"{"width": 0}"#),
			Err(ConfigLoadError::Invalid(ConfigurationError::EmptyGrid { .. }))
		));
		assert!(matches!(SimulationConfig::from_json_str("{"), Err(ConfigLoadError::Parse(_))));
	}
}
