use serde::{Deserialize, Serialize};

use crate::Real;

//Attributes of a cancer cell a mutation can shift
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
	ProliferationChance,
	MutationRate,
	Resistance,
	Aggressiveness,
	PressureSensitivity,
}

//Additive, signed change to one attribute
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Effect {
	pub attribute: Attribute,
	pub delta: Real,
}

/// Driver mutations a cancer cell can acquire, each at most once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mutation {
	TP53,
	KRAS,
	EGFR,
	RB1,
	BRAF,
	ALK,
	HER2,
	APC,
	CDKN2A,
	BRCA1,
	BRCA2,
	PIK3CA,
	NOTCH1,
	PTEN,
	SMAD4,
	MYC,
	IDH1,
}

impl Mutation {
	/// The closed catalog, in the order uniform draws enumerate it.
	pub const ALL: [Mutation; 17] = [
		Mutation::TP53,
		Mutation::KRAS,
		Mutation::EGFR,
		Mutation::RB1,
		Mutation::BRAF,
		Mutation::ALK,
		Mutation::HER2,
		Mutation::APC,
		Mutation::CDKN2A,
		Mutation::BRCA1,
		Mutation::BRCA2,
		Mutation::PIK3CA,
		Mutation::NOTCH1,
		Mutation::PTEN,
		Mutation::SMAD4,
		Mutation::MYC,
		Mutation::IDH1,
	];

	pub fn name(self) -> &'static str {
		match self {
			Mutation::TP53 => "TP53",
			Mutation::KRAS => "KRAS",
			Mutation::EGFR => "EGFR",
			Mutation::RB1 => "RB1",
			Mutation::BRAF => "BRAF",
			Mutation::ALK => "ALK",
			Mutation::HER2 => "HER2",
			Mutation::APC => "APC",
			Mutation::CDKN2A => "CDKN2A",
			Mutation::BRCA1 => "BRCA1",
			Mutation::BRCA2 => "BRCA2",
			Mutation::PIK3CA => "PIK3CA",
			Mutation::NOTCH1 => "NOTCH1",
			Mutation::PTEN => "PTEN",
			Mutation::SMAD4 => "SMAD4",
			Mutation::MYC => "MYC",
			Mutation::IDH1 => "IDH1",
		}
	}

	pub fn from_name(name: &str) -> Option<Mutation> {
		Mutation::ALL.iter().copied().find(|m| m.name() == name)
	}

	/// Deltas applied to a cell once, when it acquires this mutation.
	pub fn effects(self) -> &'static [Effect] {
		use Attribute::*;
		match self {
			// growth signaling and checkpoint loss
			Mutation::TP53 => &[Effect { attribute: ProliferationChance, delta: 0.04 }],
			Mutation::KRAS => &[Effect { attribute: ProliferationChance, delta: 0.03 }],
			Mutation::EGFR => &[Effect { attribute: ProliferationChance, delta: 0.03 }],
			Mutation::RB1 => &[Effect { attribute: ProliferationChance, delta: 0.02 }],
			Mutation::BRAF => &[Effect { attribute: ProliferationChance, delta: 0.03 }],
			Mutation::ALK => &[Effect { attribute: ProliferationChance, delta: 0.03 }],
			Mutation::HER2 => &[Effect { attribute: ProliferationChance, delta: 0.03 }],
			Mutation::APC => &[Effect { attribute: ProliferationChance, delta: 0.02 }],
			Mutation::CDKN2A => &[Effect { attribute: ProliferationChance, delta: 0.03 }],
			// repair failure
			Mutation::BRCA1 => &[Effect { attribute: MutationRate, delta: 0.01 }],
			Mutation::BRCA2 => &[Effect { attribute: MutationRate, delta: 0.01 }],
			Mutation::PIK3CA => &[Effect { attribute: MutationRate, delta: 0.01 }, Effect { attribute: Resistance, delta: 0.1 }],
			Mutation::NOTCH1 => &[Effect { attribute: MutationRate, delta: 0.01 }],
			// loss of contact inhibition
			Mutation::PTEN => &[Effect { attribute: PressureSensitivity, delta: -0.2 }],
			Mutation::SMAD4 => &[Effect { attribute: PressureSensitivity, delta: -0.2 }],
			Mutation::MYC => &[Effect { attribute: Aggressiveness, delta: 0.2 }],
			Mutation::IDH1 => &[Effect { attribute: Aggressiveness, delta: -0.1 }],
		}
	}
}

//Unknown names have no effect
pub fn effects_by_name(name: &str) -> &'static [Effect] {
	Mutation::from_name(name).map(Mutation::effects).unwrap_or(&[])
}
