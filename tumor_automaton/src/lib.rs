//! Stochastic cellular automaton of tumor growth on a 2-D tissue grid.
//!
//! Cancer cells age, acquire driver mutations and divide into neighboring
//! sites under crowding pressure. Each [`Tumor`] owns its grid and random
//! stream, so many runs can coexist in one process.

pub mod cell;
pub mod config;
pub mod environment;
pub mod error;
pub mod history;
pub mod mutation;
pub mod tumor;

#[cfg(feature = "python")]
mod python;

pub type Real = f64;

pub use crate::cell::{CancerCell, Cell, ChancePolicy, NormalCell, Position, Subtype, SubtypeSet};
pub use crate::config::SimulationConfig;
pub use crate::environment::{Environment, SiteState};
pub use crate::error::{ConfigLoadError, ConfigurationError, PlacementError};
pub use crate::history::{History, StepRecord};
pub use crate::mutation::Mutation;
pub use crate::tumor::{simulate, Tumor};
