use numpy::{PyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::history::HISTORY_COLUMNS;
use crate::tumor::simulate;
use crate::{Real, SimulationConfig};

/// Runs one simulation and returns `(snapshot, history)`: the final grid as
/// subtype codes (0 = normal) and one row per step of `HISTORY_COLUMNS`.
#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn run(
    py: Python,
    width: usize,
    height: usize,
    steps: usize,
    mutation_rate: Real,
    proliferation_chance: Real,
    aggressiveness: Real,
    rng_seed: Option<u64>,
) -> PyResult<(&PyArray2<u8>, &PyArray2<Real>)> {
    let config = SimulationConfig {
        width,
        height,
        steps,
        mutation_rate,
        proliferation_chance,
        aggressiveness,
        rng_seed,
        ..SimulationConfig::default()
    };
    let tumor = py
        .allow_threads(|| simulate(&config))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let snapshot = tumor.environment().snapshot_codes();
    let history = tumor.history().to_array();
    Ok((PyArray::from_array(py, &snapshot), PyArray::from_array(py, &history)))
}

#[pymodule]
fn tumor_automaton(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(run, m)?)?;
    m.add("HISTORY_COLUMNS", HISTORY_COLUMNS.to_vec())?;
    Ok(())
}
