use anyhow::Result;
use tracing::{info, warn};
use tumor_automaton::{simulate, SimulationConfig};

fn main() -> Result<()> {
	init_tracing();
	let config = match std::env::args().nth(1) {
		Some(path) => SimulationConfig::from_json_file(&path)?,
		None => SimulationConfig::default(),
	};

	let tumor = simulate(&config)?;
	match tumor.history().last() {
		Some(last) => info!(
			step = last.step,
			cells = last.population_count,
			avg_age = last.average_age,
			avg_mutations = last.average_mutation_count,
			"final state",
		),
		None => warn!("simulation ran zero steps"),
	}

	println!("{}", tumor.history().to_json()?);
	Ok(())
}

fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.try_init();
}
