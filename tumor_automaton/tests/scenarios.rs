use rand::SeedableRng;
use rand_pcg::Pcg64;
use tumor_automaton::{
	simulate, CancerCell, ChancePolicy, Environment, Mutation, Position, SimulationConfig, SiteState, Subtype, Tumor,
};

fn population_matches_grid(tumor: &Tumor) -> bool {
	tumor.population().len() == tumor.environment().count_cancer()
}

#[test]
fn seed_with_free_neighbors_grows_in_one_step() {
	for seed in 0..20 {
		let mut tumor = Tumor::new(Environment::new(10, 10).unwrap(), Pcg64::seed_from_u64(seed));
		tumor.seed(CancerCell::new((5, 5), 0., 1.0, 1.0).with_pressure_sensitivity(0.)).unwrap();
		let neighbors: Vec<Position> = tumor.environment().neighbor_positions((5, 5)).collect();

		tumor.step();

		assert!(tumor.population().len() >= 2, "seed {seed}: no division");
		assert!(tumor.population()[1..].iter().all(|p| neighbors.contains(p)));
		assert!(population_matches_grid(&tumor));
	}
}

#[test]
fn crowded_seed_divides_into_the_cleared_sites() {
	let cleared = [(5, 4), (5, 6)];
	for seed in 0..20 {
		let mut env = Environment::new(10, 10).unwrap();
		env.place(CancerCell::new((5, 5), 0., 1.0, 1.0).with_pressure_sensitivity(0.).into())
			.unwrap();
		let walls: Vec<Position> = env.neighbor_positions((5, 5)).filter(|p| !cleared.contains(p)).collect();
		for &p in &walls {
			env.place(CancerCell::new(p, 0., 0., 1.0).into()).unwrap();
		}
		let mut tumor = Tumor::new(env, Pcg64::seed_from_u64(seed));
		assert_eq!(tumor.population().len(), 7);

		tumor.step();

		assert_eq!(tumor.population().len(), 8, "seed {seed}");
		let daughter = tumor.population()[7];
		assert!(cleared.contains(&daughter));
		assert!(population_matches_grid(&tumor));
	}
}

#[test]
fn single_site_grid_is_fully_pressured() {
	let config = SimulationConfig {
		width: 1,
		height: 1,
		proliferation_chance: 1.0,
		steps: 10,
		rng_seed: Some(3),
		..SimulationConfig::default()
	};
	let mut tumor = simulate(&config).unwrap();
	assert_eq!(tumor.local_pressure((0, 0)), 1.0);
	assert!(!tumor.divide_cell((0, 0)));
	assert_eq!(tumor.population(), &[(0, 0)]);
	assert!(tumor.history().records().iter().all(|r| r.population_count == 1));
}

#[test]
fn runs_are_reproducible_and_independent() {
	let base = SimulationConfig {
		width: 25,
		height: 25,
		steps: 80,
		mutation_rate: 0.03,
		proliferation_chance: 0.4,
		rng_seed: Some(7),
		..SimulationConfig::default()
	};
	let first = simulate(&base).unwrap();
	let other = simulate(&SimulationConfig { rng_seed: Some(8), ..base.clone() }).unwrap();
	let again = simulate(&base).unwrap();

	assert_eq!(first.history(), again.history());
	assert_eq!(first.snapshot(), again.snapshot());
	assert_ne!(first.history(), other.history());
}

#[test]
fn long_run_keeps_invariants() {
	let config = SimulationConfig {
		width: 30,
		height: 30,
		steps: 150,
		mutation_rate: 0.05,
		proliferation_chance: 0.5,
		aggressiveness: 1.5,
		rng_seed: Some(2024),
		clamp_division_chance: true,
		..SimulationConfig::default()
	};
	let tumor = simulate(&config).unwrap();
	assert_eq!(tumor.chance_policy(), ChancePolicy::Clamped);
	assert!(population_matches_grid(&tumor));

	let history = tumor.history().records();
	assert_eq!(history.len(), 150);
	for (i, record) in history.iter().enumerate() {
		assert_eq!(record.step, i as u64 + 1);
	}
	assert!(history.windows(2).all(|w| w[0].population_count <= w[1].population_count));

	for cell in tumor.cancer_cells() {
		assert!(cell.mutation_count() <= Mutation::ALL.len());
		assert!(cell.pressure_sensitivity() >= 0.);
		let pressure = tumor.local_pressure(cell.position());
		assert!((0. ..=1.).contains(&pressure));
		assert!(cell.age() <= 150);
	}

	let snapshot = tumor.snapshot();
	let cancer_sites = snapshot.iter().filter(|s| **s != SiteState::Normal).count();
	assert_eq!(cancer_sites, tumor.population().len());
	assert!(snapshot.iter().all(|s| match s {
		SiteState::Normal => true,
		SiteState::Cancer(subtype) => Subtype::PRIORITY.contains(subtype),
	}));
}
