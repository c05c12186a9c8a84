//! SimNSerious Headless Statistical Harness
//!
//! Validates the samplers, experiments and creature logic without an engine.
//! Runs entirely in-process with a seeded generator, so every run with the
//! same seed prints the same numbers.
//!
//! Usage:
//!   cargo run -p simnserious-harness
//!   cargo run -p simnserious-harness -- --verbose
//!   cargo run -p simnserious-harness -- --seed 7 --config lab.json
//!
//! Log output is controlled with `RUST_LOG` (default `info`).

use rand::rngs::StdRng;
use rand::SeedableRng;
use simnserious_core::experiments::{splatter, AceExperiment, EXPECTED_TWO_ACE_ODDS};
use simnserious_core::persistence::{load_population, save_population};
use simnserious_core::prelude::*;
use simnserious_core::profiles::TraitProfiles;
use simnserious_core::walker::{FollowWalker, Walker, WalkerWeights};
use simnserious_sampling::list_utils::shuffle;
use simnserious_sampling::probability::next_gaussian;
use simnserious_sampling::{ChanceTable, Distribution, SamplingError};

const DEFAULT_SEED: u64 = 42;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn within(distribution: &Distribution, value: f32) -> bool {
    (distribution.min()..distribution.max()).contains(&value)
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    println!("=== SimNSerious Statistical Harness ===\n");

    let mut results = Vec::new();

    // 1. Config
    let config = match load_config(&args, &mut results) {
        Some(config) => config,
        None => LabConfig::default(),
    };

    let seed = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .or(config.seed)
        .unwrap_or(DEFAULT_SEED);
    log::info!("Harness seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    // 2. Distribution sampling
    results.extend(validate_distributions(&mut rng, verbose));

    // 3. Chance tables
    results.extend(validate_chance_tables(&mut rng, verbose));

    // 4. Probability helpers
    results.extend(validate_probability(&mut rng, verbose));

    // 5. Classroom experiments
    results.extend(validate_experiments(&config, &mut rng, verbose));

    // 6. Walkers
    results.extend(validate_walkers(&config, &mut rng, verbose));

    // 7. Population and persistence
    results.extend(validate_population(&config, &mut rng, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed (seed {}) ===",
        passed, total, failed, seed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn load_config(args: &[String], results: &mut Vec<TestResult>) -> Option<LabConfig> {
    println!("--- Config ---");
    let Some(path) = arg_value(args, "--config") else {
        results.push(TestResult {
            name: "config_default".into(),
            passed: LabConfig::default().validate().is_ok(),
            detail: "no --config given, using defaults".into(),
        });
        return None;
    };

    let loaded = std::fs::File::open(&path)
        .map_err(|e| e.to_string())
        .and_then(|file| LabConfig::from_reader(file).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: true,
                detail: format!("loaded {}", path),
            });
            Some(config)
        }
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("{}: {}", path, e),
            });
            None
        }
    }
}

// ── 2. Distributions ────────────────────────────────────────────────────

fn validate_distributions(rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Distributions ---");
    let mut results = Vec::new();
    const SAMPLES: usize = 100_000;
    const BINS: usize = 10;

    // Flat curve over [0, 1): every decile equally likely
    match Distribution::unit(|_| 1.0) {
        Ok(flat) => {
            let mut counts = [0usize; BINS];
            for v in flat.sample_n(rng, SAMPLES) {
                let bin = ((v * BINS as f32) as usize).min(BINS - 1);
                counts[bin] += 1;
            }
            let expected = SAMPLES as f64 / BINS as f64;
            let chi_square: f64 = counts
                .iter()
                .map(|&c| (c as f64 - expected).powi(2) / expected)
                .sum();
            if verbose {
                println!("  flat decile counts: {:?}", counts);
            }
            // 9 degrees of freedom, p = 0.001 critical value
            results.push(TestResult {
                name: "distribution_flat_chi_square".into(),
                passed: chi_square < 27.88,
                detail: format!("chi-square {:.2} over {} samples", chi_square, SAMPLES),
            });
        }
        Err(e) => results.push(TestResult {
            name: "distribution_flat_chi_square".into(),
            passed: false,
            detail: format!("could not build flat distribution: {}", e),
        }),
    }

    // x² over [0, 1) has mean 3/4
    match Distribution::unit(|x| x * x) {
        Ok(squared) => {
            let samples = squared.sample_n(rng, SAMPLES);
            let mean = samples.iter().sum::<f32>() / samples.len() as f32;
            results.push(TestResult {
                name: "distribution_squared_mean".into(),
                passed: (mean - 0.75).abs() < 0.02,
                detail: format!("mean {:.4}, expected ~0.75", mean),
            });
        }
        Err(e) => results.push(TestResult {
            name: "distribution_squared_mean".into(),
            passed: false,
            detail: format!("could not build x² distribution: {}", e),
        }),
    }

    // Shifted domain keeps samples in range
    match Distribution::with_default_precision(|x| x, 2.0, 6.0) {
        Ok(ramp) => {
            let escaped = ramp
                .sample_n(rng, SAMPLES)
                .into_iter()
                .filter(|v| !(2.0..6.0).contains(v))
                .count();
            results.push(TestResult {
                name: "distribution_shifted_domain".into(),
                passed: escaped == 0,
                detail: format!("{} of {} samples outside [2, 6)", escaped, SAMPLES),
            });
        }
        Err(e) => results.push(TestResult {
            name: "distribution_shifted_domain".into(),
            passed: false,
            detail: format!("could not build ramp distribution: {}", e),
        }),
    }

    // Degenerate input is rejected rather than producing NaN
    let rejected = [
        Distribution::new(|_| 1.0, 0.0, 1.0, 0),
        Distribution::new(|_| 1.0, 1.0, 1.0, 10),
        Distribution::new(|_| 1.0, 0.0, f32::INFINITY, 10),
    ]
    .iter()
    .all(|r| matches!(r, Err(SamplingError::InvalidArgument { .. })));
    results.push(TestResult {
        name: "distribution_rejects_degenerate".into(),
        passed: rejected,
        detail: "precision 0, empty domain and infinite bound rejected".into(),
    });

    results
}

// ── 3. Chance Tables ────────────────────────────────────────────────────

fn validate_chance_tables(rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Chance Tables ---");
    let mut results = Vec::new();

    // Weights 1:3 give the second outcome ~75%
    let mut table = ChanceTable::new();
    table.add_outcome("rare", 1.0);
    table.add_outcome("common", 3.0);
    const ROLLS: usize = 100_000;
    let common = (0..ROLLS)
        .filter(|_| table.roll(rng) == Some(&"common"))
        .count();
    let share = common as f64 / ROLLS as f64;
    if verbose {
        println!("  table: {}", table);
    }
    results.push(TestResult {
        name: "chance_table_weighted_roll".into(),
        passed: (share - 0.75).abs() < 0.01,
        detail: format!("common rolled {:.2}% of the time", share * 100.0),
    });

    // Drawing empties the table exactly once per entry
    let mut bag: ChanceTable<u32> = (0..20).map(|i| (i, 1.0 + i as f64)).collect();
    let mut drawn = Vec::new();
    while let Some(v) = bag.draw(rng) {
        drawn.push(v);
    }
    drawn.sort_unstable();
    results.push(TestResult {
        name: "chance_table_draw_exhausts".into(),
        passed: drawn == (0..20).collect::<Vec<_>>() && bag.total_weight() == 0.0,
        detail: format!("drew {} entries, {} weight left", drawn.len(), bag.total_weight()),
    });

    // Removing an absent outcome leaves the table untouched
    let before = table.total_weight();
    let missing = table.remove_outcome(&"absent");
    results.push(TestResult {
        name: "chance_table_remove_missing".into(),
        passed: matches!(missing, Err(SamplingError::NotFound)) && table.total_weight() == before,
        detail: "missing outcome reported as not found".into(),
    });

    // Rolling an empty table yields nothing
    let empty: ChanceTable<u8> = ChanceTable::new();
    results.push(TestResult {
        name: "chance_table_empty_roll".into(),
        passed: empty.roll(rng).is_none(),
        detail: "empty table rolls None".into(),
    });

    results
}

// ── 4. Probability Helpers ──────────────────────────────────────────────

fn validate_probability(rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Probability ---");
    let mut results = Vec::new();

    const SAMPLES: usize = 50_000;
    let samples: Vec<f32> = (0..SAMPLES)
        .map(|_| next_gaussian(rng, -8.0, 8.0, 1.0, 0.0))
        .collect();
    let escaped = samples.iter().filter(|v| !(-8.0..8.0).contains(*v)).count();
    let mean = samples.iter().sum::<f32>() / SAMPLES as f32;
    let central = samples.iter().filter(|v| v.abs() < 4.0).count() as f32 / SAMPLES as f32;
    if verbose {
        println!("  gaussian mean {:.4}, central half {:.2}%", mean, central * 100.0);
    }
    results.push(TestResult {
        name: "gaussian_bounded".into(),
        passed: escaped == 0,
        detail: format!("{} of {} samples outside [-8, 8)", escaped, SAMPLES),
    });
    // A flat draw would put half the samples in the central half
    results.push(TestResult {
        name: "gaussian_concentrated".into(),
        passed: mean.abs() < 0.2 && central > 0.6,
        detail: format!("{:.2}% within ±4", central * 100.0),
    });

    // Shuffle is a permutation
    let mut deck: Vec<u32> = (0..52).collect();
    shuffle(rng, &mut deck);
    let moved = deck.iter().enumerate().filter(|(i, v)| *i as u32 != **v).count();
    let mut sorted = deck.clone();
    sorted.sort_unstable();
    results.push(TestResult {
        name: "shuffle_permutation".into(),
        passed: sorted == (0..52).collect::<Vec<_>>() && moved > 0,
        detail: format!("{} of 52 cards moved", moved),
    });

    results
}

// ── 5. Experiments ──────────────────────────────────────────────────────

fn validate_experiments(config: &LabConfig, rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Experiments ---");
    let mut results = Vec::new();

    let mut aces = AceExperiment::new();
    for _ in 0..1_000 {
        aces.run_batch(config.runs_per_frame.max(1), rng);
    }
    if verbose {
        println!(
            "  two aces: {} of {} deals, odds {:.5} (exact {:.5})",
            aces.occurrences,
            aces.runs,
            aces.odds(),
            EXPECTED_TWO_ACE_ODDS
        );
    }
    // Three standard errors of a binomial proportion
    let tolerance =
        3.0 * (EXPECTED_TWO_ACE_ODDS * (1.0 - EXPECTED_TWO_ACE_ODDS) / aces.runs as f64).sqrt();
    results.push(TestResult {
        name: "experiment_two_aces".into(),
        passed: aces.error() < tolerance,
        detail: format!(
            "odds {:.5} vs exact {:.5} (tolerance {:.5})",
            aces.odds(),
            EXPECTED_TWO_ACE_ODDS,
            tolerance
        ),
    });

    let s = config.splatter;
    let mut bad_counts = 0;
    let mut escaped = 0;
    for _ in 0..500 {
        let spots = splatter(&s, rng);
        if (spots.len() as i32) < s.min_spots || (spots.len() as i32) >= s.max_spots.max(s.min_spots + 1)
        {
            bad_counts += 1;
        }
        let reach = s.spread * s.spread_deviation.abs();
        escaped += spots
            .iter()
            .filter(|p| p.x.abs() > reach || p.y.abs() > reach)
            .count();
    }
    results.push(TestResult {
        name: "experiment_splatter_bounds".into(),
        passed: bad_counts == 0 && escaped == 0,
        detail: format!("{} bad spot counts, {} spots out of reach", bad_counts, escaped),
    });

    results
}

// ── 6. Walkers ──────────────────────────────────────────────────────────

fn validate_walkers(config: &LabConfig, rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Walkers ---");
    let mut results = Vec::new();
    const STEPS: i32 = 10_000;

    let mut walker = Walker::new(&config.walker);
    for _ in 0..STEPS {
        walker.step(rng);
    }
    let w = config.walker;
    let h_total = w.left + w.no_move + w.right;
    let v_total = w.down + w.no_move + w.up;
    let expected_x = STEPS as f64 * (w.right - w.left) / h_total;
    let expected_y = STEPS as f64 * (w.up - w.down) / v_total;
    let position = walker.position();
    if verbose {
        println!("  horizontal: {}", walker.horizontal_table());
        println!("  vertical:   {}", walker.vertical_table());
    }
    // Per-step variance is at most 1, so 5σ over the run is 5 * √STEPS
    let slack = 5.0 * (STEPS as f64).sqrt();
    results.push(TestResult {
        name: "walker_drift".into(),
        passed: (position.x as f64 - expected_x).abs() < slack
            && (position.y as f64 - expected_y).abs() < slack,
        detail: format!(
            "ended at ({}, {}), expected ~({:.0}, {:.0})",
            position.x, position.y, expected_x, expected_y
        ),
    });

    let mut follower = FollowWalker::new(&WalkerWeights::default(), 1.0);
    for _ in 0..20 {
        follower.step((10.0, -10.0), rng);
    }
    let distance = follower.position().steps_to(&GridPosition::new(10, -10));
    results.push(TestResult {
        name: "walker_follows_target".into(),
        passed: distance <= 1,
        detail: format!("{} steps from target after 20 moves", distance),
    });

    results
}

// ── 7. Population ───────────────────────────────────────────────────────

fn validate_population(config: &LabConfig, rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Population ---");
    let mut results = Vec::new();

    let profiles = match TraitProfiles::new() {
        Ok(p) => p,
        Err(e) => {
            results.push(TestResult {
                name: "population_profiles".into(),
                passed: false,
                detail: format!("trait profiles failed to build: {}", e),
            });
            return results;
        }
    };

    let mut registry = BehaverRegistry::new();
    for species in Species::ALL {
        for _ in 0..config.population.count_of(species) {
            registry.spawn(species, &profiles, rng);
        }
    }
    results.push(TestResult {
        name: "population_counts".into(),
        passed: registry.count() == config.population.total() as usize,
        detail: format!(
            "{} frogs, {} observers, {} fireflies",
            registry.count_of(Species::Frog),
            registry.count_of(Species::Observer),
            registry.count_of(Species::FireFly)
        ),
    });

    // Every rolled trait lies inside its profile's domain
    let mut out_of_range = 0;
    for entity in registry.behavers() {
        let ok = match registry.traits_of(entity) {
            Some(CreatureTraits::Frog(t)) => within(&profiles.frog.size, t.size),
            Some(CreatureTraits::Observer(t)) => {
                within(&profiles.observer.height, t.height)
                    && within(&profiles.observer.shirt_hue, t.shirt.hue)
            }
            Some(CreatureTraits::FireFly(t)) => {
                within(&profiles.firefly.glow_intensity, t.glow_intensity)
            }
            None => false,
        };
        if !ok {
            out_of_range += 1;
        }
    }
    results.push(TestResult {
        name: "population_traits_in_range".into(),
        passed: out_of_range == 0,
        detail: format!("{} behavers with out-of-range traits", out_of_range),
    });

    // Random picks never return an excluded behaver
    let everyone = registry.behavers();
    let excluded: Vec<_> = everyone.iter().copied().step_by(2).collect();
    let leaked = (0..1_000)
        .filter_map(|_| registry.random_in_scene(&excluded, rng))
        .filter(|e| excluded.contains(e))
        .count();
    let nobody = registry.random_in_scene(&everyone, rng);
    results.push(TestResult {
        name: "population_exclusion".into(),
        passed: leaked == 0 && nobody.is_none(),
        detail: format!("{} excluded picks, full exclusion gives {:?}", leaked, nobody),
    });

    // Save then load keeps every behaver's traits
    let mut buffer = Vec::new();
    let roundtrip = save_population(&mut buffer, &registry)
        .and_then(|_| load_population(&buffer[..]))
        .map(|loaded| {
            let before: Vec<_> = everyone.iter().filter_map(|e| registry.traits_of(*e)).collect();
            let after: Vec<_> = loaded
                .behavers()
                .into_iter()
                .filter_map(|e| loaded.traits_of(e))
                .collect();
            before == after
        });
    if verbose {
        println!("  save file: {} bytes", buffer.len());
        if let Ok(json) = config.to_json() {
            println!("  config:\n{}", json);
        }
    }
    results.push(TestResult {
        name: "population_persistence".into(),
        passed: matches!(roundtrip, Ok(true)),
        detail: match roundtrip {
            Ok(true) => format!("{} behavers survived a save/load", everyone.len()),
            Ok(false) => "traits changed across save/load".into(),
            Err(e) => format!("save/load failed: {}", e),
        },
    });

    results
}
