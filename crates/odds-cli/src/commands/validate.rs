use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use odds_engine::simulate;

use crate::montecarlo::{max_deviation, sample};
use crate::scenario::{Scenario, describe};

pub fn run(
    file: Option<&Path>,
    trials: u32,
    seed: u64,
    pairs: u32,
    tolerance: f64,
) -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let scenarios = match file {
        Some(path) => {
            let scenario = Scenario::load(path)?;
            if scenario.attacker.prior.is_some() || scenario.defender.prior.is_some() {
                return Err("random simulation cannot start from a prior distribution".into());
            }
            vec![scenario]
        }
        None => (0..pairs).map(|_| Scenario::random(&mut rng)).collect(),
    };

    println!(
        "  {} {}",
        "Validation".bold(),
        format!(
            "({} pair{}, {trials} trials each, seed={seed}, tolerance={tolerance})",
            scenarios.len(),
            if scenarios.len() == 1 { "" } else { "s" }
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Attacker", "Defender", "Max deviation"]);

    let mut failures = 0;
    for (index, scenario) in scenarios.iter().enumerate() {
        let exact = simulate(&scenario.attacker, &scenario.defender).map_err(|e| e.to_string())?;
        let sampled = sample(&scenario.attacker, &scenario.defender, trials, &mut rng);
        let deviation = max_deviation(&exact.attacker.hp_distribution, &sampled.attacker).max(
            max_deviation(&exact.defender.hp_distribution, &sampled.defender),
        );
        tracing::debug!(pair = index + 1, deviation, "compared exact and sampled");
        if deviation > tolerance {
            failures += 1;
        }
        table.add_row(vec![
            (index + 1).to_string(),
            describe(&scenario.attacker),
            describe(&scenario.defender),
            super::deviation_label(deviation, tolerance),
        ]);
    }

    println!("{table}");
    println!();

    if failures > 0 {
        return Err(format!(
            "{failures} of {} pairs exceeded tolerance {tolerance}",
            scenarios.len()
        ));
    }
    println!("  {} all pairs within tolerance", "OK".green().bold());
    Ok(())
}
