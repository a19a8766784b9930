use std::time::{Duration, Instant};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use odds_engine::simulate;

use crate::scenario::{Scenario, describe};

pub fn run(fights: u32, seed: u64) -> Result<(), String> {
    if fights == 0 {
        return Err("need at least one fight to benchmark".into());
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let scenarios: Vec<Scenario> = (0..fights).map(|_| Scenario::random(&mut rng)).collect();

    let mut slowest: Option<(Duration, usize)> = None;
    let started = Instant::now();
    for (index, scenario) in scenarios.iter().enumerate() {
        let fight_started = Instant::now();
        simulate(&scenario.attacker, &scenario.defender).map_err(|e| e.to_string())?;
        let elapsed = fight_started.elapsed();
        if slowest.is_none_or(|(worst, _)| elapsed > worst) {
            slowest = Some((elapsed, index));
        }
    }
    let total = started.elapsed();

    let secs = total.as_secs_f64();
    let rate = if secs > 0.0 {
        f64::from(fights) / secs
    } else {
        f64::INFINITY
    };

    println!(
        "  {} {}",
        "Benchmark".bold(),
        format!("({fights} random fights, seed={seed})").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total time".to_string(), format!("{:.3} ms", secs * 1e3)]);
    table.add_row(vec![
        "Mean per fight".to_string(),
        format!("{:.2} us", secs * 1e6 / f64::from(fights)),
    ]);
    table.add_row(vec!["Fights per second".to_string(), format!("{rate:.0}")]);
    if let Some((worst, index)) = slowest {
        let scenario = &scenarios[index];
        table.add_row(vec![
            "Slowest fight".to_string(),
            format!(
                "{:.2} us ({} vs {})",
                worst.as_secs_f64() * 1e6,
                describe(&scenario.attacker),
                describe(&scenario.defender)
            ),
        ]);
    }
    println!("{table}");
    Ok(())
}
