use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use odds_engine::distribution::NEGLIGIBLE_MASS;
use odds_engine::{BattleOutcome, SideOutcome, simulate, simulate_sequence};

use crate::scenario::{Scenario, describe};

pub fn run(path: &Path, json: bool) -> Result<(), String> {
    let scenario = Scenario::load(path)?;

    let outcomes = if scenario.followups.is_empty() {
        vec![simulate(&scenario.attacker, &scenario.defender).map_err(|e| e.to_string())?]
    } else {
        let attackers: Vec<_> = std::iter::once(scenario.attacker.clone())
            .chain(scenario.followups.iter().cloned())
            .collect();
        simulate_sequence(&scenario.defender, &attackers).map_err(|e| e.to_string())?
    };

    if json {
        let text = serde_json::to_string_pretty(&outcomes)
            .map_err(|e| format!("cannot serialize outcome: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    let attackers = std::iter::once(&scenario.attacker).chain(&scenario.followups);
    for (index, (outcome, attacker)) in outcomes.iter().zip(attackers).enumerate() {
        println!(
            "  {} {}",
            format!("Fight {}", index + 1).bold().underline(),
            format!("({} vs {})", describe(attacker), describe(&scenario.defender)).dimmed()
        );
        println!();
        println!("{}", distribution_table(outcome));
        print_side("Attacker", &outcome.attacker);
        print_side("Defender", &outcome.defender);
        println!();
    }
    if outcomes.len() < scenario.followups.len() + 1 {
        println!(
            "  {}",
            "Defender is certainly dead; remaining attackers did not fight.".yellow()
        );
    }

    Ok(())
}

fn distribution_table(outcome: &BattleOutcome) -> Table {
    let a = &outcome.attacker.hp_distribution;
    let d = &outcome.defender.hp_distribution;
    let top = a.max_hp().max(d.max_hp());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["HP", "Attacker", "Defender"]);
    for hp in (0..=top).rev() {
        let (pa, pd) = (a.probability(hp), d.probability(hp));
        if pa <= NEGLIGIBLE_MASS && pd <= NEGLIGIBLE_MASS {
            continue;
        }
        let cell = |p: f64| {
            if p > NEGLIGIBLE_MASS {
                super::percent(p)
            } else {
                String::new()
            }
        };
        let label = if hp == 0 {
            "dead".to_string()
        } else {
            hp.to_string()
        };
        table.add_row(vec![label, cell(pa), cell(pd)]);
    }
    table
}

fn print_side(name: &str, side: &SideOutcome) {
    let death = format!("{:>8}", super::percent(side.death_probability));
    let death = if side.death_probability > 0.5 {
        death.red().bold()
    } else {
        death.normal()
    };
    println!(
        "  {:<9} average hp {:>6.2}   dies {}   untouched {:>8}",
        name,
        side.average_hp,
        death,
        super::percent(side.untouched)
    );
}
