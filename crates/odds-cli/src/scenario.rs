//! Scenario files and synthetic combatant pairs.

use std::path::Path;

use odds_engine::CombatantStats;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Hit chances the synthetic generator picks from.
const HIT_CHANCES: [f64; 6] = [0.3, 0.4, 0.5, 0.6, 0.7, 0.8];

/// How often each special shows up on a synthetic weapon.
const SPECIAL_CHANCE: f64 = 0.15;

/// One fight, plus optional further attackers taking on the same defender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub attacker: CombatantStats,
    pub defender: CombatantStats,
    /// Attackers that fight the defender afterwards, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followups: Vec<CombatantStats>,
}

impl Scenario {
    /// Read a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        serde_json::from_str(&text).map_err(|e| format!("invalid scenario {}: {e}", path.display()))
    }

    /// A random pair of combatants with no priors.
    pub fn random(rng: &mut StdRng) -> Self {
        Self {
            attacker: random_stats(rng),
            defender: random_stats(rng),
            followups: Vec::new(),
        }
    }
}

fn random_stats(rng: &mut StdRng) -> CombatantStats {
    let max_hp = rng.random_range(10..=80);
    let hp = rng.random_range(1..=max_hp);
    let strikes = rng.random_range(1..=4);
    let damage = rng.random_range(1..=15);
    let hit_chance = HIT_CHANCES[rng.random_range(0..HIT_CHANCES.len())];
    CombatantStats {
        slowed: rng.random_bool(SPECIAL_CHANCE),
        drains: rng.random_bool(SPECIAL_CHANCE),
        causes_slow: rng.random_bool(SPECIAL_CHANCE),
        berserk: rng.random_bool(SPECIAL_CHANCE / 2.0),
        swarm: rng.random_bool(SPECIAL_CHANCE),
        first_strike: rng.random_bool(SPECIAL_CHANCE),
        ..CombatantStats::new(hp, max_hp, strikes, damage, hit_chance)
    }
}

/// Short one-line description, e.g. `18/18 hp, 2x8 @70% [drains]`.
pub fn describe(stats: &CombatantStats) -> String {
    let specials: Vec<&str> = [
        (stats.slowed, "slowed"),
        (stats.drains, "drains"),
        (stats.causes_slow, "slows"),
        (stats.berserk, "berserk"),
        (stats.swarm, "swarm"),
        (stats.first_strike, "firststrike"),
        (stats.prior.is_some(), "prior"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();

    let mut text = format!(
        "{}/{} hp, {}x{} @{:.0}%",
        stats.hp,
        stats.max_hp,
        stats.strikes,
        stats.damage,
        stats.hit_chance * 100.0
    );
    if !specials.is_empty() {
        text.push_str(&format!(" [{}]", specials.join(", ")));
    }
    text
}
