//! Independent random simulation of an exchange, used to cross-check the
//! exact engine.
//!
//! Plays out the same rules one trial at a time: strikes alternate by index,
//! first strike lets the defender lead, slow halves the victim's damage for
//! the rest of the fight, drain heals half the damage dealt, swarm fixes the
//! strike count from starting hp, and berserk repeats rounds until a death.

use odds_engine::{CombatantStats, FightConfig, HpDistribution};
use rand::Rng;
use rand::rngs::StdRng;

/// Empirical hp frequencies from repeated trials.
#[derive(Debug, Clone)]
pub struct Sampled {
    pub attacker: HpDistribution,
    pub defender: HpDistribution,
}

#[derive(Debug, Clone, Copy)]
struct Fighter {
    hp: u32,
    max_hp: u32,
    strikes: u32,
    damage: u32,
    hit_chance: f64,
    drains: bool,
    slows: bool,
    /// Slowed before the fight; already reflected in `damage`.
    slowed_before: bool,
    /// Slowed by a hit during this fight.
    slowed_now: bool,
}

impl Fighter {
    fn new(stats: &CombatantStats) -> Self {
        let strikes = if stats.swarm {
            stats.strikes - stats.strikes * (stats.max_hp - stats.hp) / stats.max_hp
        } else {
            stats.strikes
        };
        let damage = if stats.slowed {
            stats.damage / 2
        } else {
            stats.damage
        };
        Self {
            hp: stats.hp,
            max_hp: stats.max_hp,
            strikes,
            damage,
            hit_chance: stats.hit_chance,
            drains: stats.drains,
            slows: stats.causes_slow,
            slowed_before: stats.slowed,
            slowed_now: false,
        }
    }

    fn strike(&mut self, target: &mut Fighter, rng: &mut StdRng) {
        if self.hp == 0 || target.hp == 0 || !rng.random_bool(self.hit_chance) {
            return;
        }
        let damage = if self.slowed_now {
            self.damage / 2
        } else {
            self.damage
        };
        target.hp = target.hp.saturating_sub(damage);
        if self.drains {
            self.hp = (self.hp + damage / 2).min(self.max_hp);
        }
        if self.slows && !target.slowed_before {
            target.slowed_now = true;
        }
    }
}

/// Run `trials` random exchanges and tally each side's final hp.
pub fn sample(
    attacker: &CombatantStats,
    defender: &CombatantStats,
    trials: u32,
    rng: &mut StdRng,
) -> Sampled {
    let config = FightConfig::default();
    let rounds = config.rounds(attacker.berserk || defender.berserk);
    let defender_leads = defender.first_strike && !attacker.first_strike;

    let mut attacker_counts = vec![0u64; attacker.max_hp as usize + 1];
    let mut defender_counts = vec![0u64; defender.max_hp as usize + 1];

    for _ in 0..trials {
        let mut a = Fighter::new(attacker);
        let mut d = Fighter::new(defender);
        {
            let (first, second) = if defender_leads {
                (&mut d, &mut a)
            } else {
                (&mut a, &mut d)
            };
            play(first, second, rounds, rng);
        }
        attacker_counts[a.hp as usize] += 1;
        defender_counts[d.hp as usize] += 1;
    }

    Sampled {
        attacker: frequencies(&attacker_counts, trials),
        defender: frequencies(&defender_counts, trials),
    }
}

fn play(first: &mut Fighter, second: &mut Fighter, rounds: u32, rng: &mut StdRng) {
    let max_strikes = first.strikes.max(second.strikes);
    for _ in 0..rounds {
        for i in 0..max_strikes {
            if i < first.strikes {
                first.strike(second, rng);
            }
            if i < second.strikes {
                second.strike(first, rng);
            }
        }
        if first.hp == 0 || second.hp == 0 {
            break;
        }
    }
}

fn frequencies(counts: &[u64], trials: u32) -> HpDistribution {
    let trials = f64::from(trials.max(1));
    HpDistribution::from_probabilities(counts.iter().map(|&n| n as f64 / trials).collect())
}

/// Largest absolute difference between two same-sized distributions.
pub fn max_deviation(exact: &HpDistribution, sampled: &HpDistribution) -> f64 {
    exact
        .as_slice()
        .iter()
        .zip(sampled.as_slice())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}
