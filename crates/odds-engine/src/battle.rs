//! Record-level entry points.
//!
//! Callers that do not want to drive [`Combatant`]s directly describe each
//! side with a [`CombatantStats`] record and get a [`BattleOutcome`] back.
//! Inputs are validated first, so these functions never trip a kernel
//! assertion.

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::config::FightConfig;
use crate::distribution::{HpDistribution, HpSummary};
use crate::error::{OddsError, OddsResult};
use crate::validate::{validate_pair, validate_stats};

/// Everything the engine needs to know about one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantStats {
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Already slowed before the exchange.
    #[serde(default)]
    pub slowed: bool,
    /// Strikes per round at full health.
    pub strikes: u32,
    /// Damage per successful strike.
    pub damage: u32,
    /// Chance that each strike lands.
    pub hit_chance: f64,
    /// Hits heal this side by half the damage dealt.
    #[serde(default)]
    pub drains: bool,
    /// Hits slow the opponent.
    #[serde(default)]
    pub causes_slow: bool,
    /// The exchange repeats until someone is almost certainly dead.
    #[serde(default)]
    pub berserk: bool,
    /// Strike count falls as this side loses hp.
    #[serde(default)]
    pub swarm: bool,
    /// This side strikes first even when defending.
    #[serde(default)]
    pub first_strike: bool,
    /// Distribution carried over from an earlier fight this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<HpSummary>,
}

impl CombatantStats {
    /// A side with a plain weapon and no specials.
    pub fn new(hp: u32, max_hp: u32, strikes: u32, damage: u32, hit_chance: f64) -> Self {
        Self {
            hp,
            max_hp,
            slowed: false,
            strikes,
            damage,
            hit_chance,
            drains: false,
            causes_slow: false,
            berserk: false,
            swarm: false,
            first_strike: false,
            prior: None,
        }
    }

    /// Build a kernel combatant configured against `opponent`.
    pub fn to_combatant(&self, opponent: &CombatantStats) -> Combatant {
        let mut combatant = match &self.prior {
            Some(prior) => Combatant::with_prior(prior.clone(), self.slowed),
            None => Combatant::new(self.hp, self.max_hp, self.slowed),
        };
        combatant.set_weapon(
            self.strikes,
            self.drains,
            self.berserk,
            self.swarm,
            self.first_strike,
        );
        combatant.set_effectiveness(self.damage, self.hit_chance, opponent.causes_slow);
        combatant
    }
}

/// One side's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideOutcome {
    /// Probability of each remaining hp.
    pub hp_distribution: HpDistribution,
    /// Probability that no opposing strike landed.
    pub untouched: f64,
    /// Expected remaining hp.
    pub average_hp: f64,
    /// Probability of ending dead.
    pub death_probability: f64,
}

impl SideOutcome {
    fn from_combatant(combatant: &Combatant) -> Self {
        let dist = combatant.hp_distribution();
        Self {
            hp_distribution: dist.clone(),
            untouched: combatant.untouched(),
            average_hp: dist.average_hp(),
            death_probability: dist.chance_to_kill(),
        }
    }
}

/// Both sides' results after one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// The initiating side.
    pub attacker: SideOutcome,
    /// The side being attacked.
    pub defender: SideOutcome,
}

/// Resolve one exchange with the default [`FightConfig`].
pub fn simulate(attacker: &CombatantStats, defender: &CombatantStats) -> OddsResult<BattleOutcome> {
    simulate_with(attacker, defender, &FightConfig::default())
}

/// Resolve one exchange.
pub fn simulate_with(
    attacker: &CombatantStats,
    defender: &CombatantStats,
    config: &FightConfig,
) -> OddsResult<BattleOutcome> {
    validate_pair(attacker, defender)?;
    let mut a = attacker.to_combatant(defender);
    let mut d = defender.to_combatant(attacker);
    a.fight_with(&mut d, config);
    Ok(BattleOutcome {
        attacker: SideOutcome::from_combatant(&a),
        defender: SideOutcome::from_combatant(&d),
    })
}

/// Resolve a defender being attacked by several attackers in turn.
///
/// The defender's distribution after each fight is the prior for the next.
/// Fights stop early once the defender is certainly dead, so the result may
/// hold fewer outcomes than there are attackers. The attackers must not carry
/// priors of their own.
pub fn simulate_sequence(
    defender: &CombatantStats,
    attackers: &[CombatantStats],
) -> OddsResult<Vec<BattleOutcome>> {
    let first = attackers.first().ok_or(OddsError::EmptySequence)?;
    validate_pair(first, defender)?;
    for attacker in &attackers[1..] {
        validate_stats(attacker, "attacker")?;
        if attacker.prior.is_some() {
            return Err(OddsError::BothPriors);
        }
    }

    let config = FightConfig::default();
    let mut outcomes = Vec::with_capacity(attackers.len());
    let mut target = defender.to_combatant(first);
    for (index, attacker_stats) in attackers.iter().enumerate() {
        if index > 0 {
            if target.summary().alive_probability() <= 0.0 {
                break;
            }
            target.reset_for_next_fight();
            target.set_effectiveness(defender.damage, defender.hit_chance, attacker_stats.causes_slow);
        }
        let mut attacker = attacker_stats.to_combatant(defender);
        attacker.fight_with(&mut target, &config);
        outcomes.push(BattleOutcome {
            attacker: SideOutcome::from_combatant(&attacker),
            defender: SideOutcome::from_combatant(&target),
        });
    }
    Ok(outcomes)
}
