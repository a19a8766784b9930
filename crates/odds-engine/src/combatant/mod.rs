//! One side of an exchange: hit points, weapon, and per-opponent effectiveness.
//!
//! A [`Combatant`] is built with its starting hp, given its weapon with
//! [`Combatant::set_weapon`], told how effective it is against a particular
//! opponent with [`Combatant::set_effectiveness`], and then fights exactly
//! once. Afterwards its [`Combatant::hp_distribution`] and
//! [`Combatant::untouched`] hold the result. To fight again in the same turn,
//! call [`Combatant::reset_for_next_fight`] so the result becomes the prior.

pub mod exchange;

use crate::distribution::{HpDistribution, HpSummary};
use crate::matrix::SideSetup;
use crate::validate::MAX_SUPPORTED_HP;

/// A combatant's weapon, hit points, and fight results.
#[derive(Debug, Clone)]
pub struct Combatant {
    hp: u32,
    max_hp: u32,
    slowed: bool,
    prior: Option<HpSummary>,

    base_strikes: u32,
    drains: bool,
    berserk: bool,
    swarm: bool,
    first_strike: bool,

    damage: u32,
    hit_chances: Vec<f64>,
    can_be_slowed: bool,

    summary: HpSummary,
    hp_dist: HpDistribution,
    untouched: f64,
}

impl Combatant {
    /// A combatant entering its first fight of the turn at a known hp.
    ///
    /// # Panics
    ///
    /// Panics if `hp > max_hp` or `max_hp` exceeds [`MAX_SUPPORTED_HP`].
    pub fn new(hp: u32, max_hp: u32, slowed: bool) -> Self {
        assert!(hp <= max_hp, "hp {hp} exceeds max hp {max_hp}");
        assert!(
            max_hp <= MAX_SUPPORTED_HP,
            "max hp {max_hp} exceeds supported limit {MAX_SUPPORTED_HP}"
        );
        let hp_dist = HpDistribution::point(hp, max_hp);
        Self {
            hp,
            max_hp,
            slowed,
            prior: None,
            base_strikes: 0,
            drains: false,
            berserk: false,
            swarm: false,
            first_strike: false,
            damage: 0,
            hit_chances: Vec::new(),
            can_be_slowed: false,
            summary: HpSummary::unslowed(hp_dist.clone()),
            hp_dist,
            untouched: 1.0,
        }
    }

    /// A combatant continuing from an earlier fight this turn, starting from
    /// that fight's hp distribution instead of a single value.
    ///
    /// `slowed` is whether the combatant was slowed before the turn began;
    /// slowing picked up in the earlier fight lives in `prior.slowed`.
    ///
    /// The stored hp is the highest hp the prior reaches and never affects the
    /// fight. A swarm combatant with a prior takes its strike slots from the
    /// prior's distribution, and without swarm the strike count ignores hp.
    ///
    /// # Panics
    ///
    /// Panics if the prior is sized beyond [`MAX_SUPPORTED_HP`].
    pub fn with_prior(prior: HpSummary, slowed: bool) -> Self {
        let max_hp = prior.max_hp();
        let hp = (0..=max_hp)
            .rev()
            .find(|&hp| prior.probability(hp) > 0.0)
            .unwrap_or(0);
        let mut combatant = Self::new(hp, max_hp, slowed);
        combatant.hp_dist = prior.flatten();
        combatant.summary = prior.clone();
        combatant.prior = Some(prior);
        combatant
    }

    /// Store the static weapon attributes.
    pub fn set_weapon(
        &mut self,
        strikes: u32,
        drains: bool,
        berserk: bool,
        swarm: bool,
        first_strike: bool,
    ) {
        self.base_strikes = strikes;
        self.drains = drains;
        self.berserk = berserk;
        self.swarm = swarm;
        self.first_strike = first_strike;
    }

    /// Number of strikes at `hp`. Under swarm this falls linearly with the
    /// damage already taken, rounding down.
    pub fn num_attacks_at(&self, hp: u32) -> u32 {
        if !self.swarm || self.max_hp == 0 {
            return self.base_strikes;
        }
        let base = u64::from(self.base_strikes);
        let lost = u64::from(self.max_hp - hp.min(self.max_hp));
        (base - base * lost / u64::from(self.max_hp)) as u32
    }

    /// Configure damage and accuracy against a particular opponent.
    ///
    /// Damage is halved if this combatant is already slowed. When
    /// `opponent_causes_slow` is set and this combatant is not yet slowed,
    /// the opponent's hits will slow it during the exchange.
    ///
    /// Under swarm with a prior distribution the strike count is uncertain,
    /// so each strike slot gets the hit chance weighted by how likely the
    /// combatant is to still have that slot, given that it is alive.
    ///
    /// # Panics
    ///
    /// Panics if `hit_chance` is outside `[0, 1]`, or if swarm weighting is
    /// needed and the prior leaves no chance of being alive.
    pub fn set_effectiveness(&mut self, damage: u32, hit_chance: f64, opponent_causes_slow: bool) {
        assert!(
            (0.0..=1.0).contains(&hit_chance),
            "hit chance {hit_chance} is outside [0, 1]"
        );
        self.damage = if self.slowed { damage / 2 } else { damage };
        self.can_be_slowed = opponent_causes_slow && !self.slowed;

        self.hit_chances = match (&self.prior, self.swarm) {
            (Some(prior), true) => self.swarm_hit_chances(prior, hit_chance),
            _ => vec![hit_chance; self.num_attacks_at(self.hp) as usize],
        };
    }

    /// Carry this combatant's result forward as the prior of its next fight.
    ///
    /// Weapon attributes are kept; call [`Self::set_effectiveness`] again for
    /// the new opponent before fighting.
    pub fn reset_for_next_fight(&mut self) {
        self.prior = Some(self.summary.clone());
        self.hit_chances.clear();
        self.can_be_slowed = false;
        self.untouched = 1.0;
    }

    /// Remaining hp distribution after the last fight, or the starting
    /// distribution before any fight.
    pub fn hp_distribution(&self) -> &HpDistribution {
        &self.hp_dist
    }

    /// Result split by whether this combatant ended slowed.
    pub fn summary(&self) -> &HpSummary {
        &self.summary
    }

    /// Probability that no opposing strike landed during the last fight.
    pub fn untouched(&self) -> f64 {
        self.untouched
    }

    /// Per-slot hit chances configured for the current opponent.
    pub fn hit_chances(&self) -> &[f64] {
        &self.hit_chances
    }

    /// Damage per strike after any starting slow.
    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Maximum hp.
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Whether this combatant strikes first regardless of who initiated.
    pub fn has_first_strike(&self) -> bool {
        self.first_strike
    }

    /// Whether this combatant continues an earlier fight this turn.
    pub fn has_prior(&self) -> bool {
        self.prior.is_some()
    }

    fn swarm_hit_chances(&self, prior: &HpSummary, hit_chance: f64) -> Vec<f64> {
        let alive = prior.alive_probability();
        assert!(
            alive > 0.0,
            "a combatant certain to be dead cannot fight again"
        );
        let mut chances = vec![0.0; self.num_attacks_at(self.max_hp) as usize];
        for hp in 1..=self.max_hp {
            let weight = prior.probability(hp) * hit_chance / alive;
            let slots = self.num_attacks_at(hp) as usize;
            for chance in &mut chances[..slots] {
                *chance += weight;
            }
        }
        chances
    }

    fn side_setup(&self) -> SideSetup<'_> {
        SideSetup {
            max_hp: self.max_hp,
            hp: self.hp,
            can_be_slowed: self.can_be_slowed,
            prior: self.prior.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn swarmer(hp: u32, max_hp: u32, strikes: u32) -> Combatant {
        let mut c = Combatant::new(hp, max_hp, false);
        c.set_weapon(strikes, false, false, true, false);
        c
    }

    #[test]
    fn swarm_strikes_fall_with_hp() {
        let c = swarmer(10, 10, 4);
        assert_eq!(c.num_attacks_at(10), 4);
        assert_eq!(c.num_attacks_at(0), 0);
        assert_eq!(c.num_attacks_at(5), 2);
        // 4 - 4 * 3 / 10 = 4 - 1
        assert_eq!(c.num_attacks_at(7), 3);
        assert_eq!(c.num_attacks_at(1), 1);
    }

    #[test]
    fn no_swarm_keeps_base_strikes() {
        let mut c = Combatant::new(3, 10, false);
        c.set_weapon(3, false, false, false, false);
        assert_eq!(c.num_attacks_at(0), 3);
        assert_eq!(c.num_attacks_at(10), 3);
    }

    #[test]
    fn effectiveness_fills_strike_slots() {
        let mut c = swarmer(5, 10, 4);
        c.set_effectiveness(7, 0.6, false);
        assert_eq!(c.hit_chances(), &[0.6, 0.6]);
        assert_eq!(c.damage(), 7);
    }

    #[test]
    fn slowed_combatant_deals_half_and_cannot_be_reslowed() {
        let mut c = Combatant::new(10, 10, true);
        c.set_weapon(2, false, false, false, false);
        c.set_effectiveness(7, 0.5, true);
        assert_eq!(c.damage(), 3);
        assert!(!c.side_setup().can_be_slowed);

        let mut fresh = Combatant::new(10, 10, false);
        fresh.set_effectiveness(7, 0.5, true);
        assert!(fresh.side_setup().can_be_slowed);
    }

    #[test]
    fn swarm_with_prior_weights_slots() {
        // Alive at 10 hp with 0.4, at 5 hp with 0.4, dead with 0.2.
        let mut probs = vec![0.0; 11];
        probs[0] = 0.2;
        probs[5] = 0.4;
        probs[10] = 0.4;
        let prior = HpSummary::unslowed(HpDistribution::from_probabilities(probs));
        let mut c = Combatant::with_prior(prior, false);
        c.set_weapon(4, false, false, true, false);
        c.set_effectiveness(5, 0.5, false);
        let chances = c.hit_chances();
        assert_eq!(chances.len(), 4);
        // Slots 0 and 1 exist at both hp values; slots 2 and 3 only at 10 hp.
        assert!((chances[0] - 0.5).abs() < EPS);
        assert!((chances[1] - 0.5).abs() < EPS);
        assert!((chances[2] - 0.25).abs() < EPS);
        assert!((chances[3] - 0.25).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "certain to be dead")]
    fn swarm_prior_requires_survival() {
        let prior = HpSummary::unslowed(HpDistribution::point(0, 10));
        let mut c = Combatant::with_prior(prior, false);
        c.set_weapon(4, false, false, true, false);
        c.set_effectiveness(5, 0.5, false);
    }

    #[test]
    #[should_panic(expected = "outside [0, 1]")]
    fn rejects_bad_hit_chance() {
        let mut c = Combatant::new(5, 5, false);
        c.set_effectiveness(5, 1.5, false);
    }

    #[test]
    #[should_panic(expected = "exceeds max hp")]
    fn rejects_hp_above_max() {
        let _ = Combatant::new(6, 5, false);
    }

    #[test]
    fn prior_sets_starting_distribution() {
        let prior = HpSummary::unslowed(HpDistribution::from_probabilities(vec![
            0.5, 0.0, 0.5, 0.0,
        ]));
        let c = Combatant::with_prior(prior, false);
        assert!(c.has_prior());
        assert_eq!(c.max_hp(), 3);
        assert!((c.hp_distribution().probability(2) - 0.5).abs() < EPS);
    }

    #[test]
    fn swarm_strike_count_survives_large_weapons() {
        let mut c = Combatant::new(1, 1000, false);
        c.set_weapon(5_000_000, false, false, true, false);
        // 5_000_000 - 5_000_000 * 999 / 1000
        assert_eq!(c.num_attacks_at(1), 5_000);
        assert_eq!(c.num_attacks_at(1000), 5_000_000);
    }
}
