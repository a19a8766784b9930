//! The exchange of blows between two combatants.

use tracing::{debug, trace};

use super::Combatant;
use crate::config::FightConfig;
use crate::matrix::ProbabilityMatrix;

impl Combatant {
    /// Resolve a full exchange against `opponent` with the default
    /// [`FightConfig`]. Both combatants hold their results afterwards.
    pub fn fight(&mut self, opponent: &mut Combatant) {
        self.fight_with(opponent, &FightConfig::default());
    }

    /// Resolve a full exchange against `opponent`.
    ///
    /// Strikes alternate by index: this combatant's strike `i`, then the
    /// opponent's strike `i`. An opponent with first strike facing a
    /// combatant without it takes the leading role instead. Under berserk
    /// the round repeats until the rounds run out or one side is almost
    /// certainly dead. The first round is always fought, even when a prior
    /// already puts the death probability past the threshold.
    ///
    /// # Panics
    ///
    /// Panics if both combatants carry a prior distribution.
    pub fn fight_with(&mut self, opponent: &mut Combatant, config: &FightConfig) {
        if opponent.first_strike && !self.first_strike {
            opponent.fight_with(self, config);
            return;
        }

        let rounds = config.rounds(self.berserk || opponent.berserk).max(1);
        let mut matrix = ProbabilityMatrix::new(self.side_setup(), opponent.side_setup());
        self.untouched = 1.0;
        opponent.untouched = 1.0;

        let max_attacks = self.hit_chances.len().max(opponent.hit_chances.len());
        debug!(
            attacker_max_hp = self.max_hp,
            defender_max_hp = opponent.max_hp,
            attacker_strikes = self.hit_chances.len(),
            defender_strikes = opponent.hit_chances.len(),
            rounds,
            "starting exchange"
        );

        let mut remaining = rounds;
        loop {
            for i in 0..max_attacks {
                if let Some(&chance) = self.hit_chances.get(i) {
                    matrix.apply_attacker_blow(
                        self.damage,
                        chance,
                        opponent.can_be_slowed,
                        self.drains,
                    );
                    opponent.untouched *= 1.0 - chance;
                }
                if let Some(&chance) = opponent.hit_chances.get(i) {
                    matrix.apply_defender_blow(
                        opponent.damage,
                        chance,
                        self.can_be_slowed,
                        opponent.drains,
                    );
                    self.untouched *= 1.0 - chance;
                }
            }
            remaining -= 1;
            let dead = matrix.dead_probability();
            trace!(round = rounds - remaining, dead, "round complete");
            if remaining == 0 || dead >= config.kill_threshold {
                break;
            }
        }

        let dead = matrix.dead_probability();
        if rounds > 1 && remaining == 0 && dead < config.kill_threshold {
            debug!(rounds, dead, "berserk rounds exhausted before a likely kill");
        }

        let extracted = matrix.extract_distributions();
        self.hp_dist = extracted.attacker.flatten();
        self.summary = extracted.attacker;
        opponent.hp_dist = extracted.defender.flatten();
        opponent.summary = extracted.defender;

        debug!(
            rounds_fought = rounds - remaining,
            dead,
            attacker_average_hp = self.hp_dist.average_hp(),
            defender_average_hp = opponent.hp_dist.average_hp(),
            "exchange resolved"
        );
    }
}
