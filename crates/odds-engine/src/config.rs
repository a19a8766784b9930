/// Tuning for a single exchange of blows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FightConfig {
    /// Rounds fought when either side is berserk. Ordinary fights last one round.
    pub berserk_rounds: u32,
    /// Combined death probability at which further berserk rounds are skipped.
    pub kill_threshold: f64,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            berserk_rounds: 30,
            kill_threshold: 0.99,
        }
    }
}

impl FightConfig {
    /// Set the number of rounds fought under berserk.
    pub fn with_berserk_rounds(mut self, rounds: u32) -> Self {
        self.berserk_rounds = rounds;
        self
    }

    /// Set the death probability that ends a berserk exchange early.
    pub fn with_kill_threshold(mut self, threshold: f64) -> Self {
        self.kill_threshold = threshold;
        self
    }

    /// Rounds to fight given whether either side is berserk.
    pub fn rounds(&self, berserk: bool) -> u32 {
        if berserk { self.berserk_rounds } else { 1 }
    }
}
