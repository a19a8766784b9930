//! Error types for the odds engine.
//!
//! The kernel itself treats malformed input as a broken precondition and
//! panics. These errors are produced by [`crate::validate`] so that callers
//! holding untrusted records can reject them before any grid is allocated.

/// Errors that can occur when validating combat inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsError {
    /// A combatant was declared with a maximum of zero hit points.
    #[error("{side}: max hp must be at least 1")]
    ZeroMaxHp {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
    },

    /// Current hit points exceed the declared maximum.
    #[error("{side}: hp {hp} exceeds max hp {max_hp}")]
    HpExceedsMax {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
        /// The offending current hp.
        hp: u32,
        /// The declared maximum.
        max_hp: u32,
    },

    /// Maximum hit points are larger than the engine will allocate for.
    #[error("{side}: max hp {max_hp} exceeds supported limit {limit}")]
    HpTooLarge {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
        /// The declared maximum.
        max_hp: u32,
        /// The largest supported maximum.
        limit: u32,
    },

    /// A weapon strikes more often per round than the engine supports.
    #[error("{side}: {strikes} strikes exceeds supported limit {limit}")]
    TooManyStrikes {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
        /// The declared strike count.
        strikes: u32,
        /// The largest supported strike count.
        limit: u32,
    },

    /// A hit chance is NaN or outside `[0, 1]`.
    #[error("{side}: hit chance {chance} is outside [0, 1]")]
    InvalidHitChance {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
        /// The offending value.
        chance: f64,
    },

    /// A carried-forward distribution does not have `max_hp + 1` entries.
    #[error("{side}: prior distribution has {len} entries, expected {expected}")]
    PriorLengthMismatch {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
        /// Length of the supplied distribution.
        len: usize,
        /// Required length.
        expected: usize,
    },

    /// A carried-forward distribution holds a probability that is NaN,
    /// infinite, or outside `[0, 1]`.
    #[error("{side}: prior probability {value} at hp {hp} is outside [0, 1]")]
    InvalidPriorEntry {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
        /// Hit points the entry belongs to.
        hp: u32,
        /// The offending value.
        value: f64,
    },

    /// A carried-forward distribution does not sum to one.
    #[error("{side}: prior distribution sums to {total}, expected 1")]
    PriorNotNormalized {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
        /// The observed total mass.
        total: f64,
    },

    /// A carried-forward distribution leaves the combatant certainly dead.
    #[error("{side}: prior distribution leaves no chance of being alive")]
    PriorCertainDeath {
        /// Which side of the exchange the record belongs to.
        side: &'static str,
    },

    /// Both sides carried a prior distribution into the same fight.
    #[error("only one side of a fight may carry a prior distribution")]
    BothPriors,

    /// A sequence of fights was requested with no opponents.
    #[error("a fight sequence needs at least one opponent")]
    EmptySequence,
}

/// Convenience result type for odds operations.
pub type OddsResult<T> = Result<T, OddsError>;
