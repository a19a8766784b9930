//! Exact combat outcome probabilities for two-party exchanges.
//!
//! Given two combatants' weapons (damage, strike count, accuracy, and the
//! slow, drain, berserk, swarm, and first-strike specials), computes the
//! exact distribution over each side's remaining hit points after a full
//! exchange of blows, plus the chance that each side went untouched.
//!
//! The work happens in a [`ProbabilityMatrix`] holding the joint
//! distribution over both sides' hp, one plane per slow state. A
//! [`Combatant`] drives the matrix through the exchange. The [`battle`]
//! module wraps both behind plain records for callers that want a single
//! validated call.

/// Record-level API: stats in, outcomes out.
pub mod battle;
/// Per-side weapon configuration and the exchange driver.
pub mod combatant;
/// Tuning constants for an exchange.
pub mod config;
/// Hit-point distributions and summary statistics.
pub mod distribution;
/// Error types for input validation.
pub mod error;
/// Joint hp distribution over both sides, split by slow state.
pub mod matrix;
/// Input checks mirroring the kernel's preconditions.
pub mod validate;

pub use battle::{
    BattleOutcome, CombatantStats, SideOutcome, simulate, simulate_sequence, simulate_with,
};
pub use combatant::Combatant;
pub use config::FightConfig;
pub use distribution::{HpDistribution, HpSummary};
pub use error::{OddsError, OddsResult};
pub use matrix::{ProbabilityMatrix, Side, SideSetup, SlowState};
pub use validate::{MAX_SUPPORTED_HP, MAX_SUPPORTED_STRIKES, validate_pair, validate_stats};
