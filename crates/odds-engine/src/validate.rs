//! Input checks for the record-level API.
//!
//! The kernel asserts its preconditions. These functions report the same
//! conditions as [`OddsError`]s so that a caller holding untrusted records
//! can reject them before any grid is allocated.

use crate::battle::CombatantStats;
use crate::distribution::HpSummary;
use crate::error::{OddsError, OddsResult};

/// Largest max hp the engine will allocate a matrix axis for.
pub const MAX_SUPPORTED_HP: u32 = 1000;

/// Largest strike count per round a weapon may declare.
pub const MAX_SUPPORTED_STRIKES: u32 = 1000;

/// How far a prior's total mass may drift from one.
pub const PRIOR_TOLERANCE: f64 = 1e-6;

/// Check a pair of records about to fight each other.
pub fn validate_pair(attacker: &CombatantStats, defender: &CombatantStats) -> OddsResult<()> {
    validate_stats(attacker, "attacker")?;
    validate_stats(defender, "defender")?;
    if attacker.prior.is_some() && defender.prior.is_some() {
        return Err(OddsError::BothPriors);
    }
    Ok(())
}

/// Check one record in isolation.
pub fn validate_stats(stats: &CombatantStats, side: &'static str) -> OddsResult<()> {
    if stats.max_hp == 0 {
        return Err(OddsError::ZeroMaxHp { side });
    }
    if stats.max_hp > MAX_SUPPORTED_HP {
        return Err(OddsError::HpTooLarge {
            side,
            max_hp: stats.max_hp,
            limit: MAX_SUPPORTED_HP,
        });
    }
    if stats.hp > stats.max_hp {
        return Err(OddsError::HpExceedsMax {
            side,
            hp: stats.hp,
            max_hp: stats.max_hp,
        });
    }
    if stats.strikes > MAX_SUPPORTED_STRIKES {
        return Err(OddsError::TooManyStrikes {
            side,
            strikes: stats.strikes,
            limit: MAX_SUPPORTED_STRIKES,
        });
    }
    if !(0.0..=1.0).contains(&stats.hit_chance) {
        return Err(OddsError::InvalidHitChance {
            side,
            chance: stats.hit_chance,
        });
    }
    if let Some(prior) = &stats.prior {
        validate_prior(prior, stats.max_hp, side)?;
    }
    Ok(())
}

/// Check a carried-forward distribution against the side's max hp.
pub fn validate_prior(prior: &HpSummary, max_hp: u32, side: &'static str) -> OddsResult<()> {
    let expected = max_hp as usize + 1;
    let variants = std::iter::once(&prior.unslowed).chain(prior.slowed.as_ref());
    for dist in variants {
        let len = dist.as_slice().len();
        if len != expected {
            return Err(OddsError::PriorLengthMismatch {
                side,
                len,
                expected,
            });
        }
        if let Some((hp, value)) = dist.iter().find(|&(_, p)| !(0.0..=1.0).contains(&p)) {
            return Err(OddsError::InvalidPriorEntry { side, hp, value });
        }
    }
    let total = prior.total();
    if (total - 1.0).abs() > PRIOR_TOLERANCE {
        return Err(OddsError::PriorNotNormalized { side, total });
    }
    if prior.alive_probability() <= 0.0 {
        return Err(OddsError::PriorCertainDeath { side });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::HpDistribution;

    fn stats() -> CombatantStats {
        CombatantStats::new(10, 10, 2, 5, 0.5)
    }

    #[test]
    fn accepts_well_formed_pair() {
        assert!(validate_pair(&stats(), &stats()).is_ok());
    }

    #[test]
    fn rejects_hp_above_max() {
        let mut s = stats();
        s.hp = 11;
        assert_eq!(
            validate_stats(&s, "attacker"),
            Err(OddsError::HpExceedsMax {
                side: "attacker",
                hp: 11,
                max_hp: 10
            })
        );
    }

    #[test]
    fn rejects_zero_and_oversized_max_hp() {
        let mut s = stats();
        s.hp = 0;
        s.max_hp = 0;
        assert_eq!(
            validate_stats(&s, "defender"),
            Err(OddsError::ZeroMaxHp { side: "defender" })
        );
        s.max_hp = MAX_SUPPORTED_HP + 1;
        assert!(matches!(
            validate_stats(&s, "defender"),
            Err(OddsError::HpTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_bad_hit_chance() {
        for chance in [-0.1, 1.01, f64::NAN] {
            let mut s = stats();
            s.hit_chance = chance;
            assert!(matches!(
                validate_stats(&s, "attacker"),
                Err(OddsError::InvalidHitChance { .. })
            ));
        }
    }

    #[test]
    fn rejects_malformed_priors() {
        let short = HpSummary::unslowed(HpDistribution::point(3, 5));
        assert!(matches!(
            validate_prior(&short, 10, "attacker"),
            Err(OddsError::PriorLengthMismatch { len: 6, .. })
        ));

        let light = HpSummary::unslowed(HpDistribution::from_probabilities(vec![0.2, 0.3]));
        assert!(matches!(
            validate_prior(&light, 1, "attacker"),
            Err(OddsError::PriorNotNormalized { .. })
        ));

        let dead = HpSummary::unslowed(HpDistribution::point(0, 4));
        assert_eq!(
            validate_prior(&dead, 4, "defender"),
            Err(OddsError::PriorCertainDeath { side: "defender" })
        );
    }

    #[test]
    fn rejects_two_priors() {
        let prior = HpSummary::unslowed(HpDistribution::point(10, 10));
        let with_prior = CombatantStats {
            prior: Some(prior),
            ..stats()
        };
        assert_eq!(
            validate_pair(&with_prior, &with_prior),
            Err(OddsError::BothPriors)
        );
    }

    #[test]
    fn rejects_oversized_strike_counts() {
        let mut s = stats();
        s.swarm = true;
        s.max_hp = 1000;
        s.hp = 1;
        s.strikes = 5_000_000;
        assert_eq!(
            validate_stats(&s, "attacker"),
            Err(OddsError::TooManyStrikes {
                side: "attacker",
                strikes: 5_000_000,
                limit: MAX_SUPPORTED_STRIKES
            })
        );
        s.strikes = MAX_SUPPORTED_STRIKES;
        assert!(validate_stats(&s, "attacker").is_ok());
    }

    #[test]
    fn rejects_prior_entries_outside_unit_range() {
        let nan = HpSummary::unslowed(HpDistribution::from_probabilities(vec![
            0.0,
            f64::NAN,
            1.0,
        ]));
        assert!(matches!(
            validate_prior(&nan, 2, "defender"),
            Err(OddsError::InvalidPriorEntry { hp: 1, .. })
        ));

        let negative =
            HpSummary::unslowed(HpDistribution::from_probabilities(vec![-0.5, 0.0, 1.5]));
        assert!(matches!(
            validate_prior(&negative, 2, "defender"),
            Err(OddsError::InvalidPriorEntry { hp: 0, value, .. }) if value == -0.5
        ));

        let slowed_bad = HpSummary {
            unslowed: HpDistribution::from_probabilities(vec![0.0, 0.5, 0.0]),
            slowed: Some(HpDistribution::from_probabilities(vec![0.0, 0.0, f64::INFINITY])),
        };
        assert!(matches!(
            validate_prior(&slowed_bad, 2, "attacker"),
            Err(OddsError::InvalidPriorEntry { hp: 2, .. })
        ));
    }
}
