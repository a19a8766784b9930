//! Property tests over randomly generated combatants.

use odds_engine::{
    Combatant, CombatantStats, ProbabilityMatrix, SideSetup, simulate,
};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn stats_strategy() -> impl Strategy<Value = CombatantStats> {
    (
        1u32..=40,
        0u32..=4,
        0u32..=15,
        0.0f64..=1.0,
        any::<[bool; 6]>(),
    )
        .prop_flat_map(|(max_hp, strikes, damage, hit_chance, flags)| {
            (1..=max_hp).prop_map(move |hp| CombatantStats {
                slowed: flags[0],
                drains: flags[1],
                causes_slow: flags[2],
                berserk: flags[3],
                swarm: flags[4],
                first_strike: flags[5],
                ..CombatantStats::new(hp, max_hp, strikes, damage, hit_chance)
            })
        })
}

#[derive(Debug, Clone)]
struct Blow {
    by_attacker: bool,
    damage: u32,
    hit_chance: f64,
    slows: bool,
    drains: bool,
}

fn blow_strategy() -> impl Strategy<Value = Blow> {
    (any::<bool>(), 0u32..=12, 0.0f64..=1.0, any::<bool>(), any::<bool>()).prop_map(
        |(by_attacker, damage, hit_chance, slows, drains)| Blow {
            by_attacker,
            damage,
            hit_chance,
            slows,
            drains,
        },
    )
}

proptest! {
    #[test]
    fn outcomes_are_normalized(a in stats_strategy(), b in stats_strategy()) {
        let out = simulate(&a, &b).unwrap();
        prop_assert!(out.attacker.hp_distribution.is_normalized(EPS));
        prop_assert!(out.defender.hp_distribution.is_normalized(EPS));
        prop_assert_eq!(out.attacker.hp_distribution.max_hp(), a.max_hp);
        prop_assert_eq!(out.defender.hp_distribution.max_hp(), b.max_hp);
        prop_assert!((0.0..=1.0 + EPS).contains(&out.attacker.untouched));
        prop_assert!((0.0..=1.0 + EPS).contains(&out.defender.untouched));
    }

    #[test]
    fn drain_never_exceeds_max_hp(a in stats_strategy(), b in stats_strategy()) {
        let mut a = a;
        a.drains = true;
        a.berserk = true;
        let out = simulate(&a, &b).unwrap();
        let d = &out.attacker.hp_distribution;
        prop_assert!(d.best_case_hp().unwrap_or(0) <= a.max_hp);
        prop_assert!(d.is_normalized(EPS));
        prop_assert!(out.attacker.average_hp <= f64::from(a.max_hp) + EPS);
    }

    #[test]
    fn dead_probability_never_decreases(
        a_max in 1u32..=30,
        b_max in 1u32..=30,
        blows in proptest::collection::vec(blow_strategy(), 1..20),
    ) {
        let setup = |max_hp| SideSetup {
            max_hp,
            hp: max_hp,
            can_be_slowed: true,
            prior: None,
        };
        let mut matrix = ProbabilityMatrix::new(setup(a_max), setup(b_max));
        let mut last = matrix.dead_probability();
        for blow in &blows {
            if blow.by_attacker {
                matrix.apply_attacker_blow(blow.damage, blow.hit_chance, blow.slows, blow.drains);
            } else {
                matrix.apply_defender_blow(blow.damage, blow.hit_chance, blow.slows, blow.drains);
            }
            let dead = matrix.dead_probability();
            prop_assert!(dead + EPS >= last, "dead probability fell from {} to {}", last, dead);
            prop_assert!((matrix.total_mass() - 1.0).abs() < EPS);
            last = dead;
        }
        let out = matrix.extract_distributions();
        prop_assert!((out.attacker.total() - 1.0).abs() < EPS);
        prop_assert!((out.defender.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn first_strike_call_order_is_irrelevant(a in stats_strategy(), b in stats_strategy()) {
        let mut a = a;
        let mut b = b;
        a.first_strike = true;
        b.first_strike = false;

        let mut a1 = a.to_combatant(&b);
        let mut b1 = b.to_combatant(&a);
        a1.fight(&mut b1);

        let mut a2 = a.to_combatant(&b);
        let mut b2 = b.to_combatant(&a);
        b2.fight(&mut a2);

        prop_assert_eq!(a1.hp_distribution(), a2.hp_distribution());
        prop_assert_eq!(b1.hp_distribution(), b2.hp_distribution());
        prop_assert_eq!(a1.untouched(), a2.untouched());
    }

    #[test]
    fn single_strike_is_binomial(
        max_hp in 1u32..=40,
        damage in 0u32..=50,
        hit_chance in 0.0f64..=1.0,
    ) {
        let attacker = CombatantStats::new(10, 10, 1, damage, hit_chance);
        let defender = CombatantStats::new(max_hp, max_hp, 0, 0, 0.0);
        let out = simulate(&attacker, &defender).unwrap();
        let d = &out.defender.hp_distribution;
        let hit_hp = max_hp.saturating_sub(damage);
        if hit_hp == max_hp {
            prop_assert!((d.probability(max_hp) - 1.0).abs() < EPS);
        } else {
            prop_assert!((d.probability(hit_hp) - hit_chance).abs() < EPS);
            prop_assert!((d.probability(max_hp) - (1.0 - hit_chance)).abs() < EPS);
        }
    }

    #[test]
    fn swarm_strikes_span_zero_to_base(max_hp in 1u32..=100, strikes in 0u32..=6) {
        let mut c = Combatant::new(max_hp, max_hp, false);
        c.set_weapon(strikes, false, false, true, false);
        prop_assert_eq!(c.num_attacks_at(max_hp), strikes);
        prop_assert_eq!(c.num_attacks_at(0), 0);
        for hp in 1..max_hp {
            prop_assert!(c.num_attacks_at(hp) <= c.num_attacks_at(hp + 1));
        }
    }
}
