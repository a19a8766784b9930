//! Joint probability matrix over both sides' hit points.
//!
//! The matrix holds up to four [`Plane`]s, one per [`SlowState`]. Row index is
//! the attacker's hp and column index the defender's hp; row 0 and column 0
//! are the "dead" outcomes. Mass is only ever moved between cells, so the sum
//! over all planes stays one apart from rounding.
//!
//! Every mass movement goes through one transfer helper, which keeps the
//! destination plane's [`Bounds`] in step with its contents.

pub mod plane;
pub mod slow;

pub use plane::{Bounds, Plane};
pub use slow::SlowState;

use crate::distribution::{HpDistribution, HpSummary};

/// One side of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The side whose hp indexes the matrix rows.
    Attacker,
    /// The side whose hp indexes the matrix columns.
    Defender,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

/// How one side enters the matrix.
#[derive(Debug, Clone, Copy)]
pub struct SideSetup<'a> {
    /// Maximum hp, fixing the size of this side's axis.
    pub max_hp: u32,
    /// Starting hp when there is no prior distribution.
    pub hp: u32,
    /// Whether the opponent can slow this side during the exchange.
    pub can_be_slowed: bool,
    /// Distribution carried over from an earlier fight this turn.
    pub prior: Option<&'a HpSummary>,
}

/// Both sides' marginal hp distributions after an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDistributions {
    /// The row side's distribution.
    pub attacker: HpSummary,
    /// The column side's distribution.
    pub defender: HpSummary,
}

/// Joint distribution over (attacker hp, defender hp) for every slow state.
#[derive(Debug, Clone)]
pub struct ProbabilityMatrix {
    rows: usize,
    cols: usize,
    planes: [Option<Plane>; 4],
}

impl ProbabilityMatrix {
    /// Allocate the reachable planes and place the starting mass.
    ///
    /// Without priors all mass starts at `(attacker.hp, defender.hp)`. A side
    /// with a prior instead has its distribution spread along its axis, with
    /// the slowed share placed on the matching slowed plane.
    ///
    /// # Panics
    ///
    /// Panics if both sides carry a prior, if a current hp exceeds its
    /// maximum, or if a prior is sized for a different maximum.
    pub fn new(attacker: SideSetup<'_>, defender: SideSetup<'_>) -> Self {
        assert!(
            attacker.prior.is_none() || defender.prior.is_none(),
            "only one side may continue an earlier fight"
        );
        for setup in [&attacker, &defender] {
            assert!(
                setup.hp <= setup.max_hp,
                "hp {} exceeds max hp {}",
                setup.hp,
                setup.max_hp
            );
            if let Some(prior) = setup.prior {
                assert_eq!(
                    prior.max_hp(),
                    setup.max_hp,
                    "prior distribution sized for a different max hp"
                );
            }
        }

        let rows = attacker.max_hp as usize + 1;
        let cols = defender.max_hp as usize + 1;
        let attacker_slowable = attacker.can_be_slowed || has_slowed_prior(&attacker);
        let defender_slowable = defender.can_be_slowed || has_slowed_prior(&defender);

        let mut matrix = Self {
            rows,
            cols,
            planes: [None, None, None, None],
        };
        for state in SlowState::DESCENDING {
            let reachable = (attacker_slowable || !state.is_slowed(Side::Attacker))
                && (defender_slowable || !state.is_slowed(Side::Defender));
            if reachable {
                matrix.planes[state.index()] = Some(Plane::empty(rows, cols));
            }
        }

        match (attacker.prior, defender.prior) {
            (Some(prior), _) => matrix.seed_prior(Side::Attacker, prior, defender.hp as usize),
            (_, Some(prior)) => matrix.seed_prior(Side::Defender, prior, attacker.hp as usize),
            (None, None) => {
                let plane = matrix.plane_mut(SlowState::Neither);
                plane.deposit(attacker.hp as usize, defender.hp as usize, 1.0);
            }
        }
        matrix
    }

    /// Apply one attacker strike to every live plane.
    ///
    /// `damage` is the unslowed damage; planes where the attacker is slowed
    /// deal half of it. With `drains`, the striker regains half the damage
    /// actually dealt, capped at its max hp.
    pub fn apply_attacker_blow(
        &mut self,
        damage: u32,
        hit_chance: f64,
        attacker_causes_slow: bool,
        attacker_drains: bool,
    ) {
        self.apply_blow(
            Side::Attacker,
            damage,
            hit_chance,
            attacker_causes_slow,
            attacker_drains,
        );
    }

    /// Apply one defender strike to every live plane. Mirror of
    /// [`Self::apply_attacker_blow`] along the other axis.
    pub fn apply_defender_blow(
        &mut self,
        damage: u32,
        hit_chance: f64,
        defender_causes_slow: bool,
        defender_drains: bool,
    ) {
        self.apply_blow(
            Side::Defender,
            damage,
            hit_chance,
            defender_causes_slow,
            defender_drains,
        );
    }

    /// Probability that at least one side is dead.
    pub fn dead_probability(&self) -> f64 {
        let mut dead = 0.0;
        for plane in self.planes.iter().flatten() {
            let bounds = plane.bounds();
            if bounds.min_row == 0 {
                dead += (bounds.min_col..self.cols)
                    .map(|col| plane.get(0, col))
                    .sum::<f64>();
            }
            if bounds.min_col == 0 {
                dead += (bounds.min_row.max(1)..self.rows)
                    .map(|row| plane.get(row, 0))
                    .sum::<f64>();
            }
        }
        dead
    }

    /// Collapse the planes into each side's hp marginals, split by whether
    /// that side is slowed.
    pub fn extract_distributions(&self) -> ExtractedDistributions {
        let mut attacker = self.empty_summary(Side::Attacker);
        let mut defender = self.empty_summary(Side::Defender);

        for state in SlowState::DESCENDING {
            let Some(plane) = self.plane(state) else {
                continue;
            };
            let target = pick_variant(&mut attacker, state.is_slowed(Side::Attacker));
            for (hp, mass) in plane.row_marginal().enumerate() {
                target.add_mass(hp, mass);
            }
            let target = pick_variant(&mut defender, state.is_slowed(Side::Defender));
            for (hp, mass) in plane.col_marginal().into_iter().enumerate() {
                target.add_mass(hp, mass);
            }
        }

        ExtractedDistributions { attacker, defender }
    }

    /// The plane for `state`, if it was allocated.
    pub fn plane(&self, state: SlowState) -> Option<&Plane> {
        self.planes[state.index()].as_ref()
    }

    /// Sum of all mass across every plane.
    pub fn total_mass(&self) -> f64 {
        self.planes.iter().flatten().map(Plane::total).sum()
    }

    fn apply_blow(&mut self, striker: Side, damage: u32, hit_chance: f64, slows: bool, drains: bool) {
        for src in SlowState::DESCENDING {
            let Some(plane) = self.plane(src) else {
                continue;
            };
            if plane.is_empty() {
                continue;
            }
            let bounds = plane.bounds();
            let dst = if slows {
                src.with_slowed(striker.opponent())
            } else {
                src
            };
            let actual = if src.is_slowed(striker) {
                damage / 2
            } else {
                damage
            };
            let actual = actual as usize;
            let heal = if drains { actual / 2 } else { 0 };
            self.shift(striker, src, dst, bounds, actual, heal, hit_chance);
        }
    }

    /// Move `hit_chance` of every live cell in `src` to `dst`, with the
    /// target losing `damage` and the striker regaining `heal`.
    ///
    /// Striker hp is walked high to low and target hp low to high, so when
    /// `src == dst` mass always lands in a cell that has already been visited.
    #[allow(clippy::too_many_arguments)]
    fn shift(
        &mut self,
        striker: Side,
        src: SlowState,
        dst: SlowState,
        bounds: Bounds,
        damage: usize,
        heal: usize,
        hit_chance: f64,
    ) {
        let (striker_max, target_max, striker_min, target_min) = match striker {
            Side::Attacker => (self.rows - 1, self.cols - 1, bounds.min_row, bounds.min_col),
            Side::Defender => (self.cols - 1, self.rows - 1, bounds.min_col, bounds.min_row),
        };
        // Dead sides neither strike nor get struck.
        for striker_hp in (striker_min.max(1)..=striker_max).rev() {
            let healed = (striker_hp + heal).min(striker_max);
            for target_hp in target_min.max(1)..=target_max {
                let from = cell(striker, striker_hp, target_hp);
                let to = cell(striker, healed, target_hp.saturating_sub(damage));
                self.transfer(src, dst, from, to, hit_chance);
            }
        }
    }

    /// Move `fraction` of the mass at `from` in `src` to `to` in `dst`.
    fn transfer(
        &mut self,
        src: SlowState,
        dst: SlowState,
        from: (usize, usize),
        to: (usize, usize),
        fraction: f64,
    ) {
        let moved = self.plane_mut(src).withdraw(from.0, from.1, fraction);
        if moved > 0.0 {
            self.plane_mut(dst).deposit(to.0, to.1, moved);
        }
    }

    fn seed_prior(&mut self, side: Side, prior: &HpSummary, other_hp: usize) {
        let variants = [
            (false, Some(&prior.unslowed)),
            (true, prior.slowed.as_ref()),
        ];
        for (slowed, dist) in variants {
            let Some(dist) = dist else {
                continue;
            };
            let state = match side {
                Side::Attacker => SlowState::new(slowed, false),
                Side::Defender => SlowState::new(false, slowed),
            };
            let plane = self.plane_mut(state);
            for (hp, p) in dist.iter() {
                let (row, col) = cell(side, hp as usize, other_hp);
                plane.deposit(row, col, p);
            }
            // The prior may place mass anywhere on its axis.
            let (row, col) = cell(side, 0, other_hp);
            plane.lower_bounds(row, col);
        }
    }

    fn empty_summary(&self, side: Side) -> HpSummary {
        let len = match side {
            Side::Attacker => self.rows,
            Side::Defender => self.cols,
        };
        let max_hp = (len - 1) as u32;
        let slowed_allocated = SlowState::DESCENDING
            .iter()
            .any(|&s| s.is_slowed(side) && self.plane(s).is_some());
        HpSummary {
            unslowed: HpDistribution::zeros(max_hp),
            slowed: slowed_allocated.then(|| HpDistribution::zeros(max_hp)),
        }
    }

    /// Mutable access to a plane, allocating it on first use.
    fn plane_mut(&mut self, state: SlowState) -> &mut Plane {
        let (rows, cols) = (self.rows, self.cols);
        self.planes[state.index()].get_or_insert_with(|| Plane::empty(rows, cols))
    }
}

fn has_slowed_prior(setup: &SideSetup<'_>) -> bool {
    setup.prior.is_some_and(|p| p.slowed.is_some())
}

/// Matrix coordinates for a (striker hp, target hp) pair.
fn cell(striker: Side, striker_hp: usize, target_hp: usize) -> (usize, usize) {
    match striker {
        Side::Attacker => (striker_hp, target_hp),
        Side::Defender => (target_hp, striker_hp),
    }
}

fn pick_variant(summary: &mut HpSummary, slowed: bool) -> &mut HpDistribution {
    match (slowed, summary.slowed.as_mut()) {
        (true, Some(dist)) => dist,
        _ => &mut summary.unslowed,
    }
}
