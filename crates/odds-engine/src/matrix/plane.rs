//! Dense probability grids over (attacker hp, defender hp).

/// Lowest row and column that may hold mass in a plane.
///
/// Bounds only ever move down. Everything strictly below `min_row` or left
/// of `min_col` is known to be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Lowest attacker hp with possible mass.
    pub min_row: usize,
    /// Lowest defender hp with possible mass.
    pub min_col: usize,
}

/// One joint distribution over attacker hp (rows) and defender hp (columns).
#[derive(Debug, Clone)]
pub struct Plane {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
    bounds: Bounds,
}

impl Plane {
    /// A massless plane. Its bounds sit past the last row and column.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
            bounds: Bounds {
                min_row: rows,
                min_col: cols,
            },
        }
    }

    /// Current bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether no cell can hold mass.
    pub fn is_empty(&self) -> bool {
        self.bounds.min_row >= self.rows || self.bounds.min_col >= self.cols
    }

    /// Mass at one cell.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    /// Sum of every cell.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Row sums: the attacker's hp marginal within this plane.
    pub fn row_marginal(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.chunks(self.cols).map(|row| row.iter().sum())
    }

    /// Column sums: the defender's hp marginal within this plane.
    pub fn col_marginal(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.cells.chunks(self.cols) {
            for (sum, cell) in sums.iter_mut().zip(row) {
                *sum += cell;
            }
        }
        sums
    }

    /// Take `fraction` of the mass at a cell and return the amount removed.
    pub(super) fn withdraw(&mut self, row: usize, col: usize, fraction: f64) -> f64 {
        let cell = &mut self.cells[row * self.cols + col];
        let moved = *cell * fraction;
        *cell -= moved;
        moved
    }

    /// Add mass at a cell, lowering the bounds to cover it.
    pub(super) fn deposit(&mut self, row: usize, col: usize, mass: f64) {
        self.cells[row * self.cols + col] += mass;
        if mass > 0.0 {
            self.lower_bounds(row, col);
        }
    }

    /// Lower the bounds to include `(row, col)`.
    pub(super) fn lower_bounds(&mut self, row: usize, col: usize) {
        self.bounds.min_row = self.bounds.min_row.min(row);
        self.bounds.min_col = self.bounds.min_col.min(col);
    }
}
