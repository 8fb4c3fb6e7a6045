//! MNA matrix assembly and solving.

use crate::error::{Result, VoltaicError};

use super::equations::Equation;
use super::unknowns::UnknownRegistry;

/// MNA matrix system Ax = z.
///
/// `A` has one row per equation and one column per unknown. The buffers are
/// kept between solves; [`MnaMatrix::reset`] resizes and zeroes them without
/// giving up their allocations.
#[derive(Debug, Default)]
pub struct MnaMatrix {
    /// System matrix A (row-major, rows x cols)
    pub a: Vec<f64>,
    /// Source vector z
    pub z: Vec<f64>,
    /// Solution vector x
    pub x: Vec<f64>,
    /// Number of equations
    pub rows: usize,
    /// Number of unknowns
    pub cols: usize,
    /// Working copy of A, overwritten by its LU or QR factors
    work: Vec<f64>,
    /// Working copy of z, permuted or reflected alongside `work`
    rhs: Vec<f64>,
    /// Largest absolute entry of each column of A
    scale: Vec<f64>,
    /// Householder vector scratch
    reflector: Vec<f64>,
    /// Pivot indices for LU decomposition
    pivots: Vec<usize>,
}

impl MnaMatrix {
    /// Create a new zeroed system with the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut matrix = Self::default();
        matrix.reset(rows, cols);
        matrix
    }

    /// Reshape the system and clear every entry to zero.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        refill(&mut self.a, rows * cols);
        refill(&mut self.z, rows);
        refill(&mut self.x, cols);
        refill(&mut self.work, rows * cols);
        refill(&mut self.rhs, rows);
        refill(&mut self.scale, cols);
        refill(&mut self.reflector, rows);
        self.pivots.clear();
        self.pivots.resize(cols, 0);
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.a[row * self.cols + col] += value;
    }

    /// Add to source vector element.
    pub fn add_source(&mut self, row: usize, value: f64) {
        self.z[row] += value;
    }

    /// Stamp an equation into `row`.
    ///
    /// Each term's coefficient is added at its unknown's column, so repeated
    /// terms for the same unknown accumulate. The equation's right-hand side
    /// goes into `z[row]`.
    pub fn stamp(&mut self, row: usize, equation: &Equation, registry: &UnknownRegistry) {
        for term in &equation.terms {
            match registry.index_of(&term.unknown) {
                Some(col) => self.add(row, col, term.coefficient),
                None => debug_assert!(false, "unregistered unknown {}", term.unknown),
            }
        }
        self.add_source(row, equation.rhs);
    }

    /// Solve the system into `x`.
    ///
    /// A square system is solved by LU decomposition with partial pivoting. A
    /// system with more rows than columns is solved in the least-squares sense
    /// by Householder QR of `A`.
    ///
    /// `pivot_tolerance` is relative: a pivot is rejected when it is no larger
    /// than `pivot_tolerance` times the largest entry of its column in `A`, so
    /// the test does not depend on the units of the column.
    pub fn solve(&mut self, pivot_tolerance: f64) -> Result<()> {
        let (rows, n) = (self.rows, self.cols);
        if rows < n {
            return Err(VoltaicError::SingularMatrix);
        }

        self.work.copy_from_slice(&self.a);
        self.rhs.copy_from_slice(&self.z);
        column_scales(&self.a, rows, n, &mut self.scale);

        if rows == n {
            factor(&mut self.work, &mut self.pivots, &self.scale, n, pivot_tolerance)?;
            substitute(&self.work, &self.pivots, &self.rhs, &mut self.x, n);
        } else {
            householder(
                &mut self.work,
                &mut self.rhs,
                &mut self.reflector,
                &self.scale,
                rows,
                n,
                pivot_tolerance,
            )?;
            self.x.copy_from_slice(&self.rhs[..n]);
            back_substitute(&self.work, &mut self.x, n);
        }

        Ok(())
    }

    /// Largest absolute entry of `Ax - z` for the current `x`.
    pub fn residual(&self) -> f64 {
        (0..self.rows)
            .map(|row| {
                let start = row * self.cols;
                let ax: f64 = self.a[start..start + self.cols]
                    .iter()
                    .zip(&self.x)
                    .map(|(a, x)| a * x)
                    .sum();
                (ax - self.z[row]).abs()
            })
            .fold(0.0, f64::max)
    }

    /// Largest absolute entry of `z`.
    pub fn source_norm(&self) -> f64 {
        self.z.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

fn refill(buffer: &mut Vec<f64>, len: usize) {
    buffer.clear();
    buffer.resize(len, 0.0);
}

fn column_scales(a: &[f64], rows: usize, n: usize, scale: &mut [f64]) {
    scale.fill(0.0);
    for r in 0..rows {
        for (s, v) in scale.iter_mut().zip(&a[r * n..(r + 1) * n]) {
            *s = s.max(v.abs());
        }
    }
}

/// LU decomposition with partial pivoting, in place.
fn factor(
    lu: &mut [f64],
    pivots: &mut [usize],
    scale: &[f64],
    n: usize,
    tolerance: f64,
) -> Result<()> {
    for (i, p) in pivots.iter_mut().enumerate() {
        *p = i;
    }

    for k in 0..n {
        // Find pivot
        let mut max_val = lu[k * n + k].abs();
        let mut max_row = k;

        for i in (k + 1)..n {
            let val = lu[i * n + k].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        // An all-zero column has scale 0 and fails here too
        if max_val <= tolerance * scale[k] {
            return Err(VoltaicError::SingularMatrix);
        }

        // Swap rows if needed
        if max_row != k {
            pivots.swap(k, max_row);
            for j in 0..n {
                lu.swap(k * n + j, max_row * n + j);
            }
        }

        // Eliminate
        let pivot = lu[k * n + k];
        for i in (k + 1)..n {
            let factor = lu[i * n + k] / pivot;
            lu[i * n + k] = factor;
            for j in (k + 1)..n {
                lu[i * n + j] -= factor * lu[k * n + j];
            }
        }
    }

    Ok(())
}

/// Forward and back substitution with a factored matrix.
fn substitute(lu: &[f64], pivots: &[usize], b: &[f64], x: &mut [f64], n: usize) {
    // Apply pivot permutation to b
    for i in 0..n {
        x[i] = b[pivots[i]];
    }

    // Forward substitution (L * y = Pb)
    for i in 0..n {
        for j in 0..i {
            x[i] -= lu[i * n + j] * x[j];
        }
    }

    back_substitute(lu, x, n);
}

/// Solve `R x = y` in place, for the upper triangle `R` stored in the first
/// `n` rows and `y` passed in through `x`.
fn back_substitute(r: &[f64], x: &mut [f64], n: usize) {
    for i in (0..n).rev() {
        let mut value = x[i];
        for j in (i + 1)..n {
            value -= r[i * n + j] * x[j];
        }
        x[i] = value / r[i * n + i];
    }
}

/// Householder QR of the `rows x n` matrix `qr`, in place.
///
/// On return the upper `n x n` triangle holds `R` and `b` holds `Qᵀb`, so the
/// least-squares solution is `R⁻¹ b[..n]`.
fn householder(
    qr: &mut [f64],
    b: &mut [f64],
    v: &mut [f64],
    scale: &[f64],
    rows: usize,
    n: usize,
    tolerance: f64,
) -> Result<()> {
    for k in 0..n {
        let norm = (k..rows)
            .map(|i| qr[i * n + k] * qr[i * n + k])
            .sum::<f64>()
            .sqrt();

        if norm <= tolerance * scale[k] {
            return Err(VoltaicError::SingularMatrix);
        }

        // Reflect column k onto -sign(x_k) * norm * e_k
        let diag = qr[k * n + k];
        let alpha = if diag > 0.0 { -norm } else { norm };
        for i in k..rows {
            v[i] = qr[i * n + k];
        }
        v[k] -= alpha;
        let v_norm2: f64 = v[k..rows].iter().map(|x| x * x).sum();

        for j in k..n {
            let dot: f64 = (k..rows).map(|i| v[i] * qr[i * n + j]).sum();
            let f = 2.0 * dot / v_norm2;
            for i in k..rows {
                qr[i * n + j] -= f * v[i];
            }
        }

        let dot: f64 = (k..rows).map(|i| v[i] * b[i]).sum();
        let f = 2.0 * dot / v_norm2;
        for i in k..rows {
            b[i] -= f * v[i];
        }
    }

    Ok(())
}
