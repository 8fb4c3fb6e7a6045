//! Solve pipeline and the per-tick simulator interface.

use crate::circuit::{check_unique_ids, validate_circuit, Circuit, Connectivity};
use crate::error::{Result, VoltaicError};

use super::equations::{build_equations, EquationSet};
use super::mna::MnaMatrix;
use super::solution::Solution;
use super::unknowns::{Unknown, UnknownRegistry};
use super::{DEFAULT_PIVOT_TOLERANCE, DEFAULT_RESIDUAL_TOLERANCE};

/// What [`Simulator::step`] does when a tick's circuit cannot be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return the error to the caller.
    Propagate,
    /// Keep showing the last good solution (zeroes if there is none yet).
    #[default]
    HoldPrevious,
    /// Show every node and element of the failing circuit at zero.
    Zero,
}

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Square system or overdetermined least-squares system.
    pub equation_set: EquationSet,
    /// Pivots at or below this fraction of their column's largest entry make
    /// the matrix singular.
    pub pivot_tolerance: f64,
    /// Accepted residual, relative to `1 + max|z|`.
    pub residual_tolerance: f64,
    /// Reject negative resistances and non-finite values. Duplicate ids are
    /// rejected either way.
    pub validate: bool,
    /// Recovery used by [`Simulator::step`].
    pub failure_policy: FailurePolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            equation_set: EquationSet::Square,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
            validate: true,
            failure_policy: FailurePolicy::HoldPrevious,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the equation set handed to the linear solver.
    pub fn with_equation_set(mut self, equation_set: EquationSet) -> Self {
        self.equation_set = equation_set;
        self
    }

    /// Set the relative pivot tolerance.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    /// Set the relative residual tolerance.
    pub fn with_residual_tolerance(mut self, residual_tolerance: f64) -> Self {
        self.residual_tolerance = residual_tolerance;
        self
    }

    /// Enable or disable element validation.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the tick failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

/// Solve a circuit snapshot with the default configuration.
pub fn solve(circuit: &Circuit) -> Result<Solution> {
    solve_with(circuit, &SolverConfig::default())
}

/// Solve a circuit snapshot with a custom configuration.
pub fn solve_with(circuit: &Circuit, config: &SolverConfig) -> Result<Solution> {
    let mut matrix = MnaMatrix::default();
    solve_in(circuit, config, &mut matrix)
}

/// Full pipeline: validate, analyze, enumerate unknowns, build, stamp, solve, map.
fn solve_in(circuit: &Circuit, config: &SolverConfig, matrix: &mut MnaMatrix) -> Result<Solution> {
    let _span = tracing::debug_span!("solve", elements = circuit.element_count()).entered();

    if config.validate {
        validate_circuit(circuit)?;
    } else {
        check_unique_ids(circuit)?;
    }

    if circuit.is_empty() {
        return Ok(Solution::empty());
    }

    let connectivity = Connectivity::analyze(circuit);
    for reference in connectivity.reference_nodes() {
        tracing::trace!(%reference, "reference node");
    }

    let registry = UnknownRegistry::new(circuit, &connectivity);
    let equations = build_equations(circuit, &connectivity, config.equation_set);

    tracing::debug!(
        nodes = connectivity.node_set().len(),
        components = connectivity.component_count(),
        unknowns = registry.len(),
        equations = equations.len(),
        "assembled MNA system"
    );

    matrix.reset(equations.len(), registry.len());
    for (row, equation) in equations.iter().enumerate() {
        matrix.stamp(row, equation, &registry);
    }

    matrix.solve(config.pivot_tolerance)?;

    if let Some(index) = matrix.x.iter().position(|v| !v.is_finite()) {
        return Err(VoltaicError::NonFiniteSolution { index });
    }

    let residual = matrix.residual();
    if residual > config.residual_tolerance * (1.0 + matrix.source_norm()) {
        return Err(VoltaicError::InconsistentSystem { residual });
    }

    // Reference rows fix these at exactly zero; drop pivoting round-off.
    for &reference in connectivity.reference_nodes() {
        if let Some(index) = registry.index_of(&Unknown::Voltage(reference)) {
            matrix.x[index] = 0.0;
        }
    }

    Ok(Solution::from_vector(circuit, &registry, &matrix.x))
}

/// Per-tick circuit solver.
///
/// The host calls [`Simulator::step`] once per tick with a freshly built
/// circuit snapshot. The simulator keeps only a scratch matrix (reused between
/// ticks to avoid reallocating) and the last produced solution; nothing from a
/// previous tick influences the numbers of the next one.
#[derive(Debug)]
pub struct Simulator {
    /// Solver configuration
    config: SolverConfig,
    /// Reusable MNA scratch space
    matrix: MnaMatrix,
    /// Solution shown for the latest tick
    solution: Solution,
    /// Whether a tick has ever solved successfully
    has_good_solution: bool,
    /// Whether the latest tick fell back instead of solving
    degraded: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Create a new simulator with default configuration.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a new simulator with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            matrix: MnaMatrix::default(),
            solution: Solution::empty(),
            has_good_solution: false,
            degraded: false,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a snapshot, reusing the scratch matrix. No failure policy applies.
    pub fn solve(&mut self, circuit: &Circuit) -> Result<Solution> {
        solve_in(circuit, &self.config, &mut self.matrix)
    }

    /// Solve one tick, applying the configured [`FailurePolicy`] on failure.
    pub fn step(&mut self, circuit: &Circuit) -> Result<&Solution> {
        match self.solve(circuit) {
            Ok(solution) => {
                self.solution = solution;
                self.has_good_solution = true;
                self.degraded = false;
            }
            Err(err) => match self.config.failure_policy {
                FailurePolicy::Propagate => return Err(err),
                FailurePolicy::HoldPrevious if self.has_good_solution => {
                    tracing::warn!(error = %err, "circuit solve failed, holding previous solution");
                    self.degraded = true;
                }
                FailurePolicy::HoldPrevious | FailurePolicy::Zero => {
                    tracing::warn!(error = %err, "circuit solve failed, substituting zero solution");
                    self.solution = Solution::zeroed(circuit);
                    self.degraded = true;
                }
            },
        }
        Ok(&self.solution)
    }

    /// The solution produced by the latest [`Simulator::step`].
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Whether the latest step substituted a fallback solution.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Forget the last solution.
    pub fn reset(&mut self) {
        self.solution = Solution::empty();
        self.has_good_solution = false;
        self.degraded = false;
    }
}
