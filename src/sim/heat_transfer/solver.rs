use ndarray as nd;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::sim::heat_transfer::boundary::{
    BoundaryCategory, COLD_TEMPERATURE, HOT_TEMPERATURE, INSULATION_SENTINEL, UpdatePhase,
};
use crate::sim::heat_transfer::config::{InitialField, SolverConfig, SweepScheme};
use crate::sim::heat_transfer::domain::Domain;
use crate::sim::heat_transfer::error::DomainError;
use crate::sim::heat_transfer::grid::UniformGrid;

/// Lifecycle of a [`RelaxationSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Built, no step taken yet.
    Constructing,
    /// At least one step taken, residual still above tolerance.
    Iterating,
    /// Residual dropped below tolerance. Terminal.
    Converged,
}

/// What a call to [`RelaxationSolver::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// One full pass over the grid.
    Relaxed {
        iteration: usize,
        /// Largest |del^2 T| over free-air cells during this pass.
        max_residual: f64,
        converged: bool,
    },
    /// The solver had already converged; nothing was touched.
    AlreadyConverged,
}

/// Explicit relaxation of the 2D Laplace equation on a classified grid.
///
/// Each step visits every cell exactly once, in three row-major sub-passes:
///
/// 1. free-air cells get `T += c * del^2 T`, in place or from a snapshot
///    depending on [`SweepScheme`];
/// 2. fixed, zero-gradient, periodic and insulation cells;
/// 3. convex corners.
///
/// Boundary cells therefore copy or average values that were already updated
/// during the same step, and a zero-gradient cell equals its source cell
/// exactly when the step returns.
#[derive(Debug, Clone)]
pub struct RelaxationSolver {
    grid: UniformGrid,
    config: SolverConfig,
    relaxation_constant: f64,
    /// Classification cached at construction; geometry never changes.
    categories: nd::Array2<BoundaryCategory>,
    relax_cells: Vec<(usize, usize)>,
    edge_cells: Vec<(usize, usize, BoundaryCategory)>,
    corner_cells: Vec<(usize, usize, BoundaryCategory)>,
    temperature: nd::Array2<f64>,
    /// Previous field, only allocated for the Jacobi scheme.
    snapshot: Option<nd::Array2<f64>>,
    iteration: usize,
    converged: bool,
    max_residual: f64,
}

impl RelaxationSolver {
    /// Classifies every cell, checks that each rule stays inside the grid and
    /// initializes the temperature field.
    ///
    /// Boundary cells are written once before returning, so the first free-air
    /// pass already sees the fixed temperatures.
    pub fn new(domain: impl Into<Domain>, config: SolverConfig) -> Result<Self, DomainError> {
        let domain = domain.into();
        config.validate()?;

        let (nx, ny) = domain.shape();
        let grid = UniformGrid::new(nx, ny)?;
        let categories = nd::Array2::from_shape_fn((nx, ny), |(i, j)| domain.classify(i, j));

        let mut relax_cells = Vec::new();
        let mut edge_cells = Vec::new();
        let mut corner_cells = Vec::new();
        for ((i, j), &category) in categories.indexed_iter() {
            for &(di, dj) in category.neighbour_offsets() {
                if grid.offset(i, j, di, dj).is_none() {
                    return Err(DomainError::NeighbourOutsideGrid { category, i, j });
                }
            }
            match category.phase() {
                UpdatePhase::Relax => relax_cells.push((i, j)),
                UpdatePhase::Edge => edge_cells.push((i, j, category)),
                UpdatePhase::Corner => corner_cells.push((i, j, category)),
            }
        }

        let stability_limit = grid.stability_limit();
        let relaxation_constant = config.resolve_relaxation_constant(stability_limit);
        if relaxation_constant > stability_limit {
            warn!(
                relaxation_constant,
                stability_limit,
                "relaxation constant exceeds the stability limit, the update may diverge"
            );
        }

        let mut temperature = match config.initial_field {
            InitialField::Zero => nd::Array2::zeros((nx, ny)),
            InitialField::Noise { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                nd::Array2::from_shape_fn((nx, ny), |_| rng.gen_range(0.0..1.0))
            }
        };
        for &(i, j, category) in edge_cells.iter().chain(&corner_cells) {
            temperature[[i, j]] = boundary_value(&temperature, category, i, j);
        }
        let snapshot = match config.scheme {
            SweepScheme::GaussSeidel => None,
            SweepScheme::Jacobi => Some(temperature.clone()),
        };

        debug!(
            nx,
            ny,
            free_air = relax_cells.len(),
            edges = edge_cells.len(),
            corners = corner_cells.len(),
            relaxation_constant,
            "relaxation solver initialized"
        );

        Ok(Self {
            grid,
            config,
            relaxation_constant,
            categories,
            relax_cells,
            edge_cells,
            corner_cells,
            temperature,
            snapshot,
            iteration: 0,
            converged: false,
            max_residual: f64::INFINITY,
        })
    }

    /// Performs one relaxation pass, or nothing once converged.
    pub fn step(&mut self) -> StepOutcome {
        if self.converged {
            warn!(
                iteration = self.iteration,
                "step called after convergence, doing nothing"
            );
            return StepOutcome::AlreadyConverged;
        }

        self.iteration += 1;
        let max_residual = match self.config.scheme {
            SweepScheme::GaussSeidel => self.relax_in_place(),
            SweepScheme::Jacobi => self.relax_from_snapshot(),
        };
        self.apply_boundaries();

        self.max_residual = max_residual;
        if self.config.verbose && self.iteration % self.config.log_interval == 0 {
            info!(
                "#{} convergence ratio: {:.9}",
                self.iteration,
                self.residual_ratio()
            );
        }
        if max_residual < self.config.convergence_tolerance {
            self.converged = true;
            info!(iteration = self.iteration, max_residual, "relaxation converged");
        }

        StepOutcome::Relaxed {
            iteration: self.iteration,
            max_residual,
            converged: self.converged,
        }
    }

    /// Steps until converged or until `max_iterations` effective steps have
    /// been taken in total. Returns whether the solver converged.
    pub fn relax_until_converged(&mut self, max_iterations: Option<usize>) -> bool {
        while !self.converged {
            if max_iterations.is_some_and(|limit| self.iteration >= limit) {
                break;
            }
            self.step();
        }
        self.converged
    }

    /// Gauss-Seidel pass over free-air cells. Returns max |del^2 T|.
    fn relax_in_place(&mut self) -> f64 {
        let inv_h2 = 1.0 / (self.grid.spacing() * self.grid.spacing());
        let c = self.relaxation_constant;
        let mut max_residual = 0.0_f64;
        for &(i, j) in &self.relax_cells {
            let delta = laplacian(&self.temperature, i, j) * inv_h2;
            max_residual = max_residual.max(residual_magnitude(delta));
            self.temperature[[i, j]] += c * delta;
        }
        max_residual
    }

    /// Jacobi pass over free-air cells. Returns max |del^2 T|.
    fn relax_from_snapshot(&mut self) -> f64 {
        let inv_h2 = 1.0 / (self.grid.spacing() * self.grid.spacing());
        let c = self.relaxation_constant;
        let mut previous = match self.snapshot.take() {
            Some(previous) => previous,
            None => self.temperature.clone(),
        };
        previous.assign(&self.temperature);
        let mut max_residual = 0.0_f64;
        for &(i, j) in &self.relax_cells {
            let delta = laplacian(&previous, i, j) * inv_h2;
            max_residual = max_residual.max(residual_magnitude(delta));
            self.temperature[[i, j]] = previous[[i, j]] + c * delta;
        }
        self.snapshot = Some(previous);
        max_residual
    }

    fn apply_boundaries(&mut self) {
        for &(i, j, category) in self.edge_cells.iter().chain(&self.corner_cells) {
            let value = boundary_value(&self.temperature, category, i, j);
            self.temperature[[i, j]] = value;
        }
    }

    /// Row-averaged dT/dx at column `nx - 2`, by central differences.
    ///
    /// Meaningful once converged; earlier calls return an interim value.
    pub fn heat_flux_per_unit_length(&self) -> f64 {
        let (nx, ny) = self.grid.shape();
        let i = nx - 2;
        let two_h = 2.0 * self.grid.spacing();
        let integral: f64 = (0..ny)
            .map(|j| (self.temperature[[i + 1, j]] - self.temperature[[i - 1, j]]) / two_h)
            .sum();
        integral / ny as f64
    }

    pub fn state(&self) -> SolverState {
        if self.converged {
            SolverState::Converged
        } else if self.iteration == 0 {
            SolverState::Constructing
        } else {
            SolverState::Iterating
        }
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Number of effective steps taken.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Max |del^2 T| of the last effective step (infinite before the first).
    pub fn max_residual(&self) -> f64 {
        self.max_residual
    }

    /// `max_residual / convergence_tolerance`; below 1 means converged.
    pub fn residual_ratio(&self) -> f64 {
        self.max_residual / self.config.convergence_tolerance
    }

    pub fn temperature(&self) -> &nd::Array2<f64> {
        &self.temperature
    }

    pub fn temperature_at(&self, i: usize, j: usize) -> f64 {
        self.temperature[[i, j]]
    }

    pub fn category(&self, i: usize, j: usize) -> BoundaryCategory {
        self.categories[[i, j]]
    }

    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    pub fn relaxation_constant(&self) -> f64 {
        self.relaxation_constant
    }
}

/// Unscaled 5-point Laplacian at an interior cell.
fn laplacian(t: &nd::Array2<f64>, i: usize, j: usize) -> f64 {
    let centre = t[[i, j]];
    (t[[i - 1, j]] - 2.0 * centre + t[[i + 1, j]]) + (t[[i, j - 1]] - 2.0 * centre + t[[i, j + 1]])
}

/// NaN counts as infinitely far from converged.
fn residual_magnitude(delta: f64) -> f64 {
    if delta.is_nan() {
        f64::INFINITY
    } else {
        delta.abs()
    }
}

/// New value of a non-free-air cell given the current field.
fn boundary_value(t: &nd::Array2<f64>, category: BoundaryCategory, i: usize, j: usize) -> f64 {
    use BoundaryCategory::*;
    let ny = t.ncols();
    match category {
        FixedHot => HOT_TEMPERATURE,
        FixedCold => COLD_TEMPERATURE,
        // dT/dy = 0
        ZeroGradientUpper => t[[i, j - 1]],
        ZeroGradientLower => t[[i, j + 1]],
        // dT/dx = 0
        ZeroGradientLeft => t[[i + 1, j]],
        ZeroGradientRight => t[[i - 1, j]],
        CornerUpperRight => 0.5 * (t[[i - 1, j]] + t[[i, j - 1]]),
        CornerUpperLeft => 0.5 * (t[[i - 1, j]] + t[[i, j + 1]]),
        CornerLowerRight => 0.5 * (t[[i + 1, j]] + t[[i, j - 1]]),
        CornerLowerLeft => 0.5 * (t[[i + 1, j]] + t[[i, j + 1]]),
        PeriodicUpper => t[[i, 1]],
        PeriodicLower => t[[i, ny - 2]],
        InteriorInsulation => INSULATION_SENTINEL,
        FreeAir => t[[i, j]],
    }
}
