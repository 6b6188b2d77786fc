use serde::Deserialize;

use crate::sim::heat_transfer::error::DomainError;

/// How the temperature field is filled before the first step.
///
/// Boundary cells are overwritten on every step, so the choice only changes
/// how many iterations convergence takes, not the converged field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialField {
    /// T = 0 everywhere.
    Zero,
    /// Independent uniform noise in `[0, 1)` from a seeded generator.
    Noise { seed: u64 },
}

impl Default for InitialField {
    fn default() -> Self {
        InitialField::Noise { seed: 0 }
    }
}

/// Order in which free-air cells see their neighbours within one step.
///
/// Both schemes share the same fixed point but converge at different rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepScheme {
    /// In-place sweep: later cells read neighbours already updated this step.
    #[default]
    GaussSeidel,
    /// Every free-air cell reads the field as it was at the start of the step.
    Jacobi,
}

/// Construction-time settings of a [`super::RelaxationSolver`].
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Largest tolerable |del^2 T| over free-air cells at convergence.
    pub convergence_tolerance: f64,
    /// Step size multiplier of the explicit update.
    ///
    /// `None` uses the stability limit of the grid, `0.25 * spacing^2`.
    pub relaxation_constant: Option<f64>,
    /// Emit a status line every `log_interval` iterations.
    pub verbose: bool,
    pub log_interval: usize,
    pub initial_field: InitialField,
    pub scheme: SweepScheme,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-4,
            relaxation_constant: None,
            verbose: false,
            log_interval: 1000,
            initial_field: InitialField::default(),
            scheme: SweepScheme::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.0) {
            return Err(DomainError::InvalidConfig(format!(
                "convergence tolerance must be finite and positive, got {}",
                self.convergence_tolerance
            )));
        }
        if let Some(c) = self.relaxation_constant {
            if !(c.is_finite() && c > 0.0) {
                return Err(DomainError::InvalidConfig(format!(
                    "relaxation constant must be finite and positive, got {c}"
                )));
            }
        }
        if self.log_interval == 0 {
            return Err(DomainError::InvalidConfig(
                "log interval must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Relaxation constant to use on a grid with the given stability limit.
    pub fn resolve_relaxation_constant(&self, stability_limit: f64) -> f64 {
        self.relaxation_constant.unwrap_or(stability_limit)
    }
}
