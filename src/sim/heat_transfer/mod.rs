//! Steady-state 2D heat conduction by explicit relaxation.
//!
//! A rectangular grid is classified cell by cell into boundary categories,
//! either from a marker layout or from box geometry, and the Laplace equation
//! is relaxed on the free-air cells until the largest residual falls below a
//! tolerance.
//!
//! # Architecture
//!
//! ```text
//! Layout / GeometricBox ──► Domain ──► RelaxationSolver ──► io::write_dump()
//!                                         │
//!                        step() / heat_flux_per_unit_length()
//! ```
//!
//! Classification is computed once when the solver is built; the solver
//! itself only sees categories, never markers.

pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod grid;
pub mod solver;

pub use boundary::{BoundaryCategory, UpdatePhase};
pub use config::{InitialField, SolverConfig, SweepScheme};
pub use domain::{Domain, GeometricBox, Layout, Partition};
pub use error::DomainError;
pub use grid::UniformGrid;
pub use solver::{RelaxationSolver, SolverState, StepOutcome};
