//! Steady-state heat conduction in a 2D box.
//!
//! The solver relaxes the Laplace equation on a uniform grid whose cells are
//! classified into fixed-temperature, zero-gradient, periodic, corner,
//! insulation and free-air cells.
//!
//! ```no_run
//! use heatbox::{GeometricBox, RelaxationSolver, SolverConfig};
//!
//! let geometry = GeometricBox::square(50).unwrap();
//! let mut solver = RelaxationSolver::new(geometry, SolverConfig::default()).unwrap();
//! while !solver.is_converged() {
//!     solver.step();
//! }
//! println!("heat flux: {}", solver.heat_flux_per_unit_length());
//! ```

pub mod io;
pub mod sim;

// Prelude
pub use sim::heat_transfer::{
    BoundaryCategory, Domain, DomainError, GeometricBox, InitialField, Layout, Partition,
    RelaxationSolver, SolverConfig, SolverState, StepOutcome, SweepScheme, UniformGrid,
};
