//! File I/O around the relaxation solver.
//!
//! Reading wall layouts and solver configs, and writing the converged field
//! in a form gnuplot can draw as a heatmap.

pub mod config;
pub mod dump;
pub mod layout;

pub use config::read_solver_config;
pub use dump::{write_dump, write_dump_file};
pub use layout::{read_layout, write_layout};
