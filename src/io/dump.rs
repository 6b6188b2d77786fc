//! Plain-text dump of a temperature field.
//!
//! ```text
//! # Iteration 1234, is_converged true
//! # Heat flux: -1.0101
//! 0 0 1
//! 0 0.01 1
//! ...
//!
//! 0.01 0 0.98
//! ```
//!
//! One `x y T` line per cell in row-major order, with a blank line after every
//! row, which is what gnuplot's `splot ... with pm3d` expects.

use crate::sim::heat_transfer::RelaxationSolver;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Magnitudes from here on are written in scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 1e15;

/// Writes the header comments and the field of `solver` to `out`.
///
/// The heat flux line is only written when `include_flux` is set.
pub fn write_dump<W: Write>(
    out: &mut W,
    solver: &RelaxationSolver,
    include_flux: bool,
) -> std::io::Result<()> {
    writeln!(
        out,
        "# Iteration {}, is_converged {}",
        solver.iteration(),
        solver.is_converged()
    )?;
    if include_flux {
        writeln!(
            out,
            "# Heat flux: {}",
            format_value(solver.heat_flux_per_unit_length())
        )?;
    }

    let grid = solver.grid();
    for i in 0..grid.nx() {
        for j in 0..grid.ny() {
            let (x, y) = grid.position(i, j);
            writeln!(
                out,
                "{} {} {}",
                format_value(x),
                format_value(y),
                format_value(solver.temperature_at(i, j))
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the dump to a file, creating or truncating it.
pub fn write_dump_file(path: &Path, solver: &RelaxationSolver, include_flux: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_dump(&mut writer, solver, include_flux)
        .with_context(|| format!("Failed to write dump to: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush dump to: {}", path.display()))?;

    Ok(())
}

/// Keeps the insulation sentinel readable instead of 300 digits long.
fn format_value(value: f64) -> String {
    if value.is_finite() && value.abs() >= SCIENTIFIC_THRESHOLD {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::heat_transfer::{GeometricBox, InitialField, Layout, SolverConfig};
    use std::fs;
    use tempfile::tempdir;

    fn small_solver() -> RelaxationSolver {
        let config = SolverConfig {
            convergence_tolerance: 1e-3,
            initial_field: InitialField::Noise { seed: 1 },
            ..Default::default()
        };
        RelaxationSolver::new(GeometricBox::new(4, 3).unwrap(), config).unwrap()
    }

    #[test]
    fn test_dump_layout() {
        let mut solver = small_solver();
        solver.step();

        let mut buf = Vec::new();
        write_dump(&mut buf, &solver, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# Iteration 1, is_converged false");
        // 4 rows of 3 cells, each row followed by a blank line.
        assert_eq!(lines.len(), 1 + 4 * (3 + 1));
        assert_eq!(lines[1], "0 0 1");
        assert_eq!(lines[2], "0 0.25 1");
        assert_eq!(lines[4], "");
        assert!(lines[5].starts_with("0.25 0 "));
        assert_eq!(lines[13], "0.75 0 0");
        assert_eq!(lines[15], "0.75 0.5 0");
        assert!(lines.iter().all(|l| !l.starts_with("# Heat flux")));
    }

    #[test]
    fn test_dump_with_flux() {
        let mut solver = small_solver();
        assert!(solver.relax_until_converged(Some(10_000)));

        let mut buf = Vec::new();
        write_dump(&mut buf, &solver, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.ends_with("is_converged true"), "{header}");
        let flux: f64 = lines
            .next()
            .and_then(|l| l.strip_prefix("# Heat flux: "))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(flux, solver.heat_flux_per_unit_length());
    }

    #[test]
    fn test_sentinel_is_written_in_scientific_notation() {
        let layout = Layout::parse("HHH\nHIH\nCCC\n").unwrap();
        let mut solver = RelaxationSolver::new(layout, SolverConfig::default()).unwrap();
        solver.step();

        let mut buf = Vec::new();
        write_dump(&mut buf, &solver, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let centre = text.lines().nth(6).unwrap();
        assert!(centre.ends_with(" -1.7976931348623157e308"), "{centre}");

        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(1.0), "1");
    }

    #[test]
    fn test_write_dump_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("field.dat");
        let mut solver = small_solver();
        solver.step();

        write_dump_file(&path, &solver, true)?;
        let text = fs::read_to_string(&path)?;
        assert!(text.starts_with("# Iteration 1, is_converged false\n# Heat flux: "));
        assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 4);
        Ok(())
    }
}
