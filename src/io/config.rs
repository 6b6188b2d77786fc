use crate::sim::heat_transfer::SolverConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a [`SolverConfig`] from a JSON file and validates it.
///
/// Fields missing from the file keep their defaults.
pub fn read_solver_config(path: &Path) -> Result<SolverConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config: {}", path.display()))?;
    let reader = BufReader::new(file);

    let config: SolverConfig = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse config from: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config in: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::heat_transfer::{InitialField, SweepScheme};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_solver_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("solver.json");
        fs::write(
            &path,
            r#"{ "convergence_tolerance": 0.01, "verbose": true, "log_interval": 50,
                 "initial_field": { "kind": "zero" }, "scheme": "gauss_seidel" }"#,
        )?;

        let config = read_solver_config(&path)?;
        assert_eq!(config.convergence_tolerance, 0.01);
        assert!(config.verbose);
        assert_eq!(config.log_interval, 50);
        assert_eq!(config.initial_field, InitialField::Zero);
        assert_eq!(config.scheme, SweepScheme::GaussSeidel);
        assert_eq!(config.relaxation_constant, None);
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("solver.json");
        fs::write(&path, r#"{ "convergence_tolerance": -1.0 }"#)?;
        assert!(read_solver_config(&path).is_err());

        fs::write(&path, r#"{ "scheme": "multigrid" }"#)?;
        assert!(read_solver_config(&path).is_err());
        Ok(())
    }
}
