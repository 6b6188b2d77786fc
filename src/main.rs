use anyhow::{Context, Result};
use clap::Parser;
use heatbox::io::{read_layout, read_solver_config, write_dump, write_dump_file};
use heatbox::{Domain, GeometricBox, InitialField, Partition, RelaxationSolver, SweepScheme};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{Level, info, warn};

/// Relax a 2D box to its steady-state temperature field and dump it for
/// plotting.
#[derive(Parser, Debug)]
#[command(name = "heatbox", version, about, long_about = None)]
struct Cli {
    /// Wall layout file; without one the box geometry is built from flags
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Cells along x (and y unless --ny is given)
    #[arg(short = 'n', long, default_value_t = 100, conflicts_with = "layout")]
    resolution: usize,

    /// Cells along y
    #[arg(long, conflicts_with = "layout")]
    ny: Option<usize>,

    /// Insulating inner wall as START,THICKNESS,HEIGHT
    #[arg(long, conflicts_with_all = ["layout", "periodic"])]
    partition: Option<Partition>,

    /// Wrap the y edges onto each other
    #[arg(long, conflicts_with = "layout")]
    periodic: bool,

    /// JSON solver config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Largest tolerable |del^2 T| at convergence
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Relaxation constant (defaults to the stability limit)
    #[arg(short, long)]
    relaxation: Option<f64>,

    /// Seed for the initial noise field
    #[arg(long, conflicts_with = "zero_init")]
    seed: Option<u64>,

    /// Start from T = 0 instead of noise
    #[arg(long)]
    zero_init: bool,

    /// Read the previous step only (Jacobi) instead of sweeping in place
    #[arg(long)]
    jacobi: bool,

    /// Stop after this many steps even if not converged
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Log the convergence ratio periodically
    #[arg(short, long)]
    verbose: bool,

    /// Steps between verbose status lines
    #[arg(long)]
    log_interval: Option<usize>,

    /// Leave the heat flux line out of the dump
    #[arg(long)]
    no_flux: bool,

    /// Write the dump here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => read_solver_config(path)?,
        None => Default::default(),
    };
    if let Some(tolerance) = cli.tolerance {
        config.convergence_tolerance = tolerance;
    }
    if cli.relaxation.is_some() {
        config.relaxation_constant = cli.relaxation;
    }
    if cli.verbose {
        config.verbose = true;
    }
    if let Some(interval) = cli.log_interval {
        config.log_interval = interval;
    }
    if cli.zero_init {
        config.initial_field = InitialField::Zero;
    } else if let Some(seed) = cli.seed {
        config.initial_field = InitialField::Noise { seed };
    }
    if cli.jacobi {
        config.scheme = SweepScheme::Jacobi;
    }

    let domain: Domain = match &cli.layout {
        Some(path) => read_layout(path)?.into(),
        None => {
            let mut geometry =
                GeometricBox::new(cli.resolution, cli.ny.unwrap_or(cli.resolution))?;
            if let Some(partition) = cli.partition {
                geometry = geometry.with_partition(partition)?;
            }
            if cli.periodic {
                geometry = geometry.periodic()?;
            }
            geometry.into()
        }
    };

    let mut solver = RelaxationSolver::new(domain, config).context("Failed to set up the solver")?;
    let (nx, ny) = solver.grid().shape();
    info!(
        nx,
        ny,
        relaxation_constant = solver.relaxation_constant(),
        "starting relaxation"
    );

    if !solver.relax_until_converged(cli.max_iterations) {
        warn!(
            iteration = solver.iteration(),
            residual_ratio = solver.residual_ratio(),
            "stopped before convergence, dumping the interim field"
        );
    }

    let include_flux = !cli.no_flux;
    match &cli.output {
        Some(path) => write_dump_file(path, &solver, include_flux)?,
        None => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_dump(&mut out, &solver, include_flux).context("Failed to write dump")?;
            out.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
