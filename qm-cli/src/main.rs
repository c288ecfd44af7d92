//! QMind - state-vector quantum circuit simulator
//! Command-line interface for running circuit files and templates

mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use qm_circuit::{bell, ghz, qft, BellState, Circuit, CircuitError, CircuitRecord};
use qm_core::{EngineConfig, QmError, HARD_MAX_QUBITS};
use qm_engine::{MeasurementOutcome, StateEngine, StateSnapshot};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qmind")]
#[command(author = "QMind Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "QMind - state-vector quantum circuit simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Opções de saída e execução compartilhadas
#[derive(clap::Args, Debug, Clone)]
struct RunOptions {
    /// Seed for measurement and shot sampling (entropy when absent)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Sample N shots from the final distribution (no collapse)
    #[arg(long, value_name = "N")]
    shots: Option<usize>,

    /// Measure these qubits after running (comma-separated, empty = all)
    #[arg(long, value_name = "Q,..", value_delimiter = ',', num_args = 0..)]
    measure: Option<Vec<usize>>,

    /// Print Bloch vectors for every qubit
    #[arg(long)]
    bloch: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,

    /// Override the maximum register size
    #[arg(long, value_name = "N", env = "QMIND_MAX_QUBITS")]
    max_qubits: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a circuit file (.json or .toml)
    Run {
        /// Circuit record file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Prepare and show a Bell pair
    Bell {
        /// phi+, phi-, psi+ or psi-
        #[arg(short, long, default_value = "phi+")]
        variant: String,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Prepare and show an N-qubit GHZ state
    Ghz {
        #[arg(value_name = "N")]
        qubits: usize,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Apply the quantum Fourier transform to |0…0⟩ on N qubits
    Qft {
        #[arg(value_name = "N")]
        qubits: usize,

        #[command(flatten)]
        options: RunOptions,
    },

    /// List the gate library
    Gates,

    /// Show the engine configuration in effect
    Info,
}

fn main() {
    // Logs vão para stderr; stdout fica livre para a saída JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qmind=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { file, options } => run_command(&file, &options),
        Commands::Bell { variant, options } => bell_command(&variant, &options),
        Commands::Ghz { qubits, options } => template_command(|| ghz(qubits), qubits, &options),
        Commands::Qft { qubits, options } => template_command(|| qft(qubits), qubits, &options),
        Commands::Gates => {
            print!("{}", render::gate_catalog());
            Ok(())
        }
        Commands::Info => print_info(),
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

// ============================================================================
// Commands
// ============================================================================

fn run_command(file: &Path, options: &RunOptions) -> Result<()> {
    let config = engine_config(options)?;
    let record = CircuitRecord::load(file)
        .with_context(|| format!("failed to load circuit {}", file.display()))?;
    let circuit = record
        .to_circuit_with(config.unitarity_tolerance)
        .with_context(|| format!("invalid circuit in {}", file.display()))?;
    info!(path = %file.display(), qubits = record.qubits, operations = circuit.len(), "circuit loaded");

    // Flags da linha de comando têm precedência sobre o arquivo
    let options = RunOptions {
        shots: options.shots.or(record.shots),
        measure: options.measure.clone().or_else(|| record.measure.clone()),
        ..options.clone()
    };
    execute(&circuit, record.qubits, config, &options)
}

fn bell_command(variant: &str, options: &RunOptions) -> Result<()> {
    let state: BellState = variant.parse()?;
    template_command(|| bell(state), 2, options)
}

fn template_command(
    build: impl FnOnce() -> Result<Circuit, CircuitError>,
    qubits: usize,
    options: &RunOptions,
) -> Result<()> {
    // O tamanho do registrador é checado antes de montar o circuito
    let config = engine_config(options)?;
    config.check_qubits(qubits)?;
    let circuit = build()?;
    execute(&circuit, qubits, config, options)
}

/// Resultado completo de uma execução, para `--json`
#[derive(Serialize)]
struct RunReport {
    operations: usize,
    gates_applied: u64,
    state: StateSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    measurement: Option<MeasurementOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bloch: Vec<qm_engine::BlochVector>,
}

fn execute(circuit: &Circuit, qubits: usize, config: EngineConfig, options: &RunOptions) -> Result<()> {
    let mut engine = StateEngine::with_config(qubits, config)?;
    circuit.run(&mut engine)?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Snapshot, Bloch e shots leem o estado antes do colapso
    let state = engine.snapshot();
    let bloch = if options.bloch {
        (0..engine.num_qubits())
            .map(|q| engine.bloch_vector(q))
            .collect::<Result<Vec<_>, QmError>>()?
    } else {
        Vec::new()
    };
    let counts = options
        .shots
        .map(|shots| engine.sample_counts(shots, &mut rng))
        .transpose()?;
    let measurement = options
        .measure
        .as_ref()
        .map(|qubits| engine.measure(qubits, &mut rng))
        .transpose()?;

    if options.json {
        let report = RunReport {
            operations: circuit.len(),
            gates_applied: engine.gates_applied(),
            state,
            counts: counts.map(|counts| {
                counts
                    .into_iter()
                    .map(|(value, count)| (qm_core::format_basis(value, qubits), count))
                    .collect()
            }),
            measurement,
            bloch,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render::state_table(&state));
    if !bloch.is_empty() {
        println!();
        print!("{}", render::bloch_table(&bloch));
    }
    if let Some(counts) = &counts {
        println!();
        print!("{}", render::counts_table(counts, qubits));
    }
    if let Some(outcome) = &measurement {
        println!();
        println!("{}", render::measurement_line(outcome));
    }
    Ok(())
}

fn engine_config(options: &RunOptions) -> Result<EngineConfig> {
    let mut config = EngineConfig::from_env();
    if let Some(max_qubits) = options.max_qubits {
        config = config.with_max_qubits(max_qubits);
    }
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

fn print_info() -> Result<()> {
    let config = EngineConfig::from_env();
    config.validate().context("invalid engine configuration")?;

    println!("{}", "QMind - state-vector quantum circuit simulator".bold());
    println!();
    println!("{}", "Engine configuration:".bold());
    println!("  max qubits           {} (hard ceiling {})", config.max_qubits.to_string().cyan(), HARD_MAX_QUBITS);
    println!("  drift tolerance      {}", format!("{:e}", config.drift_tolerance).cyan());
    println!("  unitarity tolerance  {}", format!("{:e}", config.unitarity_tolerance).cyan());
    println!(
        "  state memory         {} bytes at max qubits",
        (16u128 << config.max_qubits).to_string().cyan()
    );
    println!();
    println!("{}", "Environment:".bold());
    println!("  QMIND_MAX_QUBITS, QMIND_DRIFT_TOLERANCE, QMIND_UNITARITY_TOLERANCE (.env supported)");
    println!("  RUST_LOG=qmind=debug,qm_engine=debug  # per-gate tracing");
    println!();
    println!("{}", "Commands:".bold());
    println!("  qmind run circuit.json --shots 1000 --seed 7   # Run a circuit file");
    println!("  qmind run circuit.toml --measure 0,1           # Run and measure");
    println!("  qmind bell --variant psi-                      # Bell pair");
    println!("  qmind ghz 5 --json                             # GHZ state as JSON");
    println!("  qmind qft 3 --bloch                            # QFT with Bloch vectors");
    println!("  qmind gates                                    # Gate library");
    Ok(())
}

// ============================================================================
// Error reporting
// ============================================================================

fn report_error(error: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), error);

    let circuit_error = error.chain().find_map(|e| e.downcast_ref::<CircuitError>());
    let core_error = circuit_error
        .and_then(CircuitError::core)
        .or_else(|| error.chain().find_map(|e| e.downcast_ref::<QmError>()));

    if let Some(kind) = circuit_error.map(CircuitError::kind).or(core_error.map(QmError::kind)) {
        eprintln!("  {} {}", "kind:".bold(), kind);
    }
    if let Some(CircuitError::Step { step, gate, targets, .. }) = circuit_error {
        eprintln!("  {} {}", "step:".bold(), step);
        eprintln!("  {} {}", "gate:".bold(), gate);
        eprintln!("  {} {:?}", "targets:".bold(), targets);
    } else if let Some(QmError::InvalidTarget { targets, .. }) = core_error {
        eprintln!("  {} {:?}", "targets:".bold(), targets);
    }
}
