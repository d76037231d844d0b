//! Quantum phase estimation driver with checkpoint resume
//!
//! Simulates a QPE workload assembled from Tangelo circuit files: an initial
//! state-preparation circuit, a QFT over the ancilla register, one
//! controlled-unitary subcircuit per ancilla applied in doubling powers, and
//! the inverse QFT. The statevector is checkpointed after every controlled
//! power so an interrupted run can resume from `resume_index`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use qvec_io::{load_statevector_from_file, read_tangelo_circuit, save_statevector_to_file};
use qvec_sim::simulate;
use qvec_state::QuantumState;
use std::path::{Path, PathBuf};
use tracing::info;

const N_UNITARY_QUBITS_TWO_ROTOR: usize = 6;
const N_UNITARY_QUBITS_THREE_ROTOR: usize = 9;
const RUN_FROM_START: i64 = -1;

/// Simulate a QPE circuit family with statevector checkpoints
#[derive(Debug, Parser)]
#[command(name = "qvec-cli", version)]
struct Args {
    /// Number of ancilla (phase-readout) qubits
    n_ancilla_qubits: usize,

    /// Number of rotors in the simulated system (2 or 3)
    n_rotors: usize,

    /// Trotter steps per application of a controlled power
    n_trotter_steps: usize,

    /// Directory holding the Tangelo circuit files
    circuits_dir: PathBuf,

    /// Filename prefix of the per-ancilla subcircuit files
    subcircuit_prefix: String,

    /// Directory for statevector checkpoints
    output_dir: PathBuf,

    /// -1 to run from the start, or the checkpoint index to resume after
    resume_index: i64,
}

fn statevector_filename(index: i64) -> String {
    format!("statevector.dat{index}")
}

fn simulate_file(path: &Path, state: &mut QuantumState, n_qubits: usize) -> Result<()> {
    let circuit = read_tangelo_circuit(n_qubits, path, 0)
        .with_context(|| format!("reading circuit file {}", path.display()))?;
    simulate(&circuit, state)
        .with_context(|| format!("simulating circuit file {}", path.display()))?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let n_unitary_qubits = match args.n_rotors {
        2 => N_UNITARY_QUBITS_TWO_ROTOR,
        3 => N_UNITARY_QUBITS_THREE_ROTOR,
        other => bail!("invalid number of rotors {other}; allowed values are 2 and 3"),
    };

    if args.resume_index < RUN_FROM_START {
        bail!("resume_index must be -1 (run from start) or a non-negative checkpoint index");
    }

    let n_total_qubits = args.n_ancilla_qubits + n_unitary_qubits;

    let mut state = if args.resume_index == RUN_FROM_START {
        QuantumState::new(n_total_qubits).context("allocating the initial state")?
    } else {
        let path = args.output_dir.join(statevector_filename(args.resume_index));
        load_statevector_from_file(&path)
            .with_context(|| format!("loading checkpoint {}", path.display()))?
    };

    if state.n_qubits() != n_total_qubits {
        bail!(
            "checkpoint holds {} qubits but the run needs {n_total_qubits}",
            state.n_qubits()
        );
    }

    if args.resume_index == RUN_FROM_START {
        info!("simulating initial state preparation");
        simulate_file(&args.circuits_dir.join("initial_circuit.dat"), &mut state, n_total_qubits)?;
        simulate_file(&args.circuits_dir.join("qft_circuit.dat"), &mut state, n_total_qubits)?;
    }

    let mut count: i64 = 0;
    for i_control in 0..args.n_ancilla_qubits {
        let circuit_path =
            args.circuits_dir.join(format!("{}{}", args.subcircuit_prefix, i_control));
        let circuit = read_tangelo_circuit(n_total_qubits, &circuit_path, 0)
            .with_context(|| format!("reading subcircuit {}", circuit_path.display()))?;

        let n_powers = 1u64 << i_control;
        for _ in 0..n_powers {
            if args.resume_index != RUN_FROM_START && count <= args.resume_index {
                count += 1;
                continue;
            }

            for _ in 0..args.n_trotter_steps {
                simulate(&circuit, &mut state).with_context(|| {
                    format!("simulating subcircuit {}", circuit_path.display())
                })?;
            }

            let checkpoint = args.output_dir.join(statevector_filename(count));
            save_statevector_to_file(&checkpoint, &state)
                .with_context(|| format!("writing checkpoint {}", checkpoint.display()))?;
            info!(checkpoint = %checkpoint.display(), "checkpoint written");
            count += 1;
        }
    }

    info!("simulating the inverse QFT");
    simulate_file(&args.circuits_dir.join("iqft_circuit.dat"), &mut state, n_total_qubits)?;

    let final_path = args.output_dir.join("statevector_final.dat");
    save_statevector_to_file(&final_path, &state)
        .with_context(|| format!("writing final statevector {}", final_path.display()))?;
    info!(path = %final_path.display(), "final statevector written");

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

    let args = Args::parse();
    run(&args)
}
