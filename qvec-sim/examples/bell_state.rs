//! Build a Bell pair, print its probabilities, and sample it

use qvec_core::{Circuit, Endian};
use qvec_sim::simulate;
use qvec_state::{
    counts_to_bitstring_counts, measurements_to_counts, perform_measurements, probabilities,
    probabilities_raw, QuantumState,
};

fn main() {
    let mut circuit = Circuit::new(2);
    circuit.add_h_gate(0).unwrap();
    circuit.add_cx_gate(0, 1).unwrap();
    circuit.add_m_gate(0, 0).unwrap();
    circuit.add_m_gate(1, 1).unwrap();

    let mut state = QuantumState::new(2).unwrap();
    simulate(&circuit, &mut state).unwrap();

    println!("probabilities:");
    let mut entries: Vec<_> = probabilities(&state, Endian::Little).into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (bitstring, probability) in entries {
        println!("  {bitstring}: {probability:.4}");
    }

    let n_shots = 10_000;
    let samples =
        perform_measurements(&circuit, &probabilities_raw(&state), n_shots, Some(42)).unwrap();
    let counts = measurements_to_counts(&samples);
    let keyed = counts_to_bitstring_counts(&counts, 2, Endian::Little).unwrap();

    println!("{n_shots} shots:");
    let mut entries: Vec<_> = keyed.into_iter().collect();
    entries.sort();
    for (bitstring, count) in entries {
        println!("  {bitstring}: {count}");
    }
}
