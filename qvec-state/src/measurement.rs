//! Shot sampling from a probability distribution
//!
//! Sampling builds a cumulative distribution over the basis-state
//! probabilities once, then draws each shot with a uniform real and a binary
//! search. Compared with walking the distribution per shot this costs
//! O(max(2^n, shots)) time instead of O(shots · 2^n).

use crate::error::{Result, StateError};
use ahash::AHashMap;
use qvec_core::bits::state_index_to_bitstring;
use qvec_core::{Circuit, CircuitElement, Endian, Gate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Whether every qubit is the target of exactly one measurement
///
/// Only top-level elements are inspected: measurements inside classical
/// branches are conditional and cannot be counted statically.
pub fn is_measurable(circuit: &Circuit) -> bool {
    let mut counts = vec![0usize; circuit.n_qubits()];

    for element in circuit.elements() {
        if let CircuitElement::Gate(Gate::M { qubit, .. }) = element {
            counts[*qubit] += 1;
        }
    }

    counts.iter().all(|&count| count == 1)
}

fn cumulative_sum(probabilities: &[f64]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(probabilities.len());
    let mut total = 0.0;
    for &p in probabilities {
        total += p;
        cumulative.push(total);
    }
    cumulative
}

fn seeded_prng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sample `n_shots` basis-state indices from a probability vector
///
/// The circuit is the one that produced the distribution; it must be
/// measurable (each qubit measured exactly once). The distribution is not
/// renormalized: draws are uniform on [0, total).
///
/// # Errors
/// - [`StateError::NotMeasurable`] if a qubit is measured zero or multiple
///   times
/// - [`StateError::EmptyDistribution`] for an empty probability vector
/// - [`StateError::SampledPastDistributionEnd`] if the binary search walks
///   past the cumulative distribution (impossible for valid input)
pub fn perform_measurements(
    circuit: &Circuit,
    probabilities: &[f64],
    n_shots: usize,
    seed: Option<u64>,
) -> Result<Vec<usize>> {
    if !is_measurable(circuit) {
        return Err(StateError::NotMeasurable);
    }
    if probabilities.is_empty() {
        return Err(StateError::EmptyDistribution);
    }

    let cumulative = cumulative_sum(probabilities);
    let max_prob = *cumulative.last().unwrap_or(&0.0);

    let mut prng = seeded_prng(seed);
    let mut measurements = Vec::with_capacity(n_shots);

    for _ in 0..n_shots {
        let draw = prng.gen::<f64>() * max_prob;

        // first index whose cumulative probability reaches the draw
        let index = cumulative.partition_point(|&c| c < draw);
        if index >= cumulative.len() {
            return Err(StateError::SampledPastDistributionEnd);
        }

        measurements.push(index);
    }

    Ok(measurements)
}

/// Histogram a list of sampled basis-state indices
pub fn measurements_to_counts(measurements: &[usize]) -> AHashMap<usize, usize> {
    let mut counts = AHashMap::new();
    for &index in measurements {
        *counts.entry(index).or_insert(0) += 1;
    }
    counts
}

/// Re-key an index histogram by bitstring under the given endianness
pub fn counts_to_bitstring_counts(
    counts: &AHashMap<usize, usize>,
    n_qubits: usize,
    endian: Endian,
) -> Result<AHashMap<String, usize>> {
    counts
        .iter()
        .map(|(&index, &count)| {
            let bitstring = state_index_to_bitstring(index, n_qubits, endian)?;
            Ok((bitstring, count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn measured_circuit(n_qubits: usize) -> Circuit {
        let mut circuit = Circuit::new(n_qubits);
        for qubit in 0..n_qubits {
            circuit.add_m_gate(qubit, qubit).unwrap();
        }
        circuit
    }

    #[test]
    fn cumulative_sum_of_uniform_quarters() {
        let cumulative = cumulative_sum(&[0.25, 0.25, 0.25, 0.25]);
        assert_relative_eq!(cumulative[0], 0.25);
        assert_relative_eq!(cumulative[1], 0.50);
        assert_relative_eq!(cumulative[2], 0.75);
        assert_relative_eq!(cumulative[3], 1.00);
    }

    #[test]
    fn measurable_requires_exactly_one_measurement_per_qubit() {
        assert!(is_measurable(&measured_circuit(3)));

        let mut unmeasured = Circuit::new(2);
        unmeasured.add_m_gate(0, 0).unwrap();
        assert!(!is_measurable(&unmeasured));

        let mut double = measured_circuit(2);
        double.add_m_gate(0, 1).unwrap();
        assert!(!is_measurable(&double));
    }

    #[test]
    fn sampling_a_deterministic_distribution() {
        let circuit = measured_circuit(2);
        let samples = perform_measurements(&circuit, &[0.0, 0.0, 1.0, 0.0], 100, Some(7)).unwrap();
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|&s| s == 2));
    }

    #[test]
    fn sampling_is_reproducible_with_a_seed() {
        let circuit = measured_circuit(2);
        let probabilities = [0.1, 0.2, 0.3, 0.4];
        let first = perform_measurements(&circuit, &probabilities, 1000, Some(42)).unwrap();
        let second = perform_measurements(&circuit, &probabilities, 1000, Some(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn uniform_distribution_frequencies_within_three_sigma() {
        let circuit = measured_circuit(2);
        let n_shots = 100_000;
        let samples =
            perform_measurements(&circuit, &[0.25; 4], n_shots, Some(1234)).unwrap();
        let counts = measurements_to_counts(&samples);

        // 3σ for a p = 0.25 binomial over 100k shots
        let sigma = (0.25 * 0.75 / n_shots as f64).sqrt();
        for index in 0..4 {
            let frequency = *counts.get(&index).unwrap_or(&0) as f64 / n_shots as f64;
            assert!(
                (frequency - 0.25).abs() < 3.0 * sigma,
                "outcome {index} frequency {frequency} too far from 0.25"
            );
        }
    }

    #[test]
    fn sampling_rejects_unmeasurable_circuits_and_empty_distributions() {
        let unmeasured = Circuit::new(2);
        assert!(matches!(
            perform_measurements(&unmeasured, &[1.0], 1, None),
            Err(StateError::NotMeasurable)
        ));

        let circuit = measured_circuit(1);
        assert!(matches!(
            perform_measurements(&circuit, &[], 1, None),
            Err(StateError::EmptyDistribution)
        ));
    }

    #[test]
    fn counts_histogram_and_bitstring_keys() {
        let counts = measurements_to_counts(&[0, 1, 1, 3, 3, 3]);
        assert_eq!(counts[&0], 1);
        assert_eq!(counts[&1], 2);
        assert_eq!(counts[&3], 3);

        let keyed = counts_to_bitstring_counts(&counts, 2, Endian::Little).unwrap();
        assert_eq!(keyed["00"], 1);
        assert_eq!(keyed["10"], 2);
        assert_eq!(keyed["11"], 3);
    }
}
