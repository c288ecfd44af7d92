//! Testes integrados para qm-engine

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qm_gates::{Gate, Matrix};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::*;

const TOL: f64 = 1e-9;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < TOL, "{a} != {b}");
}

fn bell() -> StateEngine {
    let mut engine = StateEngine::new(2).unwrap();
    engine.apply_gate(&Gate::h(), &[0]).unwrap();
    engine.apply_gate(&Gate::cnot(), &[0, 1]).unwrap();
    engine
}

// =============================================================================
// Inicialização
// =============================================================================

#[test]
fn test_initialize_zero_qubits_fails() {
    assert!(matches!(StateEngine::new(0), Err(QmError::Configuration(_))));
}

#[test]
fn test_initialize_beyond_max_fails_before_allocation() {
    // 2^62 amplitudes nunca caberiam na memória: só passa se a checagem vem antes
    let config = EngineConfig::default().with_max_qubits(10);
    assert!(matches!(
        StateEngine::with_config(62, config),
        Err(QmError::Configuration(_))
    ));
    assert!(matches!(
        StateEngine::with_config(11, config),
        Err(QmError::Configuration(_))
    ));
}

#[test]
fn test_reinitialize() {
    let mut engine = bell();
    engine.initialize(3).unwrap();
    assert_eq!(engine.num_qubits(), 3);
    assert_eq!(engine.probability_of(0), Some(1.0));
    assert_eq!(engine.gates_applied(), 0);

    let err = engine.initialize(64).unwrap_err();
    assert!(matches!(err, QmError::Configuration(_)));
    // falha não destrói o estado anterior
    assert_eq!(engine.num_qubits(), 3);
}

#[test]
fn test_reset() {
    let mut engine = bell();
    engine.reset();
    assert_eq!(engine.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
}

// =============================================================================
// Aplicação de portas
// =============================================================================

#[test]
fn test_bell_state() {
    let engine = bell();
    let a = engine.amplitudes();
    assert_close(a[0b00].re, FRAC_1_SQRT_2);
    assert_close(a[0b11].re, FRAC_1_SQRT_2);
    assert_close(a[0b01].norm(), 0.0);
    assert_close(a[0b10].norm(), 0.0);
    assert_close(a[0b00].im, 0.0);
    assert_close(a[0b11].im, 0.0);
}

#[test]
fn test_cnot_respects_control_order() {
    // controle no qubit 1 (|0⟩): nada muda
    let mut engine = StateEngine::new(2).unwrap();
    engine.apply_gate(&Gate::x(), &[0]).unwrap();
    engine.apply_gate(&Gate::cnot(), &[1, 0]).unwrap();
    assert_close(engine.probability_of(0b01).unwrap(), 1.0);

    // controle no qubit 0 (|1⟩): inverte o qubit 1
    engine.apply_gate(&Gate::cnot(), &[0, 1]).unwrap();
    assert_close(engine.probability_of(0b11).unwrap(), 1.0);
}

#[test]
fn test_toffoli_truth_table() {
    for input in 0..8usize {
        let state = StateVector::basis_state(3, input).unwrap();
        let mut engine = StateEngine::from_state(state, EngineConfig::default()).unwrap();
        engine.apply_gate(&Gate::toffoli(), &[0, 1, 2]).unwrap();

        let expected = if input & 0b011 == 0b011 { input ^ 0b100 } else { input };
        assert_close(engine.probability_of(expected).unwrap(), 1.0);
    }
}

#[test]
fn test_swap_non_adjacent() {
    let state = StateVector::basis_state(3, 0b001).unwrap();
    let mut engine = StateEngine::from_state(state, EngineConfig::default()).unwrap();
    engine.apply_gate(&Gate::swap(), &[0, 2]).unwrap();
    assert_close(engine.probability_of(0b100).unwrap(), 1.0);
}

#[test]
fn test_controlled_phase_only_on_11() {
    let mut engine = StateEngine::new(2).unwrap();
    engine.apply_gate(&Gate::h(), &[0]).unwrap();
    engine.apply_gate(&Gate::h(), &[1]).unwrap();
    engine.apply_gate(&Gate::cphase(PI).unwrap(), &[0, 1]).unwrap();

    let a = engine.amplitudes();
    assert_close(a[0b00].re, 0.5);
    assert_close(a[0b01].re, 0.5);
    assert_close(a[0b10].re, 0.5);
    assert_close(a[0b11].re, -0.5);
}

#[test]
fn test_out_of_range_target_leaves_state_unchanged() {
    let mut engine = bell();
    let before = engine.state().clone();

    let err = engine.apply_gate(&Gate::x(), &[2]).unwrap_err();
    assert!(matches!(err, QmError::InvalidTarget { .. }));
    assert_eq!(engine.state(), &before);

    let err = engine.apply_gate(&Gate::cnot(), &[1, 5]).unwrap_err();
    assert!(matches!(err, QmError::InvalidTarget { .. }));
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.gates_applied(), 2);
}

#[test]
fn test_non_unitary_custom_gate_rejected_by_engine() {
    let gate = Gate::Custom(
        serde_json::from_value(serde_json::json!({
            "name": "leaky",
            "matrix": {
                "dim": 2,
                "data": [[1.0, 0.0], [0.0, 0.0], [0.0, 0.0], [0.5, 0.0]]
            }
        }))
        .unwrap(),
    );
    let mut engine = StateEngine::new(1).unwrap();
    let before = engine.state().clone();

    let err = engine.apply_gate(&gate, &[0]).unwrap_err();
    assert!(matches!(err, QmError::NonUnitaryGate { .. }));
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_custom_gate_applied() {
    let matrix = Gate::h().matrix();
    let gate = Gate::custom("my_h", matrix, 1e-10).unwrap();
    let mut engine = StateEngine::new(1).unwrap();
    engine.apply_gate(&gate, &[0]).unwrap();
    assert_close(engine.probability_of(0).unwrap(), 0.5);
}

#[test]
fn test_numerical_drift_detected() {
    // Escala de 1.001 por aplicação: drift muito acima da tolerância
    let mut engine = StateEngine::new(1).unwrap();
    let scaled = Matrix::new(
        2,
        vec![
            num_complex::Complex64::new(1.001, 0.0),
            num_complex::Complex64::new(0.0, 0.0),
            num_complex::Complex64::new(0.0, 0.0),
            num_complex::Complex64::new(1.001, 0.0),
        ],
    )
    .unwrap();
    let gate = Gate::custom("almost", scaled, 1e-2).unwrap();
    let config = EngineConfig {
        unitarity_tolerance: 1e-2,
        ..EngineConfig::default()
    };
    let mut loose = StateEngine::with_config(1, config).unwrap();
    let err = loose.apply_gate(&gate, &[0]).unwrap_err();
    assert!(matches!(err, QmError::NumericalDrift { .. }));

    // Com a tolerância padrão a porta nem passa na checagem de unitariedade
    let err = engine.apply_gate(&gate, &[0]).unwrap_err();
    assert!(matches!(err, QmError::NonUnitaryGate { .. }));
}

#[test]
fn test_small_drift_is_renormalized() {
    let config = EngineConfig {
        drift_tolerance: 1e-3,
        unitarity_tolerance: 1e-3,
        ..EngineConfig::default()
    };
    let scaled = Matrix::new(
        2,
        vec![
            num_complex::Complex64::new(1.0001, 0.0),
            num_complex::Complex64::new(0.0, 0.0),
            num_complex::Complex64::new(0.0, 0.0),
            num_complex::Complex64::new(1.0001, 0.0),
        ],
    )
    .unwrap();
    let gate = Gate::custom("nearly", scaled, 1e-3).unwrap();
    let mut engine = StateEngine::with_config(1, config).unwrap();
    engine.apply_gate(&gate, &[0]).unwrap();
    assert_close(engine.norm_sqr(), 1.0);
}

#[test]
fn test_normalization_after_long_sequence() {
    let mut engine = StateEngine::new(4).unwrap();
    for step in 0..200 {
        let q = step % 4;
        engine.apply_gate(&Gate::h(), &[q]).unwrap();
        engine.apply_gate(&Gate::rx(0.1 * step as f64).unwrap(), &[(q + 1) % 4]).unwrap();
        engine.apply_gate(&Gate::cnot(), &[q, (q + 2) % 4]).unwrap();
        engine.apply_gate(&Gate::t(), &[(q + 3) % 4]).unwrap();
        assert_close(engine.norm_sqr(), 1.0);
    }
}

// =============================================================================
// Leitura
// =============================================================================

#[test]
fn test_probabilities_idempotent() {
    let mut engine = StateEngine::new(3).unwrap();
    engine.apply_gate(&Gate::h(), &[0]).unwrap();
    engine.apply_gate(&Gate::ry(0.7).unwrap(), &[2]).unwrap();

    let first = engine.probabilities();
    let second = engine.probabilities();
    assert_eq!(first, second);
    assert_close(first.iter().sum::<f64>(), 1.0);
}

#[test]
fn test_reversibility() {
    let gates = [
        (Gate::h(), vec![0]),
        (Gate::s(), vec![1]),
        (Gate::rx(0.3).unwrap(), vec![2]),
        (Gate::cphase(1.2).unwrap(), vec![2, 0]),
        (Gate::toffoli(), vec![1, 2, 0]),
    ];

    let mut engine = StateEngine::new(3).unwrap();
    engine.apply_gate(&Gate::h(), &[1]).unwrap();
    engine.apply_gate(&Gate::ry(0.4).unwrap(), &[2]).unwrap();

    for (gate, targets) in &gates {
        let before = engine.state().clone();
        engine.apply_gate(gate, targets).unwrap();
        engine.apply_gate(&gate.inverse(), targets).unwrap();
        assert!(engine.state().max_distance(&before).unwrap() < TOL, "{gate}");
    }
}

#[test]
fn test_bloch_vectors() {
    let mut engine = StateEngine::new(2).unwrap();
    let z = engine.bloch_vector(0).unwrap();
    assert_close(z.z, 1.0);

    engine.apply_gate(&Gate::h(), &[0]).unwrap();
    let plus = engine.bloch_vector(0).unwrap();
    assert_close(plus.x, 1.0);
    assert_close(plus.z, 0.0);

    engine.apply_gate(&Gate::s(), &[0]).unwrap();
    let plus_i = engine.bloch_vector(0).unwrap();
    assert_close(plus_i.y, 1.0);

    // qubit emaranhado: vetor de Bloch no centro
    let bell = bell();
    assert_close(bell.bloch_vector(1).unwrap().length(), 0.0);
    assert!(bell.bloch_vector(2).is_err());
}

#[test]
fn test_expectation_z() {
    let mut engine = StateEngine::new(1).unwrap();
    assert_close(engine.expectation_z(0).unwrap(), 1.0);
    engine.apply_gate(&Gate::x(), &[0]).unwrap();
    assert_close(engine.expectation_z(0).unwrap(), -1.0);
}

#[test]
fn test_snapshot_entries() {
    let snapshot = bell().snapshot();
    assert_eq!(snapshot.num_qubits, 2);
    let entries = snapshot.entries(1e-12);
    let bits: Vec<_> = entries.iter().map(|e| e.bitstring.as_str()).collect();
    assert_eq!(bits, vec!["00", "11"]);
    assert_close(entries[0].probability, 0.5);

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: StateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

// =============================================================================
// Medição
// =============================================================================

#[test]
fn test_measurement_collapse_is_deterministic() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = StateEngine::new(1).unwrap();
        engine.apply_gate(&Gate::h(), &[0]).unwrap();

        let first = engine.measure(&[0], &mut rng).unwrap();
        assert_close(first.probability, 0.5);
        for _ in 0..5 {
            let again = engine.measure(&[0], &mut rng).unwrap();
            assert_eq!(again.bits, first.bits);
            assert_close(again.probability, 1.0);
        }
    }
}

#[test]
fn test_bell_measurement_correlation() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = bell();
        let q0 = engine.measure(&[0], &mut rng).unwrap();
        let q1 = engine.measure(&[1], &mut rng).unwrap();
        assert_eq!(q0.bits, q1.bits);
        assert_close(engine.norm_sqr(), 1.0);
    }
}

#[test]
fn test_measure_all_returns_basis_index() {
    let state = StateVector::basis_state(3, 0b101).unwrap();
    let mut engine = StateEngine::from_state(state, EngineConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = engine.measure_all(&mut rng).unwrap();
    assert_eq!(outcome.value, 0b101);
    assert_eq!(outcome.qubits, vec![0, 1, 2]);
    assert_eq!(outcome.bits, vec![1, 0, 1]);
    assert_eq!(outcome.bitstring(), "101");
    assert_eq!(engine.measurements(), 1);
}

#[test]
fn test_partial_measurement_collapses_consistently() {
    // (|000⟩ + |011⟩ + |101⟩ + |110⟩)/2, paridade par
    let mut engine = StateEngine::new(3).unwrap();
    engine.apply_gate(&Gate::h(), &[0]).unwrap();
    engine.apply_gate(&Gate::h(), &[1]).unwrap();
    engine.apply_gate(&Gate::cnot(), &[0, 2]).unwrap();
    engine.apply_gate(&Gate::cnot(), &[1, 2]).unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    let outcome = engine.measure(&[2], &mut rng).unwrap();
    assert_close(outcome.probability, 0.5);

    for (index, p) in engine.probabilities().iter().enumerate() {
        let parity = (index.count_ones() % 2) as u8;
        let bit2 = ((index >> 2) & 1) as u8;
        if *p > 0.0 {
            assert_eq!(parity, 0);
            assert_eq!(bit2, outcome.bits[0]);
            assert_close(*p, 0.5);
        }
    }
}

#[test]
fn test_measure_invalid_qubits_leaves_state() {
    let mut engine = bell();
    let before = engine.state().clone();
    let mut rng = StdRng::seed_from_u64(0);

    assert!(matches!(engine.measure(&[3], &mut rng), Err(QmError::InvalidTarget { .. })));
    assert!(matches!(engine.measure(&[0, 0], &mut rng), Err(QmError::InvalidTarget { .. })));
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.measurements(), 0);
}

#[test]
fn test_same_seed_same_outcomes() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = StateEngine::new(4).unwrap();
        for q in 0..4 {
            engine.apply_gate(&Gate::h(), &[q]).unwrap();
        }
        engine.measure_all(&mut rng).unwrap().value
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn test_measurement_statistics() {
    // Ry(θ)|0⟩: P(1) = sin²(θ/2)
    let theta = 2.0 * (0.3f64).sqrt().asin();
    let mut rng = StdRng::seed_from_u64(2026);
    let trials = 4000;
    let mut ones = 0;
    for _ in 0..trials {
        let mut engine = StateEngine::new(1).unwrap();
        engine.apply_gate(&Gate::ry(theta).unwrap(), &[0]).unwrap();
        ones += engine.measure(&[0], &mut rng).unwrap().value;
    }
    let freq = ones as f64 / trials as f64;
    assert!((freq - 0.3).abs() < 0.05, "frequency {freq}");
}

#[test]
fn test_marginal_probabilities() {
    let engine = bell();
    let marginal = engine.marginal_probabilities(&[1]).unwrap();
    assert_close(marginal[0], 0.5);
    assert_close(marginal[1], 0.5);

    let all = engine.marginal_probabilities(&[]).unwrap();
    assert_eq!(all.len(), 4);
}

#[test]
fn test_sample_counts_does_not_collapse() {
    let engine = bell();
    let before = engine.state().clone();
    let mut rng = StdRng::seed_from_u64(5);

    let counts = engine.sample_counts(1000, &mut rng).unwrap();
    assert_eq!(counts.values().sum::<usize>(), 1000);
    assert!(counts.keys().all(|&k| k == 0b00 || k == 0b11));
    let zeros = counts.get(&0b00).copied().unwrap_or(0);
    assert!((400..=600).contains(&zeros), "zeros = {zeros}");
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_sample_marginal_counts() {
    let mut engine = StateEngine::new(2).unwrap();
    engine.apply_gate(&Gate::x(), &[1]).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let counts = engine.sample_marginal_counts(&[1], 50, &mut rng).unwrap();
    assert_eq!(counts.get(&1), Some(&50));
}
