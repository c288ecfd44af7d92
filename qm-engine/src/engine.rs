//! Engine de estado quântico

use num_complex::Complex64;
use qm_core::{EngineConfig, QmError, QmResult, StateVector, ZERO};
use qm_gates::{Gate, Matrix};
use tracing::{debug, trace, warn};

/// Desvios de norma abaixo disto não disparam renormalização
const RENORMALIZE_FLOOR: f64 = 64.0 * f64::EPSILON;

/// Engine de estado: dona exclusiva do vetor de amplitudes
///
/// Toda operação que muta o estado recebe `&mut self`; simulações
/// independentes usam engines independentes.
#[derive(Debug, Clone)]
pub struct StateEngine {
    /// Vetor de estado
    pub(crate) state: StateVector,
    /// Configuração
    config: EngineConfig,
    /// Número de portas aplicadas desde a inicialização
    gates_applied: u64,
    /// Número de medições desde a inicialização
    pub(crate) measurements: u64,
}

impl StateEngine {
    /// Cria engine em |0…0⟩ com a configuração padrão
    pub fn new(num_qubits: usize) -> QmResult<Self> {
        Self::with_config(num_qubits, EngineConfig::default())
    }

    /// Cria engine com configuração customizada
    ///
    /// Falha com `Configuration` antes de qualquer alocação se
    /// `num_qubits` for zero ou exceder `config.max_qubits`.
    pub fn with_config(num_qubits: usize, config: EngineConfig) -> QmResult<Self> {
        config.check_qubits(num_qubits)?;
        let state = StateVector::new(num_qubits)?;
        debug!(num_qubits, dimension = state.dimension(), "state engine initialized");
        Ok(Self {
            state,
            config,
            gates_applied: 0,
            measurements: 0,
        })
    }

    /// Cria engine a partir de um vetor já existente
    pub fn from_state(state: StateVector, config: EngineConfig) -> QmResult<Self> {
        config.check_qubits(state.num_qubits())?;
        let mut engine = Self {
            state,
            config,
            gates_applied: 0,
            measurements: 0,
        };
        engine.enforce_normalization()?;
        Ok(engine)
    }

    /// Realoca o estado para `num_qubits` qubits em |0…0⟩
    pub fn initialize(&mut self, num_qubits: usize) -> QmResult<()> {
        self.config.check_qubits(num_qubits)?;
        self.state = StateVector::new(num_qubits)?;
        self.gates_applied = 0;
        self.measurements = 0;
        debug!(num_qubits, "state engine re-initialized");
        Ok(())
    }

    /// Volta para |0…0⟩ sem realocar
    pub fn reset(&mut self) {
        self.state.reset();
        self.gates_applied = 0;
        self.measurements = 0;
    }

    /// Número de qubits
    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    /// Dimensão do espaço (2^n)
    pub fn dimension(&self) -> usize {
        self.state.dimension()
    }

    /// Configuração em uso
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Vetor de estado (somente leitura)
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Amplitudes (somente leitura)
    pub fn amplitudes(&self) -> &[Complex64] {
        self.state.amplitudes()
    }

    /// Σ|a|²
    pub fn norm_sqr(&self) -> f64 {
        self.state.norm_sqr()
    }

    /// Portas aplicadas desde a inicialização
    pub fn gates_applied(&self) -> u64 {
        self.gates_applied
    }

    /// Medições realizadas desde a inicialização
    pub fn measurements(&self) -> u64 {
        self.measurements
    }

    /// Probabilidade de cada índice de base; não muta o estado
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    /// Probabilidade de um índice de base
    pub fn probability_of(&self, index: usize) -> Option<f64> {
        self.state.probability(index)
    }

    /// Aplica uma porta aos qubits alvo
    ///
    /// Toda validação acontece antes de tocar nas amplitudes: em caso de
    /// erro o estado fica inalterado.
    pub fn apply_gate(&mut self, gate: &Gate, targets: &[usize]) -> QmResult<()> {
        if targets.len() != gate.arity() {
            return Err(QmError::invalid_target(
                targets,
                format!(
                    "gate '{}' acts on {} qubit(s), got {} target(s)",
                    gate.name(),
                    gate.arity(),
                    targets.len()
                ),
            ));
        }
        self.check_qubits(targets)?;
        gate.validate(self.config.unitarity_tolerance)?;

        let matrix = gate.matrix();
        apply_matrix(self.state.amplitudes_mut(), &matrix, targets)?;
        self.gates_applied += 1;
        debug!(gate = %gate, ?targets, step = self.gates_applied, "gate applied");

        self.enforce_normalization()
    }

    /// Verifica índices dentro de [0, n) e distintos
    pub(crate) fn check_qubits(&self, qubits: &[usize]) -> QmResult<()> {
        let n = self.num_qubits();
        if let Some(&bad) = qubits.iter().find(|&&q| q >= n) {
            return Err(QmError::invalid_target(
                qubits,
                format!("qubit {bad} out of range for a {n}-qubit register"),
            ));
        }
        for (i, &q) in qubits.iter().enumerate() {
            if qubits[..i].contains(&q) {
                return Err(QmError::invalid_target(qubits, format!("duplicate qubit {q}")));
            }
        }
        Ok(())
    }

    /// Re-checa ‖ψ‖² = 1 e absorve drift dentro da tolerância
    fn enforce_normalization(&mut self) -> QmResult<()> {
        let norm_sqr = self.state.norm_sqr();
        let deviation = (norm_sqr - 1.0).abs();
        if !deviation.is_finite() || deviation > self.config.drift_tolerance {
            warn!(norm_sqr, tolerance = self.config.drift_tolerance, "normalization drift beyond tolerance");
            return Err(QmError::NumericalDrift {
                deviation,
                tolerance: self.config.drift_tolerance,
            });
        }
        if deviation > RENORMALIZE_FLOOR {
            trace!(deviation, "renormalizing state vector");
            self.state.normalize()?;
        }
        Ok(())
    }
}

/// Aplica `matrix` (2^k × 2^k) aos qubits `targets` de um vetor de 2^n amplitudes
///
/// Percorre as 2^(n−k) bases de bloco (índices com todos os bits alvo
/// zerados), junta as 2^k amplitudes do bloco via tabela de deslocamentos,
/// multiplica pela matriz e devolve. Custo O(2^n · 2^k).
///
/// Os alvos precisam ser distintos, dentro do registrador, e
/// `targets.len()` igual à aridade da matriz; caso contrário nada é
/// escrito e o erro é devolvido.
pub(crate) fn apply_matrix(
    amplitudes: &mut [Complex64],
    matrix: &Matrix,
    targets: &[usize],
) -> QmResult<()> {
    let k = targets.len();
    if k == 0 || matrix.arity() != k {
        return Err(QmError::invalid_target(
            targets,
            format!("{}×{} matrix needs {} target(s)", matrix.dim(), matrix.dim(), matrix.arity()),
        ));
    }
    if !amplitudes.len().is_power_of_two() {
        return Err(QmError::Configuration(format!(
            "state length {} is not a power of two",
            amplitudes.len()
        )));
    }
    let n = amplitudes.len().trailing_zeros() as usize;
    for (i, &q) in targets.iter().enumerate() {
        if q >= n {
            return Err(QmError::invalid_target(
                targets,
                format!("qubit {q} out of range for a {n}-qubit register"),
            ));
        }
        if targets[..i].contains(&q) {
            return Err(QmError::invalid_target(targets, format!("duplicate qubit {q}")));
        }
    }
    let block = 1usize << k;

    // Primeiro alvo = bit mais significativo do índice local
    let offsets: Vec<usize> = (0..block)
        .map(|local| {
            targets.iter().enumerate().fold(0usize, |acc, (t, &q)| {
                if (local >> (k - 1 - t)) & 1 == 1 { acc | (1 << q) } else { acc }
            })
        })
        .collect();

    let mut sorted = targets.to_vec();
    sorted.sort_unstable();

    let mut input = vec![ZERO; block];
    let mut output = vec![ZERO; block];
    let blocks = amplitudes.len() >> k;
    trace!(k, blocks, "applying matrix");

    for rest in 0..blocks {
        let base = insert_zero_bits(rest, &sorted);
        for (slot, &offset) in input.iter_mut().zip(&offsets) {
            *slot = amplitudes[base | offset];
        }
        matrix.apply(&input, &mut output);
        for (&value, &offset) in output.iter().zip(&offsets) {
            amplitudes[base | offset] = value;
        }
    }
    Ok(())
}

/// Insere um bit zero em cada posição de `sorted_positions` (ordem crescente)
#[inline]
fn insert_zero_bits(mut value: usize, sorted_positions: &[usize]) -> usize {
    for &pos in sorted_positions {
        let low = value & ((1usize << pos) - 1);
        value = ((value >> pos) << (pos + 1)) | low;
    }
    value
}
