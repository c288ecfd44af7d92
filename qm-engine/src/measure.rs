//! Medição e colapso
//!
//! A medição de um subconjunto de qubits calcula a distribuição marginal
//! sobre os 2^m resultados, sorteia um com a fonte aleatória recebida,
//! zera as amplitudes inconsistentes e renormaliza. O colapso é
//! irreversível: medir de novo os mesmos qubits sem portas no meio
//! reproduz o mesmo resultado.

use qm_core::{QmResult, ZERO};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::StateEngine;
use crate::sampling::CumulativeDistribution;

/// Resultado de uma medição
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    /// Qubits medidos, na ordem pedida
    pub qubits: Vec<usize>,
    /// Bit medido para cada qubit (`bits[i]` ↔ `qubits[i]`)
    pub bits: Vec<u8>,
    /// Resultado empacotado: bit `i` = `bits[i]`
    pub value: usize,
    /// Probabilidade do resultado antes do colapso
    pub probability: f64,
}

impl MeasurementOutcome {
    /// Bit medido para um qubit, se ele foi medido
    pub fn bit(&self, qubit: usize) -> Option<u8> {
        self.qubits
            .iter()
            .position(|&q| q == qubit)
            .map(|i| self.bits[i])
    }

    /// Bitstring do resultado, último qubit pedido primeiro
    pub fn bitstring(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect()
    }
}

/// Resultado marginal de um índice de base para os qubits dados
#[inline]
pub(crate) fn outcome_of(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0usize, |acc, (i, &q)| acc | (((index >> q) & 1) << i))
}

impl StateEngine {
    /// Qubits efetivamente medidos: vazio significa todos
    fn resolve_qubits(&self, qubits: &[usize]) -> QmResult<Vec<usize>> {
        if qubits.is_empty() {
            return Ok((0..self.num_qubits()).collect());
        }
        self.check_qubits(qubits)?;
        Ok(qubits.to_vec())
    }

    /// Distribuição marginal sobre os 2^m resultados dos qubits dados
    ///
    /// O índice `v` do vetor retornado tem bit `i` igual ao valor de
    /// `qubits[i]`. Uma lista vazia significa todos os qubits.
    pub fn marginal_probabilities(&self, qubits: &[usize]) -> QmResult<Vec<f64>> {
        let qubits = self.resolve_qubits(qubits)?;
        Ok(self.marginals(&qubits))
    }

    fn marginals(&self, qubits: &[usize]) -> Vec<f64> {
        let mut marginals = vec![0.0; 1usize << qubits.len()];
        for (index, a) in self.state.amplitudes().iter().enumerate() {
            marginals[outcome_of(index, qubits)] += a.norm_sqr();
        }
        marginals
    }

    /// Mede os qubits dados (vazio = todos) e colapsa o estado
    pub fn measure<R: Rng + ?Sized>(
        &mut self,
        qubits: &[usize],
        rng: &mut R,
    ) -> QmResult<MeasurementOutcome> {
        let qubits = self.resolve_qubits(qubits)?;
        let marginals = self.marginals(&qubits);
        let value = CumulativeDistribution::new(&marginals)?.sample(rng);
        let probability = marginals[value];

        for (index, a) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if outcome_of(index, &qubits) != value {
                *a = ZERO;
            }
        }
        self.state.normalize()?;
        self.measurements += 1;

        let bits = (0..qubits.len()).map(|i| ((value >> i) & 1) as u8).collect();
        debug!(?qubits, value, probability, "measured");

        Ok(MeasurementOutcome {
            qubits,
            bits,
            value,
            probability,
        })
    }

    /// Mede todos os qubits; `value` é o índice de base resultante
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> QmResult<MeasurementOutcome> {
        self.measure(&[], rng)
    }
}
