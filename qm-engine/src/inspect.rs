//! Inspeção somente-leitura do estado
//!
//! Tudo aqui lê o vetor sem mutá-lo; é o que o adaptador de
//! visualização consome depois da execução do circuito.

use num_complex::Complex64;
use qm_core::{format_basis, QmResult, ZERO};
use serde::{Deserialize, Serialize};

use crate::engine::StateEngine;

/// Vetor de Bloch (⟨X⟩, ⟨Y⟩, ⟨Z⟩) do estado reduzido de um qubit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    /// Comprimento: 1 para qubit puro, < 1 quando emaranhado
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Entrada de base com amplitude e probabilidade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisEntry {
    pub index: usize,
    pub bitstring: String,
    /// [re, im]
    pub amplitude: [f64; 2],
    pub probability: f64,
}

/// Fotografia serializável do estado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub num_qubits: usize,
    /// [re, im] por índice de base
    pub amplitudes: Vec<[f64; 2]>,
    pub probabilities: Vec<f64>,
}

impl StateSnapshot {
    /// Entradas com probabilidade acima de `threshold`, em ordem de índice
    pub fn entries(&self, threshold: f64) -> Vec<BasisEntry> {
        self.probabilities
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > threshold)
            .map(|(index, &probability)| BasisEntry {
                index,
                bitstring: format_basis(index, self.num_qubits),
                amplitude: self.amplitudes[index],
                probability,
            })
            .collect()
    }
}

impl StateEngine {
    /// Vetor de Bloch do qubit dado
    ///
    /// Calculado a partir da matriz densidade reduzida
    /// ρ = [[ρ00, ρ01], [ρ10, ρ11]]: x = 2·Re ρ01, y = −2·Im ρ01, z = ρ00 − ρ11.
    pub fn bloch_vector(&self, qubit: usize) -> QmResult<BlochVector> {
        self.check_qubits(&[qubit])?;
        let mask = 1usize << qubit;
        let amplitudes = self.amplitudes();

        let mut rho00 = 0.0;
        let mut rho11 = 0.0;
        let mut rho01: Complex64 = ZERO;
        for (i, a) in amplitudes.iter().enumerate() {
            if i & mask != 0 {
                continue;
            }
            let b = amplitudes[i | mask];
            rho00 += a.norm_sqr();
            rho11 += b.norm_sqr();
            rho01 += a * b.conj();
        }

        Ok(BlochVector {
            x: 2.0 * rho01.re,
            y: -2.0 * rho01.im,
            z: rho00 - rho11,
        })
    }

    /// ⟨Z⟩ do qubit dado: P(0) − P(1)
    pub fn expectation_z(&self, qubit: usize) -> QmResult<f64> {
        let marginals = self.marginal_probabilities(&[qubit])?;
        Ok(marginals[0] - marginals[1])
    }

    /// Fotografia do estado para visualização
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            num_qubits: self.num_qubits(),
            amplitudes: self.amplitudes().iter().map(|a| [a.re, a.im]).collect(),
            probabilities: self.probabilities(),
        }
    }
}
