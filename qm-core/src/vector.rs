//! Vetor de amplitudes complexas
//!
//! Armazenamento bruto de um estado de n qubits: 2^n amplitudes
//! `Complex64`, indexadas pelo índice da base computacional. O qubit `q`
//! corresponde ao bit `q` do índice (qubit 0 = bit menos significativo).

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config::HARD_MAX_QUBITS;
use crate::error::{QmError, QmResult};

/// Amplitude zero
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Amplitude um
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Vetor de estado de n qubits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl StateVector {
    /// Cria |0…0⟩ com `num_qubits` qubits
    pub fn new(num_qubits: usize) -> QmResult<Self> {
        Self::basis_state(num_qubits, 0)
    }

    /// Cria o estado de base |index⟩
    pub fn basis_state(num_qubits: usize, index: usize) -> QmResult<Self> {
        check_width(num_qubits)?;
        let dimension = 1usize << num_qubits;
        if index >= dimension {
            return Err(QmError::Configuration(format!(
                "basis index {index} out of range for {num_qubits} qubits"
            )));
        }
        let mut amplitudes = vec![ZERO; dimension];
        amplitudes[index] = ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Cria a partir de amplitudes arbitrárias, normalizando-as
    ///
    /// O comprimento precisa ser uma potência de dois ≥ 2 e a norma, não nula.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> QmResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(QmError::Configuration(format!(
                "amplitude count must be a power of two >= 2, got {len}"
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        check_width(num_qubits)?;

        let mut state = Self {
            amplitudes,
            num_qubits,
        };
        if state.amplitudes.iter().any(|a| !a.re.is_finite() || !a.im.is_finite()) {
            return Err(QmError::Configuration("amplitudes must be finite".into()));
        }
        state.normalize()?;
        Ok(state)
    }

    /// Número de qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimensão do espaço (2^n)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitudes (somente leitura)
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitudes mutáveis, para kernels de aplicação de gate
    #[inline]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Amplitude de um índice de base
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Σ|a|²
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Reescala para ‖ψ‖ = 1, retornando a norma² anterior
    pub fn normalize(&mut self) -> QmResult<f64> {
        let norm_sqr = self.norm_sqr();
        if !norm_sqr.is_finite() || norm_sqr <= f64::EPSILON {
            return Err(QmError::NumericalDrift {
                deviation: (norm_sqr - 1.0).abs(),
                tolerance: 1.0,
            });
        }
        let scale = norm_sqr.sqrt().recip();
        for a in &mut self.amplitudes {
            *a *= scale;
        }
        Ok(norm_sqr)
    }

    /// |a|² por índice de base
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// |a|² de um índice de base
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.amplitudes.get(index).map(|a| a.norm_sqr())
    }

    /// Volta para |0…0⟩ sem realocar
    pub fn reset(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }

    /// Distância ∞ entre dois vetores de mesma dimensão
    pub fn max_distance(&self, other: &StateVector) -> Option<f64> {
        if self.dimension() != other.dimension() {
            return None;
        }
        Some(
            self.amplitudes
                .iter()
                .zip(&other.amplitudes)
                .map(|(a, b)| (a - b).norm())
                .fold(0.0, f64::max),
        )
    }

    /// |⟨self|other⟩|²
    pub fn fidelity(&self, other: &StateVector) -> Option<f64> {
        if self.dimension() != other.dimension() {
            return None;
        }
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        Some(overlap.norm_sqr())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (index, a) in self.amplitudes.iter().enumerate() {
            if a.norm_sqr() < 1e-12 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(
                f,
                "({:.4}{:+.4}i)|{}⟩",
                a.re,
                a.im,
                format_basis(index, self.num_qubits)
            )?;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Bitstring de um índice de base, qubit mais significativo primeiro
pub fn format_basis(index: usize, num_qubits: usize) -> String {
    (0..num_qubits)
        .rev()
        .map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Índice de base a partir de uma bitstring (qubit mais significativo primeiro)
pub fn parse_basis(bits: &str) -> Option<usize> {
    if bits.is_empty() || bits.len() > HARD_MAX_QUBITS {
        return None;
    }
    bits.chars().try_fold(0usize, |acc, c| match c {
        '0' => Some(acc << 1),
        '1' => Some((acc << 1) | 1),
        _ => None,
    })
}

fn check_width(num_qubits: usize) -> QmResult<()> {
    if num_qubits == 0 || num_qubits > HARD_MAX_QUBITS {
        return Err(QmError::Configuration(format!(
            "qubit count must be in 1..={HARD_MAX_QUBITS}, got {num_qubits}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_basis() {
        assert_eq!(format_basis(0, 3), "000");
        assert_eq!(format_basis(1, 3), "001");
        assert_eq!(format_basis(6, 3), "110");
    }

    #[test]
    fn test_parse_basis() {
        assert_eq!(parse_basis("110"), Some(6));
        assert_eq!(parse_basis("0"), Some(0));
        assert_eq!(parse_basis("12"), None);
        assert_eq!(parse_basis(""), None);
    }

    #[test]
    fn test_display_skips_zero_amplitudes() {
        let state = StateVector::basis_state(2, 3).unwrap();
        assert_eq!(state.to_string(), "(1.0000+0.0000i)|11⟩");
    }
}
