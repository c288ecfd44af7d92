//! Amostragem de shots sem colapso
//!
//! Constrói a distribuição cumulativa uma vez e sorteia cada shot por
//! busca binária: O(2^n + shots · n).

use std::collections::BTreeMap;

use qm_core::{QmError, QmResult};
use rand::Rng;

use crate::engine::StateEngine;

/// Distribuição cumulativa sobre índices
#[derive(Debug, Clone)]
pub struct CumulativeDistribution {
    cdf: Vec<f64>,
    last_nonzero: usize,
}

impl CumulativeDistribution {
    /// Constrói a partir de pesos não negativos
    pub fn new(weights: &[f64]) -> QmResult<Self> {
        let mut cdf = Vec::with_capacity(weights.len());
        let mut acc = 0.0;
        let mut last_nonzero = None;
        for (i, &w) in weights.iter().enumerate() {
            if w > 0.0 {
                acc += w;
                last_nonzero = Some(i);
            }
            cdf.push(acc);
        }
        match last_nonzero {
            Some(last_nonzero) if acc.is_finite() => Ok(Self { cdf, last_nonzero }),
            _ => Err(QmError::NumericalDrift {
                deviation: (acc - 1.0).abs(),
                tolerance: 0.0,
            }),
        }
    }

    /// Massa total
    pub fn total(&self) -> f64 {
        self.cdf.last().copied().unwrap_or(0.0)
    }

    /// Sorteia um índice
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r = rng.gen_range(0.0..1.0) * self.total();
        let i = self.cdf.partition_point(|&c| c <= r);
        i.min(self.last_nonzero)
    }
}

impl StateEngine {
    /// Histograma de `shots` amostras sobre os índices de base
    ///
    /// Não muta o estado.
    pub fn sample_counts<R: Rng + ?Sized>(
        &self,
        shots: usize,
        rng: &mut R,
    ) -> QmResult<BTreeMap<usize, usize>> {
        let distribution = CumulativeDistribution::new(&self.probabilities())?;
        Ok(histogram(&distribution, shots, rng))
    }

    /// Histograma de `shots` amostras sobre os resultados marginais dos qubits dados
    pub fn sample_marginal_counts<R: Rng + ?Sized>(
        &self,
        qubits: &[usize],
        shots: usize,
        rng: &mut R,
    ) -> QmResult<BTreeMap<usize, usize>> {
        let marginals = self.marginal_probabilities(qubits)?;
        let distribution = CumulativeDistribution::new(&marginals)?;
        Ok(histogram(&distribution, shots, rng))
    }
}

fn histogram<R: Rng + ?Sized>(
    distribution: &CumulativeDistribution,
    shots: usize,
    rng: &mut R,
) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for _ in 0..shots {
        *counts.entry(distribution.sample(rng)).or_insert(0) += 1;
    }
    counts
}
