//! # ⚛️ qm-engine — State Engine
//!
//! Simulação de vetor de estado: aplicação de portas, probabilidades,
//! medição e colapso. A engine é dona exclusiva do vetor de amplitudes;
//! a aleatoriedade da medição é sempre injetada pelo chamador.
//!
//! ## Computational Complexity
//!
//! **Gate application — O(2^n · 2^k):**
//! - n = number of qubits, k = gate arity (1-3 for the standard library)
//! - 2^(n−k) blocks, each a 2^k × 2^k matrix-vector product
//! - No full 2^n × 2^n operator is ever built
//!
//! **Probabilities / marginals — O(2^n):**
//! - Single pass, read-only
//!
//! **Measurement — O(2^n):**
//! - Marginal pass + collapse pass + renormalization pass
//!
//! **Shot sampling — O(2^n + shots · n):**
//! - Cumulative distribution built once, binary search per shot
//!
//! **Scalability:**
//! - Memory is 16 · 2^n bytes; `EngineConfig::max_qubits` guards allocation
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          StateEngine                            │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  StateVector (2^n amplitudes)             │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Gate kernel + normalization check        │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Measurement / collapse (injected Rng)    │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qm_engine::StateEngine;
//! use qm_gates::Gate;
//! use rand::SeedableRng;
//!
//! let mut engine = StateEngine::new(2).unwrap();
//! engine.apply_gate(&Gate::h(), &[0]).unwrap();
//! engine.apply_gate(&Gate::cnot(), &[0, 1]).unwrap();
//!
//! let probs = engine.probabilities();
//! assert!((probs[0b00] - 0.5).abs() < 1e-12);
//! assert!((probs[0b11] - 0.5).abs() < 1e-12);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let outcome = engine.measure(&[0], &mut rng).unwrap();
//! assert_eq!(engine.measure(&[1], &mut rng).unwrap().bits, outcome.bits);
//! ```

pub mod engine;
pub mod inspect;
pub mod measure;
pub mod sampling;

pub use engine::StateEngine;
pub use inspect::{BasisEntry, BlochVector, StateSnapshot};
pub use measure::MeasurementOutcome;
pub use sampling::CumulativeDistribution;

pub use qm_core::{EngineConfig, QmError, QmResult, StateVector};

#[cfg(test)]
mod tests;
