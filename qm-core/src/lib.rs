//! # ⚛️ qm-core — QMind Core
//!
//! Representação numérica compartilhada pelo simulador: vetor de
//! amplitudes complexas, taxonomia de erros e configuração da engine.
//!
//! ## Computational Complexity
//!
//! **Storage — O(2^n):**
//! - n = number of qubits, one `Complex64` (16 bytes) per basis index
//! - `max_qubits` guards the allocation before it happens
//!
//! **Norm / probabilities / normalize — O(2^n):**
//! - Single pass over the amplitudes
//!
//! ## Módulos
//!
//! - [`vector`]: StateVector: amplitudes da base computacional
//! - [`error`]: QmError: Configuration, InvalidTarget, NonUnitaryGate,
//!   InvalidParameter, NumericalDrift, UnknownGate
//! - [`config`]: EngineConfig: limites e tolerâncias (`.env` / ambiente)
//!
//! ## Exemplo
//!
//! ```
//! use qm_core::prelude::*;
//!
//! let state = StateVector::new(2).unwrap();
//! assert_eq!(state.dimension(), 4);
//! assert_eq!(state.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod vector;

pub use config::{
    EngineConfig, DEFAULT_DRIFT_TOLERANCE, DEFAULT_MAX_QUBITS, DEFAULT_UNITARITY_TOLERANCE,
    HARD_MAX_QUBITS,
};
pub use error::{QmError, QmResult};
pub use num_complex::Complex64;
pub use vector::{format_basis, parse_basis, StateVector, ONE, ZERO};
