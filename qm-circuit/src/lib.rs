//! # ⚛️ qm-circuit — Circuit Builder
//!
//! Sequências de portas com execução adiada. Um `CircuitBuilder` acumula
//! operações (`empty → building`), `build()` congela a sequência em um
//! `Circuit` imutável (`built`), e `run` reproduz as operações em ordem
//! contra uma `StateEngine`.
//!
//! ## Computational Complexity
//!
//! **append — O(k):**
//! - Checagem de aridade e duplicatas, k = aridade da porta
//!
//! **run — O(m · 2^n · 2^k):**
//! - m operações, cada uma delegada ao kernel da engine
//!
//! **Record load — O(file size):**
//! - JSON via `serde_json`, TOML via `toml`
//!
//! ## Módulos
//!
//! - [`builder`]: CircuitBuilder, Circuit, Operation
//! - [`record`]: CircuitRecord, formato de arquivo `(gate, params, targets)`
//! - [`templates`]: Bell, GHZ, QFT
//! - [`error`]: CircuitError com contexto de passo
//!
//! ## Exemplo
//!
//! ```
//! use qm_circuit::CircuitBuilder;
//! use qm_engine::StateEngine;
//!
//! let mut builder = CircuitBuilder::new();
//! builder.h(0).unwrap().cx(0, 1).unwrap();
//! let circuit = builder.build();
//!
//! let mut engine = StateEngine::new(2).unwrap();
//! circuit.run(&mut engine).unwrap();
//! assert!((engine.probabilities()[0b11] - 0.5).abs() < 1e-12);
//! ```

pub mod builder;
pub mod error;
pub mod record;
pub mod templates;

pub use builder::{Circuit, CircuitBuilder, CircuitState, Operation};
pub use error::{CircuitError, CircuitResult};
pub use record::{CircuitRecord, OpRecord};
pub use templates::{bell, ghz, qft, BellState};
