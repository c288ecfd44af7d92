//! # 🚪 qm-gates — Gate Library
//!
//! Descritores de portas quânticas: matriz unitária + aridade.
//! O conjunto padrão é fechado ([`GateKind`]); matrizes fornecidas pelo
//! usuário entram por [`Gate::custom`], que valida unitariedade.
//!
//! ## Computational Complexity
//!
//! **Matrix construction — O(4^k):**
//! - k = gate arity (1 to 3 for the standard library)
//!
//! **Unitarity check — O(8^k):**
//! - Only custom gates pay it, once at construction and once per application
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          Gate                                   │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Standard(GateKind)  — closed, unitary    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Custom(CustomGate)  — validated Matrix   │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qm_gates::{Gate, GateKind};
//!
//! let h = Gate::h();
//! assert_eq!(h.arity(), 1);
//! assert!(h.matrix().is_unitary(1e-12));
//!
//! let rx = Gate::rx(std::f64::consts::PI).unwrap();
//! assert_eq!(rx.inverse(), Gate::Standard(GateKind::RotationX(-std::f64::consts::PI)));
//!
//! assert!(Gate::rx(f64::NAN).is_err());
//! ```

pub mod gates;
pub mod matrix;

pub use gates::{check_angle, CustomGate, Gate, GateInfo, GateKind};
pub use matrix::Matrix;
