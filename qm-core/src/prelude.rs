//! Prelude do QMind
//!
//! ```
//! use qm_core::prelude::*;
//! ```

pub use crate::config::EngineConfig;
pub use crate::error::{QmError, QmResult};
pub use crate::vector::{format_basis, parse_basis, StateVector};
pub use num_complex::Complex64;
