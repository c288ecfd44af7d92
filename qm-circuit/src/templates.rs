//! Circuitos prontos: pares de Bell, GHZ e QFT
//!
//! ```text
//! |Φ+⟩ = (|00⟩ + |11⟩) / √2
//! |Φ-⟩ = (|00⟩ - |11⟩) / √2
//! |Ψ+⟩ = (|01⟩ + |10⟩) / √2
//! |Ψ-⟩ = (|01⟩ - |10⟩) / √2
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use qm_core::QmError;
use serde::{Deserialize, Serialize};

use crate::builder::{Circuit, CircuitBuilder};
use crate::error::CircuitResult;

/// Os quatro estados de Bell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BellState {
    #[default]
    PhiPlus,
    PhiMinus,
    PsiPlus,
    PsiMinus,
}

impl BellState {
    pub const ALL: [BellState; 4] = [
        BellState::PhiPlus,
        BellState::PhiMinus,
        BellState::PsiPlus,
        BellState::PsiMinus,
    ];

    /// Nome curto aceito pela CLI
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::PhiPlus => "phi+",
            Self::PhiMinus => "phi-",
            Self::PsiPlus => "psi+",
            Self::PsiMinus => "psi-",
        }
    }
}

impl fmt::Display for BellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhiPlus => write!(f, "|Φ+⟩"),
            Self::PhiMinus => write!(f, "|Φ-⟩"),
            Self::PsiPlus => write!(f, "|Ψ+⟩"),
            Self::PsiMinus => write!(f, "|Ψ-⟩"),
        }
    }
}

impl FromStr for BellState {
    type Err = QmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phi+" | "phi-plus" | "phiplus" => Ok(Self::PhiPlus),
            "phi-" | "phi-minus" | "phiminus" => Ok(Self::PhiMinus),
            "psi+" | "psi-plus" | "psiplus" => Ok(Self::PsiPlus),
            "psi-" | "psi-minus" | "psiminus" => Ok(Self::PsiMinus),
            other => Err(QmError::Configuration(format!(
                "unknown Bell state '{other}' (expected phi+, phi-, psi+ or psi-)"
            ))),
        }
    }
}

/// Par de Bell sobre os qubits 0 e 1
pub fn bell(state: BellState) -> CircuitResult<Circuit> {
    let mut builder = CircuitBuilder::new();
    if matches!(state, BellState::PsiPlus | BellState::PsiMinus) {
        builder.x(1)?;
    }
    builder.h(0)?.cx(0, 1)?;
    match state {
        BellState::PhiMinus => {
            builder.z(0)?;
        }
        BellState::PsiMinus => {
            builder.z(1)?;
        }
        _ => {}
    }
    Ok(builder.build())
}

/// GHZ de n qubits: (|0…0⟩ + |1…1⟩) / √2
pub fn ghz(n: usize) -> CircuitResult<Circuit> {
    if n == 0 {
        return Err(QmError::Configuration("GHZ state needs at least 1 qubit".into()).into());
    }
    let mut builder = CircuitBuilder::new();
    builder.h(0)?;
    for target in 1..n {
        builder.cx(0, target)?;
    }
    Ok(builder.build())
}

/// Transformada de Fourier quântica sobre n qubits
///
/// |x⟩ → Σ_k e^{2πi·xk/2^n} |k⟩ / √2^n, com o qubit 0 como bit menos
/// significativo. Do qubit n−1 ao 0: Hadamard e fases controladas
/// 2π/2^(i−j+1) pelos qubits j < i, seguidas da reversão de ordem com SWAPs.
pub fn qft(n: usize) -> CircuitResult<Circuit> {
    if n == 0 {
        return Err(QmError::Configuration("QFT needs at least 1 qubit".into()).into());
    }
    let mut builder = CircuitBuilder::new();
    for i in (0..n).rev() {
        builder.h(i)?;
        for j in (0..i).rev() {
            // powi: sem overflow de shift para n ≥ 65
            let phi = 2.0 * PI / 2f64.powi((i - j + 1) as i32);
            builder.cphase(phi, j, i)?;
        }
    }
    for i in 0..(n / 2) {
        builder.swap(i, n - 1 - i)?;
    }
    Ok(builder.build())
}
