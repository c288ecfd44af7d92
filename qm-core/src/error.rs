//! Tipos de erro para qm-core

use thiserror::Error;

/// Resultado customizado para operações do simulador
pub type QmResult<T> = Result<T, QmError>;

/// Erros que podem ocorrer no simulador
///
/// Nenhum erro é recuperado localmente: todos sobem imediatamente para quem
/// chamou a engine ou o circuito. A única condição absorvida é drift numérico
/// dentro da tolerância, corrigido por renormalização.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid target qubits {targets:?}: {reason}")]
    InvalidTarget { targets: Vec<usize>, reason: String },

    #[error("Gate '{gate}' is not unitary (‖U·U† − I‖∞ = {deviation:e})")]
    NonUnitaryGate { gate: String, deviation: f64 },

    #[error("Invalid parameter for gate '{gate}': {reason}")]
    InvalidParameter { gate: String, reason: String },

    #[error("Numerical drift: |‖ψ‖² − 1| = {deviation:e} exceeds tolerance {tolerance:e}")]
    NumericalDrift { deviation: f64, tolerance: f64 },

    #[error("Unknown gate: {0}")]
    UnknownGate(String),
}

impl QmError {
    /// Atalho para `InvalidTarget`
    pub fn invalid_target(targets: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            targets: targets.to_vec(),
            reason: reason.into(),
        }
    }

    /// Atalho para `InvalidParameter`
    pub fn invalid_parameter(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            gate: gate.into(),
            reason: reason.into(),
        }
    }

    /// Nome curto da categoria do erro, usado pela CLI ao reportar falhas
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::InvalidTarget { .. } => "InvalidTargetError",
            Self::NonUnitaryGate { .. } => "NonUnitaryGateError",
            Self::InvalidParameter { .. } => "InvalidParameterError",
            Self::NumericalDrift { .. } => "NumericalDriftError",
            Self::UnknownGate(_) => "UnknownGateError",
        }
    }
}
