//! Tipos de erro para qm-circuit

use std::path::PathBuf;

use qm_core::QmError;
use thiserror::Error;

/// Resultado customizado para operações de circuito
pub type CircuitResult<T> = Result<T, CircuitError>;

/// Erros de construção, carga e execução de circuitos
#[derive(Debug, Error)]
pub enum CircuitError {
    /// Erro do simulador fora de uma execução (append, record, template)
    #[error(transparent)]
    Core(#[from] QmError),

    /// Falha na operação `step` (base 0), ao convertê-la ou ao executá-la
    #[error("Step {step} ({gate} on {targets:?}) failed")]
    Step {
        step: usize,
        gate: String,
        targets: Vec<usize>,
        #[source]
        source: QmError,
    },

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse circuit record: {0}")]
    Parse(String),
}

impl CircuitError {
    /// Erro do simulador subjacente, se houver
    pub fn core(&self) -> Option<&QmError> {
        match self {
            Self::Core(err) | Self::Step { source: err, .. } => Some(err),
            _ => None,
        }
    }

    /// Nome curto da categoria do erro
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Core(err) | Self::Step { source: err, .. } => err.kind(),
            Self::Io { .. } => "IoError",
            Self::Parse(_) => "ParseError",
        }
    }
}
