//! Configuração da engine
//!
//! Carrega limites e tolerâncias de um arquivo `.env` ou de variáveis de
//! ambiente. Valores ausentes ou ilegíveis caem nos defaults.
//!
//! | Variável                     | Default | Campo                 |
//! |------------------------------|---------|-----------------------|
//! | `QMIND_MAX_QUBITS`           | 20      | `max_qubits`          |
//! | `QMIND_DRIFT_TOLERANCE`      | 1e-9    | `drift_tolerance`     |
//! | `QMIND_UNITARITY_TOLERANCE`  | 1e-10   | `unitarity_tolerance` |

use std::env;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{QmError, QmResult};

/// Teto absoluto de qubits (2^30 amplitudes = 16 GiB)
pub const HARD_MAX_QUBITS: usize = 30;

/// Limite padrão de qubits (2^20 amplitudes = 16 MiB)
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Desvio máximo de ‖ψ‖² antes de `NumericalDrift`
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 1e-9;

/// Desvio máximo de U·U† em relação a I
pub const DEFAULT_UNITARITY_TOLERANCE: f64 = 1e-10;

pub const ENV_MAX_QUBITS: &str = "QMIND_MAX_QUBITS";
pub const ENV_DRIFT_TOLERANCE: &str = "QMIND_DRIFT_TOLERANCE";
pub const ENV_UNITARITY_TOLERANCE: &str = "QMIND_UNITARITY_TOLERANCE";

// Carrega .env uma única vez
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Configuração da engine de estado
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Número máximo de qubits aceito por `initialize` (guarda de memória)
    pub max_qubits: usize,
    /// Tolerância de normalização após cada operação
    pub drift_tolerance: f64,
    /// Tolerância da verificação de unitariedade de gates customizados
    pub unitarity_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            unitarity_tolerance: DEFAULT_UNITARITY_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Lê a configuração do ambiente (carregando `.env` se existir)
    pub fn from_env() -> Self {
        ensure_loaded();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Lê a configuração a partir de uma função de lookup arbitrária
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_qubits: parse_or(&lookup, ENV_MAX_QUBITS, defaults.max_qubits),
            drift_tolerance: parse_or(&lookup, ENV_DRIFT_TOLERANCE, defaults.drift_tolerance),
            unitarity_tolerance: parse_or(
                &lookup,
                ENV_UNITARITY_TOLERANCE,
                defaults.unitarity_tolerance,
            ),
        }
    }

    /// Substitui o limite de qubits
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Substitui a tolerância de drift
    pub fn with_drift_tolerance(mut self, tolerance: f64) -> Self {
        self.drift_tolerance = tolerance;
        self
    }

    /// Valida limites e tolerâncias
    pub fn validate(&self) -> QmResult<()> {
        if self.max_qubits == 0 || self.max_qubits > HARD_MAX_QUBITS {
            return Err(QmError::Configuration(format!(
                "max_qubits must be in 1..={HARD_MAX_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        for (name, value) in [
            ("drift_tolerance", self.drift_tolerance),
            ("unitarity_tolerance", self.unitarity_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(QmError::Configuration(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Verifica se `num_qubits` cabe nesta configuração
    pub fn check_qubits(&self, num_qubits: usize) -> QmResult<()> {
        self.validate()?;
        if num_qubits == 0 {
            return Err(QmError::Configuration(
                "qubit count must be at least 1".into(),
            ));
        }
        if num_qubits > self.max_qubits {
            return Err(QmError::Configuration(format!(
                "{num_qubits} qubits exceeds configured maximum of {}",
                self.max_qubits
            )));
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring unparsable configuration value");
                default
            }
        },
        None => default,
    }
}
