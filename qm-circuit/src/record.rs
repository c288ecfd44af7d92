//! Registros de circuito (JSON / TOML)
//!
//! Formato de arquivo: lista ordenada de `(gate, params, targets)`.
//! Portas customizadas levam a matriz como linhas de pares `[re, im]`.
//!
//! ```toml
//! qubits = 2
//! shots = 100
//!
//! [[operations]]
//! gate = "h"
//! targets = [0]
//!
//! [[operations]]
//! gate = "cx"
//! targets = [0, 1]
//! ```

use std::path::Path;

use num_complex::Complex64;
use qm_core::{QmError, DEFAULT_UNITARITY_TOLERANCE};
use qm_gates::{Gate, Matrix};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::{Circuit, CircuitBuilder, Operation};
use crate::error::{CircuitError, CircuitResult};

/// Circuito serializável
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitRecord {
    /// Tamanho do registrador
    pub qubits: usize,

    /// Qubits a medir depois da execução (vazio = todos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<Vec<usize>>,

    /// Número de shots amostrados da distribuição final
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<usize>,

    /// Operações em ordem
    #[serde(default)]
    pub operations: Vec<OpRecord>,
}

/// Uma operação do registro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpRecord {
    /// Nome da porta (padrão ou customizada)
    pub gate: String,

    /// Parâmetros reais (ângulos)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,

    /// Qubits alvo, em ordem
    pub targets: Vec<usize>,

    /// Matriz de porta customizada, linhas de `[re, im]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<[f64; 2]>>>,
}

impl OpRecord {
    /// Converte em porta, validando nome, parâmetros e unitariedade
    pub fn to_gate(&self, tolerance: f64) -> Result<Gate, QmError> {
        match &self.matrix {
            Some(rows) => {
                let rows = rows
                    .iter()
                    .map(|row| row.iter().map(|&[re, im]| Complex64::new(re, im)).collect())
                    .collect();
                Gate::custom(self.gate.clone(), Matrix::from_rows(rows)?, tolerance)
            }
            None => Gate::from_name(&self.gate, &self.params),
        }
    }

    /// Registro de uma operação
    pub fn from_operation(op: &Operation) -> Self {
        let matrix = op.gate.is_custom().then(|| {
            let matrix = op.gate.matrix();
            (0..matrix.dim())
                .map(|r| {
                    (0..matrix.dim())
                        .map(|c| {
                            let z = matrix.get(r, c);
                            [z.re, z.im]
                        })
                        .collect()
                })
                .collect()
        });
        Self {
            gate: op.gate.name().to_string(),
            params: op.gate.params(),
            targets: op.targets.clone(),
            matrix,
        }
    }
}

impl CircuitRecord {
    /// Registro de um circuito construído
    pub fn from_circuit(circuit: &Circuit, qubits: usize) -> Self {
        Self {
            qubits,
            measure: None,
            shots: None,
            operations: circuit.operations().iter().map(OpRecord::from_operation).collect(),
        }
    }

    /// Converte em circuito com a tolerância padrão de unitariedade
    pub fn to_circuit(&self) -> CircuitResult<Circuit> {
        self.to_circuit_with(DEFAULT_UNITARITY_TOLERANCE)
    }

    /// Converte em circuito; a primeira operação inválida é reportada com seu índice
    pub fn to_circuit_with(&self, tolerance: f64) -> CircuitResult<Circuit> {
        let mut builder = CircuitBuilder::new();
        for (step, record) in self.operations.iter().enumerate() {
            let op = record
                .to_gate(tolerance)
                .and_then(|gate| Operation::new(gate, record.targets.clone()))
                .map_err(|source| CircuitError::Step {
                    step,
                    gate: record.gate.clone(),
                    targets: record.targets.clone(),
                    source,
                })?;
            builder.push(op);
        }
        Ok(builder.build())
    }

    /// Lê de JSON
    pub fn from_json_str(content: &str) -> CircuitResult<Self> {
        serde_json::from_str(content).map_err(|e| CircuitError::Parse(format!("invalid JSON: {e}")))
    }

    /// Escreve JSON legível
    pub fn to_json_string(&self) -> CircuitResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CircuitError::Parse(e.to_string()))
    }

    /// Lê de TOML
    pub fn from_toml_str(content: &str) -> CircuitResult<Self> {
        toml::from_str(content).map_err(|e| CircuitError::Parse(format!("invalid TOML: {e}")))
    }

    /// Escreve TOML legível
    pub fn to_toml_string(&self) -> CircuitResult<String> {
        toml::to_string_pretty(self).map_err(|e| CircuitError::Parse(e.to_string()))
    }

    /// Carrega de arquivo; o formato vem da extensão (`.json` ou `.toml`)
    pub fn load(path: &Path) -> CircuitResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CircuitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        debug!(path = %path.display(), ?extension, "loading circuit record");

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(CircuitError::Parse(format!(
                "unsupported circuit file extension: {} (expected .json or .toml)",
                path.display()
            ))),
        }
    }
}
