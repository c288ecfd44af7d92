//! Construtor de circuitos
//!
//! Um circuito é um log de execução adiada: as operações só tocam no
//! vetor de estado quando `run` é chamado. Aridade e alvos duplicados são
//! checados já no `append`; o alcance dos índices depende do tamanho do
//! registrador e só é verificado pela engine durante a execução.

use std::fmt;

use qm_core::QmError;
use qm_engine::StateEngine;
use qm_gates::Gate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CircuitError, CircuitResult};

/// Estado do construtor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitState {
    /// Nenhuma operação registrada
    Empty,
    /// Operações pendentes, ainda mutável
    Building,
    /// Sequência congelada em um `Circuit`
    Built,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Building => write!(f, "building"),
            Self::Built => write!(f, "built"),
        }
    }
}

/// Operação: porta + alvos ordenados
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub gate: Gate,
    pub targets: Vec<usize>,
}

impl Operation {
    /// Cria operação checando aridade e duplicatas
    pub fn new(gate: Gate, targets: Vec<usize>) -> Result<Self, QmError> {
        if targets.len() != gate.arity() {
            return Err(QmError::invalid_target(
                &targets,
                format!(
                    "gate '{}' acts on {} qubit(s), got {} target(s)",
                    gate.name(),
                    gate.arity(),
                    targets.len()
                ),
            ));
        }
        for (i, q) in targets.iter().enumerate() {
            if targets[..i].contains(q) {
                return Err(QmError::invalid_target(&targets, format!("duplicate qubit {q}")));
            }
        }
        Ok(Self { gate, targets })
    }

    /// Operação inversa (mesmos alvos)
    pub fn inverse(&self) -> Self {
        Self {
            gate: self.gate.inverse(),
            targets: self.targets.clone(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.gate, self.targets)
    }
}

/// Construtor mutável de circuitos
#[derive(Debug, Clone, Default)]
pub struct CircuitBuilder {
    operations: Vec<Operation>,
}

impl CircuitBuilder {
    /// Cria construtor vazio
    pub fn new() -> Self {
        Self::default()
    }

    /// Estado atual: `Empty` ou `Building`
    pub fn state(&self) -> CircuitState {
        if self.operations.is_empty() {
            CircuitState::Empty
        } else {
            CircuitState::Building
        }
    }

    /// Registra uma operação sem executá-la
    pub fn append(&mut self, gate: Gate, targets: &[usize]) -> CircuitResult<&mut Self> {
        let op = Operation::new(gate, targets.to_vec())?;
        self.operations.push(op);
        Ok(self)
    }

    /// Registra uma operação já validada
    pub fn push(&mut self, op: Operation) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operações pendentes, em ordem
    pub fn pending(&self) -> &[Operation] {
        &self.operations
    }

    /// Número de operações pendentes
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Nenhuma operação pendente?
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Descarta as operações pendentes
    pub fn reset(&mut self) {
        self.operations.clear();
    }

    /// Congela a sequência em um circuito imutável
    pub fn build(&self) -> Circuit {
        Circuit {
            operations: self.operations.clone(),
        }
    }

    /// Executa uma cópia da sequência atual; o construtor continua utilizável
    pub fn run(&self, engine: &mut StateEngine) -> CircuitResult<()> {
        run_operations(&self.operations, engine)
    }

    // ═══════════════════════════════════════════════════════════════
    // Atalhos
    // ═══════════════════════════════════════════════════════════════

    pub fn h(&mut self, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::h(), &[q])
    }

    pub fn x(&mut self, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::x(), &[q])
    }

    pub fn y(&mut self, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::y(), &[q])
    }

    pub fn z(&mut self, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::z(), &[q])
    }

    pub fn s(&mut self, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::s(), &[q])
    }

    pub fn t(&mut self, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::t(), &[q])
    }

    pub fn rx(&mut self, theta: f64, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::rx(theta)?, &[q])
    }

    pub fn ry(&mut self, theta: f64, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::ry(theta)?, &[q])
    }

    pub fn rz(&mut self, theta: f64, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::rz(theta)?, &[q])
    }

    pub fn phase(&mut self, phi: f64, q: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::phase(phi)?, &[q])
    }

    /// CNOT com `control` → `target`
    pub fn cx(&mut self, control: usize, target: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::cnot(), &[control, target])
    }

    pub fn cz(&mut self, a: usize, b: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::cz(), &[a, b])
    }

    pub fn cphase(&mut self, phi: f64, control: usize, target: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::cphase(phi)?, &[control, target])
    }

    pub fn swap(&mut self, a: usize, b: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::swap(), &[a, b])
    }

    /// Toffoli com dois controles
    pub fn ccx(&mut self, c0: usize, c1: usize, target: usize) -> CircuitResult<&mut Self> {
        self.append(Gate::toffoli(), &[c0, c1, target])
    }
}

/// Circuito congelado
///
/// Executá-lo não o consome: o mesmo circuito pode rodar contra várias
/// engines independentes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Circuit {
    operations: Vec<Operation>,
}

impl Circuit {
    /// Sempre `Built`
    pub fn state(&self) -> CircuitState {
        CircuitState::Built
    }

    /// Operações, em ordem de execução
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Menor registrador em que todos os alvos cabem
    pub fn min_qubits(&self) -> usize {
        self.operations
            .iter()
            .flat_map(|op| op.targets.iter())
            .max()
            .map_or(0, |&q| q + 1)
    }

    /// Aplica as operações em ordem; a primeira falha interrompe a execução
    ///
    /// As operações anteriores à falha permanecem aplicadas ao estado.
    pub fn run(&self, engine: &mut StateEngine) -> CircuitResult<()> {
        run_operations(&self.operations, engine)
    }

    /// Novo construtor com cópia das operações
    pub fn to_builder(&self) -> CircuitBuilder {
        CircuitBuilder {
            operations: self.operations.clone(),
        }
    }

    /// Circuito inverso: operações invertidas em ordem reversa
    pub fn inverse(&self) -> Circuit {
        Circuit {
            operations: self.operations.iter().rev().map(Operation::inverse).collect(),
        }
    }

    /// Concatena `other` depois deste circuito
    pub fn then(&self, other: &Circuit) -> Circuit {
        let mut operations = self.operations.clone();
        operations.extend(other.operations.iter().cloned());
        Circuit { operations }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit ({} operations, {} qubits):", self.len(), self.min_qubits())?;
        for (step, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {step:>3}: {op}")?;
        }
        Ok(())
    }
}

fn run_operations(operations: &[Operation], engine: &mut StateEngine) -> CircuitResult<()> {
    debug!(operations = operations.len(), num_qubits = engine.num_qubits(), "running circuit");
    for (step, op) in operations.iter().enumerate() {
        if let Err(source) = engine.apply_gate(&op.gate, &op.targets) {
            warn!(step, gate = %op.gate, targets = ?op.targets, error = %source, "circuit step failed");
            return Err(CircuitError::Step {
                step,
                gate: op.gate.name().to_string(),
                targets: op.targets.clone(),
                source,
            });
        }
    }
    Ok(())
}
