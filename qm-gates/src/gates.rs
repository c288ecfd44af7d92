//! # Gate Library — Portas Quânticas do QMind
//!
//! Conjunto fechado de portas padrão mais uma porta customizada validada.
//!
//! ## Gates Implementadas
//!
//! - **Single-qubit**: I, X, Y, Z (Pauli), H (Hadamard), S, S†, T, T†, P(φ)
//! - **Rotation**: Rx(θ), Ry(θ), Rz(θ)
//! - **Two-qubit**: CNOT, CZ, CP(φ), SWAP
//! - **Three-qubit**: Toffoli (CCX)
//! - **Custom**: qualquer matriz unitária 2^k × 2^k
//!
//! ## Convenção de ordem
//!
//! O primeiro alvo é o bit mais significativo do índice local da matriz.
//! `CNOT` com alvos `[c, t]` usa portanto a matriz de livro-texto
//! (controle em `c`, NOT em `t`).

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

use num_complex::Complex64;
use qm_core::{QmError, QmResult, ONE, ZERO};
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;

#[inline]
fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Portas padrão (conjunto fechado)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    Identity,
    PauliX,
    PauliY,
    PauliZ,
    Hadamard,
    S,
    Sdg,
    T,
    Tdg,
    Phase(f64),
    RotationX(f64),
    RotationY(f64),
    RotationZ(f64),
    Cnot,
    Cz,
    ControlledPhase(f64),
    Swap,
    Toffoli,
}

/// Metadados de uma entrada do catálogo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateInfo {
    /// Nome canônico
    pub name: &'static str,
    /// Outros nomes aceitos por `Gate::from_name`
    pub aliases: &'static [&'static str],
    /// Número de qubits
    pub arity: usize,
    /// Número de parâmetros reais
    pub params: usize,
    pub description: &'static str,
}

const CATALOG: &[GateInfo] = &[
    GateInfo { name: "id", aliases: &["i", "identity"], arity: 1, params: 0, description: "Identity" },
    GateInfo { name: "x", aliases: &["not", "paulix"], arity: 1, params: 0, description: "Pauli-X (bit flip)" },
    GateInfo { name: "y", aliases: &["pauliy"], arity: 1, params: 0, description: "Pauli-Y" },
    GateInfo { name: "z", aliases: &["pauliz"], arity: 1, params: 0, description: "Pauli-Z (phase flip)" },
    GateInfo { name: "h", aliases: &["hadamard"], arity: 1, params: 0, description: "Hadamard" },
    GateInfo { name: "s", aliases: &[], arity: 1, params: 0, description: "Phase π/2 (√Z)" },
    GateInfo { name: "sdg", aliases: &["sdag"], arity: 1, params: 0, description: "Phase −π/2 (S†)" },
    GateInfo { name: "t", aliases: &[], arity: 1, params: 0, description: "Phase π/4" },
    GateInfo { name: "tdg", aliases: &["tdag"], arity: 1, params: 0, description: "Phase −π/4 (T†)" },
    GateInfo { name: "p", aliases: &["phase", "u1"], arity: 1, params: 1, description: "Phase e^{iφ} on |1⟩" },
    GateInfo { name: "rx", aliases: &[], arity: 1, params: 1, description: "Rotation about X" },
    GateInfo { name: "ry", aliases: &[], arity: 1, params: 1, description: "Rotation about Y" },
    GateInfo { name: "rz", aliases: &[], arity: 1, params: 1, description: "Rotation about Z" },
    GateInfo { name: "cx", aliases: &["cnot"], arity: 2, params: 0, description: "Controlled-NOT (control, target)" },
    GateInfo { name: "cz", aliases: &[], arity: 2, params: 0, description: "Controlled-Z" },
    GateInfo { name: "cp", aliases: &["cphase"], arity: 2, params: 1, description: "Controlled phase e^{iφ} on |11⟩" },
    GateInfo { name: "swap", aliases: &[], arity: 2, params: 0, description: "Swap two qubits" },
    GateInfo { name: "ccx", aliases: &["toffoli", "ccnot"], arity: 3, params: 0, description: "Toffoli (control, control, target)" },
];

impl GateKind {
    /// Catálogo da biblioteca, na ordem de declaração
    pub fn catalog() -> &'static [GateInfo] {
        CATALOG
    }

    /// Entrada do catálogo desta porta
    pub fn info(&self) -> &'static GateInfo {
        let index = match self {
            Self::Identity => 0,
            Self::PauliX => 1,
            Self::PauliY => 2,
            Self::PauliZ => 3,
            Self::Hadamard => 4,
            Self::S => 5,
            Self::Sdg => 6,
            Self::T => 7,
            Self::Tdg => 8,
            Self::Phase(_) => 9,
            Self::RotationX(_) => 10,
            Self::RotationY(_) => 11,
            Self::RotationZ(_) => 12,
            Self::Cnot => 13,
            Self::Cz => 14,
            Self::ControlledPhase(_) => 15,
            Self::Swap => 16,
            Self::Toffoli => 17,
        };
        &CATALOG[index]
    }

    /// Nome canônico
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Número de qubits
    pub fn arity(&self) -> usize {
        self.info().arity
    }

    /// Parâmetro real, se houver
    pub fn param(&self) -> Option<f64> {
        match *self {
            Self::Phase(v)
            | Self::RotationX(v)
            | Self::RotationY(v)
            | Self::RotationZ(v)
            | Self::ControlledPhase(v) => Some(v),
            _ => None,
        }
    }

    /// Matriz unitária
    pub fn matrix(&self) -> Matrix {
        match *self {
            Self::Identity => Matrix::identity(2),
            Self::PauliX => Matrix::permutation(&[1, 0]),
            Self::PauliY => Matrix::two_by_two(ZERO, c(0.0, -1.0), c(0.0, 1.0), ZERO),
            Self::PauliZ => Matrix::diagonal(&[ONE, c(-1.0, 0.0)]),
            Self::Hadamard => {
                let h = FRAC_1_SQRT_2;
                Matrix::two_by_two(c(h, 0.0), c(h, 0.0), c(h, 0.0), c(-h, 0.0))
            }
            Self::S => Matrix::diagonal(&[ONE, c(0.0, 1.0)]),
            Self::Sdg => Matrix::diagonal(&[ONE, c(0.0, -1.0)]),
            Self::T => Matrix::diagonal(&[ONE, Complex64::from_polar(1.0, FRAC_PI_4)]),
            Self::Tdg => Matrix::diagonal(&[ONE, Complex64::from_polar(1.0, -FRAC_PI_4)]),
            Self::Phase(phi) => Matrix::diagonal(&[ONE, Complex64::from_polar(1.0, phi)]),
            Self::RotationX(theta) => {
                let (s, co) = (theta / 2.0).sin_cos();
                Matrix::two_by_two(c(co, 0.0), c(0.0, -s), c(0.0, -s), c(co, 0.0))
            }
            Self::RotationY(theta) => {
                let (s, co) = (theta / 2.0).sin_cos();
                Matrix::two_by_two(c(co, 0.0), c(-s, 0.0), c(s, 0.0), c(co, 0.0))
            }
            Self::RotationZ(theta) => {
                let half = theta / 2.0;
                Matrix::diagonal(&[
                    Complex64::from_polar(1.0, -half),
                    Complex64::from_polar(1.0, half),
                ])
            }
            Self::Cnot => Matrix::permutation(&[0, 1, 3, 2]),
            Self::Cz => Matrix::diagonal(&[ONE, ONE, ONE, c(-1.0, 0.0)]),
            Self::ControlledPhase(phi) => {
                Matrix::diagonal(&[ONE, ONE, ONE, Complex64::from_polar(1.0, phi)])
            }
            Self::Swap => Matrix::permutation(&[0, 2, 1, 3]),
            Self::Toffoli => Matrix::permutation(&[0, 1, 2, 3, 4, 5, 7, 6]),
        }
    }

    /// Porta inversa (adjunta)
    pub fn inverse(&self) -> GateKind {
        match *self {
            Self::S => Self::Sdg,
            Self::Sdg => Self::S,
            Self::T => Self::Tdg,
            Self::Tdg => Self::T,
            Self::Phase(phi) => Self::Phase(-phi),
            Self::RotationX(theta) => Self::RotationX(-theta),
            Self::RotationY(theta) => Self::RotationY(-theta),
            Self::RotationZ(theta) => Self::RotationZ(-theta),
            Self::ControlledPhase(phi) => Self::ControlledPhase(-phi),
            other => other,
        }
    }

    /// Verifica se o parâmetro (se houver) é um real finito
    pub fn validate(&self) -> QmResult<()> {
        match self.param() {
            Some(value) => check_angle(self.name(), value).map(|_| ()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.param() {
            Some(value) => write!(f, "{}({})", self.name(), value),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// Porta customizada com matriz validada
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    name: String,
    matrix: Matrix,
}

impl CustomGate {
    /// Nome da porta
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Matriz da porta
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

/// Porta quântica: padrão ou customizada
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    Standard(GateKind),
    Custom(CustomGate),
}

impl Gate {
    pub fn identity() -> Self {
        Self::Standard(GateKind::Identity)
    }

    pub fn x() -> Self {
        Self::Standard(GateKind::PauliX)
    }

    pub fn y() -> Self {
        Self::Standard(GateKind::PauliY)
    }

    pub fn z() -> Self {
        Self::Standard(GateKind::PauliZ)
    }

    pub fn h() -> Self {
        Self::Standard(GateKind::Hadamard)
    }

    pub fn s() -> Self {
        Self::Standard(GateKind::S)
    }

    pub fn sdg() -> Self {
        Self::Standard(GateKind::Sdg)
    }

    pub fn t() -> Self {
        Self::Standard(GateKind::T)
    }

    pub fn tdg() -> Self {
        Self::Standard(GateKind::Tdg)
    }

    /// Porta de fase P(φ)
    pub fn phase(phi: f64) -> QmResult<Self> {
        Ok(Self::Standard(GateKind::Phase(check_angle("p", phi)?)))
    }

    /// Rotação em X
    pub fn rx(theta: f64) -> QmResult<Self> {
        Ok(Self::Standard(GateKind::RotationX(check_angle("rx", theta)?)))
    }

    /// Rotação em Y
    pub fn ry(theta: f64) -> QmResult<Self> {
        Ok(Self::Standard(GateKind::RotationY(check_angle("ry", theta)?)))
    }

    /// Rotação em Z
    pub fn rz(theta: f64) -> QmResult<Self> {
        Ok(Self::Standard(GateKind::RotationZ(check_angle("rz", theta)?)))
    }

    pub fn cnot() -> Self {
        Self::Standard(GateKind::Cnot)
    }

    pub fn cz() -> Self {
        Self::Standard(GateKind::Cz)
    }

    /// Fase controlada CP(φ)
    pub fn cphase(phi: f64) -> QmResult<Self> {
        Ok(Self::Standard(GateKind::ControlledPhase(check_angle("cp", phi)?)))
    }

    pub fn swap() -> Self {
        Self::Standard(GateKind::Swap)
    }

    pub fn toffoli() -> Self {
        Self::Standard(GateKind::Toffoli)
    }

    /// Porta customizada
    ///
    /// Falha com `NonUnitaryGate` se U·U† ≠ I dentro de `tolerance`.
    pub fn custom(name: impl Into<String>, matrix: Matrix, tolerance: f64) -> QmResult<Self> {
        let gate = CustomGate {
            name: name.into(),
            matrix,
        };
        let deviation = gate.matrix.unitarity_deviation();
        if deviation > tolerance {
            return Err(QmError::NonUnitaryGate {
                gate: gate.name,
                deviation,
            });
        }
        Ok(Self::Custom(gate))
    }

    /// Procura uma porta padrão pelo nome (sem diferenciar maiúsculas)
    pub fn from_name(name: &str, params: &[f64]) -> QmResult<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let info = CATALOG
            .iter()
            .find(|info| info.name == lowered || info.aliases.iter().any(|alias| *alias == lowered))
            .ok_or_else(|| QmError::UnknownGate(name.to_string()))?;

        if params.len() != info.params {
            return Err(QmError::invalid_parameter(
                info.name,
                format!("expected {} parameter(s), got {}", info.params, params.len()),
            ));
        }

        let gate = match info.name {
            "id" => Self::identity(),
            "x" => Self::x(),
            "y" => Self::y(),
            "z" => Self::z(),
            "h" => Self::h(),
            "s" => Self::s(),
            "sdg" => Self::sdg(),
            "t" => Self::t(),
            "tdg" => Self::tdg(),
            "p" => Self::phase(params[0])?,
            "rx" => Self::rx(params[0])?,
            "ry" => Self::ry(params[0])?,
            "rz" => Self::rz(params[0])?,
            "cx" => Self::cnot(),
            "cz" => Self::cz(),
            "cp" => Self::cphase(params[0])?,
            "swap" => Self::swap(),
            "ccx" => Self::toffoli(),
            other => return Err(QmError::UnknownGate(other.to_string())),
        };
        Ok(gate)
    }

    /// Nome da porta
    pub fn name(&self) -> &str {
        match self {
            Self::Standard(kind) => kind.name(),
            Self::Custom(custom) => custom.name(),
        }
    }

    /// Número de qubits
    pub fn arity(&self) -> usize {
        match self {
            Self::Standard(kind) => kind.arity(),
            Self::Custom(custom) => custom.matrix.arity(),
        }
    }

    /// Parâmetros reais
    pub fn params(&self) -> Vec<f64> {
        match self {
            Self::Standard(kind) => kind.param().into_iter().collect(),
            Self::Custom(_) => Vec::new(),
        }
    }

    /// Matriz unitária
    pub fn matrix(&self) -> Matrix {
        match self {
            Self::Standard(kind) => kind.matrix(),
            Self::Custom(custom) => custom.matrix.clone(),
        }
    }

    /// É uma porta customizada?
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Porta inversa: G · G⁻¹ = I
    pub fn inverse(&self) -> Gate {
        match self {
            Self::Standard(kind) => Self::Standard(kind.inverse()),
            Self::Custom(custom) => {
                let name = match custom.name.strip_suffix('†') {
                    Some(base) => base.to_string(),
                    None => format!("{}†", custom.name),
                };
                Self::Custom(CustomGate {
                    name,
                    matrix: custom.matrix.dagger(),
                })
            }
        }
    }

    /// Revalida a porta antes da aplicação
    ///
    /// Portas padrão verificam apenas o parâmetro; portas customizadas
    /// repetem a verificação de unitariedade.
    pub fn validate(&self, tolerance: f64) -> QmResult<()> {
        match self {
            Self::Standard(kind) => kind.validate(),
            Self::Custom(custom) => {
                let deviation = custom.matrix.unitarity_deviation();
                if deviation > tolerance {
                    return Err(QmError::NonUnitaryGate {
                        gate: custom.name.clone(),
                        deviation,
                    });
                }
                Ok(())
            }
        }
    }
}

impl From<GateKind> for Gate {
    fn from(kind: GateKind) -> Self {
        Self::Standard(kind)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(kind) => write!(f, "{kind}"),
            Self::Custom(custom) => write!(f, "{}[{}q]", custom.name, custom.matrix.arity()),
        }
    }
}

/// Valida um ângulo: precisa ser um real finito
pub fn check_angle(gate: &str, value: f64) -> QmResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QmError::invalid_parameter(
            gate,
            format!("angle must be a finite real, got {value}"),
        ))
    }
}

// =============================================================================
// Testes
// =============================================================================
