//! Matriz complexa densa para gates de k qubits

use num_complex::Complex64;
use qm_core::{QmError, QmResult, ONE, ZERO};
use serde::{Deserialize, Serialize};

/// Matriz quadrada 2^k × 2^k, armazenada por linhas
///
/// A desserialização passa por [`Matrix::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    dim: usize,
    data: Vec<Complex64>,
}

#[derive(Deserialize)]
struct RawMatrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = QmError;

    fn try_from(raw: RawMatrix) -> QmResult<Self> {
        Matrix::new(raw.dim, raw.data)
    }
}

impl Matrix {
    /// Cria a partir de dados row-major
    ///
    /// A dimensão precisa ser uma potência de dois ≥ 2 e todos os elementos,
    /// finitos.
    pub fn new(dim: usize, data: Vec<Complex64>) -> QmResult<Self> {
        if dim < 2 || !dim.is_power_of_two() {
            return Err(QmError::invalid_parameter(
                "matrix",
                format!("dimension must be a power of two >= 2, got {dim}"),
            ));
        }
        if data.len() != dim * dim {
            return Err(QmError::invalid_parameter(
                "matrix",
                format!("expected {} elements for a {dim}x{dim} matrix, got {}", dim * dim, data.len()),
            ));
        }
        if data.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
            return Err(QmError::invalid_parameter("matrix", "elements must be finite"));
        }
        Ok(Self { dim, data })
    }

    /// Cria a partir de linhas
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> QmResult<Self> {
        let dim = rows.len();
        if rows.iter().any(|row| row.len() != dim) {
            return Err(QmError::invalid_parameter("matrix", "matrix must be square"));
        }
        Self::new(dim, rows.into_iter().flatten().collect())
    }

    /// Matriz identidade
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![ZERO; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = ONE;
        }
        Self { dim, data }
    }

    /// Matriz diagonal
    pub(crate) fn diagonal(entries: &[Complex64]) -> Self {
        let dim = entries.len();
        let mut data = vec![ZERO; dim * dim];
        for (i, &z) in entries.iter().enumerate() {
            data[i * dim + i] = z;
        }
        Self { dim, data }
    }

    /// Matriz de permutação: coluna `j` vai para a linha `perm[j]`
    pub(crate) fn permutation(perm: &[usize]) -> Self {
        let dim = perm.len();
        let mut data = vec![ZERO; dim * dim];
        for (col, &row) in perm.iter().enumerate() {
            data[row * dim + col] = ONE;
        }
        Self { dim, data }
    }

    /// Matriz 2×2 [[a, b], [c, d]]
    pub(crate) fn two_by_two(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self {
            dim: 2,
            data: vec![a, b, c, d],
        }
    }

    /// Dimensão (2^k)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Número de qubits sobre os quais a matriz atua (k)
    #[inline]
    pub fn arity(&self) -> usize {
        self.dim.trailing_zeros() as usize
    }

    /// Elemento (linha, coluna)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Dados row-major
    #[inline]
    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    /// Produto matricial; `None` se as dimensões diferem
    pub fn mul(&self, other: &Matrix) -> Option<Matrix> {
        if self.dim != other.dim {
            return None;
        }
        let n = self.dim;
        let mut data = vec![ZERO; n * n];
        for i in 0..n {
            for k in 0..n {
                let aik = self.data[i * n + k];
                if aik == ZERO {
                    continue;
                }
                for j in 0..n {
                    data[i * n + j] += aik * other.data[k * n + j];
                }
            }
        }
        Some(Matrix { dim: n, data })
    }

    /// Transposta conjugada (dagger)
    pub fn dagger(&self) -> Matrix {
        let n = self.dim;
        let mut data = vec![ZERO; n * n];
        for i in 0..n {
            for j in 0..n {
                data[j * n + i] = self.data[i * n + j].conj();
            }
        }
        Matrix { dim: n, data }
    }

    /// ‖U·U† − I‖∞ elemento a elemento
    pub fn unitarity_deviation(&self) -> f64 {
        let n = self.dim;
        let mut max = 0.0_f64;
        for i in 0..n {
            for j in 0..n {
                let mut acc = ZERO;
                for k in 0..n {
                    acc += self.data[i * n + k] * self.data[j * n + k].conj();
                }
                let expected = if i == j { ONE } else { ZERO };
                max = max.max((acc - expected).norm());
            }
        }
        max
    }

    /// Verifica U·U† = I dentro da tolerância
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.unitarity_deviation() <= tolerance
    }

    /// Multiplica a matriz por um sub-vetor de amplitudes
    ///
    /// `input` e `output` precisam ter comprimento `dim`.
    #[inline]
    pub fn apply(&self, input: &[Complex64], output: &mut [Complex64]) {
        let n = self.dim;
        for (row, out) in output.iter_mut().enumerate().take(n) {
            let coeffs = &self.data[row * n..(row + 1) * n];
            *out = coeffs.iter().zip(input).map(|(m, a)| m * a).sum();
        }
    }

    /// Distância ∞ elemento a elemento
    pub fn max_distance(&self, other: &Matrix) -> Option<f64> {
        if self.dim != other.dim {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).norm())
                .fold(0.0, f64::max),
        )
    }
}
