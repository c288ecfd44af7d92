//! Visualização em texto do estado final
//!
//! Somente leitura: recebe snapshots e resultados já calculados e
//! devolve texto pronto para o terminal.

use std::collections::BTreeMap;
use std::fmt::Write;

use colored::*;
use qm_core::format_basis;
use qm_engine::{BlochVector, MeasurementOutcome, StateSnapshot};
use qm_gates::GateKind;

/// Largura máxima das barras
const BAR_WIDTH: usize = 32;

/// Probabilidades abaixo disto não aparecem na tabela
pub const DISPLAY_THRESHOLD: f64 = 1e-12;

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn format_amplitude(re: f64, im: f64) -> String {
    format!("{re:+.4}{im:+.4}i")
}

/// Tabela de amplitudes e probabilidades
pub fn state_table(snapshot: &StateSnapshot) -> String {
    let mut out = String::new();
    let entries = snapshot.entries(DISPLAY_THRESHOLD);
    let width = snapshot.num_qubits + 2;

    let _ = writeln!(
        out,
        "{}",
        format!(
            "State ({} qubits, {} non-zero of {} basis states)",
            snapshot.num_qubits,
            entries.len(),
            snapshot.probabilities.len()
        )
        .bold()
    );
    for entry in entries {
        let ket = format!("|{}⟩", entry.bitstring);
        let _ = writeln!(
            out,
            "  {:<width$}  {:>18}  {:>7.4}  {}",
            ket.cyan(),
            format_amplitude(entry.amplitude[0], entry.amplitude[1]),
            entry.probability,
            bar(entry.probability).green(),
            width = width,
        );
    }
    out
}

/// Histograma de shots
pub fn counts_table(counts: &BTreeMap<usize, usize>, num_bits: usize) -> String {
    let mut out = String::new();
    let shots: usize = counts.values().sum();
    let _ = writeln!(out, "{}", format!("Counts ({shots} shots)").bold());
    for (&value, &count) in counts {
        let fraction = if shots == 0 { 0.0 } else { count as f64 / shots as f64 };
        let _ = writeln!(
            out,
            "  {}  {:>8}  {}",
            format_basis(value, num_bits).cyan(),
            count,
            bar(fraction).yellow(),
        );
    }
    out
}

/// Resultado de medição
pub fn measurement_line(outcome: &MeasurementOutcome) -> String {
    format!(
        "{} qubits {:?} → {} (p = {:.4})",
        "Measured".green().bold(),
        outcome.qubits,
        outcome.bitstring().cyan(),
        outcome.probability
    )
}

/// Vetores de Bloch por qubit
pub fn bloch_table(vectors: &[BlochVector]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Bloch vectors".bold());
    for (qubit, v) in vectors.iter().enumerate() {
        let _ = writeln!(
            out,
            "  q{qubit:<3} x={:+.4} y={:+.4} z={:+.4}  |r|={:.4}",
            v.x,
            v.y,
            v.z,
            v.length()
        );
    }
    out
}

/// Catálogo de portas
pub fn gate_catalog() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Gate library".bold());
    for info in GateKind::catalog() {
        let aliases = if info.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", info.aliases.join(", "))
        };
        let _ = writeln!(
            out,
            "  {:<6}{:<22} {} qubit(s), {} param(s)  {}",
            info.name.cyan(),
            aliases,
            info.arity,
            info.params,
            info.description.dimmed(),
        );
    }
    out
}
