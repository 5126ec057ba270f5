// src/noyau/format.rs

/// Garde-fou : au-delà, un f64 n’a plus de chiffres significatifs à montrer.
pub const DIGITS_MAX: usize = 17;

/// Affichage “court” : plus petite écriture décimale qui relit le même f64.
/// 14.0 -> "14", 0.1 -> "0.1", -0.0 -> "0".
pub fn format_resultat(v: f64) -> String {
    if v == 0.0 {
        // évite "-0" pour un zéro négatif
        return "0".to_string();
    }
    format!("{v}")
}

/// Lecture décimale à nombre de chiffres fixe (arrondi IEEE de `format!`).
pub fn format_decimal(v: f64, digits: usize) -> String {
    let digits = digits.min(DIGITS_MAX);
    if v.is_finite() {
        format!("{v:.digits$}")
    } else {
        format_resultat(v)
    }
}
