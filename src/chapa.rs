// 🔑 Chapa - Normalização do identificador do motorista
// Every source pads the chapa differently (fixed-width zeros, stray
// whitespace, float-formatted numbers); comparisons only happen on the
// normalized form.

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Canonical form of a chapa/RE: surrounding whitespace removed, a trailing
/// ".0" from float-formatted cells removed, then every leading '0' stripped.
///
/// Total and idempotent. `"0"` and `""` both normalize to the empty string,
/// which matches no record — callers treat it as not-found, never as a
/// wildcard.
///
/// # Examples
/// ```
/// use chatbot_motorista::normalizar_chapa;
///
/// assert_eq!(normalizar_chapa("014594"), "14594");
/// assert_eq!(normalizar_chapa("  4639 "), "4639");
/// assert_eq!(normalizar_chapa("19135.0"), "19135");
/// ```
pub fn normalizar_chapa(bruta: &str) -> String {
    let limpa = bruta.trim();
    // Spreadsheet exports sometimes render numeric chapas as "4639.0"
    let limpa = limpa.strip_suffix(".0").unwrap_or(limpa);
    limpa.trim_start_matches('0').to_string()
}

// ============================================================================
// TESTS
// ============================================================================
