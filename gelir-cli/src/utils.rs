use rust_decimal::Decimal;

/// Normalizes amount input for decimal parsing: trims whitespace, strips
/// `.` digit grouping, and turns a decimal comma into a decimal point
/// (`"1.234,56"` → `"1234.56"`).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace('.', "").replace(',', ".")
}

/// Parses an amount argument into a [`Decimal`].
///
/// Accepts Turkish-style grouped input (`"100.000"`, `"1.234,56"`).
/// Empty or whitespace-only input is treated as 0. Used as a clap value
/// parser, so the error is the message shown to the user.
pub fn parse_amount(s: &str) -> Result<Decimal, String> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e: rust_decimal::Error| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        format!("invalid amount '{s}': {e}")
    })
}
