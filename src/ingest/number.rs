//! Best-effort coercion of locale-formatted numeric cells.

/// Parses a numeric cell such as `"1,234,567.8"`.
///
/// Thousands separators and surrounding whitespace are ignored. Anything
/// that is not a finite number (blank, `"."`, free text) is missing.
///
/// # Examples
///
/// ```
/// use nuclear_cf::ingest::number::parse_number;
///
/// assert_eq!(parse_number(" 1,024.5 "), Some(1024.5));
/// assert_eq!(parse_number("-12"), Some(-12.0));
/// assert_eq!(parse_number("."), None);
/// ```
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell.chars().filter(|&c| c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a report-year cell, accepting `"2021"` and `"2021.0"`.
pub fn parse_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}
