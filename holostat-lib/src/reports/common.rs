use crate::normalize::FieldValue;

/// Placeholder shown for null cells in human-facing output.
pub const NULL_DISPLAY: &str = "-";

/// Formats a float with at most two decimals, dropping them for whole numbers.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Formats a cell for console output.
#[must_use]
pub fn format_cell(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => NULL_DISPLAY.to_string(),
        FieldValue::Float(f) => format_float(*f),
        FieldValue::Links(links) => format!("[{}]", links.len()),
        other => other.to_string(),
    }
}

/// Shortens text to at most `max` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    let flattened: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= max {
        return flattened;
    }

    let mut shortened: String = flattened.chars().take(max.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
