//! Human readable values for axes, legends and tooltips.

use crate::models::FormatKind;


const BYTE_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];


/// Format a number the way `kind` asks for.
///
/// `None` and `Number` both give a thousands-separated number; `Str`
/// prints the bare value.
pub fn fmt_value(value: f64, kind: Option<FormatKind>) -> String {
    match kind {
        Some(FormatKind::Bytes) => format_bytes(value),
        Some(FormatKind::Str) => trim_decimals(value, 2),
        Some(FormatKind::Number) | None => format_thousands(value),
    }
}


/// Binary byte units with up to two decimals (`4.88 KiB`).
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }

    let mut scaled = bytes;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(scaled, 2), BYTE_UNITS[unit])
}


/// Thousands-separated number (`1,234,567`, `1,234.5`).
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let text = trim_decimals(value.abs(), 2);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && text != "0" { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}


/// Round to `decimals` places and drop trailing zeros.
fn trim_decimals(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(100.0), "100");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(1234.5), "1,234.5");
        assert_eq!(format_thousands(-4500.0), "-4,500");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0.0), "0 B");
        assert_eq!(format_bytes(512.0), "512 B");
        assert_eq!(format_bytes(1024.0), "1 KiB");
        assert_eq!(format_bytes(5000.0), "4.88 KiB");
        assert_eq!(format_bytes(3.0 * 1024.0 * 1024.0), "3 MiB");
    }

    #[test]
    fn test_fmt_value_kinds() {
        assert_eq!(fmt_value(5000.0, None), "5,000");
        assert_eq!(fmt_value(5000.0, Some(FormatKind::Number)), "5,000");
        assert_eq!(fmt_value(5000.0, Some(FormatKind::Bytes)), "4.88 KiB");
        assert_eq!(fmt_value(5000.0, Some(FormatKind::Str)), "5000");
    }
}
