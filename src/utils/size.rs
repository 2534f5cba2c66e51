//! Human-readable byte sizes for task size reports.

/// Format a byte count with decimal units (`B`, `kB`, `MB`, `GB`).
///
/// # Examples
///
/// - `format_size(0)` -> `"0 B"`
/// - `format_size(999)` -> `"999 B"`
/// - `format_size(1234)` -> `"1.23 kB"`
/// - `format_size(5_500_000)` -> `"5.5 MB"`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["kB", "MB", "GB"];

    if bytes < 1000 {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1000.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1000.0 {
            break;
        }
        value /= 1000.0;
        unit = next;
    }

    let formatted = format!("{value:.2}");
    let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{formatted} {unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(999), "999 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(format_size(1000), "1 kB");
        assert_eq!(format_size(1234), "1.23 kB");
        assert_eq!(format_size(1500), "1.5 kB");
    }

    #[test]
    fn test_format_size_larger_units() {
        assert_eq!(format_size(5_500_000), "5.5 MB");
        assert_eq!(format_size(2_000_000_000), "2 GB");
    }
}
