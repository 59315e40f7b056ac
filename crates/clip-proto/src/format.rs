//! Human-readable byte sizes for clip list rows.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with one decimal place, stepping units at 1024.
///
/// Zero is special-cased to `0 B` so empty/unknown sizes don't render as
/// `0.0 B`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_size(0), "0 B");
    }

    #[test]
    fn test_unit_steps() {
        assert_eq!(format_size(1), "1.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_575), "1024.0 KB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_monotonic_within_unit() {
        // More bytes never renders as a smaller value in the same unit.
        let a = format_size(2048);
        let b = format_size(2560);
        assert_eq!(a, "2.0 KB");
        assert_eq!(b, "2.5 KB");
    }
}
