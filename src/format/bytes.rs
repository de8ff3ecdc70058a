const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units and two decimals.
///
/// Zero, negative and non-finite counts, and counts below one byte, render
/// as `"0 B"`. Counts past the last unit stay in TB.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }

    let index = (bytes.ln() / 1024f64.ln()).floor();
    if index < 0.0 {
        return "0 B".to_string();
    }
    let index = (index as usize).min(UNITS.len() - 1);

    let value = bytes / 1024f64.powi(index as i32);
    format!("{:.2} {}", value, UNITS[index])
}

/// Share of a data limit that has been used, clamped to 0..=100.
/// An unlimited plan (limit 0) reports 0.
pub fn usage_percentage(used: u64, limit: u64) -> f64 {
    if limit == 0 || used == 0 {
        return 0.0;
    }
    (used as f64 / limit as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_known_values() {
        assert_eq!(format_bytes(0.0), "0 B");
        assert_eq!(format_bytes(1.0), "1.00 B");
        assert_eq!(format_bytes(1023.0), "1023.00 B");
        assert_eq!(format_bytes(1024.0), "1.00 KB");
        assert_eq!(format_bytes(1536.0), "1.50 KB");
        assert_eq!(format_bytes(1_048_576.0), "1.00 MB");
        assert_eq!(format_bytes(1_073_741_824.0), "1.00 GB");
        assert_eq!(format_bytes(1_099_511_627_776.0), "1.00 TB");
    }

    #[test]
    fn test_format_bytes_degenerate_inputs() {
        assert_eq!(format_bytes(f64::NAN), "0 B");
        assert_eq!(format_bytes(f64::INFINITY), "0 B");
        assert_eq!(format_bytes(-5.0), "0 B");
        assert_eq!(format_bytes(0.5), "0 B");
    }

    #[test]
    fn test_format_bytes_clamps_to_terabytes() {
        assert_eq!(format_bytes(1024f64.powi(5)), "1024.00 TB");
    }

    #[test]
    fn test_usage_percentage() {
        assert_eq!(usage_percentage(0, 100), 0.0);
        assert_eq!(usage_percentage(50, 0), 0.0);
        assert_eq!(usage_percentage(25, 100), 25.0);
        assert_eq!(usage_percentage(300, 100), 100.0);
    }
}
