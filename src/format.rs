//! Formatting helpers for human-readable byte sizes and durations.

use std::time::Duration;

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count as a human-readable string (Bytes, KB, MB, GB).
///
/// Values are rounded to two decimal places with trailing zeros trimmed,
/// so `1024` renders as `"1 KB"` and `1536` as `"1.5 KB"`. Sizes of a
/// terabyte and beyond stay in GB.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    // ilog2 / 10 is floor(log1024) without float error on exact powers.
    let index = ((bytes.ilog2() / 10) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(index as i32);
    let numeral = format!("{value:.2}");
    let numeral = numeral.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", numeral, UNITS[index])
}

/// Formats a duration as a human-readable string (e.g. "5.0s", "1m 05s", "1h 01m 05s").
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!(
            "{}h {:02}m {:02}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}.{:01}s", secs, d.subsec_millis() / 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 Bytes");
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(500), "500 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_048_576), "1 MB");
        assert_eq!(format_bytes(1_073_741_824), "1 GB");
    }

    #[test]
    fn format_bytes_two_decimals() {
        assert_eq!(format_bytes(1100), "1.07 KB");
        assert_eq!(format_bytes(1_500_000), "1.43 MB");
    }

    #[test]
    fn format_bytes_just_below_boundary() {
        assert_eq!(format_bytes(1023), "1023 Bytes");
    }

    #[test]
    fn format_bytes_clamps_to_gb() {
        // 1 TB has no unit of its own; it stays in GB.
        assert_eq!(format_bytes(1_099_511_627_776), "1024 GB");
    }

    #[test]
    fn format_duration_units() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5.0s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 05s");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1h 01m 05s");
    }

    #[test]
    fn format_duration_subsecond() {
        assert_eq!(format_duration(Duration::from_millis(500)), "0.5s");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn format_bytes_never_panics(bytes in 0u64..u64::MAX) {
                let _ = format_bytes(bytes);
            }

            #[test]
            fn format_bytes_always_names_a_unit(bytes in 0u64..u64::MAX) {
                let s = format_bytes(bytes);
                prop_assert!(UNITS.iter().any(|u| s.ends_with(u)));
            }

            #[test]
            fn format_bytes_numeral_is_parseable(bytes in 1u64..u64::MAX) {
                let s = format_bytes(bytes);
                let numeral = s.split(' ').next().unwrap();
                prop_assert!(numeral.parse::<f64>().is_ok());
            }

            #[test]
            fn format_duration_never_panics(millis in 0u64..1_000_000_000) {
                let _ = format_duration(Duration::from_millis(millis));
            }
        }
    }
}
