//! Display formatting for durations.

/// Formats whole seconds as `MM:SS`. Minutes do not wrap at 60.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Inverse of [`format_mm_ss`]. Returns `None` unless seconds are below 60.
pub fn parse_mm_ss(text: &str) -> Option<u64> {
    let (mins, secs) = text.split_once(':')?;
    if secs.len() != 2 {
        return None;
    }
    let mins: u64 = mins.parse().ok()?;
    let secs: u64 = secs.parse().ok()?;
    if secs >= 60 {
        return None;
    }
    mins.checked_mul(60)?.checked_add(secs)
}

/// Formats milliseconds as `MM:SS.cc` with centisecond precision.
pub fn format_centis(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!(
        "{:02}:{:02}.{:02}",
        total_secs / 60,
        total_secs % 60,
        (ms / 10) % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(125), "02:05");
        assert_eq!(format_mm_ss(1500), "25:00");
        assert_eq!(format_mm_ss(6000), "100:00");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(parse_mm_ss("02:05"), Some(125));
        assert_eq!(parse_mm_ss("02:60"), None);
        assert_eq!(parse_mm_ss("02:5"), None);
        assert_eq!(parse_mm_ss("0205"), None);
        assert_eq!(parse_mm_ss("ab:cd"), None);
    }

    #[test]
    fn formats_centiseconds() {
        assert_eq!(format_centis(0), "00:00.00");
        assert_eq!(format_centis(10), "00:00.01");
        assert_eq!(format_centis(61_230), "01:01.23");
        assert_eq!(format_centis(3_599_990), "59:59.99");
    }

    proptest! {
        #[test]
        fn format_then_parse_is_identity(x in 0u64..1_000_000) {
            prop_assert_eq!(parse_mm_ss(&format_mm_ss(x)), Some(x));
        }
    }
}
