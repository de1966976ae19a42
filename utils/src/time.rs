//! Time formatting helpers.

const MIN: u64 = 60;
const HOUR: u64 = 3600;
const DAY: u64 = 86400;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    match secs {
        s if s < MIN => format!("{s}s"),
        s if s < HOUR => format!("{}m {}s", s / MIN, s % MIN),
        s if s < DAY => format!("{}h {}m", s / HOUR, (s % HOUR) / MIN),
        s => format!("{}d {}h", s / DAY, (s % DAY) / HOUR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(3700), "1h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }
}
