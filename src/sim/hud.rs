//! HUD text formatting

use crate::consts::BLINK_HALF_PERIOD_MS;

use super::entity::{RED, WHITE};

/// Digits shown for score and high score
pub const SCORE_DIGITS: usize = 6;

/// Zero-padded score
pub fn format_score(score: f64) -> String {
    format!("{:0width$}", score.max(0.0) as u64, width = SCORE_DIGITS)
}

/// Split elapsed milliseconds into zero-padded minutes and seconds
pub fn format_clock(elapsed_ms: f64) -> (String, String) {
    let total_secs = (elapsed_ms.max(0.0) / 1000.0) as u64;
    (
        format!("{:02}", total_secs / 60),
        format!("{:02}", total_secs % 60),
    )
}

/// Alternates white and red every half-period
pub fn blink_color(time_ms: f64) -> [f32; 4] {
    if ((time_ms.max(0.0) / BLINK_HALF_PERIOD_MS) as u64) % 2 == 1 {
        RED
    } else {
        WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score_pads() {
        assert_eq!(format_score(0.0), "000000");
        assert_eq!(format_score(3.2), "000003");
        assert_eq!(format_score(123456.9), "123456");
        assert_eq!(format_score(1234567.0), "1234567");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), ("00".to_string(), "00".to_string()));
        assert_eq!(format_clock(59_999.0), ("00".to_string(), "59".to_string()));
        assert_eq!(format_clock(61_000.0), ("01".to_string(), "01".to_string()));
        assert_eq!(format_clock(3_600_000.0), ("60".to_string(), "00".to_string()));
    }

    #[test]
    fn test_blink_half_period() {
        assert_eq!(blink_color(0.0), WHITE);
        assert_eq!(blink_color(499.0), WHITE);
        assert_eq!(blink_color(500.0), RED);
        assert_eq!(blink_color(999.0), RED);
        assert_eq!(blink_color(1000.0), WHITE);
    }
}
