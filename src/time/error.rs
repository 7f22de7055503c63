use thiserror::Error;

use super::ClockTime;

/// Errors raised while parsing or building weekly time values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Malformed time value: {0:?} (expected HH:MM or HH:MM:SS)")]
    Malformed(String),

    #[error("Minute offset {0} is outside a single day")]
    OutOfRange(u32),

    #[error("Unknown day of week: {0:?}")]
    UnknownDay(String),

    #[error("Interval start {start} must be before its end {end}")]
    EmptyInterval { start: ClockTime, end: ClockTime },

    #[error("Time slot step must be a positive number of minutes")]
    ZeroStep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_quotes_input() {
        let e = TimeError::Malformed("8h".to_string());
        assert_eq!(
            e.to_string(),
            "Malformed time value: \"8h\" (expected HH:MM or HH:MM:SS)"
        );
    }

    #[test]
    fn empty_interval_display() {
        let e = TimeError::EmptyInterval {
            start: ClockTime::from_hm(10, 0).unwrap(),
            end: ClockTime::from_hm(9, 0).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "Interval start 10:00 must be before its end 09:00"
        );
    }
}
