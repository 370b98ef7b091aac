//! Timestamp display in the system time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` as `YYYY-MM-DD HH:MM:SS TZ` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_time_shape() {
        let timestamp = Timestamp::from_second(1_709_287_200).unwrap();
        let output = LocalDateTime(&timestamp).to_string();
        let date_time: Vec<_> = output.splitn(3, ' ').collect();
        assert_eq!(date_time.len(), 3);
        assert_eq!(date_time[0].len(), 10);
        assert_eq!(date_time[1].len(), 8);
    }
}
