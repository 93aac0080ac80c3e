//! UTC datetime utilities without timezone dependencies.
//!
//! Only what sitemaps and template timestamps need: the current time,
//! RFC 3339 and plain `YYYY-MM-DD` formatting.

use std::time::{SystemTime, UNIX_EPOCH};

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    /// Current system time (clamped to the epoch if the clock is earlier).
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self::from_unix(i64::try_from(secs).unwrap_or(i64::MAX))
    }

    /// Convert seconds since 1970-01-01T00:00:00Z.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);

        Self {
            year,
            month,
            day,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// `2024-06-15T14:30:45Z`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{}T{:02}:{:02}:{:02}Z",
            self.to_date(),
            self.hour,
            self.minute,
            self.second
        )
    }

    /// `2024-06-15`
    pub fn to_date(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Days since the epoch to (year, month, day) in the proleptic Gregorian
/// calendar. Eras are 400-year cycles starting on March 1st.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let dt = DateTimeUtc::from_unix(0);
        assert_eq!(dt.to_rfc3339(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_known_timestamp() {
        let dt = DateTimeUtc::from_unix(1_718_461_845);
        assert_eq!(dt.to_rfc3339(), "2024-06-15T14:30:45Z");
        assert_eq!(dt.to_date(), "2024-06-15");
    }

    #[test]
    fn test_leap_day_and_year_end() {
        // 2024-02-29T00:00:00Z
        assert_eq!(DateTimeUtc::from_unix(1_709_164_800).to_date(), "2024-02-29");
        // 1999-12-31T23:59:59Z
        assert_eq!(
            DateTimeUtc::from_unix(946_684_799).to_rfc3339(),
            "1999-12-31T23:59:59Z"
        );
    }

    #[test]
    fn test_now_is_after_2024() {
        assert!(DateTimeUtc::now().year >= 2024);
    }
}
