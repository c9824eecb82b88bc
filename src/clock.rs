use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

/// Request header carrying an epoch-millisecond override of "now".
/// Only honored when the service runs with `test_mode` enabled.
pub const X_TEST_NOW_MS: &str = "x-test-now-ms";

/// Source of "now" for paste lifecycle decisions.
///
/// In test mode a caller-supplied override replaces the wall clock, which
/// makes expiry scenarios reproducible without sleeping through real TTLs.
/// Outside test mode the override is ignored entirely.
#[derive(Debug, Clone)]
pub struct Clock {
    test_mode: bool,
}

impl Clock {
    pub fn new(test_mode: bool) -> Self {
        Self { test_mode }
    }

    /// Resolve "now", given the raw override header value if the request
    /// carried one. Unparseable overrides fall back to the wall clock.
    pub fn now(&self, override_value: Option<&str>) -> DateTime<Utc> {
        if self.test_mode {
            if let Some(raw) = override_value {
                match parse_epoch_ms(raw) {
                    Some(instant) => return instant,
                    None => warn!("ignoring invalid {X_TEST_NOW_MS} value: '{raw}'"),
                }
            }
        }

        Utc::now()
    }
}

fn parse_epoch_ms(raw: &str) -> Option<DateTime<Utc>> {
    let ms = raw.trim().parse::<i64>().ok()?;
    Utc.timestamp_millis_opt(ms).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_honored_in_test_mode() {
        let clock = Clock::new(true);
        let now = clock.now(Some("1700000000000"));

        assert_eq!(now, Utc.timestamp_millis_opt(1_700_000_000_000).unwrap());
    }

    #[test]
    fn override_is_ignored_outside_test_mode() {
        let clock = Clock::new(false);
        let before = Utc::now();
        let now = clock.now(Some("1700000000000"));

        assert!(now >= before);
        assert!(now - before < chrono::Duration::seconds(5));
    }

    #[test]
    fn garbage_override_falls_back_to_wall_clock() {
        let clock = Clock::new(true);
        let before = Utc::now();
        let now = clock.now(Some("not-a-timestamp"));

        assert!(now >= before);
        assert!(now - before < chrono::Duration::seconds(5));
    }

    #[test]
    fn missing_override_uses_wall_clock() {
        let clock = Clock::new(true);
        let before = Utc::now();
        let now = clock.now(None);

        assert!(now >= before);
    }
}
