use chrono::{DateTime, Duration, Utc};

/// Staleness rule for the cached feed.
pub struct CachePolicy;

impl CachePolicy {
    const MAX_CACHE_AGE_IN_DAYS: i64 = 7;

    pub fn max_age() -> Duration {
        Duration::days(Self::MAX_CACHE_AGE_IN_DAYS)
    }

    /// True while the cache is strictly younger than [`CachePolicy::max_age`].
    pub fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(timestamp) < Self::max_age()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_cache_is_valid() {
        let now = fixed_now();
        assert!(CachePolicy::validate(now, now));
    }

    #[test]
    fn test_one_second_before_max_age_is_valid() {
        let now = fixed_now();
        let timestamp = now - Duration::days(7) + Duration::seconds(1);
        assert!(CachePolicy::validate(timestamp, now));
    }

    #[test]
    fn test_exactly_max_age_is_invalid() {
        let now = fixed_now();
        assert!(!CachePolicy::validate(now - Duration::days(7), now));
    }

    #[test]
    fn test_older_than_max_age_is_invalid() {
        let now = fixed_now();
        let timestamp = now - Duration::days(7) - Duration::seconds(1);
        assert!(!CachePolicy::validate(timestamp, now));
    }

    #[test]
    fn test_timestamp_in_the_future_is_valid() {
        let now = fixed_now();
        assert!(CachePolicy::validate(now + Duration::hours(1), now));
    }

    proptest! {
        #[test]
        fn test_validity_matches_age(age_secs in 0i64..(30 * 24 * 60 * 60)) {
            let now = fixed_now();
            let timestamp = now - Duration::seconds(age_secs);
            prop_assert_eq!(
                CachePolicy::validate(timestamp, now),
                age_secs < 7 * 24 * 60 * 60
            );
        }
    }
}
