//! Access window gate - when is an NFC scan attempt permitted

use chrono::{DateTime, Utc};

use crate::Booking;

/// Hours before official check-in during which pre-emptive scanning is
/// allowed.
pub const SCAN_LEEWAY_HOURS: i64 = 2;

/// Decide whether a scan attempt is permitted right now.
///
/// An active stay always permits scanning. An upcoming stay permits it only
/// within `leeway_hours` before its check-in; once check-in has passed the
/// booking is expected to arrive here as `active` instead (see
/// [`crate::classify_bookings`]), so a non-positive remainder denies.
pub fn scan_window_open(
    active: Option<&Booking>,
    upcoming: Option<&Booking>,
    now: DateTime<Utc>,
    leeway_hours: i64,
) -> bool {
    if active.is_some() {
        return true;
    }
    if let Some(booking) = upcoming {
        let diff_ms = (booking.check_in - now).num_milliseconds();
        let leeway_ms = leeway_hours * 60 * 60 * 1000;
        return diff_ms > 0 && diff_ms <= leeway_ms;
    }
    false
}

/// Render the time remaining until `check_in` for display, recomputed once
/// per second by the caller. Shows the two or three most significant units:
/// days+hours+minutes once at least a day remains, hours+minutes+seconds
/// under a day, minutes+seconds under an hour.
pub fn countdown(check_in: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining_ms = (check_in - now).num_milliseconds();
    if remaining_ms <= 0 {
        return "Starting now".to_string();
    }
    let s = remaining_ms / 1000;
    let d = s / 86400;
    let h = (s % 86400) / 3600;
    let m = (s % 3600) / 60;
    let sec = s % 60;
    if d > 0 {
        format!("{d}d {h}h {m}m")
    } else if h > 0 {
        format!("{h}h {m}m {sec}s")
    } else {
        format!("{m}m {sec}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookingStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn upcoming_in(minutes: i64) -> Booking {
        let check_in = now() + Duration::minutes(minutes);
        Booking {
            id: uuid::Uuid::new_v4(),
            renter_id: uuid::Uuid::new_v4(),
            property_id: uuid::Uuid::new_v4(),
            check_in,
            check_out: check_in + Duration::days(2),
            status: BookingStatus::Confirmed,
        }
    }

    #[test]
    fn active_stay_always_opens_the_window() {
        let active = upcoming_in(-60);
        assert!(scan_window_open(Some(&active), None, now(), SCAN_LEEWAY_HOURS));
    }

    #[test]
    fn upcoming_stay_within_leeway_opens_the_window() {
        let b = upcoming_in(90);
        assert!(scan_window_open(None, Some(&b), now(), SCAN_LEEWAY_HOURS));
    }

    #[test]
    fn leeway_boundary_is_inclusive() {
        let b = upcoming_in(SCAN_LEEWAY_HOURS * 60);
        assert!(scan_window_open(None, Some(&b), now(), SCAN_LEEWAY_HOURS));
    }

    #[test]
    fn upcoming_stay_beyond_leeway_stays_closed() {
        let b = upcoming_in(SCAN_LEEWAY_HOURS * 60 + 1);
        assert!(!scan_window_open(None, Some(&b), now(), SCAN_LEEWAY_HOURS));
    }

    #[test]
    fn passed_check_in_without_reclassification_stays_closed() {
        // The caller must promote such a booking to active first.
        let b = upcoming_in(-1);
        assert!(!scan_window_open(None, Some(&b), now(), SCAN_LEEWAY_HOURS));
    }

    #[test]
    fn no_bookings_means_no_window() {
        assert!(!scan_window_open(None, None, now(), SCAN_LEEWAY_HOURS));
    }

    #[test]
    fn countdown_over_a_day_shows_days_hours_minutes() {
        // 1d 1h 1m 1s remaining; seconds are dropped at this magnitude.
        let check_in = now() + Duration::milliseconds(90_061_000);
        assert_eq!(countdown(check_in, now()), "1d 1h 1m");
    }

    #[test]
    fn countdown_under_a_day_shows_hours_minutes_seconds() {
        let check_in = now() + Duration::seconds(3 * 3600 + 5 * 60 + 7);
        assert_eq!(countdown(check_in, now()), "3h 5m 7s");
    }

    #[test]
    fn countdown_under_an_hour_shows_minutes_seconds() {
        let check_in = now() + Duration::seconds(45 * 60 + 12);
        assert_eq!(countdown(check_in, now()), "45m 12s");
    }

    #[test]
    fn countdown_at_or_past_check_in_is_starting_now() {
        assert_eq!(countdown(now(), now()), "Starting now");
        assert_eq!(countdown(now() - Duration::seconds(5), now()), "Starting now");
    }
}
