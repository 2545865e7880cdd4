//! Booking and property types, plus stay classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a booking, as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Active,
    CheckedIn,
    Scheduled,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Completed and cancelled stays never grant key-box access.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

/// A renter's stay at a property. Invariant: `check_out > check_in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub renter_id: Uuid,
    pub property_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    /// Check-in has passed, check-out has not, and the stay was not completed
    /// or cancelled. A confirmed or scheduled booking whose check-in slipped
    /// past without the backend promoting its status still counts as current,
    /// so a slow reclassification can never lock a renter out.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.check_in <= now && now <= self.check_out
    }

    /// Check-in is still in the future and the stay was not cancelled.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.check_in > now
    }
}

/// Network address of the lock-box controller installed at a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceAddress {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// The slice of a property the access core needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Absent when the property uses the default controller address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_address: Option<DeviceAddress>,
}

/// Split a renter's bookings into the primary current stay (earliest
/// check-in among stays running right now) and the next upcoming stay
/// (soonest future check-in). Either side may be absent.
pub fn classify_bookings(
    bookings: &[Booking],
    now: DateTime<Utc>,
) -> (Option<&Booking>, Option<&Booking>) {
    let current = bookings
        .iter()
        .filter(|b| b.is_current(now))
        .min_by_key(|b| b.check_in);
    let upcoming = bookings
        .iter()
        .filter(|b| b.is_upcoming(now))
        .min_by_key(|b| b.check_in);
    (current, upcoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn booking(check_in: DateTime<Utc>, check_out: DateTime<Utc>, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            renter_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            check_in,
            check_out,
            status,
        }
    }

    #[test]
    fn current_stay_wins_over_upcoming() {
        let bookings = vec![
            booking(at(1), at(10), BookingStatus::CheckedIn),
            booking(at(12), at(20), BookingStatus::Confirmed),
        ];
        let (current, upcoming) = classify_bookings(&bookings, at(5));
        assert_eq!(current.unwrap().check_in, at(1));
        assert_eq!(upcoming.unwrap().check_in, at(12));
    }

    #[test]
    fn confirmed_booking_past_check_in_counts_as_current() {
        // Backend has not promoted the status yet; the stay must still count.
        let bookings = vec![booking(at(1), at(10), BookingStatus::Confirmed)];
        let (current, upcoming) = classify_bookings(&bookings, at(2));
        assert!(current.is_some());
        assert!(upcoming.is_none());
    }

    #[test]
    fn completed_and_cancelled_stays_are_ignored() {
        let bookings = vec![
            booking(at(1), at(10), BookingStatus::Completed),
            booking(at(12), at(20), BookingStatus::Cancelled),
        ];
        let (current, upcoming) = classify_bookings(&bookings, at(5));
        assert!(current.is_none());
        assert!(upcoming.is_none());
    }

    #[test]
    fn earliest_upcoming_stay_is_picked() {
        let bookings = vec![
            booking(at(18), at(20), BookingStatus::Scheduled),
            booking(at(12), at(16), BookingStatus::Confirmed),
        ];
        let (_, upcoming) = classify_bookings(&bookings, at(5));
        assert_eq!(upcoming.unwrap().check_in, at(12));
    }

    #[test]
    fn status_strings_match_the_backend() {
        let s = serde_json::to_string(&BookingStatus::CheckedIn).unwrap();
        assert_eq!(s, "\"checked_in\"");
        let s: BookingStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(s, BookingStatus::Confirmed);
    }
}
