//! Backend store abstraction
//!
//! The managed backend owns all persistence; clients only need the four
//! queries below. The store is an explicitly constructed instance handed to
//! whatever needs it - there is no process-wide singleton.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Booking, BookingStatus, DeviceAddress, Property, classify_bookings};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("booking {0} not found")]
    BookingNotFound(Uuid),
    #[error("backend error: {0}")]
    Backend(String),
}

/// The booking queries the access core needs from the backend.
#[allow(async_fn_in_trait)]
pub trait BookingStore {
    /// The renter's primary current stay, if one is running right now.
    async fn active_booking(&self, renter: Uuid) -> Result<Option<Booking>, StoreError>;

    /// The renter's next stay whose check-in is still in the future.
    async fn upcoming_booking(&self, renter: Uuid) -> Result<Option<Booking>, StoreError>;

    /// Controller address override configured for a property, if any.
    async fn property_device_address(
        &self,
        property: Uuid,
    ) -> Result<Option<DeviceAddress>, StoreError>;

    /// Record a status change, e.g. marking a stay completed when the keys
    /// are returned.
    async fn set_booking_status(
        &self,
        booking: Uuid,
        status: BookingStatus,
    ) -> Result<(), StoreError>;
}

/// In-memory store for tests and demos. Applies the same classification
/// rules the real backend queries encode.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    bookings: Vec<Booking>,
    properties: Vec<Property>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_booking(&self, booking: Booking) {
        self.inner.write().await.bookings.push(booking);
    }

    pub async fn insert_property(&self, property: Property) {
        self.inner.write().await.properties.push(property);
    }

    pub async fn active_booking_at(
        &self,
        renter: Uuid,
        now: DateTime<Utc>,
    ) -> Option<Booking> {
        let inner = self.inner.read().await;
        let mine: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| b.renter_id == renter)
            .cloned()
            .collect();
        classify_bookings(&mine, now).0.cloned()
    }

    pub async fn upcoming_booking_at(
        &self,
        renter: Uuid,
        now: DateTime<Utc>,
    ) -> Option<Booking> {
        let inner = self.inner.read().await;
        let mine: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| b.renter_id == renter)
            .cloned()
            .collect();
        classify_bookings(&mine, now).1.cloned()
    }
}

impl BookingStore for MemoryStore {
    async fn active_booking(&self, renter: Uuid) -> Result<Option<Booking>, StoreError> {
        Ok(self.active_booking_at(renter, Utc::now()).await)
    }

    async fn upcoming_booking(&self, renter: Uuid) -> Result<Option<Booking>, StoreError> {
        Ok(self.upcoming_booking_at(renter, Utc::now()).await)
    }

    async fn property_device_address(
        &self,
        property: Uuid,
    ) -> Result<Option<DeviceAddress>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .properties
            .iter()
            .find(|p| p.id == property)
            .and_then(|p| p.device_address.clone()))
    }

    async fn set_booking_status(
        &self,
        booking: Uuid,
        status: BookingStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        match inner.bookings.iter_mut().find(|b| b.id == booking) {
            Some(b) => {
                b.status = status;
                Ok(())
            }
            None => Err(StoreError::BookingNotFound(booking)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn booking(renter: Uuid, start_min: i64, end_min: i64, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            renter_id: renter,
            property_id: Uuid::new_v4(),
            check_in: now() + Duration::minutes(start_min),
            check_out: now() + Duration::minutes(end_min),
            status,
        }
    }

    #[tokio::test]
    async fn active_and_upcoming_are_scoped_to_the_renter() {
        let store = MemoryStore::new();
        let me = Uuid::new_v4();
        let someone_else = Uuid::new_v4();
        store
            .insert_booking(booking(me, -60, 600, BookingStatus::Active))
            .await;
        store
            .insert_booking(booking(someone_else, -60, 600, BookingStatus::Active))
            .await;
        store
            .insert_booking(booking(me, 300, 900, BookingStatus::Confirmed))
            .await;

        let active = store.active_booking_at(me, now()).await.unwrap();
        assert_eq!(active.renter_id, me);
        let upcoming = store.upcoming_booking_at(me, now()).await.unwrap();
        assert_eq!(upcoming.check_in, now() + Duration::minutes(300));
    }

    #[tokio::test]
    async fn returning_keys_completes_the_stay() {
        let store = MemoryStore::new();
        let me = Uuid::new_v4();
        let stay = booking(me, -60, 600, BookingStatus::CheckedIn);
        let id = stay.id;
        store.insert_booking(stay).await;

        store
            .set_booking_status(id, BookingStatus::Completed)
            .await
            .unwrap();
        assert!(store.active_booking_at(me, now()).await.is_none());
    }

    #[tokio::test]
    async fn unknown_booking_is_reported() {
        let store = MemoryStore::new();
        let err = store
            .set_booking_status(Uuid::new_v4(), BookingStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::BookingNotFound(_)));
    }

    #[tokio::test]
    async fn device_address_lookup() {
        let store = MemoryStore::new();
        let property = Uuid::new_v4();
        store
            .insert_property(Property {
                id: property,
                owner_id: Uuid::new_v4(),
                device_address: Some(DeviceAddress {
                    address: "10.0.0.5".to_string(),
                    port: None,
                }),
            })
            .await;

        let addr = store.property_device_address(property).await.unwrap();
        assert_eq!(addr.unwrap().address, "10.0.0.5");
        let none = store.property_device_address(Uuid::new_v4()).await.unwrap();
        assert!(none.is_none());
    }
}
