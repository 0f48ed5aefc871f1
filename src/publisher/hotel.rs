//! In-memory hotel backing the booking module's actions.
//!
//! Rooms are a fixed seed set; bookings live in a `parking_lot::RwLock`
//! for the lifetime of the process.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub room_type: String,
    pub price: u32,
    pub features: Vec<String>,
}

impl Room {
    fn seed(id: &str, room_type: &str, price: u32, features: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            room_type: room_type.to_string(),
            price,
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Booking lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Canceled,
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub check_in: String,
    pub check_out: String,
    pub guest_name: String,
    pub status: BookingStatus,
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub room_id: String,
    pub check_in: String,
    pub check_out: String,
    pub guest_name: String,
}

/// Query of `GET /rooms/search`. Values stay raw so bad input maps to our own error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: Option<String>,
}

/// Errors raised by hotel operations.
#[derive(Debug, Error, PartialEq)]
pub enum HotelError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Booking not found")]
    BookingNotFound,

    #[error("Room {0} is not available for the requested dates")]
    RoomUnavailable(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

/// A validated half-open stay `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Stay {
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, HotelError> {
        let check_in = parse_date("check_in", check_in)?;
        let check_out = parse_date("check_out", check_out)?;
        if check_out <= check_in {
            return Err(HotelError::InvalidInput {
                field: "check_out",
                reason: "must be after check_in".to_string(),
            });
        }
        Ok(Self { check_in, check_out })
    }

    pub fn overlaps(&self, other: &Stay) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, HotelError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| HotelError::InvalidInput {
        field,
        reason: format!("expected YYYY-MM-DD, got '{}'", value),
    })
}

/// Rooms plus the in-memory booking table.
#[derive(Debug)]
pub struct HotelStore {
    rooms: Vec<Room>,
    bookings: RwLock<HashMap<String, Booking>>,
}

impl HotelStore {
    /// Store seeded with the demo rooms.
    pub fn new() -> Self {
        Self::with_rooms(vec![
            Room::seed("room-101", "queen", 129, &["wifi", "breakfast"]),
            Room::seed("room-202", "king", 159, &["wifi", "ocean_view"]),
            Room::seed("room-303", "suite", 219, &["wifi", "breakfast", "balcony"]),
        ])
    }

    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            bookings: RwLock::new(HashMap::new()),
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn booking(&self, id: &str) -> Option<Booking> {
        self.bookings.read().get(id).cloned()
    }

    /// Rooms free for the queried stay.
    ///
    /// Without both dates every room is returned.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<Room>, HotelError> {
        // Rooms carry no capacity; the guest count is only validated.
        if let Some(raw) = query.guests.as_deref() {
            let guests: i64 = raw.trim().parse().map_err(|_| HotelError::InvalidInput {
                field: "guests",
                reason: format!("expected an integer, got '{}'", raw),
            })?;
            if guests < 1 {
                return Err(HotelError::InvalidInput {
                    field: "guests",
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        let stay = match (query.check_in.as_deref(), query.check_out.as_deref()) {
            (Some(check_in), Some(check_out)) => Some(Stay::parse(check_in, check_out)?),
            (Some(check_in), None) => {
                parse_date("check_in", check_in)?;
                None
            }
            (None, Some(check_out)) => {
                parse_date("check_out", check_out)?;
                None
            }
            (None, None) => None,
        };

        let Some(stay) = stay else {
            return Ok(self.rooms.clone());
        };

        let bookings = self.bookings.read();
        Ok(self
            .rooms
            .iter()
            .filter(|room| !Self::is_booked(&bookings, &room.id, &stay))
            .cloned()
            .collect())
    }

    /// Create a confirmed booking.
    pub fn create_booking(&self, request: BookingRequest) -> Result<Booking, HotelError> {
        if self.room(&request.room_id).is_none() {
            return Err(HotelError::RoomNotFound);
        }
        let stay = Stay::parse(&request.check_in, &request.check_out)?;
        if request.guest_name.trim().is_empty() {
            return Err(HotelError::InvalidInput {
                field: "guest_name",
                reason: "must not be empty".to_string(),
            });
        }

        let mut bookings = self.bookings.write();
        if Self::is_booked(&bookings, &request.room_id, &stay) {
            return Err(HotelError::RoomUnavailable(request.room_id));
        }

        let booking = Booking {
            id: uuid::Uuid::new_v4().to_string(),
            room_id: request.room_id,
            check_in: stay.check_in.format(DATE_FORMAT).to_string(),
            check_out: stay.check_out.format(DATE_FORMAT).to_string(),
            guest_name: request.guest_name,
            status: BookingStatus::Confirmed,
        };
        bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    /// Mark a booking as canceled and return the updated record.
    pub fn cancel_booking(&self, id: &str) -> Result<Booking, HotelError> {
        let mut bookings = self.bookings.write();
        let booking = bookings.get_mut(id).ok_or(HotelError::BookingNotFound)?;
        booking.status = BookingStatus::Canceled;
        Ok(booking.clone())
    }

    fn is_booked(bookings: &HashMap<String, Booking>, room_id: &str, stay: &Stay) -> bool {
        bookings
            .values()
            .filter(|b| b.room_id == room_id && b.status == BookingStatus::Confirmed)
            .filter_map(|b| Stay::parse(&b.check_in, &b.check_out).ok())
            .any(|existing| existing.overlaps(stay))
    }
}

impl Default for HotelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(room_id: &str, check_in: &str, check_out: &str) -> BookingRequest {
        BookingRequest {
            room_id: room_id.to_string(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            guest_name: "Ada Lovelace".to_string(),
        }
    }

    fn stay_query(check_in: &str, check_out: &str) -> SearchQuery {
        SearchQuery {
            check_in: Some(check_in.to_string()),
            check_out: Some(check_out.to_string()),
            guests: None,
        }
    }

    #[test]
    fn test_seed_rooms() {
        let store = HotelStore::new();
        let ids: Vec<&str> = store.rooms().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["room-101", "room-202", "room-303"]);
        assert_eq!(store.room("room-303").unwrap().price, 219);
    }

    #[test]
    fn test_search_without_dates_returns_everything() {
        let store = HotelStore::new();
        store
            .create_booking(request("room-101", "2026-10-30", "2026-11-01"))
            .unwrap();
        assert_eq!(store.search(&SearchQuery::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_search_excludes_overlapping_bookings() {
        let store = HotelStore::new();
        store
            .create_booking(request("room-101", "2026-10-30", "2026-11-01"))
            .unwrap();

        let rooms = store.search(&stay_query("2026-10-31", "2026-11-02")).unwrap();
        assert!(rooms.iter().all(|r| r.id != "room-101"));
        assert_eq!(rooms.len(), 2);

        // Check-out day is free again.
        let rooms = store.search(&stay_query("2026-11-01", "2026-11-03")).unwrap();
        assert_eq!(rooms.len(), 3);
    }

    #[test]
    fn test_canceled_booking_frees_room() {
        let store = HotelStore::new();
        let booking = store
            .create_booking(request("room-202", "2026-10-30", "2026-11-01"))
            .unwrap();
        let canceled = store.cancel_booking(&booking.id).unwrap();
        assert_eq!(canceled.status, BookingStatus::Canceled);
        assert_eq!(store.booking(&booking.id).unwrap().status, BookingStatus::Canceled);

        let rooms = store.search(&stay_query("2026-10-30", "2026-11-01")).unwrap();
        assert_eq!(rooms.len(), 3);
    }

    #[test]
    fn test_search_rejects_bad_input() {
        let store = HotelStore::new();
        let err = store.search(&stay_query("next friday", "2026-11-01")).unwrap_err();
        assert!(matches!(err, HotelError::InvalidInput { field: "check_in", .. }));

        let err = store
            .search(&SearchQuery {
                guests: Some("0".to_string()),
                ..SearchQuery::default()
            })
            .unwrap_err();
        assert!(matches!(err, HotelError::InvalidInput { field: "guests", .. }));

        let err = store.search(&stay_query("2026-11-02", "2026-11-01")).unwrap_err();
        assert!(matches!(err, HotelError::InvalidInput { field: "check_out", .. }));
    }

    #[test]
    fn test_create_booking_errors() {
        let store = HotelStore::new();
        assert_eq!(
            store
                .create_booking(request("room-999", "2026-10-30", "2026-11-01"))
                .unwrap_err(),
            HotelError::RoomNotFound
        );

        store
            .create_booking(request("room-303", "2026-10-30", "2026-11-01"))
            .unwrap();
        assert_eq!(
            store
                .create_booking(request("room-303", "2026-10-31", "2026-11-02"))
                .unwrap_err(),
            HotelError::RoomUnavailable("room-303".to_string())
        );
    }

    #[test]
    fn test_cancel_unknown_booking() {
        let store = HotelStore::new();
        assert_eq!(
            store.cancel_booking("missing").unwrap_err(),
            HotelError::BookingNotFound
        );
    }
}
