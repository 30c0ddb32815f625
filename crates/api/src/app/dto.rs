use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use carrent_bookings::Booking;
use carrent_core::{BookingId, UserId};
use carrent_users::UserDto;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `PUT /bookings/{id}`: a booking whose `id` may be omitted.
///
/// Fields are spelled out rather than flattened from `BookingDto`: serde's
/// flatten buffering does not round-trip arbitrary-precision numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[serde(default)]
    pub id: Option<BookingId>,
    pub car_id: i64,
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    #[serde(default)]
    pub is_cancelled: bool,
}

impl UpdateBookingRequest {
    /// The record handed to the repository: the body as sent, with the path id
    /// filling in a missing body id. A body id that differs from the path is kept.
    pub fn into_booking(self, path_id: BookingId) -> Booking {
        Booking {
            id: self.id.unwrap_or(path_id),
            car_id: self.car_id,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            total_price: self.total_price,
            is_cancelled: self.is_cancelled,
        }
    }
}

/// Body of `PUT /users/{id}`: user fields, `id` optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub id: Option<UserId>,
    pub user_name: String,
    pub email: String,
}

impl UpdateUserRequest {
    pub fn into_user(self, path_id: UserId) -> UserDto {
        UserDto {
            id: self.id.unwrap_or(path_id),
            user_name: self.user_name,
            email: self.email,
        }
    }
}
