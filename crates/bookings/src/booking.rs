use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use carrent_core::{BookingId, Entity, UserId};

/// A persisted car booking.
///
/// Fields are stored as supplied. In particular `start_date <= end_date` is not
/// enforced anywhere in the write path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub car_id: i64,
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub is_cancelled: bool,
}

impl Booking {
    /// Attach a repository-assigned id to booking fields.
    pub fn from_dto(id: BookingId, dto: BookingDto) -> Self {
        Self {
            id,
            car_id: dto.car_id,
            user_id: dto.user_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            total_price: dto.total_price,
            is_cancelled: dto.is_cancelled,
        }
    }

    /// Booking fields without the id.
    pub fn to_dto(&self) -> BookingDto {
        BookingDto {
            car_id: self.car_id,
            user_id: self.user_id.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            total_price: self.total_price,
            is_cancelled: self.is_cancelled,
        }
    }
}

impl Entity for Booking {
    type Id = BookingId;

    const KIND: &'static str = "booking";
    const COLLECTION: &'static str = "/bookings";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Booking fields supplied by a caller; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub car_id: i64,
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    #[serde(default)]
    pub is_cancelled: bool,
}
