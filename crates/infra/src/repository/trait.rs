use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use carrent_bookings::{Booking, BookingDto};
use carrent_core::{BookingId, UserId};
use carrent_users::UserDto;

/// Repository operation error.
///
/// These are storage faults, not domain outcomes: absence is reported as
/// `Ok(None)` by lookups, never as an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The write collided with existing state (duplicate key).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store failed (connection, query, decoding).
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence operations for bookings.
///
/// ## Identity
///
/// `add_booking` receives the caller's fields without an id; the repository
/// assigns one and returns the persisted entity so callers can echo the real id.
///
/// ## Ordering
///
/// `get_all_bookings` returns bookings ordered by id (ascending).
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RepositoryError>;

    /// `Ok(None)` when no booking has this id.
    async fn get_booking_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError>;

    async fn add_booking(&self, booking: BookingDto) -> Result<Booking, RepositoryError>;

    /// Replaces the row keyed by `booking.id`; no-op when that id is absent.
    async fn update_booking(&self, booking: Booking) -> Result<(), RepositoryError>;

    /// Deleting an absent id is not an error.
    async fn delete_booking(&self, id: BookingId) -> Result<(), RepositoryError>;
}

/// Persistence operations for users (keyed by externally assigned string ids).
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_all_users(&self) -> Result<Vec<UserDto>, RepositoryError>;

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<UserDto>, RepositoryError>;

    /// Returns the record as stored.
    async fn add_user(&self, user: UserDto) -> Result<UserDto, RepositoryError>;

    /// No-op when the id is absent (never inserts).
    async fn update_user(&self, user: UserDto) -> Result<(), RepositoryError>;

    async fn delete_user(&self, id: &UserId) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<S> BookingRepository for Arc<S>
where
    S: BookingRepository + ?Sized,
{
    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RepositoryError> {
        (**self).get_all_bookings().await
    }

    async fn get_booking_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        (**self).get_booking_by_id(id).await
    }

    async fn add_booking(&self, booking: BookingDto) -> Result<Booking, RepositoryError> {
        (**self).add_booking(booking).await
    }

    async fn update_booking(&self, booking: Booking) -> Result<(), RepositoryError> {
        (**self).update_booking(booking).await
    }

    async fn delete_booking(&self, id: BookingId) -> Result<(), RepositoryError> {
        (**self).delete_booking(id).await
    }
}

#[async_trait]
impl<S> UserRepository for Arc<S>
where
    S: UserRepository + ?Sized,
{
    async fn get_all_users(&self) -> Result<Vec<UserDto>, RepositoryError> {
        (**self).get_all_users().await
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<UserDto>, RepositoryError> {
        (**self).get_user_by_id(id).await
    }

    async fn add_user(&self, user: UserDto) -> Result<UserDto, RepositoryError> {
        (**self).add_user(user).await
    }

    async fn update_user(&self, user: UserDto) -> Result<(), RepositoryError> {
        (**self).update_user(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), RepositoryError> {
        (**self).delete_user(id).await
    }
}
