use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use carrent_bookings::{Booking, BookingDto};
use carrent_core::{BookingId, UserId};
use carrent_users::{User, UserDto};

use super::r#trait::{BookingRepository, RepositoryError, UserRepository};

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("lock poisoned".to_string())
}

#[derive(Debug, Default)]
struct BookingTable {
    rows: BTreeMap<BookingId, Booking>,
    last_id: i64,
}

/// In-memory booking store.
///
/// Intended for tests/dev. Ids start at 1 and are never reused, even after deletes.
/// Updating or deleting an absent id is a no-op.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    inner: RwLock<BookingTable>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RepositoryError> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_booking_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn add_booking(&self, booking: BookingDto) -> Result<Booking, RepositoryError> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.last_id += 1;
        let stored = Booking::from_dto(BookingId::new(table.last_id), booking);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_booking(&self, booking: Booking) -> Result<(), RepositoryError> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        if let Some(existing) = table.rows.get_mut(&booking.id) {
            *existing = booking;
        }
        Ok(())
    }

    async fn delete_booking(&self, id: BookingId) -> Result<(), RepositoryError> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.rows.remove(&id);
        Ok(())
    }
}

/// In-memory user store for tests/dev, ordered by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all_users(&self) -> Result<Vec<UserDto>, RepositoryError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().map(UserDto::from).collect())
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<UserDto>, RepositoryError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned().map(UserDto::from))
    }

    async fn add_user(&self, user: UserDto) -> Result<UserDto, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.contains_key(&user.id) {
            return Err(RepositoryError::Conflict(format!("user {} already exists", user.id)));
        }
        map.insert(user.id.clone(), User::from(user.clone()));
        Ok(user)
    }

    async fn update_user(&self, user: UserDto) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if let Some(existing) = map.get_mut(&user.id) {
            *existing = User::from(user);
        }
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(id);
        Ok(())
    }
}
