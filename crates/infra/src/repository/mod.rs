//! Repository boundary for bookings and users.
//!
//! Controllers depend only on the traits in `r#trait`; the in-memory and
//! Postgres modules are interchangeable implementations.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::{InMemoryBookingRepository, InMemoryUserRepository};
pub use postgres::{PgBookingRepository, PgUserRepository, ensure_schema};
pub use r#trait::{BookingRepository, RepositoryError, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use r#trait::{MockBookingRepository, MockUserRepository};
