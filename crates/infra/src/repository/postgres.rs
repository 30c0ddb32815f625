//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | Any other | `Storage` |
//! | PoolClosed / Io / decode / other | N/A | `Storage` |
//!
//! Updates and deletes that match no row succeed without effect.
//!
//! ## Thread Safety
//!
//! Both repositories wrap a `PgPool` (internally reference counted) and are
//! `Send + Sync`; they can be shared behind an `Arc` across request handlers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::instrument;

use carrent_bookings::{Booking, BookingDto};
use carrent_core::{BookingId, UserId};
use carrent_users::UserDto;

use super::r#trait::{BookingRepository, RepositoryError, UserRepository};

/// Create the `bookings` and `users` tables when they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id BIGSERIAL PRIMARY KEY,
            car_id BIGINT NOT NULL,
            user_id TEXT NOT NULL,
            start_date TIMESTAMPTZ NOT NULL,
            end_date TIMESTAMPTZ NOT NULL,
            total_price NUMERIC NOT NULL,
            is_cancelled BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("ensure_schema", e))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            user_name TEXT NOT NULL,
            email TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("ensure_schema", e))?;

    Ok(())
}

#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn booking_from_row(row: &PgRow) -> Result<Booking, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::Storage(format!("failed to decode booking row: {e}"));

    let start_date: DateTime<Utc> = row.try_get("start_date").map_err(decode)?;
    let end_date: DateTime<Utc> = row.try_get("end_date").map_err(decode)?;
    let user_id: String = row.try_get("user_id").map_err(decode)?;

    Ok(Booking {
        id: BookingId::new(row.try_get("id").map_err(decode)?),
        car_id: row.try_get("car_id").map_err(decode)?,
        user_id: UserId::new(user_id),
        start_date,
        end_date,
        total_price: row.try_get("total_price").map_err(decode)?,
        is_cancelled: row.try_get("is_cancelled").map_err(decode)?,
    })
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self), err)]
    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, car_id, user_id, start_date, end_date, total_price, is_cancelled
            FROM bookings
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_all_bookings", e))?;

        rows.iter().map(booking_from_row).collect()
    }

    #[instrument(skip(self), fields(booking_id = %id), err)]
    async fn get_booking_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, car_id, user_id, start_date, end_date, total_price, is_cancelled
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_booking_by_id", e))?;

        row.as_ref().map(booking_from_row).transpose()
    }

    #[instrument(skip(self, booking), fields(car_id = booking.car_id), err)]
    async fn add_booking(&self, booking: BookingDto) -> Result<Booking, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (car_id, user_id, start_date, end_date, total_price, is_cancelled)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(booking.car_id)
        .bind(booking.user_id.as_str())
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_price)
        .bind(booking.is_cancelled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("add_booking", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Storage(format!("failed to read assigned id: {e}")))?;

        Ok(Booking::from_dto(BookingId::new(id), booking))
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.id), err)]
    async fn update_booking(&self, booking: Booking) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET car_id = $2, user_id = $3, start_date = $4, end_date = $5,
                total_price = $6, is_cancelled = $7
            WHERE id = $1
            "#,
        )
        .bind(booking.id.get())
        .bind(booking.car_id)
        .bind(booking.user_id.as_str())
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_price)
        .bind(booking.is_cancelled)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_booking", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(booking_id = %id), err)]
    async fn delete_booking(&self, id: BookingId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_booking", e))?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserDto, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::Storage(format!("failed to decode user row: {e}"));
    let id: String = row.try_get("id").map_err(decode)?;

    Ok(UserDto {
        id: UserId::new(id),
        user_name: row.try_get("user_name").map_err(decode)?,
        email: row.try_get("email").map_err(decode)?,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self), err)]
    async fn get_all_users(&self) -> Result<Vec<UserDto>, RepositoryError> {
        let rows = sqlx::query("SELECT id, user_name, email FROM users ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_all_users", e))?;

        rows.iter().map(user_from_row).collect()
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<UserDto>, RepositoryError> {
        let row = sqlx::query("SELECT id, user_name, email FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_user_by_id", e))?;

        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id), err)]
    async fn add_user(&self, user: UserDto) -> Result<UserDto, RepositoryError> {
        sqlx::query("INSERT INTO users (id, user_name, email) VALUES ($1, $2, $3)")
            .bind(user.id.as_str())
            .bind(&user.user_name)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("add_user", e))?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id), err)]
    async fn update_user(&self, user: UserDto) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET user_name = $2, email = $3 WHERE id = $1")
            .bind(user.id.as_str())
            .bind(&user.user_name)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_user", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn delete_user(&self, id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_user", e))?;
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => RepositoryError::Conflict(msg),
                _ => RepositoryError::Storage(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Storage(format!("connection pool closed in {}", operation))
        }
        _ => RepositoryError::Storage(format!("sqlx error in {}: {}", operation, err)),
    }
}
