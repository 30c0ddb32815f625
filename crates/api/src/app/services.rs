use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use carrent_infra::repository::{
    BookingRepository, InMemoryBookingRepository, InMemoryUserRepository, PgBookingRepository,
    PgUserRepository, UserRepository, ensure_schema,
};

use crate::config::ApiConfig;

/// Repositories handed to every controller.
///
/// Controllers hold no state of their own; everything they touch comes through here.
#[derive(Clone)]
pub struct AppServices {
    pub bookings: Arc<dyn BookingRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppServices {
    pub fn new(bookings: Arc<dyn BookingRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { bookings, users }
    }

    /// Fresh, empty in-memory repositories (dev/test).
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryBookingRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}

pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    match &config.database_url {
        Some(url) => build_persistent_services(url, config.db_max_connections).await,
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory repositories");
            Ok(AppServices::in_memory())
        }
    }
}

async fn build_persistent_services(url: &str, max_connections: u32) -> anyhow::Result<AppServices> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    ensure_schema(&pool)
        .await
        .context("failed to prepare database schema")?;

    tracing::info!(max_connections, "using Postgres repositories");

    Ok(AppServices::new(
        Arc::new(PgBookingRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
    ))
}
