use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use carrent_bookings::{Booking, BookingDto};
use carrent_core::BookingId;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::routes::common::{created, ensure_exists, location_of};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_all_bookings).post(add_booking))
        .route(
            "/:id",
            get(get_booking_by_id).put(update_booking).delete(delete_booking),
        )
}

pub async fn get_all_bookings(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let bookings = services.bookings.get_all_bookings().await?;
    Ok((StatusCode::OK, Json(bookings)).into_response())
}

pub async fn get_booking_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let booking = find_booking(&services, BookingId::new(id)).await?;
    Ok((StatusCode::OK, Json(booking)).into_response())
}

pub async fn add_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<BookingDto>,
) -> Result<Response, ApiError> {
    let booking = services.bookings.add_booking(body).await?;
    tracing::info!(booking_id = %booking.id, car_id = booking.car_id, user_id = %booking.user_id, "booking created");

    Ok(created(location_of(&booking), Json(booking)))
}

pub async fn update_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::UpdateBookingRequest>,
) -> Result<Response, ApiError> {
    let booking = body.into_booking(BookingId::new(id));
    let booking_id = booking.id;

    services.bookings.update_booking(booking).await?;
    tracing::info!(%booking_id, path_id = id, "booking updated");

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let id = BookingId::new(id);

    services.bookings.delete_booking(id).await?;
    tracing::info!(booking_id = %id, "booking deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn find_booking(services: &AppServices, id: BookingId) -> Result<Booking, ApiError> {
    ensure_exists(services.bookings.get_booking_by_id(id), || {
        tracing::debug!(booking_id = %id, "booking not found");
        ApiError::not_found_for::<Booking>(&id)
    })
    .await
}
