use axum::Router;

pub mod bookings;
pub mod common;
pub mod system;
pub mod users;

/// Router for the resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/bookings", bookings::router())
        .nest("/users", users::router())
}
