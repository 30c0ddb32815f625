use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use carrent_core::UserId;
use carrent_users::UserDto;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::routes::common::{created, ensure_exists, location_of};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route("/:id", get(get_user_by_id).put(update_user).delete(delete_user))
}

pub async fn get_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let users = services.users.get_all_users().await?;
    Ok((StatusCode::OK, Json(users)).into_response())
}

pub async fn get_user_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let user = find_user(&services, &UserId::new(id)).await?;
    Ok((StatusCode::OK, Json(user)).into_response())
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<UserDto>,
) -> Result<Response, ApiError> {
    // Built before the write so a stored user always gets its 201.
    let location = location_of(&body);

    let user = services.users.add_user(body).await?;
    tracing::info!(user_id = %user.id, %location, "user created");

    Ok(created(location, Json(user)))
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> Result<Response, ApiError> {
    let user = body.into_user(UserId::new(id));
    let user_id = user.id.clone();

    services.users.update_user(user).await?;
    tracing::info!(%user_id, "user updated");

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = UserId::new(id);

    // Only delete checks existence first. A concurrent delete between the two calls still yields 204.
    find_user(&services, &id).await?;
    services.users.delete_user(&id).await?;
    tracing::info!(user_id = %id, "user deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// User 404s carry no body.
async fn find_user(services: &AppServices, id: &UserId) -> Result<UserDto, ApiError> {
    ensure_exists(services.users.get_user_by_id(id), || {
        tracing::debug!(user_id = %id, "user not found");
        ApiError::NotFound(None)
    })
    .await
}
