use std::future::Future;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use carrent_core::Entity;
use carrent_infra::repository::RepositoryError;

use crate::app::errors::ApiError;

/// Resolve a lookup to the entity or to the caller's not-found error.
///
/// Used by the read-by-id handlers and by `delete_user`.
pub async fn ensure_exists<T, F>(lookup: F, not_found: impl FnOnce() -> ApiError) -> Result<T, ApiError>
where
    F: Future<Output = Result<Option<T>, RepositoryError>>,
{
    lookup.await?.ok_or_else(not_found)
}

/// Bytes escaped in a path segment; non-ASCII is always escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path of the entity's `GET` route, e.g. `/users/auth0%2Fabc`.
///
/// The result is plain ASCII, so it is always a valid header value.
pub fn location_of<E: Entity>(entity: &E) -> String {
    let id = entity.id().to_string();
    format!("{}/{}", E::COLLECTION, utf8_percent_encode(&id, PATH_SEGMENT))
}

/// `201 Created` with a `Location` header and a JSON body.
pub fn created(location: String, body: impl IntoResponse) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], body).into_response()
}
