//! Query string extractor with structured error responses.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Extractor for query string parameters.
///
/// Wraps `axum::extract::Query` so that a missing or malformed parameter
/// produces the standard `ErrorResponse` body (400, `INVALID_QUERY`)
/// instead of axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::QueryParams;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct ById {
///     employee_id: i64,
/// }
///
/// async fn get_user(QueryParams(query): QueryParams<ById>) -> String {
///     format!("User ID: {}", query.employee_id)
/// }
///
/// let app = Router::new().route("/get-user-by-id", get(get_user));
/// ```
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(QueryParams(params))
    }
}
