//! Gateway-injected identity header extractors.

use axum::Json;
use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

/// User identity injected by the auth gateway via the `x-forkful-user-id` header.
///
/// Returns 401 with a `{"detail": ...}` body if the header is absent or
/// cannot be parsed. Ownership checks (403) are done by handlers after
/// extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
}

/// Identity for endpoints that tolerate anonymous callers.
///
/// Never rejects: a missing or malformed header yields `MaybeIdentity(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeIdentity(pub Option<Identity>);

fn user_id_from_parts(parts: &Parts) -> Option<i32> {
    parts
        .headers
        .get("x-forkful-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i32>().ok())
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = user_id_from_parts(parts);
        async move {
            let user_id = user_id.ok_or((
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"detail": "authentication required"})),
            ))?;
            Ok(Self { user_id })
        }
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = user_id_from_parts(parts);
        async move { Ok(Self(user_id.map(|user_id| Identity { user_id }))) }
    }
}
