use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use forkful_auth_types::identity::{Identity, MaybeIdentity};

use crate::domain::types::User;
use crate::error::CookbookServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    ClearAvatarUseCase, CreateUserInput, CreateUserUseCase, GetUserUseCase, SetAvatarUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Plain user projection. The subscriptions listing uses its own richer type.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
}

impl UserResponse {
    fn from_user(user: User, is_subscribed: bool, state: &AppState) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user
                .avatar
                .as_deref()
                .map(|reference| state.media_url(reference)),
            is_subscribed,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), CookbookServiceError> {
    let uc = CreateUserUseCase {
        users: state.user_repo(),
    };
    let user = uc
        .execute(CreateUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(user, false, &state)),
    ))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, CookbookServiceError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        subs: state.subscription_repo(),
    };
    let (user, is_subscribed) = uc
        .execute(Some(identity.user_id), identity.user_id)
        .await?;
    Ok(Json(UserResponse::from_user(user, is_subscribed, &state)))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, CookbookServiceError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        subs: state.subscription_repo(),
    };
    let (user, is_subscribed) = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(UserResponse::from_user(user, is_subscribed, &state)))
}

// ── PUT /users/me/avatar ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AvatarRequest {
    /// Inline `data:image/...;base64,...` payload.
    pub avatar: String,
}

#[derive(Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

pub async fn set_avatar(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<AvatarRequest>,
) -> Result<Json<AvatarResponse>, CookbookServiceError> {
    let uc = SetAvatarUseCase {
        users: state.user_repo(),
        images: state.image_store(),
    };
    let reference = uc.execute(identity.user_id, &body.avatar).await?;
    Ok(Json(AvatarResponse {
        avatar: state.media_url(&reference),
    }))
}

// ── DELETE /users/me/avatar ──────────────────────────────────────────────────

pub async fn clear_avatar(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<StatusCode, CookbookServiceError> {
    let uc = ClearAvatarUseCase {
        users: state.user_repo(),
    };
    uc.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
