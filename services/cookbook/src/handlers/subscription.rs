use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use forkful_auth_types::identity::Identity;

use crate::domain::types::SubscriptionEntry;
use crate::error::CookbookServiceError;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

/// Followee projection. `recipes`/`recipes_count` appear only here, never
/// on the plain user projection.
#[derive(Serialize)]
pub struct SubscriptionResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl SubscriptionResponse {
    fn from_entry(entry: SubscriptionEntry, state: &AppState) -> Self {
        Self {
            id: entry.user.id,
            email: entry.user.email,
            username: entry.user.username,
            first_name: entry.user.first_name,
            last_name: entry.user.last_name,
            avatar: entry
                .user
                .avatar
                .as_deref()
                .map(|reference| state.media_url(reference)),
            // Definitionally true: these projections exist only for followees.
            is_subscribed: true,
            recipes: entry
                .recipes
                .into_iter()
                .map(|summary| RecipeSummaryResponse::from_summary(summary, state))
                .collect(),
            recipes_count: entry.recipes_count,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct SubscriptionQuery {
    pub recipes_limit: Option<u64>,
}

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn subscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), CookbookServiceError> {
    let uc = SubscribeUseCase {
        subs: state.subscription_repo(),
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let entry = uc
        .execute(identity.user_id, id, query.recipes_limit)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::from_entry(entry, &state)),
    ))
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unsubscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, CookbookServiceError> {
    let uc = UnsubscribeUseCase {
        subs: state.subscription_repo(),
        users: state.user_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<Json<Vec<SubscriptionResponse>>, CookbookServiceError> {
    let uc = ListSubscriptionsUseCase {
        subs: state.subscription_repo(),
        recipes: state.recipe_repo(),
    };
    let entries = uc.execute(identity.user_id, query.recipes_limit).await?;
    let items = entries
        .into_iter()
        .map(|entry| SubscriptionResponse::from_entry(entry, &state))
        .collect();
    Ok(Json(items))
}
