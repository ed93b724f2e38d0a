use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use forkful_auth_types::identity::Identity;

use crate::domain::types::StateFlag;
use crate::error::CookbookServiceError;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::recipe_state::{MarkRecipeUseCase, UnmarkRecipeUseCase};

async fn mark(
    identity: Identity,
    state: AppState,
    recipe_id: i32,
    flag: StateFlag,
) -> Result<Json<RecipeSummaryResponse>, CookbookServiceError> {
    let uc = MarkRecipeUseCase {
        states: state.recipe_state_repo(),
        recipes: state.recipe_repo(),
    };
    let summary = uc.execute(identity.user_id, recipe_id, flag).await?;
    Ok(Json(RecipeSummaryResponse::from_summary(summary, &state)))
}

async fn unmark(
    identity: Identity,
    state: AppState,
    recipe_id: i32,
    flag: StateFlag,
) -> Result<StatusCode, CookbookServiceError> {
    let uc = UnmarkRecipeUseCase {
        states: state.recipe_state_repo(),
        recipes: state.recipe_repo(),
    };
    uc.execute(identity.user_id, recipe_id, flag).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /recipes/{id}/favorite ──────────────────────────────────────────────

pub async fn favorite_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeSummaryResponse>, CookbookServiceError> {
    mark(identity, state, id, StateFlag::Favorite).await
}

// ── DELETE /recipes/{id}/favorite ────────────────────────────────────────────

pub async fn unfavorite_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, CookbookServiceError> {
    unmark(identity, state, id, StateFlag::Favorite).await
}

// ── POST /recipes/{id}/shopping_cart ─────────────────────────────────────────

pub async fn add_recipe_to_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeSummaryResponse>, CookbookServiceError> {
    mark(identity, state, id, StateFlag::ShoppingCart).await
}

// ── DELETE /recipes/{id}/shopping_cart ───────────────────────────────────────

pub async fn remove_recipe_from_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, CookbookServiceError> {
    unmark(identity, state, id, StateFlag::ShoppingCart).await
}
