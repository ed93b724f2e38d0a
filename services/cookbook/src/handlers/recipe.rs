use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};

use forkful_auth_types::identity::{Identity, MaybeIdentity};

use crate::domain::types::{RecipeDetails, RecipeFilter, RecipeSummary};
use crate::error::CookbookServiceError;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeLinkUseCase,
    GetRecipeUseCase, ListRecipesUseCase, UpdateRecipeInput, UpdateRecipeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<crate::domain::types::Tag> for TagResponse {
    fn from(tag: crate::domain::types::Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub author: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub tags: Vec<TagResponse>,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    #[serde(serialize_with = "forkful_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RecipeResponse {
    pub fn from_details(details: RecipeDetails, state: &AppState) -> Self {
        Self {
            id: details.recipe.id,
            author: details.recipe.author_id,
            name: details.recipe.name,
            text: details.recipe.text,
            cooking_time: details.recipe.cooking_time,
            image: state.media_url(&details.recipe.image),
            tags: details.tags.into_iter().map(TagResponse::from).collect(),
            ingredients: details
                .ingredients
                .into_iter()
                .map(|link| RecipeIngredientResponse {
                    id: link.ingredient.id,
                    name: link.ingredient.name,
                    measurement_unit: link.ingredient.measurement_unit,
                    amount: link.amount,
                })
                .collect(),
            is_favorited: details.is_favorited,
            is_in_shopping_cart: details.is_in_shopping_cart,
            created_at: details.recipe.created_at,
        }
    }
}

/// Compact projection shared by the toggle endpoints and subscription previews.
#[derive(Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl RecipeSummaryResponse {
    pub fn from_summary(summary: RecipeSummary, state: &AppState) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            image: state.media_url(&summary.image),
            cooking_time: summary.cooking_time,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    #[serde(default)]
    pub author: Vec<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<u8>,
    pub is_in_shopping_cart: Option<u8>,
}

/// Absent → no restriction; `1` → true; anything else supplied → false.
fn tri_state(value: Option<u8>) -> Option<bool> {
    value.map(|v| v == 1)
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<Vec<RecipeResponse>>, CookbookServiceError> {
    let uc = ListRecipesUseCase {
        repo: state.recipe_repo(),
    };
    let filter = RecipeFilter {
        authors: query.author,
        tags: query.tags,
        is_favorited: tri_state(query.is_favorited),
        is_in_shopping_cart: tri_state(query.is_in_shopping_cart),
    };
    let viewer = identity.map(|i| i.user_id);
    let recipes = uc.execute(viewer, filter).await?;
    let items = recipes
        .into_iter()
        .map(|details| RecipeResponse::from_details(details, &state))
        .collect();
    Ok(Json(items))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, CookbookServiceError> {
    let uc = GetRecipeUseCase {
        repo: state.recipe_repo(),
    };
    let details = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(RecipeResponse::from_details(details, &state)))
}

// ── GET /recipes/{id}/get-link ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

pub async fn get_recipe_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeLinkResponse>, CookbookServiceError> {
    let uc = GetRecipeLinkUseCase {
        repo: state.recipe_repo(),
    };
    let code = uc.execute(id).await?;
    Ok(Json(RecipeLinkResponse {
        short_link: state.share_url(&code),
    }))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Inline `data:image/...;base64,...` payload.
    pub image: String,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmountRequest>,
}

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), CookbookServiceError> {
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
    };
    let details = uc
        .execute(
            identity.user_id,
            CreateRecipeInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                tags: body.tags,
                ingredients: body
                    .ingredients
                    .into_iter()
                    .map(|i| (i.id, i.amount))
                    .collect(),
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::from_details(details, &state)),
    ))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
}

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, CookbookServiceError> {
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
    };
    let details = uc
        .execute(
            identity.user_id,
            id,
            UpdateRecipeInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                tags: body.tags,
                ingredients: body
                    .ingredients
                    .map(|list| list.into_iter().map(|i| (i.id, i.amount)).collect()),
            },
        )
        .await?;
    Ok(Json(RecipeResponse::from_details(details, &state)))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, CookbookServiceError> {
    let uc = DeleteRecipeUseCase {
        repo: state.recipe_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
