use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::CookbookServiceError;
use crate::handlers::recipe::TagResponse;
use crate::state::AppState;
use crate::usecase::tag::{GetTagUseCase, ListTagsUseCase};

// ── GET /tags ────────────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, CookbookServiceError> {
    let uc = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = uc.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /tags/{id} ───────────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, CookbookServiceError> {
    let uc = GetTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = uc.execute(id).await?;
    Ok(Json(TagResponse::from(tag)))
}
