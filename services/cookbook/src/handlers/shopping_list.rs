use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use forkful_auth_types::identity::Identity;

use crate::error::CookbookServiceError;
use crate::state::AppState;
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Response, CookbookServiceError> {
    let uc = DownloadShoppingListUseCase {
        states: state.recipe_state_repo(),
        renderer: state.shopping_list_renderer(),
    };
    let document = uc.execute(identity.user_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        document,
    )
        .into_response())
}
