use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Cookbook service domain error variants.
///
/// Conflicts and validation failures serialize as `{"errors": ...}` with
/// 400; not-found and authorization failures as `{"detail": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum CookbookServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("recipe is already in favorites")]
    AlreadyFavorited,
    #[error("recipe is not in favorites")]
    NotFavorited,
    #[error("recipe is already in shopping cart")]
    AlreadyInCart,
    #[error("recipe is not in shopping cart")]
    NotInCart,
    #[error("already subscribed to this user")]
    AlreadySubscribed,
    #[error("not subscribed to this user")]
    NotSubscribed,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("email is already taken")]
    EmailTaken,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("shopping cart is empty")]
    EmptyShoppingCart,
    #[error("only the author can modify this recipe")]
    NotRecipeAuthor,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CookbookServiceError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::AlreadyFavorited
            | Self::NotFavorited
            | Self::AlreadyInCart
            | Self::NotInCart
            | Self::AlreadySubscribed
            | Self::NotSubscribed
            | Self::SelfSubscription
            | Self::EmailTaken
            | Self::UsernameTaken => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::UserNotFound
            | Self::EmptyShoppingCart => StatusCode::NOT_FOUND,
            Self::NotRecipeAuthor => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CookbookServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, "internal error");
        }
        let body = if status == StatusCode::BAD_REQUEST {
            serde_json::json!({ "errors": self.to_string() })
        } else {
            serde_json::json!({ "detail": self.to_string() })
        };
        (status, axum::Json(body)).into_response()
    }
}
