use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbIngredientRepository, DbRecipeRepository, DbRecipeStateRepository,
    DbSubscriptionRepository, DbTagRepository, DbUserRepository,
};
use crate::infra::image::FsImageStore;
use crate::infra::render::PlainTextShoppingList;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub base_url: String,
    pub media_root: PathBuf,
}

impl AppState {
    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_state_repo(&self) -> DbRecipeStateRepository {
        DbRecipeStateRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscription_repo(&self) -> DbSubscriptionRepository {
        DbSubscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> FsImageStore {
        FsImageStore {
            media_root: self.media_root.clone(),
        }
    }

    pub fn shopping_list_renderer(&self) -> PlainTextShoppingList {
        PlainTextShoppingList
    }

    /// Public URL for a stored media reference.
    pub fn media_url(&self, reference: &str) -> String {
        format!("{}/media/{}", self.base_url, reference)
    }

    /// Public short link for a recipe share code.
    pub fn share_url(&self, code: &str) -> String {
        format!("{}/s/{}", self.base_url, code)
    }
}
