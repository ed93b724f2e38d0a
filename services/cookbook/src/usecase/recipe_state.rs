use crate::domain::repository::{RecipeRepository, RecipeStateRepository};
use crate::domain::types::{RecipeSummary, StateFlag};
use crate::error::CookbookServiceError;

// ── MarkRecipe (POST favorite / POST shopping_cart) ──────────────────────────

pub struct MarkRecipeUseCase<S: RecipeStateRepository, R: RecipeRepository> {
    pub states: S,
    pub recipes: R,
}

impl<S: RecipeStateRepository, R: RecipeRepository> MarkRecipeUseCase<S, R> {
    /// Transition the flag off→on and return the recipe summary. A second
    /// mark without an intervening unmark is a conflict, not a no-op.
    pub async fn execute(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<RecipeSummary, CookbookServiceError> {
        let summary = self
            .recipes
            .summary(recipe_id)
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)?;
        let changed = self.states.mark(user_id, recipe_id, flag).await?;
        if !changed {
            return Err(match flag {
                StateFlag::Favorite => CookbookServiceError::AlreadyFavorited,
                StateFlag::ShoppingCart => CookbookServiceError::AlreadyInCart,
            });
        }
        Ok(summary)
    }
}

// ── UnmarkRecipe (DELETE favorite / DELETE shopping_cart) ────────────────────

pub struct UnmarkRecipeUseCase<S: RecipeStateRepository, R: RecipeRepository> {
    pub states: S,
    pub recipes: R,
}

impl<S: RecipeStateRepository, R: RecipeRepository> UnmarkRecipeUseCase<S, R> {
    /// Transition the flag on→off. Unmarking a flag that is not on is a
    /// conflict, not a no-op.
    pub async fn execute(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<(), CookbookServiceError> {
        self.recipes
            .summary(recipe_id)
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)?;
        let changed = self.states.unmark(user_id, recipe_id, flag).await?;
        if !changed {
            return Err(match flag {
                StateFlag::Favorite => CookbookServiceError::NotFavorited,
                StateFlag::ShoppingCart => CookbookServiceError::NotInCart,
            });
        }
        Ok(())
    }
}
