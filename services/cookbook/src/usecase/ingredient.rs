use crate::domain::repository::IngredientRepository;
use crate::domain::types::Ingredient;
use crate::error::CookbookServiceError;

// ── SearchIngredients ────────────────────────────────────────────────────────

pub struct SearchIngredientsUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> SearchIngredientsUseCase<I> {
    pub async fn execute(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<Ingredient>, CookbookServiceError> {
        // An empty search string means no restriction, same as absent.
        let name = name.filter(|n| !n.is_empty());
        self.repo.search(name).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> GetIngredientUseCase<I> {
    pub async fn execute(&self, ingredient_id: i32) -> Result<Ingredient, CookbookServiceError> {
        self.repo
            .find_by_id(ingredient_id)
            .await?
            .ok_or(CookbookServiceError::IngredientNotFound)
    }
}
