use forkful_domain::shopping_list::aggregate;

use crate::domain::repository::{RecipeStateRepository, ShoppingListRenderer};
use crate::error::CookbookServiceError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<S: RecipeStateRepository, D: ShoppingListRenderer> {
    pub states: S,
    pub renderer: D,
}

impl<S: RecipeStateRepository, D: ShoppingListRenderer> DownloadShoppingListUseCase<S, D> {
    /// Aggregate the cart's ingredient lines and render the document.
    /// An empty cart is a not-found, never an empty document.
    pub async fn execute(&self, user_id: i32) -> Result<String, CookbookServiceError> {
        let lines = self.states.cart_ingredient_lines(user_id).await?;
        if lines.is_empty() {
            return Err(CookbookServiceError::EmptyShoppingCart);
        }
        Ok(self.renderer.render(&aggregate(lines)))
    }
}
