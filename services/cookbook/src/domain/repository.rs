#![allow(async_fn_in_trait)]

use forkful_domain::data_uri::ImagePayload;
use forkful_domain::shopping_list::IngredientLine;

use crate::domain::types::{
    Ingredient, Recipe, RecipeDetails, RecipeFilter, RecipeSummary, StateFlag, SubscriptionEntry,
    Tag, User,
};
use crate::error::CookbookServiceError;

/// Fields for a new recipe, validated at the boundary before reaching here.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub tag_ids: Vec<i32>,
    /// (ingredient_id, amount) pairs.
    pub ingredients: Vec<(i32, i32)>,
}

/// Partial update. `tag_ids`/`ingredients` present means wholesale relink.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tag_ids: Option<Vec<i32>>,
    pub ingredients: Option<Vec<(i32, i32)>>,
}

/// Fields for a new user profile.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Repository for recipes and their tag/ingredient links.
pub trait RecipeRepository: Send + Sync {
    /// Filtered listing ordered by name ascending, id ascending. Returns
    /// the full result set; pagination is the caller's collaborator.
    /// Tri-state filter dimensions are only applied when `viewer` is set.
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<i32>,
    ) -> Result<Vec<RecipeDetails>, CookbookServiceError>;

    async fn find_details(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> Result<Option<RecipeDetails>, CookbookServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, CookbookServiceError>;

    async fn summary(&self, id: i32) -> Result<Option<RecipeSummary>, CookbookServiceError>;

    /// Insert the recipe and its links in one transaction. Returns the new id.
    async fn create(&self, new: &NewRecipe) -> Result<i32, CookbookServiceError>;

    /// Apply field changes; when tag/ingredient sets are supplied, replace
    /// the existing links wholesale. All in one transaction.
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), CookbookServiceError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, CookbookServiceError>;

    /// Author's recipes ordered by name, id; optionally capped.
    async fn summaries_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, CookbookServiceError>;

    /// Total recipe count for the author, independent of any cap.
    async fn count_by_author(&self, author_id: i32) -> Result<u64, CookbookServiceError>;
}

/// Repository for the per-(user, recipe) favorite/cart flags.
pub trait RecipeStateRepository: Send + Sync {
    /// Turn a flag on. Returns `false` (and mutates nothing) if already on.
    async fn mark(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<bool, CookbookServiceError>;

    /// Turn a flag off. Returns `false` (and mutates nothing) if not on.
    async fn unmark(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<bool, CookbookServiceError>;

    /// Every (name, unit, amount) ingredient occurrence across the user's
    /// cart recipes, unaggregated.
    async fn cart_ingredient_lines(
        &self,
        user_id: i32,
    ) -> Result<Vec<IngredientLine>, CookbookServiceError>;
}

/// Repository for follower→followee edges.
pub trait SubscriptionRepository: Send + Sync {
    /// Create the edge. Returns `false` if it already exists.
    async fn create(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError>;

    /// Delete the edge. Returns `true` if a row was deleted.
    async fn delete(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError>;

    async fn exists(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError>;

    /// Users the follower subscribes to, ordered by email.
    async fn followees(&self, follower_id: i32) -> Result<Vec<User>, CookbookServiceError>;
}

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, CookbookServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CookbookServiceError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, CookbookServiceError>;
    /// Insert the profile. Returns the new id.
    async fn create(&self, new: &NewUser) -> Result<i32, CookbookServiceError>;
    async fn set_avatar(
        &self,
        id: i32,
        avatar: Option<&str>,
    ) -> Result<(), CookbookServiceError>;
}

/// Repository for tags.
pub trait TagRepository: Send + Sync {
    /// All tags ordered by name, id.
    async fn list(&self) -> Result<Vec<Tag>, CookbookServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, CookbookServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, CookbookServiceError>;
}

/// Repository for ingredients.
pub trait IngredientRepository: Send + Sync {
    /// Ordered by name, id; optionally restricted to a name prefix.
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, CookbookServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, CookbookServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, CookbookServiceError>;
}

/// Which asset family a stored image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Recipe,
    Avatar,
}

/// Port for persisting decoded image payloads as binary assets.
pub trait ImageStore: Send + Sync {
    /// Store the payload and return its asset reference.
    async fn store(
        &self,
        kind: ImageKind,
        payload: &ImagePayload,
    ) -> Result<String, CookbookServiceError>;
}

/// Port for rendering the aggregated shopping list into a document.
pub trait ShoppingListRenderer: Send + Sync {
    fn render(&self, lines: &[IngredientLine]) -> String;
}
