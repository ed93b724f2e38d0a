use std::collections::HashSet;

use forkful_domain::data_uri::parse_image_data_uri;
use forkful_domain::validate::{
    RECIPE_NAME_MAX, RECIPE_TEXT_MAX, amount_in_bounds, cooking_time_in_bounds,
};

use crate::domain::repository::{
    ImageKind, ImageStore, IngredientRepository, NewRecipe, RecipeChanges, RecipeRepository,
    TagRepository,
};
use crate::domain::types::{RecipeDetails, RecipeFilter, short_link_code};
use crate::error::CookbookServiceError;

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        filter: RecipeFilter,
    ) -> Result<Vec<RecipeDetails>, CookbookServiceError> {
        // Favorite/cart restrictions are user-scoped; anonymous viewers get
        // them dropped rather than rejected.
        let filter = match viewer {
            Some(_) => filter,
            None => filter.without_user_scoped(),
        };
        self.repo.list(&filter, viewer).await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        recipe_id: i32,
    ) -> Result<RecipeDetails, CookbookServiceError> {
        self.repo
            .find_details(recipe_id, viewer)
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)
    }
}

// ── GetRecipeLink ────────────────────────────────────────────────────────────

pub struct GetRecipeLinkUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetRecipeLinkUseCase<R> {
    /// Returns the share code for the recipe; the handler assembles the URL.
    pub async fn execute(&self, recipe_id: i32) -> Result<String, CookbookServiceError> {
        self.repo
            .find_by_id(recipe_id)
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)?;
        Ok(short_link_code(recipe_id))
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Inline `data:image/...;base64,...` payload.
    pub image: String,
    pub tags: Vec<i32>,
    /// (ingredient_id, amount) pairs.
    pub ingredients: Vec<(i32, i32)>,
}

pub struct CreateRecipeUseCase<
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
> {
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
}

impl<R: RecipeRepository, T: TagRepository, I: IngredientRepository, S: ImageStore>
    CreateRecipeUseCase<R, T, I, S>
{
    pub async fn execute(
        &self,
        author_id: i32,
        input: CreateRecipeInput,
    ) -> Result<RecipeDetails, CookbookServiceError> {
        validate_recipe_fields(&input.name, &input.text, input.cooking_time)?;
        validate_tag_set(&self.tags, &input.tags).await?;
        validate_ingredient_set(&self.ingredients, &input.ingredients).await?;
        let payload = parse_image_data_uri(&input.image)
            .map_err(|e| CookbookServiceError::Validation(e.to_string()))?;

        // Everything is validated; the image write is the first mutation.
        let image = self.images.store(ImageKind::Recipe, &payload).await?;
        let id = self
            .recipes
            .create(&NewRecipe {
                author_id,
                name: input.name,
                text: input.text,
                cooking_time: input.cooking_time,
                image,
                tag_ids: input.tags,
                ingredients: input.ingredients,
            })
            .await?;
        self.recipes
            .find_details(id, Some(author_id))
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateRecipeInput {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<(i32, i32)>>,
}

pub struct UpdateRecipeUseCase<
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
> {
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
}

impl<R: RecipeRepository, T: TagRepository, I: IngredientRepository, S: ImageStore>
    UpdateRecipeUseCase<R, T, I, S>
{
    pub async fn execute(
        &self,
        requester_id: i32,
        recipe_id: i32,
        input: UpdateRecipeInput,
    ) -> Result<RecipeDetails, CookbookServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)?;
        if recipe.author_id != requester_id {
            return Err(CookbookServiceError::NotRecipeAuthor);
        }

        validate_recipe_fields(
            input.name.as_deref().unwrap_or(&recipe.name),
            input.text.as_deref().unwrap_or(&recipe.text),
            input.cooking_time.unwrap_or(recipe.cooking_time),
        )?;
        if let Some(ref tag_ids) = input.tags {
            validate_tag_set(&self.tags, tag_ids).await?;
        }
        if let Some(ref ingredients) = input.ingredients {
            validate_ingredient_set(&self.ingredients, ingredients).await?;
        }
        let payload = input
            .image
            .as_deref()
            .map(parse_image_data_uri)
            .transpose()
            .map_err(|e| CookbookServiceError::Validation(e.to_string()))?;

        let image = match payload {
            Some(ref payload) => Some(self.images.store(ImageKind::Recipe, payload).await?),
            None => None,
        };
        self.recipes
            .update(
                recipe_id,
                &RecipeChanges {
                    name: input.name,
                    text: input.text,
                    cooking_time: input.cooking_time,
                    image,
                    tag_ids: input.tags,
                    ingredients: input.ingredients,
                },
            )
            .await?;
        self.recipes
            .find_details(recipe_id, Some(requester_id))
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(
        &self,
        requester_id: i32,
        recipe_id: i32,
    ) -> Result<(), CookbookServiceError> {
        let recipe = self
            .repo
            .find_by_id(recipe_id)
            .await?
            .ok_or(CookbookServiceError::RecipeNotFound)?;
        if recipe.author_id != requester_id {
            return Err(CookbookServiceError::NotRecipeAuthor);
        }
        let deleted = self.repo.delete(recipe_id).await?;
        if !deleted {
            return Err(CookbookServiceError::RecipeNotFound);
        }
        Ok(())
    }
}

// ── Validation helpers ───────────────────────────────────────────────────────

fn validate_recipe_fields(
    name: &str,
    text: &str,
    cooking_time: i32,
) -> Result<(), CookbookServiceError> {
    if name.trim().is_empty() || name.len() > RECIPE_NAME_MAX {
        return Err(CookbookServiceError::Validation(format!(
            "recipe name must be 1-{RECIPE_NAME_MAX} characters"
        )));
    }
    if text.trim().is_empty() || text.len() > RECIPE_TEXT_MAX {
        return Err(CookbookServiceError::Validation(format!(
            "recipe text must be 1-{RECIPE_TEXT_MAX} characters"
        )));
    }
    if !cooking_time_in_bounds(cooking_time) {
        return Err(CookbookServiceError::Validation(
            "cooking_time must be between 1 and 32000".to_owned(),
        ));
    }
    Ok(())
}

async fn validate_tag_set<T: TagRepository>(
    repo: &T,
    tag_ids: &[i32],
) -> Result<(), CookbookServiceError> {
    if tag_ids.is_empty() {
        return Err(CookbookServiceError::Validation(
            "at least one tag is required".to_owned(),
        ));
    }
    let unique: HashSet<i32> = tag_ids.iter().copied().collect();
    if unique.len() != tag_ids.len() {
        return Err(CookbookServiceError::Validation(
            "duplicate tags are not allowed".to_owned(),
        ));
    }
    let found = repo.find_by_ids(tag_ids).await?;
    if found.len() != unique.len() {
        let known: HashSet<i32> = found.iter().map(|t| t.id).collect();
        let missing = tag_ids
            .iter()
            .find(|id| !known.contains(*id))
            .copied()
            .unwrap_or_default();
        return Err(CookbookServiceError::Validation(format!(
            "unknown tag id {missing}"
        )));
    }
    Ok(())
}

async fn validate_ingredient_set<I: IngredientRepository>(
    repo: &I,
    ingredients: &[(i32, i32)],
) -> Result<(), CookbookServiceError> {
    if ingredients.is_empty() {
        return Err(CookbookServiceError::Validation(
            "at least one ingredient is required".to_owned(),
        ));
    }
    let unique: HashSet<i32> = ingredients.iter().map(|(id, _)| *id).collect();
    if unique.len() != ingredients.len() {
        return Err(CookbookServiceError::Validation(
            "duplicate ingredients are not allowed".to_owned(),
        ));
    }
    if let Some((_, amount)) = ingredients.iter().find(|(_, a)| !amount_in_bounds(*a)) {
        return Err(CookbookServiceError::Validation(format!(
            "ingredient amount {amount} must be between 1 and 32000"
        )));
    }
    let found = repo.find_by_ids(&ingredients.iter().map(|(id, _)| *id).collect::<Vec<_>>())
        .await?;
    if found.len() != unique.len() {
        let known: HashSet<i32> = found.iter().map(|i| i.id).collect();
        let missing = ingredients
            .iter()
            .map(|(id, _)| *id)
            .find(|id| !known.contains(id))
            .unwrap_or_default();
        return Err(CookbookServiceError::Validation(format!(
            "unknown ingredient id {missing}"
        )));
    }
    Ok(())
}
