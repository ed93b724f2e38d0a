use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use forkful_cookbook::domain::repository::{
    ImageKind, ImageStore, IngredientRepository, NewRecipe, NewUser, RecipeChanges,
    RecipeRepository, RecipeStateRepository, SubscriptionRepository, TagRepository,
    UserRepository,
};
use forkful_cookbook::domain::types::{
    Ingredient, Recipe, RecipeDetails, RecipeFilter, RecipeIngredient, RecipeSummary, StateFlag,
    Tag, User,
};
use forkful_cookbook::error::CookbookServiceError;
use forkful_domain::data_uri::ImagePayload;
use forkful_domain::shopping_list::IngredientLine;

pub const PNG_DATA_URI: &str = "data:image/png;base64,aGVsbG8=";

// ── In-memory world ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoredRecipe {
    pub recipe: Recipe,
    pub tag_ids: Vec<i32>,
    /// (ingredient_id, amount) pairs.
    pub ingredients: Vec<(i32, i32)>,
}

#[derive(Default)]
pub struct World {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<StoredRecipe>,
    /// (user_id, recipe_id) → (is_favorited, is_in_shopping_cart).
    pub states: HashMap<(i32, i32), (bool, bool)>,
    /// (follower_id, followee_id) edges.
    pub subs: HashSet<(i32, i32)>,
    pub next_recipe_id: i32,
    pub next_user_id: i32,
}

impl World {
    fn details(&self, stored: &StoredRecipe, viewer: Option<i32>) -> RecipeDetails {
        let mut tags: Vec<Tag> = self
            .tags
            .iter()
            .filter(|t| stored.tag_ids.contains(&t.id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let mut ingredients: Vec<RecipeIngredient> = stored
            .ingredients
            .iter()
            .filter_map(|(id, amount)| {
                self.ingredients
                    .iter()
                    .find(|i| i.id == *id)
                    .map(|ingredient| RecipeIngredient {
                        ingredient: ingredient.clone(),
                        amount: *amount,
                    })
            })
            .collect();
        ingredients.sort_by(|a, b| {
            a.ingredient
                .name
                .cmp(&b.ingredient.name)
                .then(a.ingredient.id.cmp(&b.ingredient.id))
        });
        let (is_favorited, is_in_shopping_cart) = viewer
            .and_then(|v| self.states.get(&(v, stored.recipe.id)).copied())
            .unwrap_or((false, false));
        RecipeDetails {
            recipe: stored.recipe.clone(),
            tags,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
        }
    }
}

/// Cloneable in-memory backend implementing every repository trait, so
/// usecases can be exercised without a database.
#[derive(Clone, Default)]
pub struct MemoryStore(pub Arc<Mutex<World>>);

impl MemoryStore {
    pub fn world(&self) -> std::sync::MutexGuard<'_, World> {
        self.0.lock().unwrap()
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn tag(id: i32, name: &str, slug: &str) -> Tag {
    Tag {
        id,
        name: name.to_owned(),
        slug: slug.to_owned(),
    }
}

pub fn ingredient(id: i32, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

pub fn user(id: i32, email: &str, username: &str) -> User {
    User {
        id,
        email: email.to_owned(),
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        avatar: None,
        created_at: Utc::now(),
    }
}

/// Two users, three tags, and three ingredients to build recipes from.
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::default();
    {
        let mut world = store.world();
        world.users = vec![
            user(1, "alice@example.org", "alice"),
            user(2, "bob@example.org", "bob"),
        ];
        world.tags = vec![
            tag(1, "Breakfast", "breakfast"),
            tag(2, "Lunch", "lunch"),
            tag(3, "Dinner", "dinner"),
        ];
        world.ingredients = vec![
            ingredient(1, "flour", "g"),
            ingredient(2, "salt", "g"),
            ingredient(3, "milk", "ml"),
        ];
        world.next_recipe_id = 1;
        world.next_user_id = 3;
    }
    store
}

/// Insert a recipe directly, bypassing create validation.
pub fn add_recipe(
    store: &MemoryStore,
    author_id: i32,
    name: &str,
    tag_ids: &[i32],
    ingredients: &[(i32, i32)],
) -> i32 {
    let mut world = store.world();
    let id = world.next_recipe_id;
    world.next_recipe_id += 1;
    world.recipes.push(StoredRecipe {
        recipe: Recipe {
            id,
            author_id,
            name: name.to_owned(),
            text: "Stir and serve.".to_owned(),
            cooking_time: 30,
            image: format!("recipes/images/{id}.png"),
            created_at: Utc::now(),
        },
        tag_ids: tag_ids.to_vec(),
        ingredients: ingredients.to_vec(),
    });
    id
}

// ── RecipeRepository ─────────────────────────────────────────────────────────

impl RecipeRepository for MemoryStore {
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<i32>,
    ) -> Result<Vec<RecipeDetails>, CookbookServiceError> {
        let world = self.world();
        let mut rows: Vec<&StoredRecipe> = world.recipes.iter().collect();
        if !filter.authors.is_empty() {
            rows.retain(|r| filter.authors.contains(&r.recipe.author_id));
        }
        if !filter.tags.is_empty() {
            rows.retain(|r| {
                r.tag_ids.iter().any(|tag_id| {
                    world
                        .tags
                        .iter()
                        .any(|t| t.id == *tag_id && filter.tags.contains(&t.slug))
                })
            });
        }
        if let Some(viewer_id) = viewer {
            if let Some(wanted) = filter.is_favorited {
                rows.retain(|r| {
                    let marked = world
                        .states
                        .get(&(viewer_id, r.recipe.id))
                        .map(|s| s.0)
                        .unwrap_or(false);
                    marked == wanted
                });
            }
            if let Some(wanted) = filter.is_in_shopping_cart {
                rows.retain(|r| {
                    let marked = world
                        .states
                        .get(&(viewer_id, r.recipe.id))
                        .map(|s| s.1)
                        .unwrap_or(false);
                    marked == wanted
                });
            }
        }
        let mut details: Vec<RecipeDetails> =
            rows.into_iter().map(|r| world.details(r, viewer)).collect();
        details.sort_by(|a, b| {
            a.recipe
                .name
                .cmp(&b.recipe.name)
                .then(a.recipe.id.cmp(&b.recipe.id))
        });
        Ok(details)
    }

    async fn find_details(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> Result<Option<RecipeDetails>, CookbookServiceError> {
        let world = self.world();
        Ok(world
            .recipes
            .iter()
            .find(|r| r.recipe.id == id)
            .map(|r| world.details(r, viewer)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, CookbookServiceError> {
        Ok(self
            .world()
            .recipes
            .iter()
            .find(|r| r.recipe.id == id)
            .map(|r| r.recipe.clone()))
    }

    async fn summary(&self, id: i32) -> Result<Option<RecipeSummary>, CookbookServiceError> {
        Ok(self
            .world()
            .recipes
            .iter()
            .find(|r| r.recipe.id == id)
            .map(|r| RecipeSummary {
                id: r.recipe.id,
                name: r.recipe.name.clone(),
                image: r.recipe.image.clone(),
                cooking_time: r.recipe.cooking_time,
            }))
    }

    async fn create(&self, new: &NewRecipe) -> Result<i32, CookbookServiceError> {
        let mut world = self.world();
        let id = world.next_recipe_id;
        world.next_recipe_id += 1;
        world.recipes.push(StoredRecipe {
            recipe: Recipe {
                id,
                author_id: new.author_id,
                name: new.name.clone(),
                text: new.text.clone(),
                cooking_time: new.cooking_time,
                image: new.image.clone(),
                created_at: Utc::now(),
            },
            tag_ids: new.tag_ids.clone(),
            ingredients: new.ingredients.clone(),
        });
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), CookbookServiceError> {
        let mut world = self.world();
        let stored = world
            .recipes
            .iter_mut()
            .find(|r| r.recipe.id == id)
            .ok_or(CookbookServiceError::RecipeNotFound)?;
        if let Some(ref name) = changes.name {
            stored.recipe.name = name.clone();
        }
        if let Some(ref text) = changes.text {
            stored.recipe.text = text.clone();
        }
        if let Some(cooking_time) = changes.cooking_time {
            stored.recipe.cooking_time = cooking_time;
        }
        if let Some(ref image) = changes.image {
            stored.recipe.image = image.clone();
        }
        if let Some(ref tag_ids) = changes.tag_ids {
            stored.tag_ids = tag_ids.clone();
        }
        if let Some(ref ingredients) = changes.ingredients {
            stored.ingredients = ingredients.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, CookbookServiceError> {
        let mut world = self.world();
        let before = world.recipes.len();
        world.recipes.retain(|r| r.recipe.id != id);
        Ok(world.recipes.len() < before)
    }

    async fn summaries_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, CookbookServiceError> {
        let world = self.world();
        let mut summaries: Vec<RecipeSummary> = world
            .recipes
            .iter()
            .filter(|r| r.recipe.author_id == author_id)
            .map(|r| RecipeSummary {
                id: r.recipe.id,
                name: r.recipe.name.clone(),
                image: r.recipe.image.clone(),
                cooking_time: r.recipe.cooking_time,
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        if let Some(limit) = limit {
            summaries.truncate(limit as usize);
        }
        Ok(summaries)
    }

    async fn count_by_author(&self, author_id: i32) -> Result<u64, CookbookServiceError> {
        Ok(self
            .world()
            .recipes
            .iter()
            .filter(|r| r.recipe.author_id == author_id)
            .count() as u64)
    }
}

// ── RecipeStateRepository ────────────────────────────────────────────────────

impl RecipeStateRepository for MemoryStore {
    async fn mark(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<bool, CookbookServiceError> {
        let mut world = self.world();
        let entry = world.states.entry((user_id, recipe_id)).or_insert((false, false));
        let slot = match flag {
            StateFlag::Favorite => &mut entry.0,
            StateFlag::ShoppingCart => &mut entry.1,
        };
        if *slot {
            return Ok(false);
        }
        *slot = true;
        Ok(true)
    }

    async fn unmark(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<bool, CookbookServiceError> {
        let mut world = self.world();
        let Some(entry) = world.states.get_mut(&(user_id, recipe_id)) else {
            return Ok(false);
        };
        let slot = match flag {
            StateFlag::Favorite => &mut entry.0,
            StateFlag::ShoppingCart => &mut entry.1,
        };
        if !*slot {
            return Ok(false);
        }
        *slot = false;
        Ok(true)
    }

    async fn cart_ingredient_lines(
        &self,
        user_id: i32,
    ) -> Result<Vec<IngredientLine>, CookbookServiceError> {
        let world = self.world();
        let mut lines = Vec::new();
        for ((state_user, recipe_id), (_, in_cart)) in &world.states {
            if *state_user != user_id || !*in_cart {
                continue;
            }
            let Some(stored) = world.recipes.iter().find(|r| r.recipe.id == *recipe_id) else {
                continue;
            };
            for (ingredient_id, amount) in &stored.ingredients {
                if let Some(ingredient) =
                    world.ingredients.iter().find(|i| i.id == *ingredient_id)
                {
                    lines.push(IngredientLine {
                        name: ingredient.name.clone(),
                        measurement_unit: ingredient.measurement_unit.clone(),
                        amount: *amount as i64,
                    });
                }
            }
        }
        Ok(lines)
    }
}

// ── SubscriptionRepository ───────────────────────────────────────────────────

impl SubscriptionRepository for MemoryStore {
    async fn create(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError> {
        Ok(self.world().subs.insert((follower_id, followee_id)))
    }

    async fn delete(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError> {
        Ok(self.world().subs.remove(&(follower_id, followee_id)))
    }

    async fn exists(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError> {
        Ok(self.world().subs.contains(&(follower_id, followee_id)))
    }

    async fn followees(&self, follower_id: i32) -> Result<Vec<User>, CookbookServiceError> {
        let world = self.world();
        let mut followees: Vec<User> = world
            .users
            .iter()
            .filter(|u| world.subs.contains(&(follower_id, u.id)))
            .cloned()
            .collect();
        followees.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(followees)
    }
}

// ── UserRepository ───────────────────────────────────────────────────────────

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, CookbookServiceError> {
        Ok(self.world().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CookbookServiceError> {
        Ok(self
            .world()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, CookbookServiceError> {
        Ok(self
            .world()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, new: &NewUser) -> Result<i32, CookbookServiceError> {
        let mut world = self.world();
        let id = world.next_user_id;
        world.next_user_id += 1;
        world.users.push(User {
            id,
            email: new.email.clone(),
            username: new.username.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            avatar: None,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn set_avatar(
        &self,
        id: i32,
        avatar: Option<&str>,
    ) -> Result<(), CookbookServiceError> {
        let mut world = self.world();
        if let Some(user) = world.users.iter_mut().find(|u| u.id == id) {
            user.avatar = avatar.map(ToOwned::to_owned);
        }
        Ok(())
    }
}

// ── TagRepository / IngredientRepository ─────────────────────────────────────

impl TagRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Tag>, CookbookServiceError> {
        let mut tags = self.world().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, CookbookServiceError> {
        Ok(self.world().tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, CookbookServiceError> {
        Ok(self
            .world()
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }
}

impl IngredientRepository for MemoryStore {
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, CookbookServiceError> {
        let mut ingredients: Vec<Ingredient> = self
            .world()
            .ingredients
            .iter()
            .filter(|i| name_prefix.is_none_or(|p| i.name.starts_with(p)))
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(ingredients)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, CookbookServiceError> {
        Ok(self
            .world()
            .ingredients
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, CookbookServiceError> {
        Ok(self
            .world()
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }
}

// ── MockImages ───────────────────────────────────────────────────────────────

/// Records stored payloads and hands back deterministic references.
#[derive(Clone, Default)]
pub struct MockImages {
    pub stored: Arc<Mutex<Vec<String>>>,
}

impl ImageStore for MockImages {
    async fn store(
        &self,
        kind: ImageKind,
        payload: &ImagePayload,
    ) -> Result<String, CookbookServiceError> {
        let mut stored = self.stored.lock().unwrap();
        let prefix = match kind {
            ImageKind::Recipe => "recipes/images",
            ImageKind::Avatar => "users/images",
        };
        let reference = format!("{}/{}.{}", prefix, stored.len() + 1, payload.extension);
        stored.push(reference.clone());
        Ok(reference)
    }
}
