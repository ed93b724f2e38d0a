use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    FromQueryResult, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Statement, TransactionTrait,
    sea_query::{Expr, Query, SelectStatement},
};

use forkful_cookbook_schema::{
    ingredients, recipe_ingredients, recipe_tags, recipes, subscriptions, tags,
    user_recipe_states, users,
};
use forkful_domain::shopping_list::IngredientLine;

use crate::domain::repository::{
    IngredientRepository, NewRecipe, NewUser, RecipeChanges, RecipeRepository,
    RecipeStateRepository, SubscriptionRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    Ingredient, Recipe, RecipeDetails, RecipeFilter, RecipeIngredient, RecipeSummary, StateFlag,
    Tag, User,
};
use crate::error::CookbookServiceError;

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

/// `SELECT recipe_id FROM user_recipe_states WHERE user_id = ? AND <flag>`.
fn state_subquery(user_id: i32, flag_column: user_recipe_states::Column) -> SelectStatement {
    Query::select()
        .column(user_recipe_states::Column::RecipeId)
        .from(user_recipe_states::Entity)
        .and_where(Expr::col(user_recipe_states::Column::UserId).eq(user_id))
        .and_where(Expr::col(flag_column).eq(true))
        .to_owned()
}

impl DbRecipeRepository {
    /// Batch-load tag/ingredient links and viewer flags for the given rows,
    /// preserving their order.
    async fn load_details(
        &self,
        models: Vec<recipes::Model>,
        viewer: Option<i32>,
    ) -> Result<Vec<RecipeDetails>, CookbookServiceError> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let tag_rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(tags::Entity)
            .all(&self.db)
            .await
            .context("load recipe tag links")?;
        let ingredient_rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .all(&self.db)
            .await
            .context("load recipe ingredient links")?;
        let state_rows = match viewer {
            Some(viewer_id) => user_recipe_states::Entity::find()
                .filter(user_recipe_states::Column::UserId.eq(viewer_id))
                .filter(user_recipe_states::Column::RecipeId.is_in(ids.iter().copied()))
                .all(&self.db)
                .await
                .context("load viewer recipe states")?,
            None => Vec::new(),
        };

        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (link, tag) in tag_rows {
            if let Some(tag) = tag {
                tags_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }
        let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        for (link, ingredient) in ingredient_rows {
            if let Some(ingredient) = ingredient {
                ingredients_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(RecipeIngredient {
                        ingredient: ingredient_from_model(ingredient),
                        amount: link.amount,
                    });
            }
        }
        let states_by_recipe: HashMap<i32, (bool, bool)> = state_rows
            .into_iter()
            .map(|s| (s.recipe_id, (s.is_favorited, s.is_in_shopping_cart)))
            .collect();

        let mut details = Vec::with_capacity(models.len());
        for model in models {
            let mut recipe_tags = tags_by_recipe.remove(&model.id).unwrap_or_default();
            recipe_tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            let mut recipe_ingredients =
                ingredients_by_recipe.remove(&model.id).unwrap_or_default();
            recipe_ingredients.sort_by(|a, b| {
                a.ingredient
                    .name
                    .cmp(&b.ingredient.name)
                    .then(a.ingredient.id.cmp(&b.ingredient.id))
            });
            let (is_favorited, is_in_shopping_cart) = states_by_recipe
                .get(&model.id)
                .copied()
                .unwrap_or((false, false));
            details.push(RecipeDetails {
                recipe: recipe_from_model(model),
                tags: recipe_tags,
                ingredients: recipe_ingredients,
                is_favorited,
                is_in_shopping_cart,
            });
        }
        Ok(details)
    }
}

/// Wholesale relink: drop every tag link for the recipe, then insert the new set.
async fn replace_tag_links(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    tag_ids: &[i32],
) -> Result<(), sea_orm::DbErr> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(txn)
        .await?;
    recipe_tags::Entity::insert_many(tag_ids.iter().map(|tag_id| recipe_tags::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(*tag_id),
    }))
    .exec(txn)
    .await?;
    Ok(())
}

/// Wholesale relink for ingredient links, same shape as the tag variant.
async fn replace_ingredient_links(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    ingredients: &[(i32, i32)],
) -> Result<(), sea_orm::DbErr> {
    recipe_ingredients::Entity::delete_many()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .exec(txn)
        .await?;
    recipe_ingredients::Entity::insert_many(ingredients.iter().map(|(ingredient_id, amount)| {
        recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(*ingredient_id),
            amount: Set(*amount),
        }
    }))
    .exec(txn)
    .await?;
    Ok(())
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<i32>,
    ) -> Result<Vec<RecipeDetails>, CookbookServiceError> {
        let mut query = recipes::Entity::find();
        if !filter.authors.is_empty() {
            query = query.filter(recipes::Column::AuthorId.is_in(filter.authors.iter().copied()));
        }
        if !filter.tags.is_empty() {
            let tag_subquery = Query::select()
                .column(recipe_tags::Column::RecipeId)
                .from(recipe_tags::Entity)
                .inner_join(
                    tags::Entity,
                    Expr::col((tags::Entity, tags::Column::Id))
                        .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                )
                .and_where(
                    Expr::col((tags::Entity, tags::Column::Slug))
                        .is_in(filter.tags.iter().cloned()),
                )
                .to_owned();
            query = query.filter(recipes::Column::Id.in_subquery(tag_subquery));
        }
        if let Some(viewer_id) = viewer {
            // `Some(false)` is a set difference: recipes never marked are
            // included too, so exclusion is against the marked set.
            if let Some(wanted) = filter.is_favorited {
                let sub = state_subquery(viewer_id, user_recipe_states::Column::IsFavorited);
                query = if wanted {
                    query.filter(recipes::Column::Id.in_subquery(sub))
                } else {
                    query.filter(recipes::Column::Id.not_in_subquery(sub))
                };
            }
            if let Some(wanted) = filter.is_in_shopping_cart {
                let sub = state_subquery(viewer_id, user_recipe_states::Column::IsInShoppingCart);
                query = if wanted {
                    query.filter(recipes::Column::Id.in_subquery(sub))
                } else {
                    query.filter(recipes::Column::Id.not_in_subquery(sub))
                };
            }
        }
        let models = query
            .order_by_asc(recipes::Column::Name)
            .order_by_asc(recipes::Column::Id)
            .all(&self.db)
            .await
            .context("list recipes")?;
        self.load_details(models, viewer).await
    }

    async fn find_details(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> Result<Option<RecipeDetails>, CookbookServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let mut details = self.load_details(vec![model], viewer).await?;
        Ok(details.pop())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, CookbookServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe")?;
        Ok(model.map(recipe_from_model))
    }

    async fn summary(&self, id: i32) -> Result<Option<RecipeSummary>, CookbookServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(summary_from_model))
    }

    async fn create(&self, new: &NewRecipe) -> Result<i32, CookbookServiceError> {
        let id = self
            .db
            .transaction::<_, i32, sea_orm::DbErr>(|txn| {
                let new = new.clone();
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        id: NotSet,
                        name: Set(new.name),
                        text: Set(new.text),
                        cooking_time: Set(new.cooking_time),
                        image: Set(new.image),
                        author_id: Set(new.author_id),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    replace_tag_links(txn, recipe.id, &new.tag_ids).await?;
                    replace_ingredient_links(txn, recipe.id, &new.ingredients).await?;
                    Ok(recipe.id)
                })
            })
            .await
            .context("create recipe")?;
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), CookbookServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let scalar_change = changes.name.is_some()
                        || changes.text.is_some()
                        || changes.cooking_time.is_some()
                        || changes.image.is_some();
                    if scalar_change {
                        let mut recipe = recipes::ActiveModel {
                            id: Set(id),
                            ..Default::default()
                        };
                        if let Some(name) = changes.name {
                            recipe.name = Set(name);
                        }
                        if let Some(text) = changes.text {
                            recipe.text = Set(text);
                        }
                        if let Some(cooking_time) = changes.cooking_time {
                            recipe.cooking_time = Set(cooking_time);
                        }
                        if let Some(image) = changes.image {
                            recipe.image = Set(image);
                        }
                        recipe.update(txn).await?;
                    }
                    if let Some(ref tag_ids) = changes.tag_ids {
                        replace_tag_links(txn, id, tag_ids).await?;
                    }
                    if let Some(ref ingredients) = changes.ingredients {
                        replace_ingredient_links(txn, id, ingredients).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update recipe")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, CookbookServiceError> {
        let result = recipes::Entity::delete_many()
            .filter(recipes::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn summaries_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, CookbookServiceError> {
        let models = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_asc(recipes::Column::Name)
            .order_by_asc(recipes::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(summary_from_model).collect())
    }

    async fn count_by_author(&self, author_id: i32) -> Result<u64, CookbookServiceError> {
        recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")
            .map_err(Into::into)
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        text: model.text,
        cooking_time: model.cooking_time,
        image: model.image,
        created_at: model.created_at,
    }
}

fn summary_from_model(model: recipes::Model) -> RecipeSummary {
    RecipeSummary {
        id: model.id,
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

// ── Recipe state repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeStateRepository {
    pub db: DatabaseConnection,
}

impl RecipeStateRepository for DbRecipeStateRepository {
    async fn mark(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<bool, CookbookServiceError> {
        // Find-or-create-then-conditional-update in one transaction, so of
        // two concurrent marks exactly one observes the off→on transition.
        let changed = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let existing = user_recipe_states::Entity::find_by_id((user_id, recipe_id))
                        .one(txn)
                        .await?;
                    match existing {
                        Some(row) => {
                            let already_on = match flag {
                                StateFlag::Favorite => row.is_favorited,
                                StateFlag::ShoppingCart => row.is_in_shopping_cart,
                            };
                            if already_on {
                                return Ok(false);
                            }
                            let mut state = row.into_active_model();
                            match flag {
                                StateFlag::Favorite => state.is_favorited = Set(true),
                                StateFlag::ShoppingCart => {
                                    state.is_in_shopping_cart = Set(true)
                                }
                            }
                            state.update(txn).await?;
                            Ok(true)
                        }
                        None => {
                            user_recipe_states::ActiveModel {
                                user_id: Set(user_id),
                                recipe_id: Set(recipe_id),
                                is_favorited: Set(flag == StateFlag::Favorite),
                                is_in_shopping_cart: Set(flag == StateFlag::ShoppingCart),
                                created_at: Set(Utc::now()),
                            }
                            .insert(txn)
                            .await?;
                            Ok(true)
                        }
                    }
                })
            })
            .await
            .context("mark recipe state")?;
        Ok(changed)
    }

    async fn unmark(
        &self,
        user_id: i32,
        recipe_id: i32,
        flag: StateFlag,
    ) -> Result<bool, CookbookServiceError> {
        let changed = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let existing = user_recipe_states::Entity::find_by_id((user_id, recipe_id))
                        .one(txn)
                        .await?;
                    let Some(row) = existing else {
                        return Ok(false);
                    };
                    let on = match flag {
                        StateFlag::Favorite => row.is_favorited,
                        StateFlag::ShoppingCart => row.is_in_shopping_cart,
                    };
                    if !on {
                        return Ok(false);
                    }
                    // The row stays; the sibling flag must not be disturbed.
                    let mut state = row.into_active_model();
                    match flag {
                        StateFlag::Favorite => state.is_favorited = Set(false),
                        StateFlag::ShoppingCart => state.is_in_shopping_cart = Set(false),
                    }
                    state.update(txn).await?;
                    Ok(true)
                })
            })
            .await
            .context("unmark recipe state")?;
        Ok(changed)
    }

    async fn cart_ingredient_lines(
        &self,
        user_id: i32,
    ) -> Result<Vec<IngredientLine>, CookbookServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct CartLine {
            name: String,
            measurement_unit: String,
            amount: i32,
        }

        let sql = r#"
            SELECT i.name AS name, i.measurement_unit AS measurement_unit, ri.amount AS amount
            FROM user_recipe_states s
            JOIN recipe_ingredients ri ON ri.recipe_id = s.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE s.user_id = $1 AND s.is_in_shopping_cart
        "#;
        let rows = CartLine::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("load cart ingredient lines")?;

        Ok(rows
            .into_iter()
            .map(|row| IngredientLine {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount as i64,
            })
            .collect())
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn create(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError> {
        let created = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let existing =
                        subscriptions::Entity::find_by_id((follower_id, followee_id))
                            .one(txn)
                            .await?;
                    if existing.is_some() {
                        return Ok(false);
                    }
                    subscriptions::ActiveModel {
                        follower_id: Set(follower_id),
                        followee_id: Set(followee_id),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .context("create subscription")?;
        Ok(created)
    }

    async fn delete(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError> {
        let result = subscriptions::Entity::delete_many()
            .filter(subscriptions::Column::FollowerId.eq(follower_id))
            .filter(subscriptions::Column::FolloweeId.eq(followee_id))
            .exec(&self.db)
            .await
            .context("delete subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn exists(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<bool, CookbookServiceError> {
        let existing = subscriptions::Entity::find_by_id((follower_id, followee_id))
            .one(&self.db)
            .await
            .context("find subscription")?;
        Ok(existing.is_some())
    }

    async fn followees(&self, follower_id: i32) -> Result<Vec<User>, CookbookServiceError> {
        let models = users::Entity::find()
            .filter(
                users::Column::Id.in_subquery(
                    Query::select()
                        .column(subscriptions::Column::FolloweeId)
                        .from(subscriptions::Entity)
                        .and_where(
                            Expr::col(subscriptions::Column::FollowerId).eq(follower_id),
                        )
                        .to_owned(),
                ),
            )
            .order_by_asc(users::Column::Email)
            .all(&self.db)
            .await
            .context("list followees")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, CookbookServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CookbookServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, CookbookServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, new: &NewUser) -> Result<i32, CookbookServiceError> {
        let user = users::ActiveModel {
            id: NotSet,
            email: Set(new.email.clone()),
            username: Set(new.username.clone()),
            first_name: Set(new.first_name.clone()),
            last_name: Set(new.last_name.clone()),
            avatar: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(user.id)
    }

    async fn set_avatar(
        &self,
        id: i32,
        avatar: Option<&str>,
    ) -> Result<(), CookbookServiceError> {
        users::ActiveModel {
            id: Set(id),
            avatar: Set(avatar.map(ToOwned::to_owned)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user avatar")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, CookbookServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, CookbookServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, CookbookServiceError> {
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, CookbookServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(ingredients::Column::Name.starts_with(prefix));
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, CookbookServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, CookbookServiceError> {
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}
