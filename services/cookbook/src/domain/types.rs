use chrono::{DateTime, Utc};

/// Recipe tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Ingredient catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Ingredient attached to a recipe with its per-recipe amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Published recipe row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Recipe with its links loaded, plus the viewer-relative flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Compact projection returned by toggle endpoints and subscription previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// User profile. Credentials live with the external auth gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Followee projection for the subscriptions listing — the only context
/// that carries `recipes` and `recipes_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionEntry {
    pub user: User,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

/// Which of the two per-pair flags a toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFlag {
    Favorite,
    ShoppingCart,
}

/// Recipe listing filters. Dimensions compose with AND; within a list
/// dimension the supplied values compose with OR. `None` means no
/// restriction; `Some(false)` is the set difference from the marked set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub authors: Vec<i32>,
    pub tags: Vec<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

impl RecipeFilter {
    /// Drop the user-scoped tri-state dimensions. Applied for anonymous
    /// viewers, for whom favorite/cart restrictions are meaningless.
    pub fn without_user_scoped(mut self) -> Self {
        self.is_favorited = None;
        self.is_in_shopping_cart = None;
        self
    }
}

/// Base-36 share-link code for a recipe id.
pub fn short_link_code(id: i32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut n = id as u32;
    let mut out = Vec::new();
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}
