//! Database entities owned by the cookbook service.

pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipe_tags;
pub mod recipes;
pub mod subscriptions;
pub mod tags;
pub mod user_recipe_states;
pub mod users;
