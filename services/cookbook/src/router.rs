use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use forkful_core::health::{healthz, readyz};
use forkful_core::middleware::request_id_layer;

use crate::handlers::{
    ingredient::{get_ingredient, search_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, get_recipe_link, list_recipes, update_recipe},
    recipe_state::{add_recipe_to_cart, favorite_recipe, remove_recipe_from_cart, unfavorite_recipe},
    shopping_list::download_shopping_cart,
    subscription::{list_subscriptions, subscribe, unsubscribe},
    tag::{get_tag, list_tags},
    user::{clear_avatar, create_user, get_me, get_user, set_avatar},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Recipes
        .route("/recipes", get(list_recipes))
        .route("/recipes", post(create_recipe))
        .route("/recipes/download_shopping_cart", get(download_shopping_cart))
        .route("/recipes/{id}", get(get_recipe))
        .route("/recipes/{id}", patch(update_recipe))
        .route("/recipes/{id}", delete(delete_recipe))
        .route("/recipes/{id}/get-link", get(get_recipe_link))
        // Favorite / shopping cart toggles
        .route("/recipes/{id}/favorite", post(favorite_recipe))
        .route("/recipes/{id}/favorite", delete(unfavorite_recipe))
        .route("/recipes/{id}/shopping_cart", post(add_recipe_to_cart))
        .route("/recipes/{id}/shopping_cart", delete(remove_recipe_from_cart))
        // Lookups
        .route("/tags", get(list_tags))
        .route("/tags/{id}", get(get_tag))
        .route("/ingredients", get(search_ingredients))
        .route("/ingredients/{id}", get(get_ingredient))
        // Users
        .route("/users", post(create_user))
        .route("/users/me", get(get_me))
        .route("/users/me/avatar", put(set_avatar))
        .route("/users/me/avatar", delete(clear_avatar))
        .route("/users/subscriptions", get(list_subscriptions))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/subscribe", post(subscribe))
        .route("/users/{id}/subscribe", delete(unsubscribe))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
