use forkful_cookbook::domain::types::StateFlag;
use forkful_cookbook::error::CookbookServiceError;
use forkful_cookbook::usecase::recipe_state::{MarkRecipeUseCase, UnmarkRecipeUseCase};

use super::helpers::{MemoryStore, add_recipe, seeded_store};

fn mark_uc(store: &MemoryStore) -> MarkRecipeUseCase<MemoryStore, MemoryStore> {
    MarkRecipeUseCase {
        states: store.clone(),
        recipes: store.clone(),
    }
}

fn unmark_uc(store: &MemoryStore) -> UnmarkRecipeUseCase<MemoryStore, MemoryStore> {
    UnmarkRecipeUseCase {
        states: store.clone(),
        recipes: store.clone(),
    }
}

#[tokio::test]
async fn should_return_summary_on_first_favorite() {
    let store = seeded_store();
    let id = add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    let summary = mark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();
    assert_eq!(summary.id, id);
    assert_eq!(summary.name, "Soup");
    assert_eq!(summary.cooking_time, 30);
}

#[tokio::test]
async fn should_conflict_on_second_favorite_without_unfavorite() {
    let store = seeded_store();
    let id = add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    mark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();
    let result = mark_uc(&store).execute(2, id, StateFlag::Favorite).await;
    assert!(matches!(
        result,
        Err(CookbookServiceError::AlreadyFavorited)
    ));
}

#[tokio::test]
async fn should_round_trip_favorite_on_then_off() {
    let store = seeded_store();
    let id = add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    mark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();
    unmark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();

    // Back to off: marking again succeeds.
    mark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();
}

#[tokio::test]
async fn should_conflict_on_unfavorite_when_never_marked() {
    let store = seeded_store();
    let id = add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    let result = unmark_uc(&store).execute(2, id, StateFlag::Favorite).await;
    assert!(matches!(result, Err(CookbookServiceError::NotFavorited)));
}

#[tokio::test]
async fn should_conflict_on_remove_from_cart_when_not_in_cart() {
    let store = seeded_store();
    let id = add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    let result = unmark_uc(&store)
        .execute(2, id, StateFlag::ShoppingCart)
        .await;
    assert!(matches!(result, Err(CookbookServiceError::NotInCart)));
}

#[tokio::test]
async fn should_keep_cart_flag_when_favorite_is_toggled() {
    let store = seeded_store();
    let id = add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    mark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();
    mark_uc(&store)
        .execute(2, id, StateFlag::ShoppingCart)
        .await
        .unwrap();
    unmark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();

    let state = store.world().states.get(&(2, id)).copied().unwrap();
    assert_eq!(state, (false, true));
}

#[tokio::test]
async fn should_track_flags_per_user_independently() {
    let store = seeded_store();
    let id = add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    mark_uc(&store)
        .execute(1, id, StateFlag::Favorite)
        .await
        .unwrap();

    // Another user marking the same recipe is not a conflict.
    mark_uc(&store)
        .execute(2, id, StateFlag::Favorite)
        .await
        .unwrap();
}

#[tokio::test]
async fn should_reject_toggle_on_unknown_recipe() {
    let store = seeded_store();

    let result = mark_uc(&store).execute(2, 99, StateFlag::Favorite).await;
    assert!(matches!(result, Err(CookbookServiceError::RecipeNotFound)));

    let result = unmark_uc(&store).execute(2, 99, StateFlag::ShoppingCart).await;
    assert!(matches!(result, Err(CookbookServiceError::RecipeNotFound)));
}
