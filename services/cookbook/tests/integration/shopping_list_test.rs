use forkful_cookbook::domain::types::StateFlag;
use forkful_cookbook::error::CookbookServiceError;
use forkful_cookbook::infra::render::PlainTextShoppingList;
use forkful_cookbook::usecase::recipe_state::MarkRecipeUseCase;
use forkful_cookbook::usecase::shopping_list::DownloadShoppingListUseCase;

use super::helpers::{MemoryStore, add_recipe, seeded_store};

fn download_uc(
    store: &MemoryStore,
) -> DownloadShoppingListUseCase<MemoryStore, PlainTextShoppingList> {
    DownloadShoppingListUseCase {
        states: store.clone(),
        renderer: PlainTextShoppingList,
    }
}

async fn put_in_cart(store: &MemoryStore, user_id: i32, recipe_id: i32) {
    let uc = MarkRecipeUseCase {
        states: store.clone(),
        recipes: store.clone(),
    };
    uc.execute(user_id, recipe_id, StateFlag::ShoppingCart)
        .await
        .unwrap();
}

#[tokio::test]
async fn should_sum_same_ingredient_across_cart_recipes() {
    let store = seeded_store();
    // flour appears in both recipes: 100 g + 50 g.
    let x = add_recipe(&store, 1, "Bread", &[1], &[(1, 100)]);
    let y = add_recipe(&store, 1, "Pancakes", &[1], &[(1, 50)]);
    put_in_cart(&store, 2, x).await;
    put_in_cart(&store, 2, y).await;

    let document = download_uc(&store).execute(2).await.unwrap();
    assert_eq!(document, "flour (g) - 150\n");
}

#[tokio::test]
async fn should_render_single_ingredient_cart_as_one_line() {
    let store = seeded_store();
    let z = add_recipe(&store, 1, "Brine", &[3], &[(2, 5)]);
    put_in_cart(&store, 2, z).await;

    let document = download_uc(&store).execute(2).await.unwrap();
    assert_eq!(document, "salt (g) - 5\n");
}

#[tokio::test]
async fn should_fail_with_not_found_on_empty_cart() {
    let store = seeded_store();
    add_recipe(&store, 1, "Soup", &[1], &[(1, 100)]);

    let result = download_uc(&store).execute(2).await;
    assert!(matches!(
        result,
        Err(CookbookServiceError::EmptyShoppingCart)
    ));
}

#[tokio::test]
async fn should_order_lines_by_ingredient_name() {
    let store = seeded_store();
    let recipe = add_recipe(&store, 1, "Dough", &[1], &[(2, 5), (3, 200), (1, 100)]);
    put_in_cart(&store, 2, recipe).await;

    let document = download_uc(&store).execute(2).await.unwrap();
    assert_eq!(document, "flour (g) - 100\nmilk (ml) - 200\nsalt (g) - 5\n");
}

#[tokio::test]
async fn should_only_include_the_requesters_cart() {
    let store = seeded_store();
    let x = add_recipe(&store, 1, "Bread", &[1], &[(1, 100)]);
    let y = add_recipe(&store, 1, "Brine", &[1], &[(2, 5)]);
    put_in_cart(&store, 1, x).await;
    put_in_cart(&store, 2, y).await;

    let document = download_uc(&store).execute(2).await.unwrap();
    assert_eq!(document, "salt (g) - 5\n");
}
