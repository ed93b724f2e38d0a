use forkful_domain::shopping_list::IngredientLine;

use crate::domain::repository::ShoppingListRenderer;

/// Plain-text shopping list: one `"<name> (<unit>) - <amount>"` line per
/// aggregated ingredient. A PDF renderer would slot in behind the same port.
#[derive(Clone, Default)]
pub struct PlainTextShoppingList;

impl ShoppingListRenderer for PlainTextShoppingList {
    fn render(&self, lines: &[IngredientLine]) -> String {
        let mut out = String::new();
        for line in lines {
            out.push_str(&format!(
                "{} ({}) - {}\n",
                line.name, line.measurement_unit, line.amount
            ));
        }
        out
    }
}
