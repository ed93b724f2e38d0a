//! Shopping-cart ingredient aggregation.

use std::collections::BTreeMap;

/// One ingredient occurrence pulled from a cart recipe's links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Sum amounts grouped by (name, measurement_unit).
///
/// Two ingredients sharing a name but not a unit stay separate lines.
/// Per-recipe amounts fit in i32; the aggregate across recipes may not,
/// so sums are carried as i64. Output is ordered by name, then unit.
pub fn aggregate(lines: impl IntoIterator<Item = IngredientLine>) -> Vec<IngredientLine> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.name, line.measurement_unit))
            .or_default() += line.amount;
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), amount)| IngredientLine {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}
