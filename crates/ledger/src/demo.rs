//! Bundled sample records for a fresh install.

use stockbook_core::RecordId;
use stockbook_inventory::{Drink, Ingredient, Unit};

fn id(raw: &str) -> RecordId {
    raw.parse().unwrap_or_else(|_| RecordId::new())
}

fn drink(key: &str, name: &str, name_ar: &str, description: &str, stock: [f64; 3]) -> Drink {
    let [initial, sold, actual] = stock;
    let mut d = Drink::with_id(id(key), name);
    d.name_ar = Some(name_ar.to_string());
    d.description = Some(description.to_string());
    d.initial_stock = initial;
    d.sold = sold;
    d.actual_remaining = actual;
    d
}

fn ingredient(
    key: &str,
    name: &str,
    name_ar: &str,
    description: &str,
    unit: Unit,
    initial: f64,
    used: f64,
) -> Ingredient {
    let mut i = Ingredient::with_id(id(key), name, unit);
    i.name_ar = Some(name_ar.to_string());
    i.description = Some(description.to_string());
    i.initial_stock = initial;
    i.used = used;
    i
}

/// Sample drinks. Derived fields are left for the ledger to compute.
pub fn drinks() -> Vec<Drink> {
    vec![
        drink("d1", "Coca Cola", "كوكا كولا", "Refreshing carbonated drink", [24.0, 10.0, 12.0]),
        drink("d2", "Orange Juice", "عصير البرتقال", "Fresh orange juice", [15.0, 7.0, 8.0]),
        drink("d3", "Mint Tea", "شاي بالنعناع", "Traditional Moroccan mint tea", [30.0, 22.0, 7.0]),
    ]
}

pub fn ingredients() -> Vec<Ingredient> {
    vec![
        ingredient("i1", "Chicken", "دجاج", "Fresh chicken", Unit::Kg, 10.0, 4.5),
        ingredient("i2", "Rice", "أرز", "Basmati rice", Unit::Kg, 25.0, 8.0),
        ingredient("i3", "Olive Oil", "زيت الزيتون", "Extra virgin olive oil", Unit::L, 5.0, 2.5),
    ]
}
