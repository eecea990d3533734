//! Stock domain module: drinks, ingredients and their derived-field rules.
//!
//! This crate contains business rules for stock reconciliation, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod drink;
pub mod ingredient;
pub mod record;

pub use drink::{Drink, DrinkCommand};
pub use ingredient::{Ingredient, IngredientCommand, Unit, LOW_STOCK_RATIO, rounded_percent};
pub use record::{RecordKind, StockRecord};
