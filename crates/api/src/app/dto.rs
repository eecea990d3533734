//! Request DTOs and their mapping onto ledger records.

use serde::Deserialize;

use stockbook_core::{DomainError, RecordId};
use stockbook_inventory::{Drink, Ingredient, Unit};
use stockbook_reports::ReportPeriod;

/// Body of `POST /drinks` and `PUT /drinks/:id`.
///
/// Derived fields are not accepted; they are recomputed on save.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkRequest {
    pub name: String,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub initial_stock: f64,
    #[serde(default)]
    pub sold: f64,
    /// A physical count; when absent the last recorded count is kept.
    #[serde(default)]
    pub actual_remaining: Option<f64>,
}

impl DrinkRequest {
    /// `last_count` is the stored record's `actualRemaining`, `None` for a new id.
    pub fn into_drink(self, id: RecordId, last_count: Option<f64>) -> Drink {
        let mut drink = Drink::with_id(id, self.name);
        drink.name_ar = self.name_ar;
        drink.description = self.description;
        drink.image = self.image;
        drink.initial_stock = self.initial_stock;
        drink.sold = self.sold;
        drink.actual_remaining = self.actual_remaining.or(last_count).unwrap_or(0.0);
        drink
    }
}

/// Body of `POST /ingredients` and `PUT /ingredients/:id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequest {
    pub name: String,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub initial_stock: f64,
    #[serde(default)]
    pub used: f64,
    /// One of `kg`, `g`, `l`, `pcs`, `box`; `kg` when omitted.
    #[serde(default)]
    pub unit: Option<String>,
}

impl IngredientRequest {
    pub fn into_ingredient(self, id: RecordId) -> Result<Ingredient, DomainError> {
        let unit = match self.unit.as_deref() {
            Some(raw) => raw.parse::<Unit>()?,
            None => Unit::default(),
        };
        let mut ingredient = Ingredient::with_id(id, self.name, unit);
        ingredient.name_ar = self.name_ar;
        ingredient.description = self.description;
        ingredient.image = self.image;
        ingredient.initial_stock = self.initial_stock;
        ingredient.used = self.used;
        Ok(ingredient)
    }
}

/// Body of the single-field command endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuantityRequest {
    pub value: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub period: ReportPeriod,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertQuery {
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_core::Entity;

    #[test]
    fn drink_request_defaults_quantities() {
        let req: DrinkRequest = serde_json::from_str(r#"{"name":"Tea","nameAr":"شاي"}"#).unwrap();
        let drink = req.into_drink("d9".parse().unwrap(), None);
        assert_eq!(drink.id().as_str(), "d9");
        assert_eq!(drink.name_ar.as_deref(), Some("شاي"));
        assert_eq!(drink.initial_stock, 0.0);
        assert_eq!(drink.actual_remaining, 0.0);
    }

    #[test]
    fn drink_request_without_count_keeps_the_last_one() {
        let req: DrinkRequest =
            serde_json::from_str(r#"{"name":"Coca Cola","initialStock":24,"sold":10}"#).unwrap();
        let drink = req.into_drink(RecordId::new(), Some(12.0));
        assert_eq!(drink.actual_remaining, 12.0);

        let req: DrinkRequest =
            serde_json::from_str(r#"{"name":"Coca Cola","actualRemaining":20}"#).unwrap();
        assert_eq!(req.into_drink(RecordId::new(), Some(12.0)).actual_remaining, 20.0);
    }

    #[test]
    fn ingredient_request_parses_unit() {
        let req: IngredientRequest =
            serde_json::from_str(r#"{"name":"Oil","initialStock":5,"unit":"l"}"#).unwrap();
        let ingredient = req.into_ingredient(RecordId::new()).unwrap();
        assert_eq!(ingredient.unit, Unit::L);
        assert_eq!(ingredient.initial_stock, 5.0);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let req: IngredientRequest =
            serde_json::from_str(r#"{"name":"Oil","unit":"gallon"}"#).unwrap();
        assert!(matches!(
            req.into_ingredient(RecordId::new()),
            Err(DomainError::Validation(_))
        ));
    }
}
