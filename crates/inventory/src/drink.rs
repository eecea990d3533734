use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainResult, Entity, RecordId};

use crate::record::{ensure_name, ensure_quantity, RecordKind, StockRecord};

/// A drink tracked by declared stock, sales and a physical count.
///
/// `expected_remaining` and `discrepancy` are derived and read-only. They are
/// persisted alongside the source fields (flat record layout) but always
/// rebuilt by [`StockRecord::recompute`].
///
/// Recompute rule ("keep last count"): revising `initial_stock` or `sold`
/// never touches `actual_remaining`, so the discrepancy is measured against
/// the last recorded physical count until a new count is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub initial_stock: f64,
    pub sold: f64,
    #[serde(default)]
    expected_remaining: f64,
    pub actual_remaining: f64,
    #[serde(default)]
    discrepancy: f64,
    last_updated: DateTime<Utc>,
}

/// Mutation intents for a drink, one fixed recompute rule each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrinkCommand {
    /// Add/edit action: new declared starting quantity.
    ReviseInitialStock(f64),
    /// Add/edit action: new quantity sold.
    ReviseSold(f64),
    /// Verification action: a physical count of what is left.
    RecordActualCount(f64),
}

impl Drink {
    /// A new drink with a fresh id and zeroed quantities.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(RecordId::new(), name)
    }

    pub fn with_id(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            name_ar: None,
            description: None,
            image: None,
            initial_stock: 0.0,
            sold: 0.0,
            expected_remaining: 0.0,
            actual_remaining: 0.0,
            discrepancy: 0.0,
            last_updated: Utc::now(),
        }
    }

    pub fn expected_remaining(&self) -> f64 {
        self.expected_remaining
    }

    /// Expected minus counted stock; positive means shortage.
    pub fn discrepancy(&self) -> f64 {
        self.discrepancy
    }

    pub fn has_shortage(&self) -> bool {
        self.discrepancy > 0.0
    }

    /// Arabic name when present, otherwise the primary name.
    pub fn display_name(&self) -> &str {
        match self.name_ar.as_deref() {
            Some(ar) if !ar.is_empty() => ar,
            _ => &self.name,
        }
    }
}

impl Entity for Drink {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl StockRecord for Drink {
    type Command = DrinkCommand;

    const KIND: RecordKind = RecordKind::Drink;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> DomainResult<()> {
        ensure_name(&self.name)?;
        ensure_quantity("initialStock", self.initial_stock)?;
        ensure_quantity("sold", self.sold)?;
        ensure_quantity("actualRemaining", self.actual_remaining)?;
        Ok(())
    }

    fn recompute(&mut self) {
        self.expected_remaining = self.initial_stock - self.sold;
        self.discrepancy = self.expected_remaining - self.actual_remaining;
    }

    fn apply(&mut self, command: &DrinkCommand) {
        match *command {
            DrinkCommand::ReviseInitialStock(v) => self.initial_stock = v,
            DrinkCommand::ReviseSold(v) => self.sold = v,
            DrinkCommand::RecordActualCount(v) => self.actual_remaining = v,
        }
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    fn stamp(&mut self, at: DateTime<Utc>) {
        self.last_updated = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coke() -> Drink {
        let mut d = Drink::with_id("d1".parse().unwrap(), "Coca Cola");
        d.initial_stock = 24.0;
        d.recompute();
        d
    }

    #[test]
    fn new_drink_starts_at_zero() {
        let d = Drink::new("Mint Tea");
        assert_eq!(d.initial_stock, 0.0);
        assert_eq!(d.expected_remaining(), 0.0);
        assert_eq!(d.discrepancy(), 0.0);
    }

    #[test]
    fn revising_sold_keeps_last_count() {
        let mut d = coke();
        assert_eq!(d.expected_remaining(), 24.0);
        assert_eq!(d.discrepancy(), 24.0);

        d.apply(&DrinkCommand::ReviseSold(10.0));
        d.recompute();
        assert_eq!(d.expected_remaining(), 14.0);
        assert_eq!(d.actual_remaining, 0.0);
        assert_eq!(d.discrepancy(), 14.0);

        d.apply(&DrinkCommand::RecordActualCount(12.0));
        d.recompute();
        assert_eq!(d.discrepancy(), 2.0);
        assert!(d.has_shortage());

        // A later sale is measured against the count of 12.
        d.apply(&DrinkCommand::ReviseSold(11.0));
        d.recompute();
        assert_eq!(d.actual_remaining, 12.0);
        assert_eq!(d.discrepancy(), 1.0);
    }

    #[test]
    fn surplus_is_a_negative_discrepancy() {
        let mut d = coke();
        d.apply(&DrinkCommand::RecordActualCount(30.0));
        d.recompute();
        assert_eq!(d.discrepancy(), -6.0);
        assert!(!d.has_shortage());
    }

    #[test]
    fn validation_rejects_bad_input() {
        let mut d = coke();
        d.initial_stock = -1.0;
        assert!(d.validate().is_err());

        let mut d = coke();
        d.name = "   ".into();
        assert!(d.validate().is_err());

        let mut d = coke();
        d.actual_remaining = f64::NAN;
        assert!(d.validate().is_err());

        // Selling more than declared is a soft constraint.
        let mut d = coke();
        d.sold = 30.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn display_name_prefers_non_empty_arabic_name() {
        let mut d = coke();
        assert_eq!(d.display_name(), "Coca Cola");
        d.name_ar = Some(String::new());
        assert_eq!(d.display_name(), "Coca Cola");
        d.name_ar = Some("كوكا كولا".into());
        assert_eq!(d.display_name(), "كوكا كولا");
    }

    #[test]
    fn persisted_layout_is_camel_case() {
        let d = coke();
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["initialStock"], 24.0);
        assert_eq!(json["expectedRemaining"], 24.0);
        assert!(json.get("nameAr").is_none());
        assert!(json.get("lastUpdated").is_some());
    }

    proptest! {
        #[test]
        fn derived_fields_follow_sources(
            initial in 0.0f64..10_000.0,
            sold in 0.0f64..10_000.0,
            actual in 0.0f64..10_000.0,
        ) {
            let mut d = Drink::new("x");
            d.apply(&DrinkCommand::ReviseInitialStock(initial));
            d.apply(&DrinkCommand::ReviseSold(sold));
            d.apply(&DrinkCommand::RecordActualCount(actual));
            d.recompute();
            prop_assert_eq!(d.expected_remaining(), initial - sold);
            prop_assert_eq!(d.discrepancy(), d.expected_remaining() - actual);
        }
    }
}
