use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, Entity, RecordId};

use crate::record::{ensure_name, ensure_quantity, RecordKind, StockRecord};

/// An ingredient is low on stock when less than this share of its declared
/// starting quantity remains.
pub const LOW_STOCK_RATIO: f64 = 0.2;

/// Measurement unit of an ingredient (display only).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    G,
    L,
    Pcs,
    Box,
}

impl Unit {
    pub const ALL: [Unit; 5] = [Unit::Kg, Unit::G, Unit::L, Unit::Pcs, Unit::Box];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Pcs => "pcs",
            Unit::Box => "box",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unit must be one of: kg, g, l, pcs, box (got {s:?})"
                ))
            })
    }
}

/// An ingredient tracked by declared stock and consumption.
///
/// `remaining` is derived and read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub initial_stock: f64,
    pub used: f64,
    #[serde(default)]
    remaining: f64,
    pub unit: Unit,
    last_updated: DateTime<Utc>,
}

/// Mutation intents for an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IngredientCommand {
    ReviseInitialStock(f64),
    ReviseUsed(f64),
}

impl Ingredient {
    /// A new ingredient with a fresh id and zeroed quantities.
    pub fn new(name: impl Into<String>, unit: Unit) -> Self {
        Self::with_id(RecordId::new(), name, unit)
    }

    pub fn with_id(id: RecordId, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            id,
            name: name.into(),
            name_ar: None,
            description: None,
            image: None,
            initial_stock: 0.0,
            used: 0.0,
            remaining: 0.0,
            unit,
            last_updated: Utc::now(),
        }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// `remaining / initial_stock`, or `None` when nothing was declared.
    pub fn stock_ratio(&self) -> Option<f64> {
        if self.initial_stock > 0.0 {
            Some(self.remaining / self.initial_stock)
        } else {
            None
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_ratio().is_some_and(|r| r < LOW_STOCK_RATIO)
    }

    /// Remaining share as a whole percentage.
    pub fn remaining_percent(&self) -> Option<i64> {
        self.stock_ratio().map(rounded_percent)
    }

    /// Consumed share as a whole percentage.
    pub fn usage_percent(&self) -> Option<i64> {
        if self.initial_stock > 0.0 {
            Some(rounded_percent(self.used / self.initial_stock))
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name_ar.as_deref() {
            Some(ar) if !ar.is_empty() => ar,
            _ => &self.name,
        }
    }
}

/// Ratio to whole percent, halves rounded up.
pub fn rounded_percent(ratio: f64) -> i64 {
    (ratio * 100.0 + 0.5).floor() as i64
}

impl Entity for Ingredient {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl StockRecord for Ingredient {
    type Command = IngredientCommand;

    const KIND: RecordKind = RecordKind::Ingredient;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> DomainResult<()> {
        ensure_name(&self.name)?;
        ensure_quantity("initialStock", self.initial_stock)?;
        ensure_quantity("used", self.used)?;
        Ok(())
    }

    fn recompute(&mut self) {
        self.remaining = self.initial_stock - self.used;
    }

    fn apply(&mut self, command: &IngredientCommand) {
        match *command {
            IngredientCommand::ReviseInitialStock(v) => self.initial_stock = v,
            IngredientCommand::ReviseUsed(v) => self.used = v,
        }
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    fn stamp(&mut self, at: DateTime<Utc>) {
        self.last_updated = at;
    }
}
