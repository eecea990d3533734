//! Aggregate figures for the reports page and dashboard.

use serde::Serialize;

use stockbook_core::{Entity, RecordId};
use stockbook_inventory::{Drink, Ingredient};

use crate::format_quantity;
use crate::labels::{REMAINING_WORD, UNIT_WORD};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: RecordId,
    pub name: String,
    pub remaining_percent: i64,
}

impl LowStockItem {
    /// Every ingredient below the low-stock ratio, in collection order.
    pub fn collect(ingredients: &[Ingredient]) -> Vec<Self> {
        ingredients
            .iter()
            .filter(|i| i.is_low_stock())
            .filter_map(|i| {
                Some(Self {
                    id: i.id().clone(),
                    name: i.name.clone(),
                    remaining_percent: i.remaining_percent()?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub drink_count: usize,
    pub total_sold: f64,
    pub total_discrepancy: f64,
    pub ingredient_count: usize,
    pub total_used: f64,
    pub low_stock: Vec<LowStockItem>,
    /// Units sold per drink, drinks with no sales omitted.
    pub drink_sales: Vec<ChartPoint>,
    /// Percent of declared stock consumed per ingredient, zero usage omitted.
    pub ingredient_usage: Vec<ChartPoint>,
}

impl InventorySummary {
    pub fn from_snapshot(drinks: &[Drink], ingredients: &[Ingredient]) -> Self {
        let drink_sales = drinks
            .iter()
            .filter(|d| d.sold > 0.0)
            .map(|d| ChartPoint {
                name: d.name.clone(),
                value: d.sold,
            })
            .collect();

        let ingredient_usage = ingredients
            .iter()
            .filter_map(|i| {
                let pct = i.usage_percent()?;
                (pct > 0).then(|| ChartPoint {
                    name: i.name.clone(),
                    value: pct as f64,
                })
            })
            .collect();

        Self {
            drink_count: drinks.len(),
            total_sold: total_sold(drinks),
            total_discrepancy: drinks.iter().map(Drink::discrepancy).sum(),
            ingredient_count: ingredients.len(),
            total_used: total_used(ingredients),
            low_stock: LowStockItem::collect(ingredients),
            drink_sales,
            ingredient_usage,
        }
    }
}

pub(crate) fn total_sold(drinks: &[Drink]) -> f64 {
    drinks.iter().map(|d| d.sold).sum()
}

pub(crate) fn total_used(ingredients: &[Ingredient]) -> f64 {
    ingredients.iter().map(|i| i.used).sum()
}

/// Dashboard alerts: drinks counted short, then ingredients running out.
pub fn dashboard_alerts(drinks: &[Drink], ingredients: &[Ingredient]) -> Vec<String> {
    let shortages = drinks.iter().filter(|d| d.has_shortage()).map(|d| {
        format!(
            "هناك نقص في مخزون {} بمقدار {} {UNIT_WORD}",
            d.display_name(),
            format_quantity(d.discrepancy())
        )
    });

    let running_out = ingredients.iter().filter(|i| i.is_low_stock()).filter_map(|i| {
        let pct = i.remaining_percent()?;
        Some(format!(
            "المكون {} على وشك النفاد ({pct}% {REMAINING_WORD})",
            i.display_name()
        ))
    });

    shortages.chain(running_out).collect()
}
