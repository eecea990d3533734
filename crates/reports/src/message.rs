//! Messaging deep links (WhatsApp) for stock reports and alerts.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use stockbook_inventory::{Drink, Ingredient};

use crate::format_quantity;
use crate::labels::{REMAINING_WORD, UNIT_WORD};
use crate::summary::{LowStockItem, total_sold, total_used};

const WHATSAPP_SEND_URL: &str = "https://api.whatsapp.com/send";

/// Characters left unescaped in a URI component: alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How many best sellers a report lists.
const TOP_DRINKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ReportPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "يومي",
            ReportPeriod::Weekly => "أسبوعي",
            ReportPeriod::Monthly => "شهري",
        }
    }
}

/// Builds the report and alert message bodies.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    restaurant: String,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new("مطعم لندن فود")
    }
}

impl MessageComposer {
    pub fn new(restaurant: impl Into<String>) -> Self {
        Self {
            restaurant: restaurant.into(),
        }
    }

    pub fn restaurant(&self) -> &str {
        &self.restaurant
    }

    /// Periodic report: totals, best sellers and ingredients running low.
    pub fn report(&self, period: ReportPeriod, drinks: &[Drink], ingredients: &[Ingredient]) -> String {
        let mut best: Vec<&Drink> = drinks.iter().collect();
        // Stable: ties keep collection order.
        best.sort_by(|a, b| b.sold.total_cmp(&a.sold));

        let best_lines: Vec<String> = best
            .iter()
            .take(TOP_DRINKS)
            .map(|d| format!("- {}: {} {UNIT_WORD}", d.name, format_quantity(d.sold)))
            .collect();

        let low_lines: Vec<String> = LowStockItem::collect(ingredients)
            .iter()
            .map(|i| format!("- {}: {}% {REMAINING_WORD}", i.name, i.remaining_percent))
            .collect();

        format!(
            "تقرير {} من {}:\n\n\
             المشروبات المباعة: {} {UNIT_WORD}\n\
             المكونات المستخدمة: {} {UNIT_WORD}\n\n\
             المشروبات الأكثر مبيعاً:\n{}\n\n\
             المكونات منخفضة المخزون:\n{}",
            period.label(),
            self.restaurant,
            format_quantity(total_sold(drinks)),
            format_quantity(total_used(ingredients)),
            best_lines.join("\n"),
            low_lines.join("\n"),
        )
    }

    /// Shortage and low-stock alerts, or `None` when there is nothing to send.
    pub fn alerts(&self, drinks: &[Drink], ingredients: &[Ingredient]) -> Option<String> {
        let mut items: Vec<String> = drinks
            .iter()
            .filter(|d| d.has_shortage())
            .map(|d| {
                format!(
                    "نقص في {}: {} {UNIT_WORD}",
                    d.name,
                    format_quantity(d.discrepancy())
                )
            })
            .collect();

        items.extend(LowStockItem::collect(ingredients).iter().map(|i| {
            format!(
                "{} على وشك النفاد ({}% {REMAINING_WORD})",
                i.name, i.remaining_percent
            )
        }));

        if items.is_empty() {
            return None;
        }

        Some(format!("تنبيهات من {}:\n\n{}", self.restaurant, items.join("\n")))
    }
}

/// `https://api.whatsapp.com/send?phone=..&text=..` for `message`.
///
/// The leading `+` of an international number is dropped; the message is
/// percent-encoded as a URI component.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let phone = phone.trim().replacen('+', "", 1);
    format!(
        "{WHATSAPP_SEND_URL}?phone={phone}&text={}",
        utf8_percent_encode(message, URI_COMPONENT)
    )
}
