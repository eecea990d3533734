//! Arabic display labels.

use chrono::{Datelike, NaiveDate};

use stockbook_inventory::Unit;

pub const UNIT_WORD: &str = "وحدة";
pub const REMAINING_WORD: &str = "متبقي";
pub const FOOTER: &str = "London Food - نظام إدارة المخزون";

pub fn unit_label(unit: Unit) -> &'static str {
    match unit {
        Unit::Kg => "كجم",
        Unit::G => "جم",
        Unit::L => "لتر",
        Unit::Pcs => "قطعة",
        Unit::Box => "علبة",
    }
}

const MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
    "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

fn arabic_digits(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Long-form Arabic date, e.g. `١٨ أكتوبر ٢٠٢٦`.
pub fn long_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    let year = u32::try_from(date.year()).unwrap_or_default();
    format!("{} {} {}", arabic_digits(date.day()), month, arabic_digits(year))
}
