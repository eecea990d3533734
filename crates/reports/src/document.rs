//! Tabular stock reports (one row per record) with localized headers.

use chrono::NaiveDate;
use thiserror::Error;

use stockbook_inventory::{Drink, Ingredient};

use crate::format_quantity;
use crate::labels::{FOOTER, long_date, unit_label};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendered report is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A field shown as a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    InitialStock,
    Sold,
    ExpectedRemaining,
    ActualRemaining,
    Discrepancy,
    Used,
    Remaining,
    Unit,
}

impl Column {
    pub const DRINKS: [Column; 6] = [
        Column::Name,
        Column::InitialStock,
        Column::Sold,
        Column::ExpectedRemaining,
        Column::ActualRemaining,
        Column::Discrepancy,
    ];

    pub const INGREDIENTS: [Column; 5] = [
        Column::Name,
        Column::InitialStock,
        Column::Used,
        Column::Remaining,
        Column::Unit,
    ];

    /// Field name in the persisted record.
    pub fn key(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::InitialStock => "initialStock",
            Column::Sold => "sold",
            Column::ExpectedRemaining => "expectedRemaining",
            Column::ActualRemaining => "actualRemaining",
            Column::Discrepancy => "discrepancy",
            Column::Used => "used",
            Column::Remaining => "remaining",
            Column::Unit => "unit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Name => "الاسم",
            Column::InitialStock => "المخزون الأصلي",
            Column::Sold => "المبيعات",
            Column::ExpectedRemaining => "المتبقي المتوقع",
            Column::ActualRemaining => "المتبقي الفعلي",
            Column::Discrepancy => "الفرق",
            Column::Used => "المستخدم",
            Column::Remaining => "المتبقي",
            Column::Unit => "الوحدة",
        }
    }
}

/// A laid-out report ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDocument {
    pub title: String,
    pub date_label: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: String,
    pub file_name: String,
}

impl TabularDocument {
    pub fn drinks(drinks: &[Drink], date: NaiveDate) -> Self {
        let rows = drinks
            .iter()
            .map(|d| Column::DRINKS.iter().map(|c| drink_cell(d, *c)).collect())
            .collect();
        Self::build("تقرير المشروبات", &Column::DRINKS, rows, date, "london-food-drinks-report.csv")
    }

    pub fn ingredients(ingredients: &[Ingredient], date: NaiveDate) -> Self {
        let rows = ingredients
            .iter()
            .map(|i| Column::INGREDIENTS.iter().map(|c| ingredient_cell(i, *c)).collect())
            .collect();
        Self::build(
            "تقرير المواد الأولية",
            &Column::INGREDIENTS,
            rows,
            date,
            "london-food-ingredients-report.csv",
        )
    }

    fn build(
        title: &str,
        columns: &[Column],
        rows: Vec<Vec<String>>,
        date: NaiveDate,
        file_name: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            date_label: format!("تاريخ: {}", long_date(date)),
            headers: columns.iter().map(|c| c.label().to_string()).collect(),
            rows,
            footer: FOOTER.to_string(),
            file_name: file_name.to_string(),
        }
    }

    /// Title and date lines, header row, one row per record, then the footer.
    pub fn to_csv(&self) -> Result<String, ReportError> {
        // Title, date and footer are single-field records.
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record([&self.title])?;
        writer.write_record([&self.date_label])?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.write_record([&self.footer])?;
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

fn drink_cell(d: &Drink, column: Column) -> String {
    match column {
        Column::Name => d.display_name().to_string(),
        Column::InitialStock => format_quantity(d.initial_stock),
        Column::Sold => format_quantity(d.sold),
        Column::ExpectedRemaining => format_quantity(d.expected_remaining()),
        Column::ActualRemaining => format_quantity(d.actual_remaining),
        Column::Discrepancy => format_quantity(d.discrepancy()),
        Column::Used | Column::Remaining | Column::Unit => String::new(),
    }
}

fn ingredient_cell(i: &Ingredient, column: Column) -> String {
    match column {
        Column::Name => i.display_name().to_string(),
        Column::InitialStock => format_quantity(i.initial_stock),
        Column::Used => format_quantity(i.used),
        Column::Remaining => format_quantity(i.remaining()),
        Column::Unit => unit_label(i.unit).to_string(),
        Column::Sold | Column::ExpectedRemaining | Column::ActualRemaining | Column::Discrepancy => {
            String::new()
        }
    }
}
