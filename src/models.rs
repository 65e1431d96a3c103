use std::fmt;

use chrono::NaiveDate;

/// Column names every export must carry (after trimming).
pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Amount", "Category", "Description", "Recurring"];

/// Date format used by the exports, day first.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Text written for a date that was present but did not parse.
pub const UNPARSED_DATE: &str = "NaT";

/// Tabular input as read from the source file, before any cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    /// One entry per column; `None` marks a missing cell.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Leisure,
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Leisure,
        Category::Uncategorized,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Leisure => "Leisure",
            Self::Uncategorized => "Uncategorized",
        }
    }

    /// Exact, case-sensitive lookup of an already normalized label.
    pub fn from_label(label: &str) -> Option<Category> {
        Self::ALL.iter().find(|c| c.name() == label).copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub category: Category,
    pub description: String,
    pub recurring: bool,
    /// Cells of non-required columns, in `CleanedTable::extra_columns` order.
    pub extra: Vec<Option<String>>,
}

/// Output of the cleaner: owned, ordered, and free of duplicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedTable {
    pub extra_columns: Vec<String>,
    pub transactions: Vec<Transaction>,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl From<&CleanedTable> for RawTable {
    fn from(table: &CleanedTable) -> Self {
        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(table.extra_columns.iter().cloned());

        let rows = table
            .transactions
            .iter()
            .map(|t| {
                let date = match t.date {
                    Some(d) => d.format(DATE_FORMAT).to_string(),
                    None => UNPARSED_DATE.to_string(),
                };
                let mut row = vec![
                    Some(date),
                    Some(t.amount.to_string()),
                    Some(t.category.name().to_string()),
                    Some(t.description.clone()),
                    Some(if t.recurring { "Yes" } else { "No" }.to_string()),
                ];
                row.extend(t.extra.iter().cloned());
                row
            })
            .collect();

        RawTable { columns, rows }
    }
}
