use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{Result, TxError};
use crate::models::{Category, CleanedTable, RawTable, Transaction};
use crate::schema::{missing_columns, trim_column_names};

const DEFAULT_CATEGORY: &str = "Uncategorized";
const DEFAULT_DESCRIPTION: &str = "No description";
const DEFAULT_RECURRING: &str = "No";

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Parse a money cell. Accepts thousands separators, a `$` sign and
/// parenthesised negatives. Anything else that is not a finite number is `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    let value = if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        -inner.trim().parse::<f64>().ok()?
    } else {
        s.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

/// Strict `day/month/year`: one or two digit day and month, four digit year.
pub fn parse_date_dmy(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let (d, m, y) = (parts[0], parts[1], parts[2]);
    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(d, 1, 2) || !digits(m, 1, 2) || !digits(y, 4, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Trim, then remove one pair of straight double quotes if both ends carry one.
pub fn normalize_description(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 {
        if let Some(inner) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            return inner.to_string();
        }
    }
    trimmed.to_string()
}

/// Returns the category and whether the text had to be coerced. Only the
/// four real categories pass through; everything else, the fallback label
/// included, is coerced to `Uncategorized`.
pub fn normalize_category(raw: &str) -> (Category, bool) {
    match Category::from_label(&title_case(raw.trim())) {
        Some(c) if c != Category::Uncategorized => (c, false),
        _ => (Category::Uncategorized, true),
    }
}

pub fn normalize_recurring(raw: &str) -> bool {
    title_case(raw.trim()) == "Yes"
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Also remove rows whose date text was present but did not parse.
    pub drop_unparsed_dates: bool,
}

/// Row counts for every repair the cleaner made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub input_absent: bool,
    pub input_rows: usize,
    pub dropped_missing_date: usize,
    pub unparsed_dates: usize,
    pub filled_amounts: usize,
    pub invalid_amounts: usize,
    pub filled_categories: usize,
    pub filled_descriptions: usize,
    pub filled_recurring: usize,
    pub coerced_categories: usize,
    pub dropped_empty: usize,
    pub dropped_duplicate: usize,
    pub dropped_unparsed_date: usize,
    pub output_rows: usize,
}

impl Diagnostics {
    fn absent() -> Self {
        Self {
            input_absent: true,
            ..Self::default()
        }
    }

    pub fn total_dropped(&self) -> usize {
        self.dropped_missing_date + self.dropped_empty + self.dropped_duplicate + self.dropped_unparsed_date
    }

    /// Human-readable summary, one line per step that did something.
    pub fn messages(&self) -> Vec<String> {
        if self.input_absent {
            return vec!["No transactions data to clean".to_string()];
        }
        let mut lines = vec![format!("Dropped {} rows with missing dates", self.dropped_missing_date)];
        if self.unparsed_dates > 0 {
            lines.push(format!(
                "Found {} dates not in day/month/year format; kept without a date",
                self.unparsed_dates
            ));
        }
        let filled = self.filled_amounts + self.filled_categories + self.filled_descriptions + self.filled_recurring;
        if filled > 0 {
            lines.push(format!(
                "Filled missing values: {} amounts, {} categories, {} descriptions, {} recurring flags",
                self.filled_amounts, self.filled_categories, self.filled_descriptions, self.filled_recurring
            ));
        }
        if self.invalid_amounts > 0 {
            lines.push(format!("Replaced {} non-numeric amounts with 0", self.invalid_amounts));
        }
        if self.coerced_categories > 0 {
            lines.push(format!(
                "Found {} invalid categories. Replaced with '{DEFAULT_CATEGORY}'",
                self.coerced_categories
            ));
        }
        if self.dropped_empty > 0 {
            lines.push(format!("Dropped {} rows that only had a date", self.dropped_empty));
        }
        lines.push(format!("Dropped {} duplicate rows", self.dropped_duplicate));
        if self.dropped_unparsed_date > 0 {
            lines.push(format!("Dropped {} rows with unparseable dates", self.dropped_unparsed_date));
        }
        lines.push(format!("Kept {} of {} rows", self.output_rows, self.input_rows));
        lines
    }
}

#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// `None` only when there was no input at all.
    pub table: Option<CleanedTable>,
    pub diagnostics: Diagnostics,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

struct Columns {
    date: usize,
    amount: usize,
    category: usize,
    description: usize,
    recurring: usize,
    extra: Vec<usize>,
}

impl Columns {
    fn resolve(names: &[String]) -> Result<Self> {
        let missing = missing_columns(names);
        if !missing.is_empty() {
            return Err(TxError::MissingColumns(missing));
        }
        let find = |name: &str| {
            names
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| TxError::MissingColumns(vec![name.to_string()]))
        };
        let cols = Self {
            date: find("Date")?,
            amount: find("Amount")?,
            category: find("Category")?,
            description: find("Description")?,
            recurring: find("Recurring")?,
            extra: Vec::new(),
        };
        let required = [cols.date, cols.amount, cols.category, cols.description, cols.recurring];
        let extra = (0..names.len()).filter(|i| !required.contains(i)).collect();
        Ok(Self { extra, ..cols })
    }
}

/// A row while it moves through the steps; cells are still text.
struct WorkingRow {
    date: Option<String>,
    amount: Option<String>,
    category: Option<String>,
    description: Option<String>,
    recurring: Option<String>,
    extra: Vec<Option<String>>,
}

impl WorkingRow {
    fn from_raw(row: &[Option<String>], cols: &Columns) -> Self {
        let cell = |i: usize| row.get(i).cloned().flatten();
        Self {
            date: cell(cols.date),
            amount: cell(cols.amount),
            category: cell(cols.category),
            description: cell(cols.description),
            recurring: cell(cols.recurring),
            extra: cols.extra.iter().map(|&i| cell(i)).collect(),
        }
    }

    fn has_only_date(&self) -> bool {
        self.amount.is_none() && self.category.is_none() && self.description.is_none() && self.recurring.is_none()
    }
}

#[derive(PartialEq, Eq, Hash)]
struct RowKey {
    date: Option<NaiveDate>,
    amount_bits: u64,
    category: Category,
    description: String,
    recurring: bool,
    extra: Vec<Option<String>>,
}

impl From<&Transaction> for RowKey {
    fn from(t: &Transaction) -> Self {
        // -0.0 and 0.0 are the same amount
        let amount = if t.amount == 0.0 { 0.0 } else { t.amount };
        Self {
            date: t.date,
            amount_bits: amount.to_bits(),
            category: t.category,
            description: t.description.clone(),
            recurring: t.recurring,
            extra: t.extra.clone(),
        }
    }
}

/// Clean a raw export into an analysis-ready table.
///
/// The input is only borrowed; the result is built from copies. Absent input
/// is a reported outcome (`table: None`), while a table missing required
/// columns is an error.
pub fn clean_transactions(raw: Option<&RawTable>, options: &CleanOptions) -> Result<CleanOutcome> {
    let Some(raw) = raw else {
        tracing::warn!("no transactions data to clean");
        return Ok(CleanOutcome {
            table: None,
            diagnostics: Diagnostics::absent(),
        });
    };

    let mut diag = Diagnostics {
        input_rows: raw.len(),
        ..Diagnostics::default()
    };

    // 1. column names
    let names = trim_column_names(&raw.columns);
    let cols = Columns::resolve(&names)?;
    let extra_columns: Vec<String> = cols.extra.iter().map(|&i| names[i].clone()).collect();

    // 2. descriptions
    let mut rows: Vec<WorkingRow> = raw
        .rows
        .iter()
        .map(|r| {
            let mut row = WorkingRow::from_raw(r, &cols);
            row.description = row.description.as_deref().map(normalize_description);
            row
        })
        .collect();

    // 3. missing dates
    rows.retain(|r| r.date.is_some());
    diag.dropped_missing_date = raw.len() - rows.len();
    tracing::debug!(dropped = diag.dropped_missing_date, "dropped rows with missing dates");

    // 4. parse dates; remember pre-fill emptiness for step 8
    let staged: Vec<(Option<NaiveDate>, bool, WorkingRow)> = rows
        .into_iter()
        .map(|r| {
            let date = r.date.as_deref().and_then(parse_date_dmy);
            if date.is_none() {
                diag.unparsed_dates += 1;
            }
            let date_only = date.is_some() && r.has_only_date();
            (date, date_only, r)
        })
        .collect();
    tracing::debug!(unparsed = diag.unparsed_dates, "parsed dates");

    // 5-7. fill, then normalize category and recurring
    let mut cleaned: Vec<(Transaction, bool)> = Vec::with_capacity(staged.len());
    for (date, date_only, row) in staged {
        let amount = match row.amount.as_deref() {
            None => {
                diag.filled_amounts += 1;
                0.0
            }
            Some(text) => parse_amount(text).unwrap_or_else(|| {
                diag.invalid_amounts += 1;
                0.0
            }),
        };
        let category = row.category.unwrap_or_else(|| {
            diag.filled_categories += 1;
            DEFAULT_CATEGORY.to_string()
        });
        let description = row.description.unwrap_or_else(|| {
            diag.filled_descriptions += 1;
            DEFAULT_DESCRIPTION.to_string()
        });
        let recurring = row.recurring.unwrap_or_else(|| {
            diag.filled_recurring += 1;
            DEFAULT_RECURRING.to_string()
        });

        let (category, coerced) = normalize_category(&category);
        if coerced {
            diag.coerced_categories += 1;
        }

        cleaned.push((
            Transaction {
                date,
                amount,
                category,
                description,
                recurring: normalize_recurring(&recurring),
                extra: row.extra,
            },
            date_only,
        ));
    }
    if diag.invalid_amounts > 0 {
        tracing::warn!(count = diag.invalid_amounts, "non-numeric amounts replaced with 0");
    }
    if diag.coerced_categories > 0 {
        tracing::warn!(
            count = diag.coerced_categories,
            "invalid categories replaced with '{DEFAULT_CATEGORY}'"
        );
    }

    // 8. date-only rows
    let before = cleaned.len();
    let mut transactions: Vec<Transaction> = cleaned
        .into_iter()
        .filter(|(_, date_only)| !date_only)
        .map(|(t, _)| t)
        .collect();
    diag.dropped_empty = before - transactions.len();
    tracing::debug!(dropped = diag.dropped_empty, "dropped rows that only had a date");

    // 9. duplicates, first occurrence wins
    let before = transactions.len();
    let mut seen = HashSet::new();
    transactions.retain(|t| seen.insert(RowKey::from(t)));
    diag.dropped_duplicate = before - transactions.len();
    tracing::debug!(dropped = diag.dropped_duplicate, "dropped duplicate rows");

    if options.drop_unparsed_dates {
        let before = transactions.len();
        transactions.retain(|t| t.date.is_some());
        diag.dropped_unparsed_date = before - transactions.len();
    }

    diag.output_rows = transactions.len();
    tracing::info!(
        input = diag.input_rows,
        output = diag.output_rows,
        dropped = diag.total_dropped(),
        "cleaned transactions"
    );

    Ok(CleanOutcome {
        table: Some(CleanedTable {
            extra_columns,
            transactions,
        }),
        diagnostics: diag,
    })
}
