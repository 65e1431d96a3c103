use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cleaner::Diagnostics;
use crate::fmt;
use crate::models::{Category, CleanedTable};

pub fn format_diagnostics(diag: &Diagnostics) -> String {
    if diag.input_absent {
        return format!("{}", "Error: No transactions data to clean".red());
    }
    let mut out = String::from("Cleaning summary");
    for line in diag.messages() {
        out.push_str("\n  ");
        out.push_str(&line);
    }
    out
}

/// First `limit` rows of the cleaned table.
pub fn format_preview(cleaned: &CleanedTable, limit: usize) -> String {
    let mut table = Table::new();
    let mut header = vec!["Date", "Amount", "Category", "Description", "Recurring"];
    header.extend(cleaned.extra_columns.iter().map(String::as_str));
    table.set_header(header);

    for t in cleaned.transactions.iter().take(limit) {
        let date = match t.date {
            Some(_) => Cell::new(fmt::date(t.date)),
            None => Cell::new(fmt::date(None).red()),
        };
        let category = if t.category == Category::Uncategorized {
            Cell::new(t.category.name().yellow())
        } else {
            Cell::new(t.category)
        };
        let mut row = vec![
            date,
            Cell::new(fmt::amount(t.amount)),
            category,
            Cell::new(&t.description),
            Cell::new(t.recurring),
        ];
        row.extend(t.extra.iter().map(|v| Cell::new(v.as_deref().unwrap_or(""))));
        table.add_row(row);
    }

    let shown = cleaned.len().min(limit);
    format!("Cleaned Transactions ({shown} of {})\n{table}", cleaned.len())
}

/// Column overview: non-missing counts and value types.
pub fn format_info(cleaned: &CleanedTable) -> String {
    let total = cleaned.len();
    let dated = cleaned.transactions.iter().filter(|t| t.date.is_some()).count();

    let mut table = Table::new();
    table.set_header(vec!["Column", "Non-Null", "Type"]);
    table.add_row(vec![Cell::new("Date"), Cell::new(dated), Cell::new("date")]);
    table.add_row(vec![Cell::new("Amount"), Cell::new(total), Cell::new("decimal")]);
    table.add_row(vec![Cell::new("Category"), Cell::new(total), Cell::new("category")]);
    table.add_row(vec![Cell::new("Description"), Cell::new(total), Cell::new("text")]);
    table.add_row(vec![Cell::new("Recurring"), Cell::new(total), Cell::new("bool")]);
    for (i, name) in cleaned.extra_columns.iter().enumerate() {
        let present = cleaned
            .transactions
            .iter()
            .filter(|t| t.extra.get(i).is_some_and(|v| v.is_some()))
            .count();
        table.add_row(vec![Cell::new(name), Cell::new(present), Cell::new("text")]);
    }

    format!("{total} entries\n{table}")
}
