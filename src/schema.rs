use crate::error::{Result, TxError};
use crate::models::{RawTable, REQUIRED_COLUMNS};

/// Outcome of the structural check on a raw table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaCheck {
    /// Every required column is present. Column names are trimmed.
    Valid(RawTable),
    /// Required columns that were not found, in `REQUIRED_COLUMNS` order.
    Invalid { missing: Vec<String> },
    /// No table was supplied (file not found or unreadable).
    Absent,
}

impl SchemaCheck {
    /// `Absent` maps to `Ok(None)`; only missing columns are an error.
    pub fn into_result(self) -> Result<Option<RawTable>> {
        match self {
            Self::Valid(table) => Ok(Some(table)),
            Self::Invalid { missing } => Err(TxError::MissingColumns(missing)),
            Self::Absent => Ok(None),
        }
    }
}

pub fn trim_column_names(columns: &[String]) -> Vec<String> {
    columns.iter().map(|c| c.trim().to_string()).collect()
}

pub fn missing_columns(columns: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c.trim() == **required))
        .map(|c| c.to_string())
        .collect()
}

pub fn validate_schema(raw: Option<RawTable>) -> SchemaCheck {
    let Some(mut table) = raw else {
        return SchemaCheck::Absent;
    };
    table.columns = trim_column_names(&table.columns);
    let missing = missing_columns(&table.columns);
    if missing.is_empty() {
        SchemaCheck::Valid(table)
    } else {
        SchemaCheck::Invalid { missing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str]) -> RawTable {
        RawTable::new(columns.iter().map(|c| c.to_string()).collect(), vec![])
    }

    #[test]
    fn test_absent_input() {
        assert_eq!(validate_schema(None), SchemaCheck::Absent);
    }

    #[test]
    fn test_valid_trims_column_names() {
        let check = validate_schema(Some(table(&[
            " Date", "Amount ", " Category ", "Description", "Recurring\t",
        ])));
        let SchemaCheck::Valid(t) = check else {
            panic!("expected a valid table");
        };
        assert_eq!(t.columns, vec!["Date", "Amount", "Category", "Description", "Recurring"]);
    }

    #[test]
    fn test_extra_columns_are_allowed() {
        let check = validate_schema(Some(table(&[
            "Date", "Amount", "Category", "Description", "Recurring", "Account",
        ])));
        assert!(matches!(check, SchemaCheck::Valid(_)));
    }

    #[test]
    fn test_reports_exactly_the_missing_columns() {
        let check = validate_schema(Some(table(&["Recurring", "Date", "Description"])));
        assert_eq!(
            check,
            SchemaCheck::Invalid {
                missing: vec!["Amount".to_string(), "Category".to_string()]
            }
        );
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let check = validate_schema(Some(table(&[
            "date", "Amount", "Category", "Description", "Recurring",
        ])));
        assert_eq!(check, SchemaCheck::Invalid { missing: vec!["Date".to_string()] });
    }

    #[test]
    fn test_empty_header_reports_everything() {
        let check = validate_schema(Some(table(&[])));
        let SchemaCheck::Invalid { missing } = check else {
            panic!("expected missing columns");
        };
        assert_eq!(missing, REQUIRED_COLUMNS.to_vec());
    }

    #[test]
    fn test_into_result() {
        assert!(matches!(SchemaCheck::Absent.into_result(), Ok(None)));
        let err = SchemaCheck::Invalid { missing: vec!["Date".into()] }
            .into_result()
            .unwrap_err();
        assert!(matches!(err, TxError::MissingColumns(ref m) if m == &vec!["Date".to_string()]));
    }
}
