use std::fmt;

use crate::model::TableKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (blank column name, no templates, etc.).
    ConfigValidation(String),
    /// A label template failed to compile.
    InvalidTemplate { phrase: String, message: String },
    /// Missing required column in an input table.
    MissingColumn { table: TableKind, column: String },
}

impl ReconError {
    /// The table a schema error refers to, if any.
    pub fn table(&self) -> Option<TableKind> {
        match self {
            Self::MissingColumn { table, .. } => Some(*table),
            _ => None,
        }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidTemplate { phrase, message } => {
                write!(f, "template '{phrase}': {message}")
            }
            Self::MissingColumn { table, column } => {
                write!(f, "{}: missing column '{column}'", table.file_label())
            }
        }
    }
}

impl std::error::Error for ReconError {}

/// Expected-schema guidance shown alongside schema and ingestion errors.
pub fn expected_schema(table: TableKind) -> &'static str {
    match table {
        TableKind::Accounts => {
            "accounts_list: 'Customer ID' (optional 'Account name'), header on row 3"
        }
        TableKind::Keywords => "keyword_report: 'Ad group ID', header on row 3 (.xlsx or .csv)",
        TableKind::AdGroups => {
            "ad_group_report: 'Customer ID', 'Campaign', 'Ad group', 'Ad group ID', 'Ad state', \
             'Headline 1-15', 'Description 1-4', header on row 3"
        }
    }
}
