//! Introspected table metadata, as handed over by the host.

use serde::{Deserialize, Serialize};

/// Returns the text if it carries anything other than whitespace.
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// One column of an introspected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    /// Declared type, as the host reports it (e.g. `BIGINT`).
    pub declared_type: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            remarks: None,
        }
    }

    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Remarks, unless absent or whitespace-only.
    pub fn documentation(&self) -> Option<&str> {
        non_blank(self.remarks.as_deref())
    }
}

/// An introspected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remarks: None,
            columns: Vec::new(),
        }
    }

    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn column(mut self, column: ColumnMetadata) -> Self {
        self.columns.push(column);
        self
    }

    /// Remarks, unless absent or whitespace-only.
    pub fn documentation(&self) -> Option<&str> {
        non_blank(self.remarks.as_deref())
    }

    /// Find a column by name.
    pub fn find_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}
