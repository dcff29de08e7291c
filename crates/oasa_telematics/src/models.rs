//! Response outcome and tabular normalization
//!
//! The telematics endpoint answers every action with one of three JSON
//! shapes: `null`, a list of flat records, or a map whose values are such
//! lists (`{"come": [...], "go": [...]}`). [`Outcome::normalize`] resolves
//! the shape once and projects it into uniform [`DataTable`]s.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Raw result of one HTTP call against the telematics endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// HTTP status code
    pub status_code: u16,
    /// Reason phrase of the status line
    pub message: String,
    /// Parsed JSON body; `Null` when the service answered `null`
    pub payload: Value,
}

impl Outcome {
    /// Create an outcome from a completed response
    #[must_use]
    pub fn new(status_code: u16, message: impl Into<String>, payload: Value) -> Self {
        Self {
            status_code,
            message: message.into(),
            payload,
        }
    }

    /// Project the payload into tabular form
    ///
    /// A `null` payload counts as an empty record list. A map value that is
    /// a single flat record tabulates as one row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedShape`] if the payload is neither a
    /// record list nor a map of record lists.
    pub fn normalize(&self) -> Result<Normalized, Error> {
        match &self.payload {
            Value::Null => Ok(Normalized::Table(DataTable::default())),
            Value::Array(records) => DataTable::from_records(records).map(Normalized::Table),
            Value::Object(map) => {
                let mut tables = BTreeMap::new();
                for (key, value) in map {
                    let table = match value {
                        Value::Null => DataTable::default(),
                        Value::Array(records) => DataTable::from_records(records)?,
                        Value::Object(_) => DataTable::from_records(std::slice::from_ref(value))?,
                        other => {
                            return Err(Error::UnexpectedShape {
                                expected: "a record list",
                                got: json_type_name(other),
                            });
                        }
                    };
                    tables.insert(key.clone(), table);
                }
                Ok(Normalized::Grouped(tables))
            }
            other => Err(Error::UnexpectedShape {
                expected: "a record list or a map of record lists",
                got: json_type_name(other),
            }),
        }
    }
}

/// Tabular form of a payload, resolved once at the normalization boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The payload was a flat record list
    Table(DataTable),
    /// The payload was a map of record lists, one table per key
    Grouped(BTreeMap<String, DataTable>),
}

impl Normalized {
    /// Extract the single table of a flat payload
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedShape`] if the payload was a map.
    pub fn into_table(self) -> Result<DataTable, Error> {
        match self {
            Self::Table(table) => Ok(table),
            Self::Grouped(_) => Err(Error::UnexpectedShape {
                expected: "a record list",
                got: "a map",
            }),
        }
    }

    /// Extract the per-key tables of a map payload
    ///
    /// An empty flat payload converts to an empty map, since the service
    /// answers `null` even for actions that normally produce keyed results.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedShape`] if the payload was a non-empty
    /// record list.
    pub fn into_grouped(self) -> Result<BTreeMap<String, DataTable>, Error> {
        match self {
            Self::Grouped(tables) => Ok(tables),
            Self::Table(table) if table.is_empty() => Ok(BTreeMap::new()),
            Self::Table(_) => Err(Error::UnexpectedShape {
                expected: "a map of record lists",
                got: "a record list",
            }),
        }
    }
}

/// A table derived from a sequence of flat JSON records
///
/// Each record becomes a row; each distinct key across the records becomes
/// a column, in first-seen order. Keys missing from a record yield `Null`
/// cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Build a table from a slice of record values
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedShape`] if any element is not an object.
    pub fn from_records(records: &[Value]) -> Result<Self, Error> {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            let Value::Object(fields) = record else {
                return Err(Error::UnexpectedShape {
                    expected: "a flat record",
                    got: json_type_name(record),
                });
            };
            for key in fields.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .filter_map(Value::as_object)
            .map(|fields| {
                columns
                    .iter()
                    .map(|column| fields.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Column names, in first-seen order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, each aligned with [`columns`](Self::columns)
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` under the named column
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }

    /// All cells of the named column, top to bottom
    #[must_use]
    pub fn column(&self, column: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows x {} columns ({})",
            self.rows.len(),
            self.columns.len(),
            self.columns.join(", ")
        )
    }
}

/// Name a JSON value's type for shape errors
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
