//! Tabular view of fetched order records.

use serde_json::{Map, Value};

/// Order records laid out as a table.
///
/// Columns are the union of all record keys in first-seen order. A record
/// that lacks a column simply has no value for it.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use shopify_app::orders::OrderTable;
///
/// let mut table = OrderTable::new();
/// table.push(json!({"id": 1, "email": "a@example.com"}).as_object().unwrap().clone());
/// table.push(json!({"id": 2, "note": "gift"}).as_object().unwrap().clone());
///
/// assert_eq!(table.columns(), ["id", "email", "note"]);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.value(1, "email"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderTable {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl OrderTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, registering any keys not yet seen as new columns.
    pub fn push(&mut self, record: Map<String, Value>) {
        for key in record.keys() {
            if !self.columns.iter().any(|column| column == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(record);
    }

    /// Column names in first-seen order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    /// The value at `row` in `column`, if that record has it.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|record| record.get(column))
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces nested objects with their JSON text.
    ///
    /// A column is converted when its value in the first row is a JSON object;
    /// every present value in that column (of any type) then becomes a string
    /// holding its JSON encoding.
    pub fn stringify_object_columns(&mut self) {
        let Some(first) = self.rows.first() else {
            return;
        };

        let object_columns: Vec<String> = self
            .columns
            .iter()
            .filter(|column| first.get(column.as_str()).is_some_and(Value::is_object))
            .cloned()
            .collect();

        for record in &mut self.rows {
            for column in &object_columns {
                if let Some(value) = record.get_mut(column) {
                    *value = Value::String(value.to_string());
                }
            }
        }
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Map<String, Value>> {
        self.rows
    }
}
