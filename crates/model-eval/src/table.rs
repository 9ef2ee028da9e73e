//! Result Tables

use crate::TableError;
use serde_json::Value;
use std::io::Write;

/// A single table cell: number, string, bool, or null
pub type Cell = Value;

/// Column-named rows of scalar cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    /// Create an empty table with the given columns
    pub fn new<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for column in columns {
            let column = column.into();
            if table.columns.contains(&column) {
                return Err(TableError::DuplicateColumn(column));
            }
            table.columns.push(column);
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row whose cells follow column order
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowLength {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Add a column holding the same value in every row
    pub fn add_constant_column(
        &mut self,
        name: impl Into<String>,
        value: Cell,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.columns.contains(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(value.clone());
        }
        Ok(())
    }

    /// Cells of one column, `None` if absent
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Append all rows of `other`, which must have identical columns
    ///
    /// An empty table without columns takes on the columns of `other`.
    pub fn append(&mut self, other: ResultTable) -> Result<(), TableError> {
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return Ok(());
        }
        if self.columns != other.columns {
            return Err(TableError::ColumnMismatch {
                expected: self.columns.clone(),
                actual: other.columns,
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Write rows as CSV, preceded by the header when `header` is set
    pub fn write_csv<W: Write>(
        &self,
        writer: &mut csv::Writer<W>,
        header: bool,
    ) -> Result<(), TableError> {
        if header {
            writer.write_record(&self.columns)?;
        }
        for row in &self.rows {
            writer.write_record(row.iter().map(cell_to_field))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Render a cell as a CSV field
fn cell_to_field(cell: &Cell) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
