//! Row-to-entity conversion helpers
//!
//! One shared implementation of column-to-type conversion, consumed by the
//! per-entity `from_row` functions in the domain repositories. Supports
//! text, integer, and fixed-point decimal columns. Fixed-point values are
//! stored as canonical 2-scale text (`12.50`, never `12.5`), and both
//! directions of that conversion live here.

use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;
use thiserror::Error;

/// Fraction digits carried by every stored decimal value
pub const DECIMAL_SCALE: u32 = 2;

/// A column could not be read or converted to the requested type
#[derive(Debug, Error)]
#[error("Column '{column}': {reason}")]
pub struct MappingError {
    pub column: String,
    pub reason: String,
}

impl MappingError {
    fn new(column: &str, reason: impl Into<String>) -> Self {
        Self {
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

fn decode_error(column: &str, err: sqlx::Error) -> MappingError {
    MappingError::new(column, err.to_string())
}

/// Read a NOT NULL text column
pub fn text_column(row: &SqliteRow, column: &str) -> Result<String, MappingError> {
    row.try_get::<String, _>(column)
        .map_err(|err| decode_error(column, err))
}

/// Read a nullable text column
pub fn opt_text_column(row: &SqliteRow, column: &str) -> Result<Option<String>, MappingError> {
    row.try_get::<Option<String>, _>(column)
        .map_err(|err| decode_error(column, err))
}

/// Read a NOT NULL integer column holding a row identifier
pub fn id_column(row: &SqliteRow, column: &str) -> Result<i64, MappingError> {
    row.try_get::<i64, _>(column)
        .map_err(|err| decode_error(column, err))
}

/// Read a NOT NULL integer column
pub fn int_column(row: &SqliteRow, column: &str) -> Result<i32, MappingError> {
    row.try_get::<i32, _>(column)
        .map_err(|err| decode_error(column, err))
}

/// Read a nullable integer column
pub fn opt_int_column(row: &SqliteRow, column: &str) -> Result<Option<i32>, MappingError> {
    row.try_get::<Option<i32>, _>(column)
        .map_err(|err| decode_error(column, err))
}

/// Read a NOT NULL fixed-point decimal column
pub fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, MappingError> {
    let text = text_column(row, column)?;
    parse_decimal(column, &text)
}

/// Read a nullable fixed-point decimal column
pub fn opt_decimal_column(row: &SqliteRow, column: &str) -> Result<Option<Decimal>, MappingError> {
    let text = opt_text_column(row, column)?;
    text.map(|text| parse_decimal(column, &text)).transpose()
}

fn parse_decimal(column: &str, text: &str) -> Result<Decimal, MappingError> {
    let mut value = Decimal::from_str(text)
        .map_err(|err| MappingError::new(column, format!("'{text}' is not a decimal: {err}")))?;
    value.rescale(DECIMAL_SCALE);
    Ok(value)
}

/// Canonical 2-scale text for binding a decimal into a statement slot.
/// Absent values bind SQL NULL through `Option` at the call site.
pub fn db_decimal(value: &Decimal) -> String {
    let mut value = *value;
    value.rescale(DECIMAL_SCALE);
    value.to_string()
}
