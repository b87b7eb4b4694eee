use serde_json::{Map, Value};

use super::error::QueryError;
use super::types::{ColumnMap, SqlFragment};

/// Build a parameterized `SET` list from a partial update payload.
///
/// Each payload field becomes one `"column"=$n` term, in payload order,
/// with field names translated through `columns`. Values pass through
/// untouched, so an explicit JSON null sets the column to NULL; type
/// coercion belongs to the storage layer. A payload with no fields fails
/// before any storage interaction.
pub fn build_partial_update(
    payload: &Map<String, Value>,
    columns: ColumnMap,
) -> Result<SqlFragment, QueryError> {
    if payload.is_empty() {
        return Err(QueryError::EmptyPayload);
    }

    let terms: Vec<String> = payload
        .keys()
        .enumerate()
        .map(|(idx, field)| format!("\"{}\"=${}", columns.resolve(field), idx + 1))
        .collect();

    Ok(SqlFragment {
        sql: terms.join(", "),
        params: payload.values().cloned().collect(),
    })
}
