use serde_json::{Map, Value};

use super::error::QueryError;
use super::types::{ClauseKind, FilterSpec, SqlFragment};

/// Build a conjunctive `WHERE` predicate from sparse search criteria.
///
/// Range pairs are validated before any clause is assembled; an inverted
/// pair fails the whole build regardless of what else is present. Criteria
/// the table does not list are ignored, as are explicit nulls. Clause and
/// parameter order follow the table, so placeholder numbering is contiguous
/// and matches the value list exactly. With no usable criteria the fragment
/// is empty and the caller must take the unfiltered path.
pub fn build_filter_predicate(
    criteria: &Map<String, Value>,
    spec: &FilterSpec,
) -> Result<SqlFragment, QueryError> {
    for range in spec.ranges {
        let min = criteria.get(range.min_field).and_then(numeric);
        let max = criteria.get(range.max_field).and_then(numeric);
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(QueryError::InvalidRange {
                    min_field: range.min_field,
                    max_field: range.max_field,
                });
            }
        }
    }

    let mut clauses = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    for criterion in spec.criteria {
        let Some(value) = criteria.get(criterion.field).filter(|v| !v.is_null()) else {
            continue;
        };

        match criterion.kind {
            ClauseKind::Contains => {
                params.push(Value::String(format!("%{}%", text(value))));
                clauses.push(format!("\"{}\" ILIKE ${}", criterion.column, params.len()));
            }
            ClauseKind::Min => {
                params.push(value.clone());
                clauses.push(format!("\"{}\" >= ${}", criterion.column, params.len()));
            }
            ClauseKind::Max => {
                params.push(value.clone());
                clauses.push(format!("\"{}\" <= ${}", criterion.column, params.len()));
            }
            ClauseKind::PositiveFlag => {
                // Only an explicit true asks for the constraint; the zero
                // floor is bound as a parameter, not inlined.
                if value.as_bool() == Some(true) {
                    params.push(Value::from(0));
                    clauses.push(format!("\"{}\" > ${}", criterion.column, params.len()));
                }
            }
        }
    }

    Ok(SqlFragment {
        sql: clauses.join(" AND "),
        params,
    })
}

/// Numeric reading of a criterion value. NUMERIC-column bounds arrive as
/// strings from clients that cannot carry arbitrary precision, so both
/// representations compare.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
