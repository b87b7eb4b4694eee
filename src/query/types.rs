use serde_json::Value;

/// A parameterized piece of SQL plus the values bound to its placeholders.
/// Placeholders are 1-based and contiguous: `params[i]` binds `$i+1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SqlFragment {
    /// An empty fragment carries no clauses and must not be spliced into a
    /// `WHERE`; callers route it to the unfiltered query path instead.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Translation table from external field names to storage column names.
/// Fields without an entry keep their own name.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap(pub &'static [(&'static str, &'static str)]);

impl ColumnMap {
    pub const EMPTY: ColumnMap = ColumnMap(&[]);

    pub fn resolve<'a>(&self, field: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(external, _)| *external == field)
            .map(|(_, column)| *column)
            .unwrap_or(field)
    }
}

/// How a present criterion turns into a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    /// Case-insensitive substring match, value wrapped in wildcards.
    Contains,
    /// Inclusive lower bound.
    Min,
    /// Inclusive upper bound.
    Max,
    /// `true` requires the column to be strictly positive; `false` or
    /// absent contributes nothing.
    PositiveFlag,
}

/// One row of an entity's filter table: criterion field, target column,
/// and the kind of clause it produces.
#[derive(Debug, Clone, Copy)]
pub struct Criterion {
    pub field: &'static str,
    pub column: &'static str,
    pub kind: ClauseKind,
}

/// A min/max criterion pair that must be consistent before any clause is
/// assembled.
#[derive(Debug, Clone, Copy)]
pub struct RangePair {
    pub min_field: &'static str,
    pub max_field: &'static str,
}

/// Declarative description of an entity's search surface. Clause order in
/// the generated predicate follows the order of `criteria`.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub criteria: &'static [Criterion],
    pub ranges: &'static [RangePair],
}
