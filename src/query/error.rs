use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("No fields to update")]
    EmptyPayload,

    #[error("{min_field} cannot exceed {max_field}")]
    InvalidRange {
        min_field: &'static str,
        max_field: &'static str,
    },
}
