pub mod error;
pub mod predicate;
pub mod types;
pub mod update;

pub use error::QueryError;
pub use predicate::build_filter_predicate;
pub use types::*;
pub use update::build_partial_update;
