//! Job data access. Jobs share the company dynamic-SQL machinery; the only
//! extra rule is that a job's id is assigned by storage and never updated.

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::config;
use crate::database::executor::{bind_values_as, is_foreign_key_violation};
use crate::database::manager::DatabaseError;
use crate::database::models::{Job, JobFilter, NewJob};
use crate::query::{
    build_filter_predicate, build_partial_update, ClauseKind, ColumnMap, Criterion, FilterSpec,
    RangePair,
};

/// Job search surface. Clause order follows this table: title match,
/// salary bounds, equity bounds, the equity flag, then company handle.
const JOB_FILTERS: FilterSpec = FilterSpec {
    criteria: &[
        Criterion { field: "title", column: "title", kind: ClauseKind::Contains },
        Criterion { field: "minSalary", column: "salary", kind: ClauseKind::Min },
        Criterion { field: "maxSalary", column: "salary", kind: ClauseKind::Max },
        Criterion { field: "minEquity", column: "equity", kind: ClauseKind::Min },
        Criterion { field: "maxEquity", column: "equity", kind: ClauseKind::Max },
        Criterion { field: "hasEquity", column: "equity", kind: ClauseKind::PositiveFlag },
        Criterion { field: "company_handle", column: "company_handle", kind: ClauseKind::Contains },
    ],
    ranges: &[
        RangePair { min_field: "minSalary", max_field: "maxSalary" },
        RangePair { min_field: "minEquity", max_field: "maxEquity" },
    ],
};

const SELECT_JOBS: &str = "SELECT id, title, salary, equity, company_handle FROM jobs";

pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new job. A missing company is reported as not-found rather
    /// than a bare constraint failure.
    pub async fn create(&self, input: NewJob) -> Result<Job, DatabaseError> {
        let result = sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, salary, equity, company_handle",
        )
        .bind(&input.title)
        .bind(input.salary)
        .bind(&input.equity)
        .bind(&input.company_handle)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(job) => Ok(job),
            Err(err) if is_foreign_key_violation(&err) => Err(DatabaseError::NotFound(format!(
                "No company: {}",
                input.company_handle
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// List jobs, optionally narrowed by search criteria.
    ///
    /// With no usable criteria every job is returned; on the filtered path
    /// an empty result is reported as not-found.
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<Job>, DatabaseError> {
        let Some((sql, params)) = search_statement(filter)? else {
            let sql = format!("{SELECT_JOBS} ORDER BY title");
            return Ok(sqlx::query_as::<_, Job>(&sql).fetch_all(&self.pool).await?);
        };

        if config::config().database.enable_query_logging {
            debug!(%sql, params = params.len(), "searching jobs");
        }

        let jobs = bind_values_as(sqlx::query_as::<_, Job>(&sql), &params)
            .fetch_all(&self.pool)
            .await?;

        if jobs.is_empty() {
            return Err(DatabaseError::NotFound("No jobs match the search".to_string()));
        }
        Ok(jobs)
    }

    pub async fn get(&self, id: i32) -> Result<Job, DatabaseError> {
        let sql = format!("{SELECT_JOBS} WHERE id = $1");
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {id}")))
    }

    /// Partial update: only the supplied fields change.
    pub async fn update(&self, id: i32, changes: &Map<String, Value>) -> Result<Job, DatabaseError> {
        let (sql, params) = update_statement(changes)?;

        if config::config().database.enable_query_logging {
            debug!(%sql, "updating job");
        }

        bind_values_as(sqlx::query_as::<_, Job>(&sql), &params)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {id}")))
    }

    pub async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        let deleted = sqlx::query("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if deleted.is_none() {
            return Err(DatabaseError::NotFound(format!("No job: {id}")));
        }
        Ok(())
    }
}

/// Full search statement, or None when the criteria produce no predicate.
fn search_statement(filter: &JobFilter) -> Result<Option<(String, Vec<Value>)>, DatabaseError> {
    let predicate = build_filter_predicate(&filter.criteria(), &JOB_FILTERS)?;
    if predicate.is_empty() {
        return Ok(None);
    }
    let sql = format!("{SELECT_JOBS} WHERE {} ORDER BY title", predicate.sql);
    Ok(Some((sql, predicate.params)))
}

/// Full update statement; the row id binds after the payload params. Job
/// field names already match their columns, so no translation table.
fn update_statement(changes: &Map<String, Value>) -> Result<(String, Vec<Value>), DatabaseError> {
    if changes.contains_key("id") {
        return Err(DatabaseError::ImmutableField("id"));
    }

    let set = build_partial_update(changes, ColumnMap::EMPTY)?;
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} \
         RETURNING id, title, salary, equity, company_handle",
        set.sql,
        set.params.len() + 1
    );
    Ok((sql, set.params))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::query::QueryError;

    fn changes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn search_statement_orders_clauses_by_table() {
        let filter = JobFilter {
            title: Some("j1".to_string()),
            min_salary: Some(200000),
            max_salary: Some(300000),
            has_equity: Some(true),
            company_handle: Some("acme".to_string()),
            ..Default::default()
        };

        let (sql, params) = search_statement(&filter).unwrap().unwrap();
        assert_eq!(
            sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs \
             WHERE \"title\" ILIKE $1 AND \"salary\" >= $2 AND \"salary\" <= $3 \
             AND \"equity\" > $4 AND \"company_handle\" ILIKE $5 \
             ORDER BY title"
        );
        assert_eq!(
            params,
            vec![json!("%j1%"), json!(200000), json!(300000), json!(0), json!("%acme%")]
        );
    }

    #[test]
    fn has_equity_false_takes_the_unfiltered_path() {
        let filter = JobFilter { has_equity: Some(false), ..Default::default() };
        assert!(search_statement(&filter).unwrap().is_none());
    }

    #[test]
    fn inverted_salary_range_is_rejected() {
        let filter = JobFilter {
            min_salary: Some(300000),
            max_salary: Some(200000),
            ..Default::default()
        };

        assert!(matches!(
            search_statement(&filter),
            Err(DatabaseError::Query(QueryError::InvalidRange {
                min_field: "minSalary",
                max_field: "maxSalary",
            }))
        ));
    }

    #[test]
    fn inverted_equity_range_is_rejected_before_clauses() {
        // The only other criterion would not even produce a clause.
        let filter = JobFilter {
            min_equity: Some(0.5),
            max_equity: Some(0.1),
            has_equity: Some(false),
            ..Default::default()
        };

        assert!(matches!(
            search_statement(&filter),
            Err(DatabaseError::Query(QueryError::InvalidRange {
                min_field: "minEquity",
                max_field: "maxEquity",
            }))
        ));
    }

    #[test]
    fn update_statement_uses_identity_columns() {
        let data = changes(json!({ "title": "Staff Engineer", "salary": 250000 }));

        let (sql, params) = update_statement(&data).unwrap();
        assert_eq!(
            sql,
            "UPDATE jobs SET \"title\"=$1, \"salary\"=$2 WHERE id = $3 \
             RETURNING id, title, salary, equity, company_handle"
        );
        assert_eq!(params, vec![json!("Staff Engineer"), json!(250000)]);
    }

    #[test]
    fn update_refuses_id_changes() {
        let data = changes(json!({ "id": 99, "title": "t" }));
        assert!(matches!(
            update_statement(&data),
            Err(DatabaseError::ImmutableField("id"))
        ));
    }

    #[test]
    fn update_without_fields_is_rejected() {
        assert!(matches!(
            update_statement(&Map::new()),
            Err(DatabaseError::Query(QueryError::EmptyPayload))
        ));
    }
}
