//! Company data access: composes the dynamic SQL builders into full
//! statements and owns the zero-row and duplicate-key decisions.

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::config;
use crate::database::executor::{bind_values_as, is_unique_violation};
use crate::database::manager::DatabaseError;
use crate::database::models::{Company, CompanyDetail, CompanyFilter, JobSummary, NewCompany};
use crate::query::{
    build_filter_predicate, build_partial_update, ClauseKind, ColumnMap, Criterion, FilterSpec,
    RangePair,
};

/// External field name → column translations for company updates.
const COMPANY_COLUMNS: ColumnMap = ColumnMap(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// Company search surface. Clause order follows this table: name match,
/// then the employee bounds.
const COMPANY_FILTERS: FilterSpec = FilterSpec {
    criteria: &[
        Criterion { field: "name", column: "name", kind: ClauseKind::Contains },
        Criterion { field: "minEmployees", column: "num_employees", kind: ClauseKind::Min },
        Criterion { field: "maxEmployees", column: "num_employees", kind: ClauseKind::Max },
    ],
    ranges: &[RangePair { min_field: "minEmployees", max_field: "maxEmployees" }],
};

const SELECT_COMPANIES: &str =
    "SELECT handle, name, description, num_employees, logo_url FROM companies";

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new company. A duplicate handle is a conflict, not a
    /// storage failure.
    pub async fn create(&self, input: NewCompany) -> Result<Company, DatabaseError> {
        let result = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING handle, name, description, num_employees, logo_url",
        )
        .bind(&input.handle)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.num_employees)
        .bind(&input.logo_url)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(company) => Ok(company),
            Err(err) if is_unique_violation(&err) => Err(DatabaseError::Conflict(format!(
                "Duplicate company: {}",
                input.handle
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// List companies, optionally narrowed by search criteria.
    ///
    /// With no usable criteria every company is returned; on the filtered
    /// path an empty result is reported as not-found.
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DatabaseError> {
        let Some((sql, params)) = search_statement(filter)? else {
            let sql = format!("{SELECT_COMPANIES} ORDER BY name");
            return Ok(sqlx::query_as::<_, Company>(&sql).fetch_all(&self.pool).await?);
        };

        if config::config().database.enable_query_logging {
            debug!(%sql, params = params.len(), "searching companies");
        }

        let companies = bind_values_as(sqlx::query_as::<_, Company>(&sql), &params)
            .fetch_all(&self.pool)
            .await?;

        if companies.is_empty() {
            return Err(DatabaseError::NotFound("No companies match the search".to_string()));
        }
        Ok(companies)
    }

    /// Fetch one company together with its job listings.
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, DatabaseError> {
        let sql = format!("{SELECT_COMPANIES} WHERE handle = $1");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {handle}")))?;

        let jobs = sqlx::query_as::<_, JobSummary>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY title",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Partial update: only the supplied fields change.
    pub async fn update(
        &self,
        handle: &str,
        changes: &Map<String, Value>,
    ) -> Result<Company, DatabaseError> {
        let (sql, params) = update_statement(changes)?;

        if config::config().database.enable_query_logging {
            debug!(%sql, "updating company");
        }

        bind_values_as(sqlx::query_as::<_, Company>(&sql), &params)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {handle}")))
    }

    pub async fn remove(&self, handle: &str) -> Result<(), DatabaseError> {
        let deleted = sqlx::query("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;

        if deleted.is_none() {
            return Err(DatabaseError::NotFound(format!("No company: {handle}")));
        }
        Ok(())
    }
}

/// Full search statement, or None when the criteria produce no predicate
/// (an empty `WHERE` is not valid SQL, so that case takes the plain list).
fn search_statement(filter: &CompanyFilter) -> Result<Option<(String, Vec<Value>)>, DatabaseError> {
    let predicate = build_filter_predicate(&filter.criteria(), &COMPANY_FILTERS)?;
    if predicate.is_empty() {
        return Ok(None);
    }
    let sql = format!("{SELECT_COMPANIES} WHERE {} ORDER BY name", predicate.sql);
    Ok(Some((sql, predicate.params)))
}

/// Full update statement; the row key binds after the payload params.
fn update_statement(changes: &Map<String, Value>) -> Result<(String, Vec<Value>), DatabaseError> {
    let set = build_partial_update(changes, COMPANY_COLUMNS)?;
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} \
         RETURNING handle, name, description, num_employees, logo_url",
        set.sql,
        set.params.len() + 1
    );
    Ok((sql, set.params))
}
