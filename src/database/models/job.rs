use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// A job row. Equity is NUMERIC in storage and rides as a decimal string
/// on the wire, so it stays `BigDecimal` end to end.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// The shortened job shape embedded in a company lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
}

/// Input shape for creating a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// Search criteria accepted by the job listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "minSalary", skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<i64>,
    #[serde(rename = "maxSalary", skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<i64>,
    #[serde(rename = "minEquity", skip_serializing_if = "Option::is_none")]
    pub min_equity: Option<f64>,
    #[serde(rename = "maxEquity", skip_serializing_if = "Option::is_none")]
    pub max_equity: Option<f64>,
    #[serde(rename = "hasEquity", skip_serializing_if = "Option::is_none")]
    pub has_equity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_handle: Option<String>,
}

impl JobFilter {
    /// Sparse criteria object in the external field naming, ready for the
    /// filter predicate builder.
    pub fn criteria(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
