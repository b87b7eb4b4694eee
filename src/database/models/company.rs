use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::job::JobSummary;

/// A company row, serialized with the external camelCase field names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "numEmployees")]
    pub num_employees: Option<i32>,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
}

/// Company plus its job listings, the shape of a single-company lookup.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Input shape for creating a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "numEmployees")]
    pub num_employees: Option<i32>,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
}

/// Search criteria accepted by the company listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "minEmployees", skip_serializing_if = "Option::is_none")]
    pub min_employees: Option<i64>,
    #[serde(rename = "maxEmployees", skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    /// Sparse criteria object in the external field naming, ready for the
    /// filter predicate builder.
    pub fn criteria(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
