use serde::{Deserialize, Serialize};

use crate::store::JsonRecord;

#[derive(Deserialize)]
pub struct FetchQuery {
    pub link: Option<String>,
}

/// Envelope for the fetch endpoint and for every error.
#[derive(Serialize)]
pub struct FetchResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct RecordsResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<JsonRecord>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    #[serde(rename = "fetch-json")]
    pub fetch_json: &'static str,
    pub records: &'static str,
}
