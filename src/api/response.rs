use axum::Json;
use axum::http::StatusCode;

use crate::api::models::{FetchResponse, RecordsResponse};
use crate::store::JsonRecord;

pub fn saved(record: JsonRecord) -> (StatusCode, Json<FetchResponse>) {
    (
        StatusCode::OK,
        Json(FetchResponse {
            success: true,
            message: "JSON fetched and saved successfully".to_string(),
            data: Some(record),
            error: None,
        }),
    )
}

pub fn records(records: Vec<JsonRecord>) -> (StatusCode, Json<RecordsResponse>) {
    (
        StatusCode::OK,
        Json(RecordsResponse {
            success: true,
            message: "Records retrieved successfully".to_string(),
            count: records.len(),
            data: records,
        }),
    )
}

pub fn failure(
    status: StatusCode,
    message: &str,
    error: String,
) -> (StatusCode, Json<FetchResponse>) {
    (
        status,
        Json(FetchResponse {
            success: false,
            message: message.to_string(),
            data: None,
            error: Some(error),
        }),
    )
}
