use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCasesRequest {
    pub headers: Option<Vec<String>>,
    pub cases: Option<Vec<Map<String, Value>>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLocationRequest {
    pub address: Option<Value>,
    pub location: Option<Coordinates>,
    pub case_id: Option<Value>,
}

#[derive(Deserialize)]
pub struct Coordinates {
    pub lat: Option<Value>,
    pub lon: Option<Value>,
}
