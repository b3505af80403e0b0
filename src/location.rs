use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::table::is_truthy;

pub const CASE_ID_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("address is required")]
    MissingAddress,
    #[error("latitude and longitude are required")]
    MissingCoordinates,
}

/// A geocoded address, appended to the locations tab as one row.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationRecord {
    pub timestamp: DateTime<Utc>,
    pub address: String,
    pub latitude: Value,
    pub longitude: Value,
    pub case_id: Value,
}

impl LocationRecord {
    pub fn new(
        address: Option<&Value>,
        latitude: Option<&Value>,
        longitude: Option<&Value>,
        case_id: Option<&Value>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, LocationError> {
        let address = match address {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(LocationError::MissingAddress),
        };
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) if is_truthy(lat) && is_truthy(lon) => {
                (lat.clone(), lon.clone())
            }
            _ => return Err(LocationError::MissingCoordinates),
        };
        let case_id = case_id
            .filter(|id| is_truthy(id))
            .cloned()
            .unwrap_or_else(|| Value::String(CASE_ID_PLACEHOLDER.to_string()));

        Ok(Self {
            timestamp,
            address,
            latitude,
            longitude,
            case_id,
        })
    }

    pub fn to_row(&self) -> Vec<Value> {
        vec![
            Value::String(self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::String(self.address.clone()),
            self.latitude.clone(),
            self.longitude.clone(),
            self.case_id.clone(),
        ]
    }

    /// Street part of the address (everything before the first comma).
    pub fn label(&self) -> &str {
        self.address.split(',').next().unwrap_or_default()
    }
}

/// Turns an upstream failure into a message the browser can act on.
pub fn describe_failure(upstream: &str, locations_tab: &str) -> String {
    let lower = upstream.to_lowercase();
    if lower.contains("permission") {
        "Permission denied: share the spreadsheet with the service account".to_string()
    } else if lower.contains("unable to parse range") || lower.contains("not found") {
        format!("Sheet '{}' not found", locations_tab)
    } else {
        "Failed to save location".to_string()
    }
}
