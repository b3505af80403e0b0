use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::{
    configuration::LAST_COLUMN,
    location::{describe_failure, LocationRecord},
    sheets::{SheetRange, SheetsApi, SheetsError},
    table::{project_table, records_to_rows, HEADER_SCAN_ROWS},
};

use super::{
    models::{
        ErrorResponse, HealthResponse, MessageResponse, SaveLocationRequest, UpdateCasesRequest,
    },
    AppState,
};

const MISSING_CASES_FIELDS: &str = "headers and cases are required";
const MISSING_LOCATION_FIELDS: &str = "address and location (lat, lon) are required";

pub async fn health<S: SheetsApi + Clone + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            uptime_secs,
        }),
    )
}

pub async fn list_cases<S: SheetsApi + Clone + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    let range = SheetRange::rows_from(&state.layout.cases_tab, 1, LAST_COLUMN);
    match state.sheets.read(&range).await {
        Ok(grid) => {
            let table = project_table(&grid);
            if table.headers.is_empty() {
                log::warn!(
                    "No header row in the first {} rows of {}",
                    HEADER_SCAN_ROWS,
                    range
                );
            }
            Json(table).into_response()
        }
        Err(err) => {
            log::error!("Failed to read {}: {}", range, err);
            upstream_failure("Failed to fetch cases".to_string(), &err)
        }
    }
}

pub async fn update_cases<S: SheetsApi + Clone + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<UpdateCasesRequest>, JsonRejection>,
) -> Response {
    let (headers, cases) = match payload {
        Ok(Json(UpdateCasesRequest {
            headers: Some(headers),
            cases: Some(cases),
        })) => (headers, cases),
        Ok(_) => return bad_request(MISSING_CASES_FIELDS),
        Err(rejection) => {
            log::warn!("Rejected case update body: {}", rejection);
            return bad_request(MISSING_CASES_FIELDS);
        }
    };

    let tab = &state.layout.cases_tab;
    let start_row = state.layout.data_start_row;
    let rows = records_to_rows(&headers, &cases);

    // Not atomic: a failed write leaves the data rows cleared.
    let clear_range = SheetRange::rows_from(tab, start_row, LAST_COLUMN);
    if let Err(err) = state.sheets.clear(&clear_range).await {
        log::error!("Failed to clear {}: {}", clear_range, err);
        return upstream_failure("Failed to update cases".to_string(), &err);
    }

    let write_range = SheetRange::anchor(tab, start_row);
    let row_count = rows.len();
    if let Err(err) = state.sheets.write_at(&write_range, rows).await {
        log::error!("Failed to write {} rows at {}: {}", row_count, write_range, err);
        return upstream_failure("Failed to update cases".to_string(), &err);
    }

    log::info!("Wrote {} case rows at {}", row_count, write_range);
    message(StatusCode::OK, "Cases updated successfully".to_string())
}

pub async fn save_location<S: SheetsApi + Clone + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<SaveLocationRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            log::warn!("Rejected location body: {}", rejection);
            return bad_request(MISSING_LOCATION_FIELDS);
        }
    };

    let (lat, lon) = match &req.location {
        Some(location) => (location.lat.as_ref(), location.lon.as_ref()),
        None => (None, None),
    };
    let record = match LocationRecord::new(
        req.address.as_ref(),
        lat,
        lon,
        req.case_id.as_ref(),
        Utc::now(),
    ) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("Invalid location request: {}", err);
            return bad_request(MISSING_LOCATION_FIELDS);
        }
    };

    let tab = &state.layout.locations_tab;
    let range = SheetRange::columns(tab, "A", "E");
    match state.sheets.append(&range, vec![record.to_row()]).await {
        Ok(()) => {
            log::info!("Appended location for {} to {}", record.label(), range);
            message(StatusCode::OK, format!("{} saved to locations", record.label()))
        }
        Err(err) => {
            log::error!("Failed to append to {}: {}", range, err);
            upstream_failure(describe_failure(&err.to_string(), tab), &err)
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
            error: None,
        }),
    )
}

fn message(status: StatusCode, message: String) -> Response {
    (status, Json(MessageResponse { message })).into_response()
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            message: message.to_string(),
            error: None,
        }),
    )
        .into_response()
}

fn upstream_failure(message: String, err: &SheetsError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}
