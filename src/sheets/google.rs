use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{SheetRange, SheetsApi, SheetsError, TokenSource};
use crate::table::RawGrid;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets/";
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: RawGrid,
}

#[derive(Serialize)]
struct ValuesBody<'a> {
    values: &'a RawGrid,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    message: String,
}

/// Sheets v4 `spreadsheets.values` client for a single spreadsheet.
#[derive(Clone)]
pub struct GoogleSheets {
    http: reqwest::Client,
    tokens: Arc<TokenSource>,
    base: Url,
    spreadsheet_id: String,
}

impl GoogleSheets {
    pub fn new(
        http: reqwest::Client,
        tokens: TokenSource,
        spreadsheet_id: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            tokens: Arc::new(tokens),
            base: Url::parse(SHEETS_API_BASE)?,
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    pub fn client_email(&self) -> &str {
        self.tokens.client_email()
    }

    fn values_url(&self, range: &SheetRange, action: Option<&str>) -> Url {
        values_url(&self.base, &self.spreadsheet_id, range, action)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, SheetsError> {
        let token = self.tokens.access_token().await?;
        let resp = request.bearer_auth(token).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = api_error_message(&body, status);
        log::warn!("Sheets API answered {}: {}", status, message);
        Err(SheetsError::Api(message))
    }
}

fn values_url(base: &Url, spreadsheet_id: &str, range: &SheetRange, action: Option<&str>) -> Url {
    let mut url = base.clone();
    let last = match action {
        Some(action) => format!("{}:{}", range, action),
        None => range.to_string(),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(spreadsheet_id).push("values").push(&last);
    }
    url
}

fn api_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<GoogleErrorBody>(body) {
        return parsed.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl SheetsApi for GoogleSheets {
    async fn read(&self, range: &SheetRange) -> Result<RawGrid, SheetsError> {
        log::debug!("Reading {}", range);
        let resp = self.send(self.http.get(self.values_url(range, None))).await?;
        let value_range: ValueRange = resp.json().await?;
        Ok(value_range.values)
    }

    async fn clear(&self, range: &SheetRange) -> Result<(), SheetsError> {
        log::debug!("Clearing {}", range);
        let request = self
            .http
            .post(self.values_url(range, Some("clear")))
            .json(&serde_json::json!({}));
        self.send(request).await?;
        Ok(())
    }

    async fn write_at(&self, range: &SheetRange, rows: RawGrid) -> Result<(), SheetsError> {
        log::debug!("Writing {} rows at {}", rows.len(), range);
        let request = self
            .http
            .put(self.values_url(range, None))
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&ValuesBody { values: &rows });
        self.send(request).await?;
        Ok(())
    }

    async fn append(&self, range: &SheetRange, rows: RawGrid) -> Result<(), SheetsError> {
        log::debug!("Appending {} rows to {}", rows.len(), range);
        let request = self
            .http
            .post(self.values_url(range, Some("append")))
            .query(&[
                ("valueInputOption", VALUE_INPUT_OPTION),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&ValuesBody { values: &rows });
        self.send(request).await?;
        Ok(())
    }
}
