use anyhow::{Context, Result};

use crate::context;
use crate::sheets::{GoogleSheets, ServiceAccount, TokenSource};

pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("casesheet/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")
}

pub fn build_sheets(ctx: &context::Context) -> Result<GoogleSheets> {
    let account = ServiceAccount::try_from_str(&ctx.credentials)
        .context("parsing service account credentials")?;
    let http = build_http_client()?;
    let tokens = TokenSource::new(account, http.clone()).context("loading service account key")?;
    GoogleSheets::new(http, tokens, ctx.layout.spreadsheet_id.as_str())
        .context("building Sheets API base url")
}
