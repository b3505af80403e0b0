use async_trait::async_trait;
use thiserror::Error;

use crate::table::RawGrid;

pub mod auth;
mod google;
pub mod range;

pub use auth::{AuthError, ServiceAccount, TokenSource};
pub use google::GoogleSheets;
pub use range::SheetRange;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The Sheets API answered with a non-success status; carries Google's message.
    #[error("{0}")]
    Api(String),
}

/// The slice of the spreadsheet service the HTTP handlers rely on.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    async fn read(&self, range: &SheetRange) -> Result<RawGrid, SheetsError>;
    async fn clear(&self, range: &SheetRange) -> Result<(), SheetsError>;
    async fn write_at(&self, range: &SheetRange, rows: RawGrid) -> Result<(), SheetsError>;
    async fn append(&self, range: &SheetRange, rows: RawGrid) -> Result<(), SheetsError>;
}
