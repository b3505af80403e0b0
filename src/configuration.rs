use std::net::SocketAddr;
use std::path::PathBuf;

pub const SPREADSHEET_ID: &str = "1kV3xq9Zr2mB7cT0pW5nYdHs4LfJg8aQeUiRoN6tXw1E";
pub const CASES_TAB: &str = "Cases";
pub const LOCATIONS_TAB: &str = "Locations";

/// Sheet row (1-based) where case data begins; the header sits on the row above.
pub const DEFAULT_DATA_START_ROW: u32 = 3;
pub const LAST_COLUMN: &str = "Z";

pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Where the service reads and writes inside the spreadsheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    pub spreadsheet_id: String,
    pub cases_tab: String,
    pub locations_tab: String,
    pub data_start_row: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            spreadsheet_id: SPREADSHEET_ID.to_string(),
            cases_tab: CASES_TAB.to_string(),
            locations_tab: LOCATIONS_TAB.to_string(),
            data_start_row: DEFAULT_DATA_START_ROW,
        }
    }
}

#[derive(Clone)]
pub struct Configuration {
    pub api_listen: SocketAddr,
    pub credentials: String,
    pub log_file: Option<PathBuf>,
    pub layout: SheetLayout,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("api_listen", &self.api_listen)
            .field("credentials", &"<redacted>")
            .field("log_file", &self.log_file)
            .field("layout", &self.layout)
            .finish()
    }
}
