use std::fmt;

/// A1-style address qualified by its tab name, e.g. `'Cases'!A3:Z`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRange {
    sheet: String,
    cells: String,
}

impl SheetRange {
    fn new(sheet: impl Into<String>, cells: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            cells: cells.into(),
        }
    }

    /// From `A{start_row}` down to the last row, through `last_column`.
    pub fn rows_from(sheet: &str, start_row: u32, last_column: &str) -> Self {
        Self::new(sheet, format!("A{}:{}", start_row, last_column))
    }

    /// Single top-left anchor; the API grows the write to fit the data.
    pub fn anchor(sheet: &str, row: u32) -> Self {
        Self::new(sheet, format!("A{}", row))
    }

    pub fn columns(sheet: &str, first: &str, last: &str) -> Self {
        Self::new(sheet, format!("{}:{}", first, last))
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'!{}", self.sheet.replace('\'', "''"), self.cells)
    }
}
