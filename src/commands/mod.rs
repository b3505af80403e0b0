use anyhow::{Context, Result};

use crate::{
    app::App,
    cli::Command,
    configuration::{SheetLayout, LAST_COLUMN},
    sheets::{SheetRange, SheetsApi},
    table::{locate_header, HeaderLocation, HEADER_SCAN_ROWS, MARKER_TOKENS},
};

#[derive(Debug, PartialEq, Eq)]
pub enum LayoutCheck {
    Aligned {
        header_row: usize,
    },
    Misaligned {
        header_row: usize,
        expected_start: usize,
        configured_start: u32,
    },
    HeaderMissing,
}

/// Compares where bulk overwrites begin with the row below the discovered header.
/// Rows are 1-based sheet rows.
pub fn check_layout(location: &HeaderLocation, data_start_row: u32) -> LayoutCheck {
    match location {
        HeaderLocation::Found { index, .. } => {
            let header_row = index + 1;
            let expected_start = header_row + 1;
            if expected_start == data_start_row as usize {
                LayoutCheck::Aligned { header_row }
            } else {
                LayoutCheck::Misaligned {
                    header_row,
                    expected_start,
                    configured_start: data_start_row,
                }
            }
        }
        HeaderLocation::NotFound => LayoutCheck::HeaderMissing,
    }
}

pub async fn run(cmd: &Command, app: &App) -> Result<()> {
    match cmd {
        Command::Inspect => {
            let check = inspect(&app.sheets, &app.ctx.layout).await?;
            println!("{}", describe(&check, &app.ctx.layout));
            Ok(())
        }
    }
}

async fn inspect<S: SheetsApi>(sheets: &S, layout: &SheetLayout) -> Result<LayoutCheck> {
    let range = SheetRange::rows_from(&layout.cases_tab, 1, LAST_COLUMN);
    let grid = sheets
        .read(&range)
        .await
        .with_context(|| format!("reading {}", range))?;
    Ok(check_layout(&locate_header(&grid), layout.data_start_row))
}

fn describe(check: &LayoutCheck, layout: &SheetLayout) -> String {
    match check {
        LayoutCheck::Aligned { header_row } => format!(
            "Header found on row {} of '{}'; bulk overwrites start on row {}",
            header_row,
            layout.cases_tab,
            header_row + 1
        ),
        LayoutCheck::Misaligned {
            header_row,
            expected_start,
            configured_start,
        } => format!(
            "Header found on row {} of '{}' but bulk overwrites start on row {} (expected {})",
            header_row, layout.cases_tab, configured_start, expected_start
        ),
        LayoutCheck::HeaderMissing => format!(
            "No row in the first {} of '{}' contains all of {:?}",
            HEADER_SCAN_ROWS, layout.cases_tab, MARKER_TOKENS
        ),
    }
}
