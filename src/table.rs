use serde::Serialize;
use serde_json::{Map, Value};

pub type RawGrid = Vec<Vec<Value>>;

/// Cells that must all appear on a row for it to count as the header.
pub const MARKER_TOKENS: [&str; 3] = ["Case Number", "Client Name", "Status"];

/// Key of the synthetic sheet-row field on every projected record.
pub const ROW_INDEX_KEY: &str = "rowIndex";

/// Rows examined when looking for the header.
pub const HEADER_SCAN_ROWS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderLocation {
    Found { index: usize, headers: Vec<String> },
    NotFound,
}

/// One data row keyed by header name. `row_index` is the 1-based sheet row and
/// takes precedence over a sheet column of the same name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CaseRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CaseTable {
    pub headers: Vec<String>,
    pub cases: Vec<CaseRecord>,
}

pub fn locate_header(grid: &[Vec<Value>]) -> HeaderLocation {
    grid.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| is_header_row(row))
        .map(|index| HeaderLocation::Found {
            index,
            headers: header_list(&grid[index]),
        })
        .unwrap_or(HeaderLocation::NotFound)
}

fn is_header_row(row: &[Value]) -> bool {
    MARKER_TOKENS
        .iter()
        .all(|marker| row.iter().any(|cell| cell.as_str() == Some(*marker)))
}

pub fn header_list(row: &[Value]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.as_str().map(str::trim).unwrap_or_default().to_string())
        .collect()
}

pub fn project_records(
    grid: &[Vec<Value>],
    header_index: usize,
    headers: &[String],
) -> Vec<CaseRecord> {
    grid.iter()
        .skip(header_index + 1)
        .enumerate()
        .map(|(offset, row)| {
            let mut fields = Map::new();
            for (header, cell) in headers.iter().zip(row.iter()) {
                if header == ROW_INDEX_KEY {
                    continue;
                }
                fields.insert(header.clone(), cell.clone());
            }
            CaseRecord {
                fields,
                row_index: header_index + offset + 2,
            }
        })
        .collect()
}

pub fn project_table(grid: &[Vec<Value>]) -> CaseTable {
    match locate_header(grid) {
        HeaderLocation::Found { index, headers } => {
            let cases = project_records(grid, index, &headers);
            CaseTable { headers, cases }
        }
        HeaderLocation::NotFound => CaseTable::default(),
    }
}

/// Inverse of [`project_records`]: one row per record in `headers` order.
/// Missing or falsy fields become `null` so the target cell is cleared.
pub fn records_to_rows(headers: &[String], records: &[Map<String, Value>]) -> RawGrid {
    records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|header| match record.get(header) {
                    Some(value) if is_truthy(value) => value.clone(),
                    _ => Value::Null,
                })
                .collect()
        })
        .collect()
}

/// JavaScript truthiness for JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(cells: &[Value]) -> Vec<Value> {
        cells.to_vec()
    }

    fn header_row() -> Vec<Value> {
        row(&[json!("Case Number"), json!("Client Name "), json!("Status"), json!("Notes")])
    }

    fn filler(n: usize) -> RawGrid {
        (0..n).map(|i| vec![json!(format!("banner {i}"))]).collect()
    }

    #[test]
    fn locates_earliest_qualifying_row() {
        let mut grid = filler(2);
        grid.push(row(&[json!("Case Number"), json!("Client Name"), json!("Status")]));
        grid.push(row(&[json!("Status"), json!("Client Name"), json!("Case Number")]));

        match locate_header(&grid) {
            HeaderLocation::Found { index, headers } => {
                assert_eq!(index, 2);
                assert_eq!(headers, vec!["Case Number", "Client Name", "Status"]);
            }
            HeaderLocation::NotFound => panic!("header should be found"),
        }
    }

    #[test]
    fn header_beyond_scan_window_is_not_found() {
        let mut grid = filler(HEADER_SCAN_ROWS);
        grid.push(row(&[json!("Case Number"), json!("Client Name"), json!("Status")]));
        assert_eq!(locate_header(&grid), HeaderLocation::NotFound);

        let mut grid = filler(HEADER_SCAN_ROWS - 1);
        grid.push(row(&[json!("Case Number"), json!("Client Name"), json!("Status")]));
        assert!(matches!(locate_header(&grid), HeaderLocation::Found { index: 9, .. }));
    }

    #[test]
    fn marker_match_is_exact_against_raw_cells() {
        let grid = vec![row(&[json!(" Case Number"), json!("Client Name"), json!("Status")])];
        assert_eq!(locate_header(&grid), HeaderLocation::NotFound);

        let grid = vec![row(&[json!("case number"), json!("Client Name"), json!("Status")])];
        assert_eq!(locate_header(&grid), HeaderLocation::NotFound);
    }

    #[test]
    fn header_list_trims_and_blanks_non_strings() {
        let headers = header_list(&[json!("  Name  "), json!(42), Value::Null, json!("Status")]);
        assert_eq!(headers, vec!["Name", "", "", "Status"]);
    }

    #[test]
    fn projects_records_with_row_index_offset() {
        let mut grid = filler(1);
        grid.push(header_row());
        grid.push(row(&[json!("C-1"), json!("Ada"), json!("Open"), json!("first")]));
        grid.push(row(&[json!("C-2"), json!("Grace")]));
        grid.push(Vec::new());

        let table = project_table(&grid);
        assert_eq!(table.headers, vec!["Case Number", "Client Name", "Status", "Notes"]);
        assert_eq!(table.cases.len(), 3);

        for (n, record) in table.cases.iter().enumerate() {
            assert_eq!(record.row_index, 1 + n + 2);
            assert!(record.fields.keys().all(|k| table.headers.contains(k)));
        }

        assert_eq!(table.cases[0].fields["Client Name"], json!("Ada"));
        assert_eq!(table.cases[1].fields.len(), 2);
        assert!(!table.cases[1].fields.contains_key("Status"));
        assert!(table.cases[2].fields.is_empty());
    }

    #[test]
    fn cells_past_header_width_are_dropped() {
        let grid = vec![
            row(&[json!("Case Number"), json!("Client Name"), json!("Status")]),
            row(&[json!("C-1"), json!("Ada"), json!("Open"), json!("stray")]),
        ];
        let table = project_table(&grid);
        assert_eq!(table.cases[0].fields.len(), 3);
    }

    #[test]
    fn missing_header_yields_empty_table() {
        let grid = vec![row(&[json!("Case Number"), json!("Status")]), row(&[json!("C-1")])];
        assert_eq!(project_table(&grid), CaseTable::default());
        assert_eq!(project_table(&[]), CaseTable::default());
    }

    #[test]
    fn record_serializes_flat_with_row_index() {
        let grid = vec![
            row(&[json!("Case Number"), json!("Client Name"), json!("Status")]),
            row(&[json!("C-1"), json!("Ada")]),
        ];
        let table = project_table(&grid);
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(
            value,
            json!({
                "headers": ["Case Number", "Client Name", "Status"],
                "cases": [{"Case Number": "C-1", "Client Name": "Ada", "rowIndex": 2}],
            })
        );
    }

    #[test]
    fn row_index_column_is_shadowed_by_sheet_row() {
        let grid = vec![
            row(&[json!("Case Number"), json!("Client Name"), json!("Status"), json!("rowIndex")]),
            row(&[json!("C-1"), json!("Ada"), json!("Open"), json!("stale")]),
        ];
        let table = project_table(&grid);
        assert!(!table.cases[0].fields.contains_key(ROW_INDEX_KEY));

        let text = serde_json::to_string(&table.cases[0]).unwrap();
        assert_eq!(text.matches("\"rowIndex\"").count(), 1);
        assert_eq!(serde_json::to_value(&table.cases[0]).unwrap()["rowIndex"], json!(2));
    }

    #[test]
    fn rows_follow_header_order_and_null_out_falsy_fields() {
        let headers = vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()];
        let record = json!({"C": "x", "A": 7, "B": "", "D": 0, "extra": "ignored"});
        let rows = records_to_rows(&headers, &[record.as_object().unwrap().clone()]);
        assert_eq!(rows, vec![vec![json!(7), Value::Null, json!("x"), Value::Null]]);
    }

    #[test]
    fn projection_then_serialization_reproduces_cells() {
        let grid = vec![
            row(&[json!("Case Number"), json!("Client Name"), json!("Status")]),
            row(&[json!("C-1"), json!("Ada"), json!("Open")]),
            row(&[json!("C-2"), json!(""), json!("Closed")]),
            row(&[json!("C-3")]),
        ];
        let table = project_table(&grid);
        let records: Vec<_> = table.cases.iter().map(|c| c.fields.clone()).collect();
        let rows = records_to_rows(&table.headers, &records);

        assert_eq!(rows[0], grid[1]);
        assert_eq!(rows[1], vec![json!("C-2"), Value::Null, json!("Closed")]);
        assert_eq!(rows[2], vec![json!("C-3"), Value::Null, Value::Null]);
    }

    #[test]
    fn truthiness_matches_javascript() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1.5)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}
