//! Turning a report file into a `Table`: skip the leading title rows, take
//! the next row as the header, keep the rest as data.

use std::path::Path;

use log::info;

use adcheck_recon::{Table, TableKind};

/// Extensions handled by the workbook reader.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Load one report file, dispatching on its extension.
pub fn load_table(path: &Path, kind: TableKind, skip_rows: usize) -> Result<Table, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let grid = match ext.as_str() {
        e if WORKBOOK_EXTENSIONS.contains(&e) => crate::xlsx::read_grid(path)?,
        "tsv" => crate::csv::read_grid_tsv(path)?,
        "csv" | "txt" => crate::csv::read_grid(path)?,
        "" => {
            return Err(format!(
                "{}: no file extension (supported: xlsx, xlsm, xls, xlsb, ods, csv, tsv, txt)",
                path.display()
            ))
        }
        other => {
            return Err(format!(
                "{}: unsupported format '.{other}' \
                 (supported: xlsx, xlsm, xls, xlsb, ods, csv, tsv, txt)",
                path.display()
            ))
        }
    };

    let table = table_from_grid(kind, grid, skip_rows)
        .map_err(|e| format!("{}: {e}", path.display()))?;
    info!(
        "loaded {} from {}: {} rows x {} columns",
        kind,
        path.display(),
        table.rows.len(),
        table.headers.len()
    );
    Ok(table)
}

/// Build a table from raw rows. The first `skip_rows` rows are discarded and
/// the next one is the header. Blank data rows are dropped.
pub fn table_from_grid(
    kind: TableKind,
    grid: Vec<Vec<String>>,
    skip_rows: usize,
) -> Result<Table, String> {
    let mut rows = grid.into_iter().skip(skip_rows);
    let Some(header_row) = rows.next() else {
        return Err(format!("no header row after skipping {skip_rows} row(s)"));
    };

    let headers: Vec<String> = header_row.iter().map(|h| h.trim().to_string()).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(format!("header row {} is empty", skip_rows + 1));
    }

    let mut table = Table::new(kind, headers);
    for row in rows {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        table.push_row(row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_skip_rows_then_header() {
        let g = grid(&[
            &["Keyword report"],
            &["All time"],
            &[" Keyword ", "Ad group ID"],
            &["shoes", "AG1"],
            &["", "  "],
            &["boots"],
        ]);
        let table = table_from_grid(TableKind::Keywords, g, 2).unwrap();
        assert_eq!(table.headers, vec!["Keyword", "Ad group ID"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["boots", ""]);
    }

    #[test]
    fn test_zero_skip_rows() {
        let g = grid(&[&["Customer ID"], &["1"]]);
        let table = table_from_grid(TableKind::Accounts, g, 0).unwrap();
        assert_eq!(table.column("Customer ID"), Some(0));
        assert_eq!(table.shape().rows, 1);
    }

    #[test]
    fn test_missing_header_row() {
        let g = grid(&[&["title"], &["range"]]);
        let err = table_from_grid(TableKind::Accounts, g, 2).unwrap_err();
        assert!(err.contains("no header row"));
    }

    #[test]
    fn test_blank_header_row() {
        let g = grid(&[&["title"], &["range"], &["", " "], &["1", "2"]]);
        let err = table_from_grid(TableKind::Accounts, g, 2).unwrap_err();
        assert!(err.contains("header row 3 is empty"));
    }

    #[test]
    fn test_load_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        let text = "Accounts\n\"Jan 1, 2024 - Jan 31, 2024\"\n\
                    Customer ID,Account name\n123-456-7890,Acme\n";
        fs::write(&path, text).unwrap();

        let table = load_table(&path, TableKind::Accounts, 2).unwrap();
        assert_eq!(table.kind, TableKind::Accounts);
        assert_eq!(table.headers, vec!["Customer ID", "Account name"]);
        assert_eq!(table.rows, vec![vec!["123-456-7890", "Acme"]]);
    }

    #[test]
    fn test_load_xlsx() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keywords.XLSX");

        let mut wb = rust_xlsxwriter::Workbook::new();
        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "Keyword report").unwrap();
        ws.write_string(1, 0, "All time").unwrap();
        ws.write_string(2, 0, "Keyword").unwrap();
        ws.write_string(2, 1, "Ad group ID").unwrap();
        ws.write_string(3, 0, "shoes").unwrap();
        ws.write_number(3, 1, 987654.0).unwrap();
        wb.save(&path).unwrap();

        let table = load_table(&path, TableKind::Keywords, 2).unwrap();
        assert_eq!(table.headers, vec!["Keyword", "Ad group ID"]);
        assert_eq!(table.rows, vec![vec!["shoes", "987654"]]);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, "x").unwrap();
        let err = load_table(&path, TableKind::AdGroups, 2).unwrap_err();
        assert!(err.contains("unsupported format '.pdf'"));
    }

    #[test]
    fn test_corrupt_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, "not a zip").unwrap();
        let err = load_table(&path, TableKind::AdGroups, 2).unwrap_err();
        assert!(err.contains("Failed to open Excel file"));
    }
}
