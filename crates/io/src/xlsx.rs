// Excel import (xlsx, xlsm, xls, xlsb, ods) and result export (xlsx)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use adcheck_recon::{ResultRecord, RESULT_HEADERS};

/// Sheet name used for the exported result table.
pub const REPORT_SHEET: &str = "Report";

/// Read the first sheet of a workbook into raw rows.
///
/// Rows and columns keep their sheet positions: if the used range starts
/// below row 1 or right of column A, leading rows and cells are empty.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<String>>, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let Some(first) = sheet_names.first() else {
        return Err("Excel file contains no sheets".to_string());
    };

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| format!("Failed to read sheet '{}': {}", first, e))?;

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut grid: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_to_string));
        grid.push(cells);
    }
    Ok(grid)
}

/// Stringify a cell the way it reads in the spreadsheet.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Format nicely: integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => {
            let text = if *b { "TRUE" } else { "FALSE" };
            text.to_string()
        }
        Data::Error(e) => format!("#{:?}", e),
        // Serial number; dates carry no meaning for the check
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Write the result table to an xlsx file with a bold header row.
pub fn export_records(records: &[ResultRecord], path: &Path) -> Result<(), String> {
    let mut xlsx_workbook = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = xlsx_workbook
        .add_worksheet()
        .set_name(REPORT_SHEET)
        .map_err(|e| format!("Failed to create sheet '{}': {}", REPORT_SHEET, e))?;

    for (col, header) in RESULT_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in record.cells().iter().enumerate() {
            worksheet
                .write_string(row, col as u16, *value)
                .map_err(|e| format!("Failed to write row {}: {}", row, e))?;
        }
    }

    xlsx_workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok(())
}
