// CSV/TSV import and result export

use std::io::{Read, Write};
use std::path::Path;

use adcheck_recon::{ResultRecord, RESULT_HEADERS};

/// Read a delimited file into raw rows, sniffing the delimiter.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<String>>, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    grid_from_string(&content, delimiter)
}

pub fn read_grid_tsv(path: &Path) -> Result<Vec<Vec<String>>, String> {
    let content = read_file_as_utf8(path)?;
    grid_from_string(&content, b'\t')
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
///
/// Ad platform exports start with a title line and a date-range line before
/// the header, so lines with a single field are ignored when picking the
/// reference count.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(12).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Reference count: first line that splits into more than one field
        let Some(target) = counts.iter().copied().find(|&c| c > 1) else {
            continue;
        };

        // Higher field count breaks ties, more columns = more likely real delimiter
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    let mut content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    // Excel writes a BOM on "CSV UTF-8" exports
    if content.starts_with('\u{feff}') {
        content.drain(..'\u{feff}'.len_utf8());
    }
    Ok(content)
}

fn grid_from_string(content: &str, delimiter: u8) -> Result<Vec<Vec<String>>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Write the result table as CSV.
pub fn write_records<W: Write>(records: &[ResultRecord], writer: W) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(RESULT_HEADERS).map_err(|e| e.to_string())?;
    for record in records {
        writer.write_record(record.cells()).map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

pub fn export_records(records: &[ResultRecord], path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    write_records(records, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use adcheck_recon::{RecordKind, Status};

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Name;Age;City\nAlice;30;Paris\nBob;25;London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Name,Age,City\nAlice,30,Paris\nBob,25,London\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Name\tAge\tCity\nAlice\t30\tParis\nBob\t25\tLondon\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_pipe_delimiter() {
        let content = "Name|Age|City\nAlice|30|Paris\nBob|25|London\n";
        assert_eq!(sniff_delimiter(content), b'|');
    }

    #[test]
    fn test_sniff_skips_title_lines() {
        let content = "Ad group report\nAll time\nCustomer ID;Campaign;Ad group\n1;A;x\n2;B;y\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content = "Name;Address;City\n\
                       \"Doe, Jane\";\"123 Main St, Apt 4\";Paris\n\
                       Bob;\"456 Elm\";London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        // "Café" with 0xE9 for é
        fs::write(&path, b"Account name\nCaf\xe9\n").unwrap();
        let content = read_file_as_utf8(&path).unwrap();
        assert_eq!(content, "Account name\nCafé\n");
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{feff}Customer ID\n1\n").unwrap();
        let grid = read_grid(&path).unwrap();
        assert_eq!(grid[0][0], "Customer ID");
    }

    #[test]
    fn test_read_grid_keeps_ragged_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let text = "Title\n\"Jan 1, 2024 - Jan 31, 2024\"\nCustomer ID,Account name\n1,Acme\n";
        fs::write(&path, text).unwrap();
        let grid = read_grid(&path).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0], vec!["Title"]);
        assert_eq!(grid[1], vec!["Jan 1, 2024 - Jan 31, 2024"]);
        assert_eq!(grid[3], vec!["1", "Acme"]);
    }

    #[test]
    fn test_write_records() {
        let records = vec![ResultRecord {
            account_name: "Acme, Inc".into(),
            customer_id: "100".into(),
            campaign: "Spring".into(),
            ad_group: "Other Deal 2024".into(),
            ads_status: Status::Active,
            keywords_status: Status::NotActive,
            kind: RecordKind::Matched,
        }];
        let mut out = Vec::new();
        write_records(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Account name,Customer ID,Campaign,Ad group,ads,keywords\n\
             \"Acme, Inc\",100,Spring,Other Deal 2024,active,not active\n"
        );
    }
}
