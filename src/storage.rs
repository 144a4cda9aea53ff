//! Reading planting sheets (workbooks or CSV) and writing filtered tables back out.

use crate::error::PlantingError;
use crate::models::{PlantingRecord, PlantingTable};
use anyhow::Result;
use calamine::{Data, Reader, open_workbook_auto};
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, warn};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header of the year column (matched trimmed, case-insensitively).
pub const YEAR_COLUMN: &str = "Year";

/// Load a planting sheet. The format follows the extension: `.csv` is read as CSV,
/// `.xlsx/.xlsm/.xlsb/.xls/.ods` as a workbook (first worksheet).
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<PlantingTable, PlantingError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PlantingError::FileNotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let grid = match ext.as_str() {
        "csv" => read_csv_grid(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_grid(path)?,
        _ => return Err(PlantingError::UnsupportedFormat(ext)),
    };
    let table = table_from_grid(grid)?;
    debug!(
        "loaded {} rows, {} species columns from {}",
        table.len(),
        table.species.len(),
        path.display()
    );
    Ok(table)
}

fn read_csv_grid(path: &Path) -> Result<Vec<Vec<String>>, PlantingError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(|c| c.trim().to_string()).collect());
    }
    Ok(grid)
}

fn read_workbook_grid(path: &Path) -> Result<Vec<Vec<String>>, PlantingError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| PlantingError::Workbook(e.to_string()))?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(PlantingError::EmptySheet)?;
    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| PlantingError::Workbook(e.to_string()))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Build a table from raw cells. Row 0 is the header; fully blank rows are skipped.
fn table_from_grid(grid: Vec<Vec<String>>) -> Result<PlantingTable, PlantingError> {
    let mut rows = grid.into_iter();
    let header = rows.next().ok_or(PlantingError::EmptySheet)?;
    let header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();

    let year_idx = header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(YEAR_COLUMN))
        .ok_or_else(|| PlantingError::MissingColumn(YEAR_COLUMN.to_string()))?;

    // Unnamed columns (stray cells right of the data) are not species.
    let species_cols: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != year_idx && !h.is_empty())
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut records = Vec::new();
    for (offset, cells) in rows.enumerate() {
        // 1-based sheet row, counting the header
        let row_no = offset + 2;
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let year_raw = cells.get(year_idx).map(String::as_str).unwrap_or("");
        let year = parse_whole(year_raw)
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| PlantingError::InvalidCell {
                row: row_no,
                column: header[year_idx].clone(),
                value: year_raw.to_string(),
            })?;

        let mut record = PlantingRecord::new(year);
        for (idx, name) in &species_cols {
            let raw = cells.get(*idx).map(|c| c.trim()).unwrap_or("");
            let count = if raw.is_empty() {
                warn!("blank {name:?} count in row {row_no} (year {year}) read as 0");
                0
            } else {
                parse_whole(raw)
                    .and_then(|v| u64::try_from(v).ok())
                    .ok_or_else(|| PlantingError::InvalidCell {
                        row: row_no,
                        column: name.clone(),
                        value: raw.to_string(),
                    })?
            };
            record.counts.insert(name.clone(), count);
        }
        records.push(record);
    }

    Ok(PlantingTable::new(
        species_cols.into_iter().map(|(_, n)| n).collect(),
        records,
    ))
}

/// Parse an integral number written either as `600` or as a float like `600.0`.
fn parse_whole(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Neutralise spreadsheet formulas in free-text cells.
fn safe_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Save a table as CSV: `Year` then one column per species, in table order.
pub fn save_csv<P: AsRef<Path>>(table: &PlantingTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec![YEAR_COLUMN.to_string()];
    header.extend(table.species.iter().map(|s| safe_cell(s)));
    wtr.write_record(&header)?;
    for row in &table.rows {
        let mut rec = vec![row.year.to_string()];
        rec.extend(table.species.iter().map(|s| row.count(s).to_string()));
        wtr.write_record(&rec)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a table as a pretty JSON array of `{year, counts}` rows.
pub fn save_json<P: AsRef<Path>>(table: &PlantingTable, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&table.rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn csv_file(body: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_csv_with_float_cells_and_blanks() {
        let f = csv_file("Year,Maple,Spruce\n1920,600.0,400\n\n1921,,12\n");
        let t = load_table(f.path()).unwrap();
        assert_eq!(t.species, vec!["Maple", "Spruce"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows[0].count("Maple"), 600);
        assert_eq!(t.rows[1].count("Maple"), 0);
        assert_eq!(t.rows[1].count("Spruce"), 12);
    }

    #[test]
    fn year_header_is_case_insensitive() {
        let f = csv_file(" year ,Elm\n1950,3\n");
        let t = load_table(f.path()).unwrap();
        assert_eq!(t.years(), vec![1950]);
    }

    #[test]
    fn missing_year_column() {
        let f = csv_file("Date,Elm\n1950,3\n");
        let err = load_table(f.path()).unwrap_err();
        assert!(matches!(err, PlantingError::MissingColumn(ref c) if c == "Year"));
    }

    #[test]
    fn negative_and_fractional_counts_rejected() {
        let f = csv_file("Year,Elm\n1950,-3\n");
        assert!(matches!(
            load_table(f.path()),
            Err(PlantingError::InvalidCell { row: 2, .. })
        ));
        let f = csv_file("Year,Elm\n1950,2.5\n");
        assert!(matches!(
            load_table(f.path()),
            Err(PlantingError::InvalidCell { .. })
        ));
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
    }

    #[test]
    fn reads_first_worksheet_of_xlsx() {
        let t = load_table(fixture("planting.xlsx")).unwrap();
        // header is "YEAR"; the second sheet ("Notes", Year/Oak) is ignored
        assert_eq!(t.species, vec!["Maple", "Elm", "Ash"]);
        assert_eq!(t.years(), vec![1920, 1921, 1922]);
        assert_eq!(t.rows[0].count("Maple"), 600);
        assert_eq!(t.rows[0].count("Elm"), 400);
        assert_eq!(t.rows[1].count("Maple"), 650);
        assert_eq!(t.rows[1].count("Elm"), 0);
        assert_eq!(t.rows[2].total_of(&["Maple", "Elm", "Ash"]), 1100);
        assert!(!t.has_column("Oak"));
    }

    #[test]
    fn empty_worksheet_is_rejected() {
        assert!(matches!(
            load_table(fixture("empty.xlsx")),
            Err(PlantingError::EmptySheet)
        ));
    }

    #[test]
    fn numeric_workbook_cells_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(1920.0)), "1920");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String(" Maple ".into())), "Maple");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn unknown_extension_and_missing_file() {
        let f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(
            load_table(f.path()),
            Err(PlantingError::UnsupportedFormat(ref e)) if e == "txt"
        ));
        assert!(matches!(
            load_table("no/such/Calgary.xlsx"),
            Err(PlantingError::FileNotFound(_))
        ));
    }

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let t = PlantingTable::new(
            vec!["Maple".into(), "Spruce".into()],
            vec![PlantingRecord::new(1920).with("Maple", 600).with("Spruce", 400)],
        );
        save_csv(&t, &csvp).unwrap();
        save_json(&t, &jsonp).unwrap();
        let text = std::fs::read_to_string(&csvp).unwrap();
        assert_eq!(text.lines().next().unwrap(), "Year,Maple,Spruce");
        assert_eq!(text.lines().nth(1).unwrap(), "1920,600,400");
        assert!(jsonp.exists());
    }
}
