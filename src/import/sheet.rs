//! Spreadsheet decoding
//!
//! Turns an uploaded workbook (xlsx/xls/ods via calamine, or csv) into
//! header-keyed rows. Only the first sheet is read; the first row is the
//! header row.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use indexmap::IndexMap;
use thiserror::Error;

/// Structural failures: the upload cannot be turned into rows at all
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("Unable to read spreadsheet: {0}")]
    Unreadable(String),

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Spreadsheet contains no data rows")]
    Empty,
}

/// Raw cell content as read from the sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Textual form of the cell; `None` for empty cells.
    ///
    /// Integral numbers are rendered without a fractional part so numeric
    /// ISBNs and accession numbers survive.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    Some(format!("{}", *f as i64))
                } else {
                    Some(f.to_string())
                }
            }
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// One data row, keyed by header text in column order
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based line number in the sheet (the header is line 1)
    pub line: usize,
    pub cells: IndexMap<String, CellValue>,
}

impl SheetRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            cells: IndexMap::new(),
        }
    }

    /// Builder used by callers that assemble rows by hand
    pub fn with(mut self, header: &str, value: CellValue) -> Self {
        self.cells.insert(header.to_string(), value);
        self
    }

    pub fn with_text(self, header: &str, value: &str) -> Self {
        self.with(header, CellValue::Text(value.to_string()))
    }
}

/// Decode an uploaded spreadsheet into data rows
pub fn parse_workbook(bytes: &[u8], file_name: Option<&str>) -> Result<Vec<SheetRow>, SheetError> {
    let is_csv = file_name
        .map(|name| name.to_lowercase().ends_with(".csv"))
        .unwrap_or(false);

    let table = if is_csv {
        read_csv(bytes)?
    } else {
        read_workbook(bytes)?
    };

    let rows = rows_from_table(table);
    if rows.is_empty() {
        return Err(SheetError::Empty);
    }
    Ok(rows)
}

/// A decoded sheet: (line number, cells) for every physical row
type Table = Vec<(usize, Vec<CellValue>)>;

fn read_workbook(bytes: &[u8]) -> Result<Table, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SheetError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoSheets)?
        .map_err(|e| SheetError::Unreadable(e.to_string()))?;

    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    Ok(range
        .rows()
        .enumerate()
        .map(|(i, row)| (first_line + i, row.iter().map(CellValue::from).collect()))
        .collect())
}

fn read_csv(bytes: &[u8]) -> Result<Table, SheetError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut table = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| SheetError::Unreadable(e.to_string()))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 1);
        let cells = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        table.push((line, cells));
    }
    Ok(table)
}

/// Header cells become keys; blank headers drop their column and
/// duplicates get `_1`, `_2`, ... suffixes.
fn header_keys(cells: &[CellValue]) -> Vec<Option<String>> {
    let mut seen: Vec<String> = Vec::new();
    cells
        .iter()
        .map(|cell| {
            let name = cell.as_text()?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            let mut key = name.clone();
            let mut n = 0;
            while seen.contains(&key) {
                n += 1;
                key = format!("{}_{}", name, n);
            }
            seen.push(key.clone());
            Some(key)
        })
        .collect()
}

fn rows_from_table(table: Table) -> Vec<SheetRow> {
    let mut lines = table.into_iter();
    let Some((_, header)) = lines.next() else {
        return Vec::new();
    };
    let keys = header_keys(&header);

    lines
        .filter(|(_, cells)| cells.iter().any(|c| !c.is_empty()))
        .map(|(line, cells)| {
            let mut row = SheetRow::new(line);
            for (key, cell) in keys.iter().zip(cells) {
                if let Some(key) = key {
                    row.cells.insert(key.clone(), cell);
                }
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_csv_rows_are_keyed_by_header() {
        let csv = "Title,Dept,Acc No\nDS,cs,A1\n,,\nOS,IT,\"B1;B2\"\n";
        let rows = parse_workbook(csv.as_bytes(), Some("books.CSV")).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].cells["Title"], CellValue::Text("DS".to_string()));
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].cells["Acc No"], CellValue::Text("B1;B2".to_string()));
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let csv = "title,,title\nA,ignored,B\n";
        let rows = parse_workbook(csv.as_bytes(), Some("x.csv")).unwrap();
        let keys: Vec<&String> = rows[0].cells.keys().collect();
        assert_eq!(keys, vec!["title", "title_1"]);
        assert_eq!(rows[0].cells["title_1"], CellValue::Text("B".to_string()));
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let err = parse_workbook(b"title,department\n", Some("x.csv")).unwrap_err();
        assert_eq!(err, SheetError::Empty);
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = parse_workbook(b"definitely not a workbook", Some("x.xlsx")).unwrap_err();
        assert!(matches!(err, SheetError::Unreadable(_)));
    }

    #[test]
    fn test_xlsx_numbers_keep_integral_form() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Title").unwrap();
        sheet.write_string(0, 1, "ISBN").unwrap();
        sheet.write_string(1, 0, "Compilers").unwrap();
        sheet.write_number(1, 1, 9780321486813.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_workbook(&bytes, Some("books.xlsx")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);
        assert_eq!(
            rows[0].cells["ISBN"].as_text(),
            Some("9780321486813".to_string())
        );
    }

    #[test]
    fn test_cell_text_forms() {
        assert_eq!(CellValue::Number(2.5).as_text(), Some("2.5".to_string()));
        assert_eq!(CellValue::Number(3.0).as_text(), Some("3".to_string()));
        assert_eq!(CellValue::Empty.as_text(), None);
        assert!(CellValue::Text(String::new()).is_empty());
    }
}
