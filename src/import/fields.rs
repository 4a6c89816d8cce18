//! Column header resolution
//!
//! Maps whatever headers a spreadsheet uses onto the canonical book fields.

use super::sheet::{CellValue, SheetRow};

/// Book attribute a column can feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Title,
    Description,
    Author,
    Department,
    Isbn,
    Publisher,
    Edition,
    CoverUrl,
    Copies,
}

impl CanonicalField {
    /// Accepted header spellings, in priority order, already normalized
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Title => &["title", "book_title", "book_name", "name"],
            CanonicalField::Description => &["description", "desc", "summary", "about"],
            CanonicalField::Author => &["author", "auther", "authors", "writer", "author_name"],
            CanonicalField::Department => {
                &["department", "dept", "dept_code", "branch", "department_code"]
            }
            CanonicalField::Isbn => &["isbn", "isbn_no", "isbn_number", "isbn13", "isbn_10"],
            CanonicalField::Publisher => {
                &["publisher", "publication", "publisher_name", "publishers"]
            }
            CanonicalField::Edition => &["edition", "ed", "edition_no", "version"],
            CanonicalField::CoverUrl => {
                &["cover_url", "cover", "cover_image", "image", "image_url"]
            }
            CanonicalField::Copies => &[
                "copies",
                "copy_ids",
                "acc",
                "acc_no",
                "accession",
                "accession_no",
                "accession_number",
                "accession_numbers",
            ],
        }
    }
}

/// Lower-case a header and collapse whitespace runs into one underscore
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// First non-empty cell whose header is an alias of `field`.
///
/// Aliases are tried in priority order; for each alias, columns are
/// scanned left to right.
pub fn resolve_field(row: &SheetRow, field: CanonicalField) -> Option<&CellValue> {
    let normalized: Vec<(String, &CellValue)> = row
        .cells
        .iter()
        .map(|(header, value)| (normalize_header(header), value))
        .collect();

    field.aliases().iter().find_map(|alias| {
        normalized
            .iter()
            .find(|(header, value)| header == alias && !value.is_empty())
            .map(|(_, value)| *value)
    })
}
