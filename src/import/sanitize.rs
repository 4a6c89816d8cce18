//! Row sanitization: raw cells to a validated book candidate

use std::collections::BTreeSet;

use super::{
    department::normalize_department,
    fields::{resolve_field, CanonicalField},
    merge::BookCandidate,
    sheet::{CellValue, SheetRow},
};

/// Trimmed cell text; blank cells and the literal `none` become `None`
pub fn clean_value(raw: Option<&CellValue>) -> Option<String> {
    let text = raw?.as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(trimmed.to_string())
}

/// Split a copy-ID list on `;`, `,` or `|`
pub fn parse_copies(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|list| {
        list.split(|c| matches!(c, ';' | ',' | '|'))
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Build a candidate from one row, or the reason the row is rejected.
///
/// Only the title and the department can reject a row; every other field
/// falls back to an empty value.
pub fn sanitize_row(row: &SheetRow, allowed_departments: &[String]) -> Result<BookCandidate, String> {
    let field = |f: CanonicalField| clean_value(resolve_field(row, f));

    let title = field(CanonicalField::Title).ok_or_else(|| "missing title".to_string())?;

    let raw_department = field(CanonicalField::Department);
    let invalid = |raw: &str| format!("invalid department \"{}\"", raw);
    let department = match (normalize_department(raw_department.as_deref()), &raw_department) {
        (Some(department), _) => department,
        (None, Some(raw)) => return Err(invalid(raw)),
        (None, None) => return Err("missing department".to_string()),
    };
    if !allowed_departments.contains(&department) {
        return Err(invalid(raw_department.as_deref().unwrap_or_default()));
    }

    Ok(BookCandidate {
        title,
        description: field(CanonicalField::Description).unwrap_or_default(),
        author: field(CanonicalField::Author).unwrap_or_default(),
        department,
        isbn: field(CanonicalField::Isbn),
        publisher: field(CanonicalField::Publisher).unwrap_or_default(),
        edition: field(CanonicalField::Edition).unwrap_or_default(),
        cover_url: field(CanonicalField::CoverUrl).unwrap_or_default(),
        copies: parse_copies(field(CanonicalField::Copies).as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    fn allowed() -> Vec<String> {
        Department::codes()
    }

    #[test]
    fn test_clean_value() {
        let cell = |s: &str| CellValue::Text(s.to_string());
        assert_eq!(clean_value(Some(&cell("  Knuth "))), Some("Knuth".to_string()));
        assert_eq!(clean_value(Some(&cell("None"))), None);
        assert_eq!(clean_value(Some(&cell(" NONE "))), None);
        assert_eq!(clean_value(Some(&cell("   "))), None);
        assert_eq!(clean_value(Some(&CellValue::Empty)), None);
        assert_eq!(clean_value(None), None);
        assert_eq!(clean_value(Some(&CellValue::Number(42.0))), Some("42".to_string()));
    }

    #[test]
    fn test_parse_copies() {
        let copies = parse_copies(Some(" A1; A2 ,A3|A1||"));
        let expected: BTreeSet<String> = ["A1", "A2", "A3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(copies, expected);
        assert!(parse_copies(None).is_empty());
        assert!(parse_copies(Some(" ; , ")).is_empty());
    }

    #[test]
    fn test_full_row() {
        let row = SheetRow::new(2)
            .with_text("Book Title", " Data Structures ")
            .with_text("Auther", "Weiss")
            .with_text("Dept", "cs")
            .with_text("ISBN", "978-0132576277")
            .with_text("Publisher", "None")
            .with_text("Acc No", "A1;A2");

        let candidate = sanitize_row(&row, &allowed()).unwrap();
        assert_eq!(candidate.title, "Data Structures");
        assert_eq!(candidate.author, "Weiss");
        assert_eq!(candidate.department, "CSE");
        assert_eq!(candidate.isbn.as_deref(), Some("978-0132576277"));
        assert_eq!(candidate.publisher, "");
        assert_eq!(candidate.description, "");
        assert_eq!(candidate.copies.len(), 2);
    }

    #[test]
    fn test_missing_title_rejects() {
        let row = SheetRow::new(3).with_text("Title", "none").with_text("Dept", "CSE");
        assert_eq!(sanitize_row(&row, &allowed()).unwrap_err(), "missing title");
    }

    #[test]
    fn test_missing_department_rejects() {
        let row = SheetRow::new(3).with_text("Title", "DS");
        assert_eq!(sanitize_row(&row, &allowed()).unwrap_err(), "missing department");
    }

    #[test]
    fn test_department_with_no_code_left_names_value() {
        for raw in ["--", "..."] {
            let row = SheetRow::new(4).with_text("Title", "DS").with_text("Dept", raw);
            let reason = sanitize_row(&row, &allowed()).unwrap_err();
            assert_eq!(reason, format!("invalid department \"{}\"", raw));
        }
    }

    #[test]
    fn test_invalid_department_names_value() {
        let row = SheetRow::new(3).with_text("Title", "DS").with_text("Department", "XYZ");
        let reason = sanitize_row(&row, &allowed()).unwrap_err();
        assert_eq!(reason, "invalid department \"XYZ\"");
    }

    #[test]
    fn test_allowed_set_comes_from_caller() {
        let row = SheetRow::new(2).with_text("Title", "DS").with_text("Dept", "cs");
        let only_it = vec!["IT".to_string()];
        assert!(sanitize_row(&row, &only_it).is_err());
    }
}
