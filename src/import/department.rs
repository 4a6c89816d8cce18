//! Department code normalization

/// Strip separators and upper-case: `" c.s-e "` becomes `"CSE"`
fn clean_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '_' | '-' | '.'))
        .collect::<String>()
        .to_uppercase()
}

/// Canonical code for a cleaned department alias
fn alias(cleaned: &str) -> Option<&'static str> {
    let canonical = match cleaned {
        "CS" | "CSE" | "COMPUTERSCIENCE" => "CSE",
        "IT" | "INFORMATIONTECHNOLOGY" => "IT",
        "EC" | "ECE" => "ECE",
        "EE" | "EEE" => "EEE",
        "ME" | "MECH" | "MECHANICAL" => "MECH",
        "CE" | "CIVIL" => "CIVIL",
        "AGRI" | "AGRICULTURE" => "AGRICULTURE",
        "MBA" => "MBA",
        "MCA" => "MCA",
        "BBA" => "BBA",
        "BCA" => "BCA",
        "BCOM" => "B.COM",
        "BSC" => "B.SC",
        "BPHARM" => "B.PHARM",
        "BARCH" => "B.ARCH",
        "BDES" => "B.DES",
        "BED" => "B.ED",
        "BLLB" => "B.LLB",
        "BPT" => "B.PT",
        "BHM" => "B.HM",
        "BMS" => "B.MS",
        "BAS" => "B.AS",
        "BFA" => "B.FA",
        "BFT" => "B.FT",
        _ => return None,
    };
    Some(canonical)
}

/// Map a free-text department onto a canonical code.
///
/// Unknown codes pass through cleaned (no separators, upper-case); the
/// caller decides whether the result is an accepted department.
pub fn normalize_department(raw: Option<&str>) -> Option<String> {
    let cleaned = clean_code(raw?);
    if cleaned.is_empty() {
        return None;
    }
    Some(alias(&cleaned).map(String::from).unwrap_or(cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> Option<String> {
        normalize_department(Some(raw))
    }

    #[test]
    fn test_cse_spellings() {
        for raw in ["cs", "CS", "C.S.E", "cse", " c-s_e "] {
            assert_eq!(norm(raw).as_deref(), Some("CSE"), "input {raw:?}");
        }
    }

    #[test]
    fn test_dotted_codes() {
        assert_eq!(norm("B.Com").as_deref(), Some("B.COM"));
        assert_eq!(norm("b pharm").as_deref(), Some("B.PHARM"));
        assert_eq!(norm("Agri").as_deref(), Some("AGRICULTURE"));
        assert_eq!(norm("me").as_deref(), Some("MECH"));
    }

    #[test]
    fn test_unknown_passes_through_cleaned() {
        assert_eq!(norm("xyz").as_deref(), Some("XYZ"));
        assert_eq!(norm("Bio.Tech").as_deref(), Some("BIOTECH"));
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(normalize_department(None), None);
        assert_eq!(norm(""), None);
        assert_eq!(norm(" .-_ "), None);
    }
}
