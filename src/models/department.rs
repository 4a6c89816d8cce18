//! Department enumeration accepted by the book schema

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Academic department owning a book.
///
/// The `books.department` CHECK constraint lists exactly these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Department {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "ECE")]
    Ece,
    #[serde(rename = "EEE")]
    Eee,
    #[serde(rename = "MECH")]
    Mech,
    #[serde(rename = "CIVIL")]
    Civil,
    #[serde(rename = "MBA")]
    Mba,
    #[serde(rename = "MCA")]
    Mca,
    #[serde(rename = "BBA")]
    Bba,
    #[serde(rename = "BCA")]
    Bca,
    #[serde(rename = "B.COM")]
    BCom,
    #[serde(rename = "B.SC")]
    BSc,
    #[serde(rename = "B.PHARM")]
    BPharm,
    #[serde(rename = "B.ARCH")]
    BArch,
    #[serde(rename = "B.DES")]
    BDes,
    #[serde(rename = "B.ED")]
    BEd,
    #[serde(rename = "B.LLB")]
    BLlb,
    #[serde(rename = "B.PT")]
    BPt,
    #[serde(rename = "B.HM")]
    BHm,
    #[serde(rename = "B.MS")]
    BMs,
    #[serde(rename = "B.AS")]
    BAs,
    #[serde(rename = "B.FA")]
    BFa,
    #[serde(rename = "B.FT")]
    BFt,
    #[serde(rename = "AGRICULTURE")]
    Agriculture,
}

impl Department {
    pub const ALL: [Department; 24] = [
        Department::Cse,
        Department::It,
        Department::Ece,
        Department::Eee,
        Department::Mech,
        Department::Civil,
        Department::Mba,
        Department::Mca,
        Department::Bba,
        Department::Bca,
        Department::BCom,
        Department::BSc,
        Department::BPharm,
        Department::BArch,
        Department::BDes,
        Department::BEd,
        Department::BLlb,
        Department::BPt,
        Department::BHm,
        Department::BMs,
        Department::BAs,
        Department::BFa,
        Department::BFt,
        Department::Agriculture,
    ];

    /// Code stored in the database
    pub fn as_code(&self) -> &'static str {
        match self {
            Department::Cse => "CSE",
            Department::It => "IT",
            Department::Ece => "ECE",
            Department::Eee => "EEE",
            Department::Mech => "MECH",
            Department::Civil => "CIVIL",
            Department::Mba => "MBA",
            Department::Mca => "MCA",
            Department::Bba => "BBA",
            Department::Bca => "BCA",
            Department::BCom => "B.COM",
            Department::BSc => "B.SC",
            Department::BPharm => "B.PHARM",
            Department::BArch => "B.ARCH",
            Department::BDes => "B.DES",
            Department::BEd => "B.ED",
            Department::BLlb => "B.LLB",
            Department::BPt => "B.PT",
            Department::BHm => "B.HM",
            Department::BMs => "B.MS",
            Department::BAs => "B.AS",
            Department::BFa => "B.FA",
            Department::BFt => "B.FT",
            Department::Agriculture => "AGRICULTURE",
        }
    }

    /// All codes, in schema order
    pub fn codes() -> Vec<String> {
        Self::ALL.iter().map(|d| d.as_code().to_string()).collect()
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_code() == s)
            .ok_or_else(|| format!("Unknown department: {}", s))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}
