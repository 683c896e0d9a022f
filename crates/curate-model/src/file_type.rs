#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

/// Classification of an ingested table.
///
/// `Unknown` means the table was read successfully but matched no schema;
/// `Error` means the input could not be interpreted at all. The two are
/// deliberately distinct in the status log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FileTypeLabel {
    Patients,
    Taxonomy,
    Bracken,
    Unknown,
    Error,
}

impl FileTypeLabel {
    /// The named, schema-backed types in classification priority order.
    pub const NAMED: [FileTypeLabel; 3] = [
        FileTypeLabel::Patients,
        FileTypeLabel::Taxonomy,
        FileTypeLabel::Bracken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patients => "patients",
            Self::Taxonomy => "taxonomy",
            Self::Bracken => "bracken",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for FileTypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileTypeLabel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "patients" => Ok(Self::Patients),
            "taxonomy" => Ok(Self::Taxonomy),
            "bracken" => Ok(Self::Bracken),
            "unknown" => Ok(Self::Unknown),
            "error" => Ok(Self::Error),
            other => Err(format!("unrecognized file type: {other}")),
        }
    }
}
