use crate::error::{RelationError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course code pattern: 2+ department letters followed by a 3-4 digit number.
pub(crate) static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]{2,}[0-9]{3,4}").expect("valid course code pattern"));

static CODE_PATTERN_FULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,}[0-9]{3,4}$").expect("valid course code pattern"));

/// Validated course code (e.g., "SDSC2003", "MA2510").
///
/// Codes are the identity of every node and edge endpoint in the course
/// graph. Parsing trims and upper-cases its input before validating, so
/// user-supplied codes like " ma2510 " normalize to the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(String);

impl CourseCode {
    /// Parse and normalize a course code
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        if CODE_PATTERN_FULL.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(RelationError::InvalidCode(raw.to_string()))
        }
    }

    /// Code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CourseCode {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Semester in which a course is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    A,
    B,
    /// Offered in both semesters ("A, B" in source data)
    #[serde(rename = "A, B", alias = "Both")]
    Both,
}

impl Semester {
    /// Detect the semester from a raw offering-term string.
    ///
    /// Accepts both the normalized forms ("A", "B", "A, B") and the full
    /// catalogue text ("Semester A 2025/26"). Returns `None` when the text
    /// names no semester.
    #[must_use]
    pub fn from_offering_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        match trimmed {
            "A" => return Some(Self::A),
            "B" => return Some(Self::B),
            "A, B" | "Both" => return Some(Self::Both),
            _ => {}
        }

        let has_a = trimmed.contains("Semester A");
        let has_b = trimmed.contains("Semester B");
        match (has_a, has_b) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::A),
            (false, true) => Some(Self::B),
            (false, false) => None,
        }
    }

    /// Check whether a course offered in `self` is available when querying
    /// for `requested`. `Both` passes either filter.
    #[must_use]
    pub const fn includes(self, requested: Self) -> bool {
        matches!(
            (self, requested),
            (Self::Both, _) | (Self::A, Self::A) | (Self::B, Self::B)
        )
    }

    /// Human-readable form matching the source catalogue ("A", "B", "A, B")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::Both => "A, B",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-course input supplied by the scraper collaborator.
///
/// Everything except the code is optional: course detail pages are
/// inconsistently filled, and a record may even fail to resolve entirely.
/// The free-text relation fields are carried raw; extraction happens when
/// the graph is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Raw course code as scraped (normalized during graph build)
    pub code: String,

    /// Course title
    #[serde(default)]
    pub title: Option<String>,

    /// Offering academic unit
    #[serde(default)]
    pub offering_unit: Option<String>,

    /// Credit units (kept as text, e.g., "3" or "0")
    #[serde(default)]
    pub credit_units: Option<String>,

    /// Course duration
    #[serde(default)]
    pub duration: Option<String>,

    /// Raw offering-term text (e.g., "Semester A 2025/26")
    #[serde(default)]
    pub semester: Option<String>,

    /// Raw prerequisite text
    #[serde(default)]
    pub prerequisites: Option<String>,

    /// Raw exclusive-courses text
    #[serde(default)]
    pub exclusions: Option<String>,

    /// Raw special-requirement text
    #[serde(default)]
    pub special_requirement: Option<String>,

    /// Internship indicator reported by the scraper
    #[serde(default)]
    pub internship: bool,
}

impl CourseRecord {
    /// Create a record with a code only
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    /// Builder: set title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set offering unit
    #[must_use]
    pub fn offering_unit(mut self, unit: impl Into<String>) -> Self {
        self.offering_unit = Some(unit.into());
        self
    }

    /// Builder: set credit units
    #[must_use]
    pub fn credit_units(mut self, credits: impl Into<String>) -> Self {
        self.credit_units = Some(credits.into());
        self
    }

    /// Builder: set raw semester text
    #[must_use]
    pub fn semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = Some(semester.into());
        self
    }

    /// Builder: set raw prerequisite text
    #[must_use]
    pub fn prerequisites(mut self, text: impl Into<String>) -> Self {
        self.prerequisites = Some(text.into());
        self
    }

    /// Builder: set raw exclusions text
    #[must_use]
    pub fn exclusions(mut self, text: impl Into<String>) -> Self {
        self.exclusions = Some(text.into());
        self
    }

    /// Builder: set raw special-requirement text
    #[must_use]
    pub fn special_requirement(mut self, text: impl Into<String>) -> Self {
        self.special_requirement = Some(text.into());
        self
    }

    /// Builder: mark as an internship course
    #[must_use]
    pub const fn internship(mut self, flag: bool) -> Self {
        self.internship = flag;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_valid_codes() {
        assert_eq!(CourseCode::parse("CS1315").unwrap().as_str(), "CS1315");
        assert_eq!(CourseCode::parse("SDSC2003").unwrap().as_str(), "SDSC2003");
        assert_eq!(CourseCode::parse("GE1401").unwrap().as_str(), "GE1401");
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(CourseCode::parse(" ma2510 ").unwrap().as_str(), "MA2510");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        assert!(CourseCode::parse("C1315").is_err());
        assert!(CourseCode::parse("CS13").is_err());
        assert!(CourseCode::parse("CS13155").is_err());
        assert!(CourseCode::parse("Year 3").is_err());
        assert!(CourseCode::parse("").is_err());
    }

    #[test]
    fn test_code_ordering_is_lexicographic() {
        let mut codes = vec![
            CourseCode::parse("SDSC2003").unwrap(),
            CourseCode::parse("CS1315").unwrap(),
            CourseCode::parse("MA2510").unwrap(),
        ];
        codes.sort();
        let ordered: Vec<&str> = codes.iter().map(CourseCode::as_str).collect();
        assert_eq!(ordered, vec!["CS1315", "MA2510", "SDSC2003"]);
    }

    #[test]
    fn test_semester_from_offering_text() {
        assert_eq!(
            Semester::from_offering_text("Semester A 2025/26"),
            Some(Semester::A)
        );
        assert_eq!(
            Semester::from_offering_text("Semester B 2025/26"),
            Some(Semester::B)
        );
        assert_eq!(
            Semester::from_offering_text("Semester A 2025/26, Semester B 2025/26"),
            Some(Semester::Both)
        );
        assert_eq!(Semester::from_offering_text("A, B"), Some(Semester::Both));
        assert_eq!(Semester::from_offering_text("Summer Term"), None);
    }

    #[test]
    fn test_semester_includes() {
        assert!(Semester::Both.includes(Semester::A));
        assert!(Semester::Both.includes(Semester::B));
        assert!(Semester::A.includes(Semester::A));
        assert!(!Semester::A.includes(Semester::B));
        assert!(!Semester::B.includes(Semester::A));
    }

    #[test]
    fn test_semester_serde_matches_source_form() {
        let json = serde_json::to_string(&Semester::Both).unwrap();
        assert_eq!(json, "\"A, B\"");
        let parsed: Semester = serde_json::from_str("\"A, B\"").unwrap();
        assert_eq!(parsed, Semester::Both);
    }

    #[test]
    fn test_record_builder() {
        let record = CourseRecord::new("CS1315")
            .title("Programming Fundamentals")
            .semester("Semester A 2025/26")
            .prerequisites("Nil");
        assert_eq!(record.code, "CS1315");
        assert_eq!(record.title.as_deref(), Some("Programming Fundamentals"));
        assert_eq!(record.prerequisites.as_deref(), Some("Nil"));
        assert!(!record.internship);
    }
}
