use curricula_relations::{CourseCode, Semester};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Semester filter supplied by the interactive collaborator.
///
/// Only `A` and `B` are meaningful filters; anything else (including the
/// empty string) means "all semesters". Courses offered in both semesters
/// pass either filter; courses with no known semester pass only `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterFilter {
    #[default]
    All,
    Only(Semester),
}

impl SemesterFilter {
    /// Parse collaborator input ("A", "b", "" ...), permissively
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_uppercase().as_str() {
            "A" => Self::Only(Semester::A),
            "B" => Self::Only(Semester::B),
            "" => Self::All,
            other => {
                log::debug!("Ignoring unrecognized semester filter: {other}");
                Self::All
            }
        }
    }

    /// Whether a course with this semester attribute passes the filter
    #[must_use]
    pub fn admits(self, semester: Option<Semester>) -> bool {
        match self {
            Self::All => true,
            Self::Only(requested) => semester.is_some_and(|s| s.includes(requested)),
        }
    }
}

/// Classification of one non-completed course, in priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Eligibility depends on a non-code condition (standing, approval)
    SpecialRequirement { note: String },

    /// Internship placement, surfaced separately
    Internship,

    /// Every prerequisite is already completed
    Available,

    /// No prerequisites at all
    Root,

    /// Prerequisites only partially satisfied; `missing` is the gap
    FollowUp { missing: BTreeSet<CourseCode> },
}

/// Code and title, the common display pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub code: CourseCode,
    pub title: Option<String>,
}

/// A course gated on a textual condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCourse {
    pub code: CourseCode,
    pub title: Option<String>,
    pub requirement: String,
}

/// A course whose prerequisite set is not yet fully covered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpCourse {
    pub code: CourseCode,
    pub title: Option<String>,
    /// Full constraint set, for display with per-code completion status
    pub prerequisites: BTreeSet<CourseCode>,
    /// Prerequisites not yet completed
    pub missing: BTreeSet<CourseCode>,
}

/// The five categorized lists handed to the interactive collaborator,
/// each ordered by course code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub available: Vec<CourseSummary>,
    pub root: Vec<CourseSummary>,
    pub special_requirement: Vec<SpecialCourse>,
    pub internship: Vec<CourseSummary>,
    pub follow_up: Vec<FollowUpCourse>,
}

impl Recommendations {
    /// Total courses across all categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.available.len()
            + self.root.len()
            + self.special_requirement.len()
            + self.internship.len()
            + self.follow_up.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
