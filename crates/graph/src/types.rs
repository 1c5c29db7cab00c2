use crate::error::{GraphError, Result};
use curricula_relations::{CourseCode, Semester};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Label for one pipeline run (e.g., the catalogue term "2025/26-A").
///
/// The graph is rebuilt wholesale per run; the version travels with the
/// snapshot instead of living in ambient state, so successive snapshots
/// stay distinguishable downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotVersion(String);

impl SnapshotVersion {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnapshotVersion {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A course in the curriculum graph.
///
/// Attributes are merged first-write-wins across source records: a later
/// record fills gaps but never overwrites populated fields. A node created
/// from an edge reference alone carries no attributes (a stub) until its
/// own detail record arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseNode {
    /// Course code (unique key)
    pub code: CourseCode,

    /// Course title
    pub title: Option<String>,

    /// Offering academic unit
    pub offering_unit: Option<String>,

    /// Credit units, kept as catalogue text
    pub credit_units: Option<String>,

    /// Course duration
    pub duration: Option<String>,

    /// Semester offering
    pub semester: Option<Semester>,

    /// Non-code eligibility condition (standing, approval), verbatim
    pub special_requirement: Option<String>,

    /// Derived internship flag
    #[serde(default)]
    pub internship: bool,
}

impl CourseNode {
    /// Create a node with no attributes
    #[must_use]
    pub const fn stub(code: CourseCode) -> Self {
        Self {
            code,
            title: None,
            offering_unit: None,
            credit_units: None,
            duration: None,
            semester: None,
            special_requirement: None,
            internship: false,
        }
    }

    /// A stub was referenced by an edge but never independently scraped
    #[must_use]
    pub fn is_stub(&self) -> bool {
        self.title.is_none()
            && self.offering_unit.is_none()
            && self.credit_units.is_none()
            && self.duration.is_none()
            && self.semester.is_none()
            && self.special_requirement.is_none()
            && !self.internship
    }
}

/// Detail view of one course plus its stated relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub code: CourseCode,
    pub title: Option<String>,
    pub offering_unit: Option<String>,
    pub credit_units: Option<String>,
    pub prerequisites: Vec<CourseCode>,
    pub exclusions: Vec<CourseCode>,
}

/// Immutable course dependency graph for one snapshot.
///
/// Nodes live in an arena keyed by course code; edges are plain
/// `(code, code)` pairs so cycles need no special ownership handling and
/// every algorithm operates on keys only. Both edge sets are deduplicated
/// (set semantics) and directed:
///
/// - prerequisite edges: dependent course -> prerequisite course
/// - exclusion edges: excluding course -> excluded course (only directions
///   explicitly stated in source text are stored)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseGraph {
    pub(crate) version: SnapshotVersion,
    pub(crate) nodes: BTreeMap<CourseCode, CourseNode>,
    pub(crate) prereqs: BTreeSet<(CourseCode, CourseCode)>,
    pub(crate) exclusions: BTreeSet<(CourseCode, CourseCode)>,
}

impl CourseGraph {
    /// Snapshot version this graph was built for
    #[must_use]
    pub const fn version(&self) -> &SnapshotVersion {
        &self.version
    }

    /// Look up a node by code
    #[must_use]
    pub fn course(&self, code: &CourseCode) -> Option<&CourseNode> {
        self.nodes.get(code)
    }

    /// All nodes in code order
    pub fn courses(&self) -> impl Iterator<Item = &CourseNode> {
        self.nodes.values()
    }

    /// All prerequisite edges as (course, prereq) pairs, ordered
    pub fn prereq_edges(&self) -> impl Iterator<Item = &(CourseCode, CourseCode)> {
        self.prereqs.iter()
    }

    /// All exclusion edges as (course, excluded) pairs, ordered
    pub fn exclusion_edges(&self) -> impl Iterator<Item = &(CourseCode, CourseCode)> {
        self.exclusions.iter()
    }

    /// Direct prerequisites of a course, in code order
    pub fn prereqs_of(&self, code: &CourseCode) -> impl Iterator<Item = &CourseCode> + '_ {
        let code = code.clone();
        self.prereqs
            .iter()
            .filter(move |(course, _)| *course == code)
            .map(|(_, prereq)| prereq)
    }

    /// Courses that list `code` as a prerequisite, in code order
    pub fn dependents_of(&self, code: &CourseCode) -> impl Iterator<Item = &CourseCode> + '_ {
        let code = code.clone();
        self.prereqs
            .iter()
            .filter(move |(_, prereq)| *prereq == code)
            .map(|(course, _)| course)
    }

    /// Courses excluded by `code` (stated direction only), in code order
    pub fn exclusions_of(&self, code: &CourseCode) -> impl Iterator<Item = &CourseCode> + '_ {
        let code = code.clone();
        self.exclusions
            .iter()
            .filter(move |(course, _)| *course == code)
            .map(|(_, excluded)| excluded)
    }

    /// Prerequisite adjacency: course -> set of direct prerequisites.
    /// Courses with no prerequisites are absent from the map.
    #[must_use]
    pub fn prereq_adjacency(&self) -> BTreeMap<&CourseCode, BTreeSet<&CourseCode>> {
        let mut map: BTreeMap<&CourseCode, BTreeSet<&CourseCode>> = BTreeMap::new();
        for (course, prereq) in &self.prereqs {
            map.entry(course).or_default().insert(prereq);
        }
        map
    }

    /// All courses carrying a special-requirement note, in code order
    pub fn special_requirements(&self) -> impl Iterator<Item = (&CourseCode, &str)> {
        self.nodes.values().filter_map(|node| {
            node.special_requirement
                .as_deref()
                .map(|text| (&node.code, text))
        })
    }

    /// Detail view of one course plus its stated relations
    pub fn course_info(&self, code: &CourseCode) -> Result<CourseInfo> {
        let node = self
            .course(code)
            .ok_or_else(|| GraphError::CourseNotFound(code.to_string()))?;
        Ok(CourseInfo {
            code: node.code.clone(),
            title: node.title.clone(),
            offering_unit: node.offering_unit.clone(),
            credit_units: node.credit_units.clone(),
            prerequisites: self.prereqs_of(code).cloned().collect(),
            exclusions: self.exclusions_of(code).cloned().collect(),
        })
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get prerequisite edge count
    #[must_use]
    pub fn prereq_count(&self) -> usize {
        self.prereqs.len()
    }

    /// Get exclusion edge count
    #[must_use]
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }
}
