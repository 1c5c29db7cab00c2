use crate::types::{CourseGraph, SnapshotVersion};
use curricula_relations::{CourseCode, Semester};
use serde::{Deserialize, Serialize};

/// One row of the courses relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    pub course_code: CourseCode,
    pub course_title: Option<String>,
    pub offering_unit: Option<String>,
    pub credit_units: Option<String>,
    pub duration: Option<String>,
    pub semester: Option<Semester>,
    pub special_requirement: Option<String>,
    #[serde(default)]
    pub internship: bool,
}

/// One row of the prerequisites relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrereqRow {
    pub course_code: CourseCode,
    pub prereq_code: CourseCode,
}

/// One row of the exclusions relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRow {
    pub course_code: CourseCode,
    pub excluded_code: CourseCode,
}

/// The finalized graph flattened into the three relations the persistence
/// collaborator stores. Schema and durability are its concern; rows are
/// emitted in code order so repeated exports of one snapshot are
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphTables {
    pub version: SnapshotVersion,
    pub courses: Vec<CourseRow>,
    pub prerequisites: Vec<PrereqRow>,
    pub exclusions: Vec<ExclusionRow>,
}

/// Build-summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub courses: usize,
    pub prerequisites: usize,
    pub exclusions: usize,
    pub special_requirements: usize,
}

impl CourseGraph {
    /// Flatten into persistence rows
    #[must_use]
    pub fn to_tables(&self) -> GraphTables {
        GraphTables {
            version: self.version().clone(),
            courses: self
                .courses()
                .map(|node| CourseRow {
                    course_code: node.code.clone(),
                    course_title: node.title.clone(),
                    offering_unit: node.offering_unit.clone(),
                    credit_units: node.credit_units.clone(),
                    duration: node.duration.clone(),
                    semester: node.semester,
                    special_requirement: node.special_requirement.clone(),
                    internship: node.internship,
                })
                .collect(),
            prerequisites: self
                .prereq_edges()
                .map(|(course, prereq)| PrereqRow {
                    course_code: course.clone(),
                    prereq_code: prereq.clone(),
                })
                .collect(),
            exclusions: self
                .exclusion_edges()
                .map(|(course, excluded)| ExclusionRow {
                    course_code: course.clone(),
                    excluded_code: excluded.clone(),
                })
                .collect(),
        }
    }

    /// Summary counts for one snapshot
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            courses: self.node_count(),
            prerequisites: self.prereq_count(),
            exclusions: self.exclusion_count(),
            special_requirements: self.special_requirements().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use curricula_relations::CourseRecord;
    use pretty_assertions::assert_eq;

    fn sample() -> CourseGraph {
        GraphBuilder::new(SnapshotVersion::new("2025/26-A")).build(&[
            CourseRecord::new("CS2315")
                .title("Data Structures")
                .semester("Semester A 2025/26")
                .prerequisites("CS1315"),
            CourseRecord::new("SDSC4001").prerequisites("Year 3 completed"),
            CourseRecord::new("MA2510").exclusions("MA2506"),
        ])
    }

    #[test]
    fn test_tables_cover_all_relations() {
        let tables = sample().to_tables();
        assert_eq!(tables.version.as_str(), "2025/26-A");
        // CS2315, CS1315 (stub), SDSC4001, MA2510, MA2506 (stub)
        assert_eq!(tables.courses.len(), 5);
        assert_eq!(tables.prerequisites.len(), 1);
        assert_eq!(tables.exclusions.len(), 1);
    }

    #[test]
    fn test_tables_rows_in_code_order() {
        let tables = sample().to_tables();
        let codes: Vec<&str> = tables
            .courses
            .iter()
            .map(|row| row.course_code.as_str())
            .collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_tables_json_round_trip() {
        let tables = sample().to_tables();
        let json = serde_json::to_string(&tables).unwrap();
        let parsed: GraphTables = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            GraphStats {
                courses: 5,
                prerequisites: 1,
                exclusions: 1,
                special_requirements: 1,
            }
        );
    }
}
