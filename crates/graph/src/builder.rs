use crate::types::{CourseGraph, CourseNode, SnapshotVersion};
use curricula_relations::{CourseCode, CourseRecord, FieldClass, RelationExtractor, Semester};
use std::collections::{BTreeMap, BTreeSet};

/// Build a course graph from scraped course records.
///
/// Records may arrive in any order and may repeat (the same course can be
/// listed by several programme pages): attributes merge first-write-wins,
/// edges merge with set semantics, and all collections are keyed by course
/// code, so any permutation of the same input yields an identical graph.
///
/// Nothing here is fatal. Records with an unparseable owning code are
/// skipped with a warning; self-loop prerequisite edges are dropped;
/// referenced codes without their own record become stub nodes.
pub struct GraphBuilder {
    version: SnapshotVersion,
    extractor: RelationExtractor,
}

impl GraphBuilder {
    #[must_use]
    pub const fn new(version: SnapshotVersion) -> Self {
        Self {
            version,
            extractor: RelationExtractor::new(),
        }
    }

    /// Build the graph for this snapshot
    #[must_use]
    pub fn build(&self, records: &[CourseRecord]) -> CourseGraph {
        let mut nodes: BTreeMap<CourseCode, CourseNode> = BTreeMap::new();
        let mut prereqs: BTreeSet<(CourseCode, CourseCode)> = BTreeSet::new();
        let mut exclusions: BTreeSet<(CourseCode, CourseCode)> = BTreeSet::new();
        let mut skipped = 0usize;

        for record in records {
            let code = match CourseCode::parse(&record.code) {
                Ok(code) => code,
                Err(err) => {
                    log::warn!("Skipping course record: {err}");
                    skipped += 1;
                    continue;
                }
            };

            // Classify relation fields before touching the arena. The
            // standalone special-requirement field runs through the same
            // classifier as the prerequisite field: a code-bearing special
            // field contributes prerequisite edges.
            let mut prereq_codes: Vec<CourseCode> = Vec::new();
            let mut note: Option<String> = None;
            let requirement_fields = [
                record.prerequisites.as_deref(),
                record.special_requirement.as_deref(),
            ];
            for text in requirement_fields.into_iter().flatten() {
                match self.extractor.classify(text) {
                    FieldClass::Nil => {}
                    FieldClass::SpecialRequirement(text) => {
                        if note.is_none() {
                            note = Some(text);
                        }
                    }
                    FieldClass::Codes(codes) => prereq_codes.extend(codes),
                }
            }
            let excl_codes = record
                .exclusions
                .as_deref()
                .map(|text| self.extractor.extract_codes(text))
                .unwrap_or_default();

            let node = nodes
                .entry(code.clone())
                .or_insert_with(|| CourseNode::stub(code.clone()));
            merge_attributes(node, record);
            if node.special_requirement.is_none() {
                node.special_requirement = note;
            }
            node.internship =
                node.internship || record.internship || is_internship(&code, record.title.as_deref());

            for prereq in prereq_codes {
                if prereq == code {
                    log::debug!("Dropping self-loop prerequisite on {code}");
                    continue;
                }
                nodes
                    .entry(prereq.clone())
                    .or_insert_with(|| CourseNode::stub(prereq.clone()));
                prereqs.insert((code.clone(), prereq));
            }

            for excluded in excl_codes {
                if excluded == code {
                    continue;
                }
                nodes
                    .entry(excluded.clone())
                    .or_insert_with(|| CourseNode::stub(excluded.clone()));
                exclusions.insert((code.clone(), excluded));
            }
        }

        let special = nodes
            .values()
            .filter(|n| n.special_requirement.is_some())
            .count();
        log::info!(
            "Built course graph {}: {} courses ({} skipped), {} prerequisite edges, {} exclusion edges, {} special requirements",
            self.version,
            nodes.len(),
            skipped,
            prereqs.len(),
            exclusions.len(),
            special,
        );

        CourseGraph {
            version: self.version.clone(),
            nodes,
            prereqs,
            exclusions,
        }
    }
}

/// Fill missing node attributes from a record, never overwriting
fn merge_attributes(node: &mut CourseNode, record: &CourseRecord) {
    if node.title.is_none() {
        node.title = record.title.clone();
    }
    if node.offering_unit.is_none() {
        node.offering_unit = record.offering_unit.clone();
    }
    if node.credit_units.is_none() {
        node.credit_units = record.credit_units.clone();
    }
    if node.duration.is_none() {
        node.duration = record.duration.clone();
    }
    if node.semester.is_none() {
        node.semester = record
            .semester
            .as_deref()
            .and_then(Semester::from_offering_text);
    }
}

/// Internship detection: the scraper indicator aside, internship placements
/// are recognizable from the code or title text
fn is_internship(code: &CourseCode, title: Option<&str>) -> bool {
    code.as_str().to_lowercase().contains("internship")
        || title.is_some_and(|t| t.to_lowercase().contains("internship"))
}
