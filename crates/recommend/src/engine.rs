use crate::types::{
    Category, CourseSummary, FollowUpCourse, Recommendations, SemesterFilter, SpecialCourse,
};
use curricula_graph::{CourseGraph, CourseNode};
use curricula_relations::CourseCode;
use std::collections::BTreeSet;

/// One course with its prerequisite constraint set resolved
struct CourseView<'a> {
    node: &'a CourseNode,
    prereqs: BTreeSet<&'a CourseCode>,
}

type Rule = fn(&CourseView<'_>, &BTreeSet<CourseCode>) -> Option<Category>;

/// Category rules in priority order; the first match wins, so every course
/// lands in exactly one bucket. Special-requirement and internship are
/// informational tags and take precedence over prerequisite status.
const RULES: &[Rule] = &[
    rule_special_requirement,
    rule_internship,
    rule_available,
    rule_root,
    rule_follow_up,
];

fn rule_special_requirement(
    view: &CourseView<'_>,
    _completed: &BTreeSet<CourseCode>,
) -> Option<Category> {
    view.node
        .special_requirement
        .clone()
        .map(|note| Category::SpecialRequirement { note })
}

fn rule_internship(view: &CourseView<'_>, _completed: &BTreeSet<CourseCode>) -> Option<Category> {
    view.node.internship.then_some(Category::Internship)
}

fn rule_available(view: &CourseView<'_>, completed: &BTreeSet<CourseCode>) -> Option<Category> {
    if !view.prereqs.is_empty() && view.prereqs.iter().all(|p| completed.contains(*p)) {
        Some(Category::Available)
    } else {
        None
    }
}

fn rule_root(view: &CourseView<'_>, _completed: &BTreeSet<CourseCode>) -> Option<Category> {
    view.prereqs.is_empty().then_some(Category::Root)
}

fn rule_follow_up(view: &CourseView<'_>, completed: &BTreeSet<CourseCode>) -> Option<Category> {
    let missing: BTreeSet<CourseCode> = view
        .prereqs
        .iter()
        .filter(|p| !completed.contains(**p))
        .map(|p| (*p).clone())
        .collect();
    if missing.is_empty() {
        None
    } else {
        Some(Category::FollowUp { missing })
    }
}

/// Answers "what can I take next" against one immutable graph snapshot.
///
/// Every non-completed course (passing the semester filter) is placed in
/// its highest-priority matching category. The prerequisite constraint set
/// is treated as a single aggregate requirement: all referenced codes must
/// be completed for a course to be available, matching how extraction
/// flattens AND/OR text.
///
/// Completed codes are taken on trust: codes absent from the graph satisfy
/// any prerequisite referencing them, and are never rejected.
pub struct RecommendationEngine<'g> {
    graph: &'g CourseGraph,
}

impl<'g> RecommendationEngine<'g> {
    #[must_use]
    pub const fn new(graph: &'g CourseGraph) -> Self {
        Self { graph }
    }

    /// Categorize every non-completed course passing the filter
    #[must_use]
    pub fn recommend(
        &self,
        completed: &BTreeSet<CourseCode>,
        filter: SemesterFilter,
    ) -> Recommendations {
        let adjacency = self.graph.prereq_adjacency();
        let mut recs = Recommendations::default();

        for node in self.graph.courses() {
            if completed.contains(&node.code) {
                continue;
            }
            if !filter.admits(node.semester) {
                continue;
            }

            let view = CourseView {
                node,
                prereqs: adjacency.get(&node.code).cloned().unwrap_or_default(),
            };
            let category = RULES.iter().find_map(|rule| rule(&view, completed));

            let summary = CourseSummary {
                code: node.code.clone(),
                title: node.title.clone(),
            };
            match category {
                Some(Category::SpecialRequirement { note }) => {
                    recs.special_requirement.push(SpecialCourse {
                        code: summary.code,
                        title: summary.title,
                        requirement: note,
                    });
                }
                Some(Category::Internship) => recs.internship.push(summary),
                Some(Category::Available) => recs.available.push(summary),
                Some(Category::Root) => recs.root.push(summary),
                Some(Category::FollowUp { missing }) => recs.follow_up.push(FollowUpCourse {
                    code: summary.code,
                    title: summary.title,
                    prerequisites: view.prereqs.iter().map(|p| (*p).clone()).collect(),
                    missing,
                }),
                None => {}
            }
        }

        log::debug!(
            "Recommendations for {} completed courses: {} available, {} root, {} special, {} internship, {} follow-up",
            completed.len(),
            recs.available.len(),
            recs.root.len(),
            recs.special_requirement.len(),
            recs.internship.len(),
            recs.follow_up.len(),
        );
        recs
    }
}

/// Parse collaborator input ("CS1315, SDSC1001 ge1401") into a completed
/// set. Tokens that are not course codes are skipped, never fatal.
#[must_use]
pub fn parse_completed_input(input: &str) -> BTreeSet<CourseCode> {
    let mut completed = BTreeSet::new();
    for token in input.replace(',', " ").split_whitespace() {
        match CourseCode::parse(token) {
            Ok(code) => {
                completed.insert(code);
            }
            Err(err) => log::debug!("Ignoring completed-course token: {err}"),
        }
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use curricula_graph::{GraphBuilder, SnapshotVersion};
    use curricula_relations::CourseRecord;
    use pretty_assertions::assert_eq;

    fn code(raw: &str) -> CourseCode {
        CourseCode::parse(raw).unwrap()
    }

    fn completed(raw: &[&str]) -> BTreeSet<CourseCode> {
        raw.iter().map(|c| code(c)).collect()
    }

    fn graph(records: &[CourseRecord]) -> CourseGraph {
        GraphBuilder::new(SnapshotVersion::new("test")).build(records)
    }

    fn codes_of(summaries: &[CourseSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.code.as_str()).collect()
    }

    #[test]
    fn test_course_without_prereqs_is_root_not_available() {
        let g = graph(&[CourseRecord::new("GE1401").prerequisites("Nil")]);
        let engine = RecommendationEngine::new(&g);
        let recs = engine.recommend(&completed(&[]), SemesterFilter::All);
        assert_eq!(codes_of(&recs.root), vec!["GE1401"]);
        assert!(recs.available.is_empty());
    }

    #[test]
    fn test_fully_covered_course_is_available() {
        let g = graph(&[
            CourseRecord::new("CS2315").prerequisites("CS1315"),
            CourseRecord::new("CS1315"),
        ]);
        let engine = RecommendationEngine::new(&g);
        let recs = engine.recommend(&completed(&["CS1315"]), SemesterFilter::All);
        assert_eq!(codes_of(&recs.available), vec!["CS2315"]);
        assert!(recs.follow_up.is_empty());
    }

    #[test]
    fn test_single_prereq_follow_up_until_completed() {
        // "MA2510 or equivalent" flattens to the aggregate set {MA2510}
        let g = graph(&[CourseRecord::new("SDSC2001").prerequisites("MA2510 or equivalent")]);
        let engine = RecommendationEngine::new(&g);

        let before = engine.recommend(&completed(&[]), SemesterFilter::All);
        assert_eq!(before.follow_up.len(), 1);
        let follow_up = &before.follow_up[0];
        assert_eq!(follow_up.code, code("SDSC2001"));
        assert_eq!(follow_up.missing, completed(&["MA2510"]));

        let after = engine.recommend(&completed(&["MA2510"]), SemesterFilter::All);
        assert_eq!(codes_of(&after.available), vec!["SDSC2001"]);
        assert!(after.follow_up.is_empty());
    }

    #[test]
    fn test_partial_prereqs_report_missing_subset() {
        let g = graph(&[CourseRecord::new("CS3334").prerequisites("CS1315 and CS2315 and MA2510")]);
        let engine = RecommendationEngine::new(&g);
        let recs = engine.recommend(&completed(&["CS1315"]), SemesterFilter::All);
        assert_eq!(recs.follow_up.len(), 1);
        assert_eq!(recs.follow_up[0].missing, completed(&["CS2315", "MA2510"]));
        assert_eq!(
            recs.follow_up[0].prerequisites,
            completed(&["CS1315", "CS2315", "MA2510"])
        );
    }

    #[test]
    fn test_special_requirement_takes_precedence() {
        let g = graph(&[CourseRecord::new("SDSC4001").prerequisites("Year 3 completed")]);
        let engine = RecommendationEngine::new(&g);
        for done in [completed(&[]), completed(&["CS1315"])] {
            let recs = engine.recommend(&done, SemesterFilter::All);
            assert_eq!(recs.special_requirement.len(), 1);
            assert_eq!(
                recs.special_requirement[0].requirement,
                "Year 3 completed".to_string()
            );
            assert!(recs.root.is_empty());
        }
    }

    #[test]
    fn test_internship_takes_precedence_over_root() {
        let g = graph(&[CourseRecord::new("SDSC3199").title("Data Science Internship")]);
        let engine = RecommendationEngine::new(&g);
        let recs = engine.recommend(&completed(&[]), SemesterFilter::All);
        assert_eq!(codes_of(&recs.internship), vec!["SDSC3199"]);
        assert!(recs.root.is_empty());
    }

    #[test]
    fn test_completed_courses_are_not_recommended() {
        let g = graph(&[CourseRecord::new("CS1315"), CourseRecord::new("GE1401")]);
        let engine = RecommendationEngine::new(&g);
        let recs = engine.recommend(&completed(&["CS1315"]), SemesterFilter::All);
        assert_eq!(codes_of(&recs.root), vec!["GE1401"]);
    }

    #[test]
    fn test_unknown_completed_codes_accepted() {
        let g = graph(&[CourseRecord::new("CS2315").prerequisites("ZZ9999")]);
        let engine = RecommendationEngine::new(&g);
        let recs = engine.recommend(&completed(&["ZZ9999", "QQ1111"]), SemesterFilter::All);
        assert_eq!(codes_of(&recs.available), vec!["CS2315"]);
    }

    #[test]
    fn test_semester_filter() {
        let g = graph(&[
            CourseRecord::new("AA1000").semester("Semester A 2025/26"),
            CourseRecord::new("BB1000").semester("Semester B 2025/26"),
            CourseRecord::new("CC1000").semester("Semester A 2025/26, Semester B 2025/26"),
            CourseRecord::new("DD1000"),
        ]);
        let engine = RecommendationEngine::new(&g);

        let sem_a = engine.recommend(&completed(&[]), SemesterFilter::parse("A"));
        assert_eq!(codes_of(&sem_a.root), vec!["AA1000", "CC1000"]);

        let all = engine.recommend(&completed(&[]), SemesterFilter::All);
        assert_eq!(all.root.len(), 4);
    }

    #[test]
    fn test_results_ordered_by_code() {
        let g = graph(&[
            CourseRecord::new("ZZ1000"),
            CourseRecord::new("AA1000"),
            CourseRecord::new("MM1000"),
        ]);
        let engine = RecommendationEngine::new(&g);
        let recs = engine.recommend(&completed(&[]), SemesterFilter::All);
        assert_eq!(codes_of(&recs.root), vec!["AA1000", "MM1000", "ZZ1000"]);
    }

    #[test]
    fn test_parse_completed_input() {
        let parsed = parse_completed_input("CS1315, sdsc1001 GE1401 not-a-code");
        assert_eq!(parsed, completed(&["CS1315", "GE1401", "SDSC1001"]));
    }
}
