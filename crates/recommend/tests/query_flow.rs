//! The interactive-collaborator flow: free-text completed input plus a
//! semester filter string, against one graph snapshot.

use curricula_graph::{GraphBuilder, SnapshotVersion};
use curricula_recommend::{
    parse_completed_input, Recommendations, RecommendationEngine, SemesterFilter,
};
use curricula_relations::{CourseCode, CourseRecord};

fn code(raw: &str) -> CourseCode {
    CourseCode::parse(raw).unwrap()
}

fn catalogue() -> Vec<CourseRecord> {
    vec![
        CourseRecord::new("CS1315")
            .title("Introduction to Programming")
            .semester("Semester A 2025/26, Semester B 2025/26")
            .prerequisites("Nil"),
        CourseRecord::new("CS2315")
            .title("Data Structures")
            .semester("Semester B 2025/26")
            .prerequisites("CS1315"),
        CourseRecord::new("CS3334")
            .title("Algorithms")
            .semester("Semester A 2025/26")
            .prerequisites("CS1315 and CS2315"),
        CourseRecord::new("GE1401")
            .title("University English")
            .semester("Semester A 2025/26, Semester B 2025/26"),
        CourseRecord::new("SDSC3199")
            .title("Data Science Internship")
            .semester("Semester A 2025/26, Semester B 2025/26"),
        CourseRecord::new("SDSC4001")
            .title("Capstone Project")
            .semester("Semester A 2025/26")
            .prerequisites("Year 3 standing required"),
    ]
}

fn query(completed_input: &str, semester_input: &str) -> Recommendations {
    let graph = GraphBuilder::new(SnapshotVersion::new("2025/26")).build(&catalogue());
    let completed = parse_completed_input(completed_input);
    RecommendationEngine::new(&graph).recommend(&completed, SemesterFilter::parse(semester_input))
}

#[test]
fn first_semester_student_sees_roots_only() {
    let recs = query("", "");
    let roots: Vec<&str> = recs.root.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(roots, vec!["CS1315", "GE1401"]);
    assert!(recs.available.is_empty());
    assert_eq!(recs.internship.len(), 1);
    assert_eq!(recs.special_requirement.len(), 1);
    // CS2315 and CS3334 wait on CS1315
    assert_eq!(recs.follow_up.len(), 2);
}

#[test]
fn progress_moves_courses_between_buckets() {
    let recs = query("cs1315", "");
    let available: Vec<&str> = recs.available.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(available, vec!["CS2315"]);

    let follow_up = &recs.follow_up[0];
    assert_eq!(follow_up.code, code("CS3334"));
    assert_eq!(
        follow_up.missing.iter().collect::<Vec<_>>(),
        vec![&code("CS2315")]
    );

    let done = query("CS1315, CS2315", "");
    let available: Vec<&str> = done.available.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(available, vec!["CS3334"]);
}

#[test]
fn semester_filter_narrows_every_bucket() {
    let recs = query("CS1315", "B");
    let available: Vec<&str> = recs.available.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(available, vec!["CS2315"]);
    // CS3334 (semester A) disappears entirely under the B filter
    assert!(recs.follow_up.is_empty());
    assert!(recs.special_requirement.is_empty());
    assert_eq!(recs.internship.len(), 1);
}

#[test]
fn unknown_and_malformed_input_is_tolerated() {
    let recs = query("XX9999, totally-invalid, CS1315", "winter");
    // invalid tokens and filters degrade instead of failing the query
    let available: Vec<&str> = recs.available.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(available, vec!["CS2315"]);
}

#[test]
fn results_serialize_for_the_collaborator() {
    let recs = query("CS1315", "A");
    let json = serde_json::to_string(&recs).unwrap();
    let parsed: Recommendations = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, recs);
}
