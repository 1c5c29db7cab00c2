use crate::types::CourseGraph;
use curricula_relations::CourseCode;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Finds every prerequisite edge participating in at least one cycle.
///
/// Cycles in catalogue data are a rendering concern, not a data fault:
/// the detector reports the edge set so visualization can highlight whole
/// loops, and so layering can exclude them to guarantee termination.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleDetector;

impl CycleDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// All edges on at least one directed cycle, as (course, prereq) pairs.
    ///
    /// Depth-first traversal with an explicit recursion stack, restarted
    /// from every unvisited node so disconnected components and multiple
    /// independent cycles are all covered. A back-edge flags the entire
    /// loop it closes, not just the closing edge.
    #[must_use]
    pub fn cyclic_edges(&self, graph: &CourseGraph) -> BTreeSet<(CourseCode, CourseCode)> {
        let adjacency = graph.prereq_adjacency();

        let mut all_nodes: BTreeSet<&CourseCode> = graph.courses().map(|n| &n.code).collect();
        for (course, prereq) in graph.prereq_edges() {
            all_nodes.insert(course);
            all_nodes.insert(prereq);
        }

        let mut marks: BTreeMap<&CourseCode, Mark> = BTreeMap::new();
        let mut stack: Vec<&CourseCode> = Vec::new();
        let mut cyclic = BTreeSet::new();

        for node in all_nodes {
            if mark_of(&marks, node) == Mark::Unvisited {
                visit(node, &adjacency, &mut marks, &mut stack, &mut cyclic);
            }
        }

        if !cyclic.is_empty() {
            log::debug!("Found {} cyclic prerequisite edges", cyclic.len());
        }
        cyclic
    }
}

fn mark_of(marks: &BTreeMap<&CourseCode, Mark>, node: &CourseCode) -> Mark {
    marks.get(node).copied().unwrap_or(Mark::Unvisited)
}

fn visit<'a>(
    node: &'a CourseCode,
    adjacency: &BTreeMap<&'a CourseCode, BTreeSet<&'a CourseCode>>,
    marks: &mut BTreeMap<&'a CourseCode, Mark>,
    stack: &mut Vec<&'a CourseCode>,
    cyclic: &mut BTreeSet<(CourseCode, CourseCode)>,
) {
    marks.insert(node, Mark::OnStack);
    stack.push(node);

    if let Some(prereqs) = adjacency.get(node) {
        for &prereq in prereqs {
            match mark_of(marks, prereq) {
                Mark::Unvisited => visit(prereq, adjacency, marks, stack, cyclic),
                Mark::OnStack => {
                    // Back edge: the stack from the target through the
                    // current node is exactly the cycle being closed.
                    if let Some(pos) = stack.iter().position(|n| *n == prereq) {
                        for pair in stack[pos..].windows(2) {
                            cyclic.insert((pair[0].clone(), pair[1].clone()));
                        }
                    }
                    cyclic.insert((node.clone(), prereq.clone()));
                }
                Mark::Done => {}
            }
        }
    }

    stack.pop();
    marks.insert(node, Mark::Done);
}
