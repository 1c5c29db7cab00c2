use crate::cycles::CycleDetector;
use crate::types::{CourseGraph, SnapshotVersion};
use anyhow::{anyhow, Result};
use curricula_relations::CourseCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Configuration for dependency-layout computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Omit nodes whose computed layer exceeds this bound (not clipped:
    /// omitted, to avoid misleading compression)
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Cap on nodes per layer; oversized layers keep the lexicographically
    /// first `max_per_layer` codes
    #[serde(default = "default_max_per_layer")]
    pub max_per_layer: Option<usize>,

    /// Omit courses with no prerequisites and no dependents
    #[serde(default = "default_exclude_isolated")]
    pub exclude_isolated: bool,
}

fn default_max_per_layer() -> Option<usize> {
    Some(16)
}

const fn default_exclude_isolated() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_per_layer: default_max_per_layer(),
            exclude_isolated: default_exclude_isolated(),
        }
    }
}

impl LayoutConfig {
    /// Config that keeps every node (full-graph exports)
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_per_layer: None,
            exclude_isolated: false,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_per_layer == Some(0) {
            return Err("max_per_layer must be > 0 when set".to_string());
        }
        Ok(())
    }

    /// Load from TOML text, applying defaults for missing keys
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| anyhow!("Layout config parse error: {err}"))?;
        config.validate().map_err(|err| anyhow!(err))?;
        Ok(config)
    }
}

/// Per-visualization-request layout derived from one graph snapshot.
///
/// Not persisted; the rendering collaborator consumes it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Snapshot the layout was derived from
    pub version: SnapshotVersion,

    /// Included course -> layer index (0 = no prerequisites)
    pub layers: BTreeMap<CourseCode, usize>,

    /// Prerequisite edges participating in a cycle (highlighted, excluded
    /// from layering)
    pub cyclic_edges: BTreeSet<(CourseCode, CourseCode)>,

    /// Nodes omitted from the layout (isolated, beyond the depth bound, or
    /// truncated from an oversized layer)
    pub excluded: BTreeSet<CourseCode>,

    /// Grouping hint for "color edges by source course": each rendered
    /// source (prerequisite endpoint of an included edge) gets a stable
    /// index assigned in code order
    pub source_groups: BTreeMap<CourseCode, usize>,
}

impl Layout {
    /// Layer index -> codes in that layer, lexicographic within a layer
    #[must_use]
    pub fn rows(&self) -> BTreeMap<usize, Vec<CourseCode>> {
        let mut rows: BTreeMap<usize, Vec<CourseCode>> = BTreeMap::new();
        for (code, &layer) in &self.layers {
            rows.entry(layer).or_default().push(code.clone());
        }
        rows
    }

    /// Number of distinct layers
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.values().max().map_or(0, |&deepest| deepest + 1)
    }
}

/// Assigns visualization depth layers over the non-cyclic prerequisite
/// edges.
///
/// Longest-path-from-sink layering: courses with no prerequisites sit on
/// layer 0 and a dependent's layer is one above its deepest prerequisite,
/// so a dependent always renders strictly above every prerequisite.
/// Cyclic edges are excluded up front, which makes the computation
/// terminate on any finite graph.
pub struct LayerAssigner {
    config: LayoutConfig,
}

impl LayerAssigner {
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Compute the layout for one graph snapshot
    #[must_use]
    pub fn assign(&self, graph: &CourseGraph) -> Layout {
        let cyclic = CycleDetector::new().cyclic_edges(graph);
        let cyclic_refs: BTreeSet<(&CourseCode, &CourseCode)> =
            cyclic.iter().map(|(a, b)| (a, b)).collect();

        // Acyclic prerequisite adjacency and the set of nodes touching any
        // prerequisite edge (cyclic ones included: a node on a cycle is not
        // isolated)
        let mut adjacency: BTreeMap<&CourseCode, BTreeSet<&CourseCode>> = BTreeMap::new();
        let mut connected: BTreeSet<&CourseCode> = BTreeSet::new();
        for (course, prereq) in graph.prereq_edges() {
            connected.insert(course);
            connected.insert(prereq);
            if !cyclic_refs.contains(&(course, prereq)) {
                adjacency.entry(course).or_default().insert(prereq);
            }
        }

        let mut memo: BTreeMap<&CourseCode, usize> = BTreeMap::new();
        for node in graph.courses().map(|n| &n.code) {
            layer_of(node, &adjacency, &mut memo);
        }

        let mut excluded: BTreeSet<CourseCode> = BTreeSet::new();
        if self.config.exclude_isolated {
            for node in graph.courses().map(|n| &n.code) {
                if !connected.contains(node) {
                    excluded.insert(node.clone());
                }
            }
        }
        if let Some(max_depth) = self.config.max_depth {
            for (node, &layer) in &memo {
                if layer > max_depth {
                    excluded.insert((*node).clone());
                }
            }
        }

        // Group survivors by layer; memo iterates in code order, so each
        // row is already lexicographic and truncation keeps the first cap.
        let mut rows: BTreeMap<usize, Vec<&CourseCode>> = BTreeMap::new();
        for (&node, &layer) in &memo {
            if !excluded.contains(node) {
                rows.entry(layer).or_default().push(node);
            }
        }
        if let Some(cap) = self.config.max_per_layer {
            for overflow in rows.values_mut() {
                for node in overflow.split_off(cap.min(overflow.len())) {
                    excluded.insert(node.clone());
                }
            }
        }

        let mut layers: BTreeMap<CourseCode, usize> = BTreeMap::new();
        for (&layer, nodes) in &rows {
            for node in nodes {
                layers.insert((*node).clone(), layer);
            }
        }

        // Rendered sources: prerequisite endpoints of included acyclic edges
        let mut source_groups: BTreeMap<CourseCode, usize> = BTreeMap::new();
        let sources: BTreeSet<&CourseCode> = graph
            .prereq_edges()
            .filter(|(course, prereq)| {
                !cyclic_refs.contains(&(course, prereq))
                    && layers.contains_key(course)
                    && layers.contains_key(prereq)
            })
            .map(|(_, prereq)| prereq)
            .collect();
        for (index, source) in sources.into_iter().enumerate() {
            source_groups.insert(source.clone(), index);
        }

        log::debug!(
            "Layout for {}: {} nodes on {} layers, {} excluded, {} cyclic edges",
            graph.version(),
            layers.len(),
            rows.len(),
            excluded.len(),
            cyclic.len(),
        );

        Layout {
            version: graph.version().clone(),
            layers,
            cyclic_edges: cyclic,
            excluded,
            source_groups,
        }
    }
}

/// Longest path to a sink over the acyclic adjacency, memoized
fn layer_of<'a>(
    node: &'a CourseCode,
    adjacency: &BTreeMap<&'a CourseCode, BTreeSet<&'a CourseCode>>,
    memo: &mut BTreeMap<&'a CourseCode, usize>,
) -> usize {
    if let Some(&layer) = memo.get(node) {
        return layer;
    }
    let layer = adjacency.get(node).map_or(0, |prereqs| {
        prereqs
            .iter()
            .map(|&prereq| layer_of(prereq, adjacency, memo) + 1)
            .max()
            .unwrap_or(0)
    });
    memo.insert(node, layer);
    layer
}
