//! # Curricula Graph
//!
//! Course dependency intelligence over scraped curriculum records.
//!
//! ## Features
//!
//! - **Graph construction** - merged course nodes plus prerequisite/exclusion edge sets
//! - **Cycle detection** - whole-loop edge flagging for visualization highlighting
//! - **Layered layout** - longest-path-from-sink depth ranks with density caps
//! - **Persistence export** - the three relations the storage collaborator consumes
//!
//! ## Architecture
//!
//! ```text
//! CourseRecord[]
//!     │
//!     ├──> Graph Builder (relation extraction)
//!     │      ├─ Merge duplicate courses (first-write-wins)
//!     │      ├─ Extract prerequisite/exclusion edges
//!     │      ├─ Create stubs for unscraped references
//!     │      └─ Drop self-loops, deduplicate edges
//!     │
//!     ├──> Course Graph (code-keyed arena, immutable per snapshot)
//!     │      ├─ Nodes: courses keyed by code
//!     │      └─ Edges: (code, code) pairs
//!     │
//!     ├──> Cycle Detector ──> cyclic-edge set
//!     │
//!     └──> Layer Assigner ──> Layout (layers, exclusions, group hints)
//! ```

mod builder;
mod cycles;
mod error;
mod export;
mod layout;
mod types;

pub use builder::GraphBuilder;
pub use cycles::CycleDetector;
pub use error::{GraphError, Result};
pub use export::{CourseRow, ExclusionRow, GraphStats, GraphTables, PrereqRow};
pub use layout::{Layout, LayoutConfig, LayerAssigner};
pub use types::{CourseGraph, CourseInfo, CourseNode, SnapshotVersion};
