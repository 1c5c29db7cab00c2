//! # Curricula Relations
//!
//! Turns free-text curriculum fields into structured course-code relations.
//!
//! ## Features
//!
//! - **Validated course codes** - the `[A-Z]{2,}[0-9]{3,4}` identity of every graph node
//! - **Relation extraction** - prerequisite/exclusion text to referenced-code sets
//! - **Field classification** - course links vs standing/approval conditions vs placeholders
//! - **Scraper contract** - the per-course record the upstream collaborator supplies
//!
//! ## Architecture
//!
//! ```text
//! Raw text fields (prerequisites, exclusions, special requirements)
//!     │
//!     ├──> RelationExtractor
//!     │      ├─ Scan for course-code matches
//!     │      ├─ Classify: Nil / SpecialRequirement / Codes
//!     │      └─ Degrade gracefully (never fatal)
//!     │
//!     └──> Referenced-code sets consumed by the graph builder
//! ```

mod error;
mod extractor;
mod types;

pub use error::{RelationError, Result};
pub use extractor::{normalize_space, FieldClass, RelationExtractor};
pub use types::{CourseCode, CourseRecord, Semester};
