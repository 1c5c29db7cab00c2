//! # Curricula Recommend
//!
//! "What can I take next" queries against an immutable course graph.
//!
//! ## Features
//!
//! - **Five-way categorization** - available / root / special-requirement / internship / follow-up
//! - **Priority rules** - an ordered rule list places each course in exactly one bucket
//! - **Missing-prerequisite reporting** - follow-up courses carry the uncompleted subset
//! - **Permissive input** - unknown completed codes and odd filters never fail a query
//!
//! ## Architecture
//!
//! ```text
//! CourseGraph + completed codes (+ optional semester filter)
//!     │
//!     └──> Recommendation Engine
//!            ├─ Skip completed courses, apply semester filter
//!            ├─ Evaluate category rules in priority order
//!            └─ Emit code-ordered category lists
//! ```

mod engine;
mod types;

pub use engine::{parse_completed_input, RecommendationEngine};
pub use types::{
    Category, CourseSummary, FollowUpCourse, Recommendations, SemesterFilter, SpecialCourse,
};
