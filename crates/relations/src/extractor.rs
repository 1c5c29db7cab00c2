use crate::types::{CourseCode, CODE_PATTERN};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Placeholder values meaning "no requirement stated"
const NIL_VOCAB: &[&str] = &["nil", "none", "n/a", "na", "-"];

/// Entrance-exam requirements are admission conditions, not course relations
const ENTRANCE_EXAM_VOCAB: &[&str] = &["hkdse", "dse"];

/// Vocabulary marking standing/approval conditions rather than course links
const STANDING_VOCAB: &[&str] = &["approval", "permission", "consent", "standing", "year", "cec"];

/// Collapse runs of whitespace and trim
#[must_use]
pub fn normalize_space(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Classification of one free-text requirement field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldClass {
    /// Empty or placeholder text; the field contributes nothing
    Nil,

    /// Non-code condition (standing, approval); the normalized text is
    /// recorded on the course instead of becoming graph edges
    SpecialRequirement(String),

    /// Referenced course codes, in order of first appearance
    Codes(Vec<CourseCode>),
}

/// Extracts structured course-code relations from free-text fields.
///
/// Source text is inherently inconsistent ("MA2510 or equivalent",
/// "Year 3 completed", "Nil"), so nothing here is fatal: a field that
/// cannot be understood degrades to [`FieldClass::Nil`].
///
/// AND/OR groupings in the text are deliberately flattened: every
/// referenced code lands in one unordered constraint set, and downstream
/// consumers treat that set as a single aggregate requirement.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationExtractor;

impl RelationExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Scan text for all course-code matches.
    ///
    /// First-appearance order is preserved for display; duplicates are
    /// dropped. Order carries no semantic weight.
    #[must_use]
    pub fn extract_codes(&self, text: &str) -> Vec<CourseCode> {
        let mut seen = Vec::new();
        for m in CODE_PATTERN.find_iter(text) {
            if let Ok(code) = CourseCode::parse(m.as_str()) {
                if !seen.contains(&code) {
                    seen.push(code);
                }
            }
        }
        seen
    }

    /// Classify one requirement field.
    ///
    /// The distinguishing rule: text matching the standing/approval
    /// vocabulary, or containing no course codes at all, is a special
    /// requirement; otherwise the referenced codes form the relation.
    /// Placeholder values and entrance-exam-only conditions classify as
    /// [`FieldClass::Nil`].
    #[must_use]
    pub fn classify(&self, text: &str) -> FieldClass {
        let normalized = normalize_space(text);
        if normalized.is_empty() {
            return FieldClass::Nil;
        }

        let lower = normalized.to_lowercase();
        if NIL_VOCAB.contains(&lower.as_str()) {
            return FieldClass::Nil;
        }

        let codes = self.extract_codes(&normalized);

        if codes.is_empty() && ENTRANCE_EXAM_VOCAB.iter().any(|w| lower.contains(w)) {
            log::debug!("Skipping entrance-exam-only requirement: {normalized}");
            return FieldClass::Nil;
        }

        if STANDING_VOCAB.iter().any(|w| lower.contains(w)) {
            return FieldClass::SpecialRequirement(normalized);
        }

        if codes.is_empty() {
            log::debug!("No course codes in requirement text, keeping as note: {normalized}");
            return FieldClass::SpecialRequirement(normalized);
        }

        FieldClass::Codes(codes)
    }
}
