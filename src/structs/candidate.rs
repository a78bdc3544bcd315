use crate::enums::predicate_kind::PredicateKind;
use crate::enums::source_language::SourceLanguage;

/// A predicate function picked out of a source file by textual matching.
/// Extraction is authoritative for `file`, `function` and `line`; the model
/// only fills in judgment.
#[derive(Debug, Clone)]
pub struct PredicateCandidate {
    pub file: String,
    pub function: String,
    /// 1-based line of the definition.
    pub line: usize,
    pub snippet: String,
    pub kind: PredicateKind,
    pub language: SourceLanguage,
}
