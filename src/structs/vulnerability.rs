use serde::{Deserialize, Serialize};

/// One report entry. All fields are defaulted on the way in because model
/// output is not trusted to be complete; `file`, `function` and `line` are
/// overwritten from extraction before the entry reaches the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(default)]
    pub file: String,

    #[serde(default)]
    pub function: String,

    #[serde(default)]
    pub line: usize,

    #[serde(default)]
    pub vulnerable_code: String,

    #[serde(default)]
    pub issue: String,

    #[serde(default)]
    pub corrected_code: String,

    #[serde(default)]
    pub recommendations: Vec<String>,

    /// Set when the exchange for this candidate failed; the entry then
    /// records an analysis failure instead of a model finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
