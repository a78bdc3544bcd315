use serde::Deserialize;

use crate::structs::vulnerability::Vulnerability;

/// Deserialization target for one completion. The model is instructed to
/// return `{"vulnerabilities": [...]}`; some responses also carry an error
/// string, which is preserved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileAnalysis {
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,

    #[serde(default)]
    pub error: Option<String>,
}
