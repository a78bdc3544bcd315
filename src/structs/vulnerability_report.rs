use serde::{Deserialize, Serialize};

use crate::structs::vulnerability::Vulnerability;

/// The single object emitted on stdout. `vulnerabilities` is ordered:
/// TypeGuard / type-predicate entries ahead of all other predicate entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VulnerabilityReport {
    pub vulnerabilities: Vec<Vulnerability>,
}
