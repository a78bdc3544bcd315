use std::sync::Arc;

use crate::constants::prompts::SYSTEM_PROMPT;
use crate::helpers::prompt_generator::generate_candidate_prompt;
use crate::logger::animated_logger::AnimatedLogger;
use crate::services::candidate_extractor::CandidateExtractor;
use crate::services::response_parser;
use crate::structs::candidate::PredicateCandidate;
use crate::structs::file_analysis::FileAnalysis;
use crate::structs::file_info::FileInfo;
use crate::structs::vulnerability::Vulnerability;
use crate::structs::vulnerability_report::VulnerabilityReport;
use crate::traits::ai_provider::AiProvider;

/// Issue text for a TypeGuard / type-predicate candidate the model did not
/// return a concrete finding for. Narrowing predicates always appear in the
/// report; the annotation itself is the claim under review.
const UNCONFIRMED_ISSUE: &str =
    "Model returned no concrete finding for this narrowing predicate; verify that the full annotated structure is validated before narrowing.";

/// Drives the per-candidate analysis loop: extract, prompt, parse, merge.
/// The provider is injected so the whole pipeline runs against a scripted
/// model in tests.
pub struct CodeAnalyzer {
    ai_provider: Arc<dyn AiProvider>,
}

impl CodeAnalyzer {
    pub fn new(ai_provider: Arc<dyn AiProvider>) -> Self {
        Self { ai_provider }
    }

    pub async fn analyze_files(&self, files: &[FileInfo]) -> VulnerabilityReport {
        let mut findings: Vec<(u8, Vulnerability)> = Vec::new();

        for file in files {
            let candidates = CandidateExtractor::extract(&file.path, &file.content);
            if candidates.is_empty() {
                log::debug!("No predicate candidates in {}", file.path);
                continue;
            }

            log::info!("🔍 {}: {} predicate candidate(s)", file.path, candidates.len());

            for candidate in candidates {
                if let Some(entry) = self.analyze_candidate(&candidate).await {
                    findings.push((candidate.kind.priority_rank(), entry));
                }
            }
        }

        // Stable: primary kinds first, discovery order within each class.
        findings.sort_by_key(|(rank, _)| *rank);

        VulnerabilityReport {
            vulnerabilities: findings.into_iter().map(|(_, entry)| entry).collect(),
        }
    }

    async fn analyze_candidate(&self, candidate: &PredicateCandidate) -> Option<Vulnerability> {
        let spinner = AnimatedLogger::start(format!(
            "Analyzing {} `{}` ({}:{})",
            candidate.kind.label(),
            candidate.function,
            candidate.file,
            candidate.line
        ));

        let user_prompt = generate_candidate_prompt(candidate);
        match self.ai_provider.chat(SYSTEM_PROMPT, &user_prompt).await {
            Ok(raw) => {
                spinner
                    .finish(&format!("Analyzed `{}`", candidate.function))
                    .await;
                match response_parser::parse_analysis(&raw) {
                    Ok(analysis) => merge_finding(candidate, analysis),
                    Err(e) => {
                        log::warn!("Unusable response for `{}`: {}", candidate.function, e);
                        Some(failure_entry(candidate, e.to_string()))
                    }
                }
            }
            Err(e) => {
                spinner
                    .fail(&format!("Analysis failed for `{}`", candidate.function))
                    .await;
                log::warn!("Completion failed for `{}`: {}", candidate.function, e);
                Some(failure_entry(candidate, e.to_string()))
            }
        }
    }
}

/// Folds a model response into the candidate. Extraction stays
/// authoritative for file/function/line; the snippet is kept when the model
/// returned none of its own. Secondary candidates without a finding drop
/// out of the report.
fn merge_finding(candidate: &PredicateCandidate, analysis: FileAnalysis) -> Option<Vulnerability> {
    let FileAnalysis {
        mut vulnerabilities,
        error,
    } = analysis;

    let reported = if vulnerabilities.is_empty() {
        None
    } else {
        let pos = vulnerabilities
            .iter()
            .position(|v| v.function == candidate.function)
            .unwrap_or(0);
        Some(vulnerabilities.swap_remove(pos))
    };

    match reported {
        Some(mut entry) => {
            entry.file = candidate.file.clone();
            entry.function = candidate.function.clone();
            entry.line = candidate.line;
            if entry.vulnerable_code.trim().is_empty() {
                entry.vulnerable_code = candidate.snippet.clone();
            }
            if entry.error.is_none() {
                entry.error = error;
            }
            Some(entry)
        }
        None if candidate.kind.is_primary() => Some(Vulnerability {
            file: candidate.file.clone(),
            function: candidate.function.clone(),
            line: candidate.line,
            vulnerable_code: candidate.snippet.clone(),
            issue: UNCONFIRMED_ISSUE.to_string(),
            corrected_code: String::new(),
            recommendations: Vec::new(),
            error,
        }),
        None => None,
    }
}

fn failure_entry(candidate: &PredicateCandidate, reason: String) -> Vulnerability {
    Vulnerability {
        file: candidate.file.clone(),
        function: candidate.function.clone(),
        line: candidate.line,
        vulnerable_code: candidate.snippet.clone(),
        issue: String::new(),
        corrected_code: String::new(),
        recommendations: Vec::new(),
        error: Some(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::predicate_kind::PredicateKind;
    use crate::enums::source_language::SourceLanguage;

    fn candidate(kind: PredicateKind) -> PredicateCandidate {
        PredicateCandidate {
            file: "src/guards.py".to_string(),
            function: "is_user".to_string(),
            line: 7,
            snippet: "def is_user(x) -> TypeGuard[User]:\n    return isinstance(x, dict)"
                .to_string(),
            kind,
            language: SourceLanguage::Python,
        }
    }

    #[test]
    fn merge_overrides_location_with_extraction() {
        let analysis = FileAnalysis {
            vulnerabilities: vec![Vulnerability {
                file: "wrong.py".to_string(),
                function: "is_user".to_string(),
                line: 999,
                issue: "shallow isinstance check".to_string(),
                ..Default::default()
            }],
            error: None,
        };

        let entry = merge_finding(&candidate(PredicateKind::TypeGuard), analysis).unwrap();
        assert_eq!(entry.file, "src/guards.py");
        assert_eq!(entry.line, 7);
        assert_eq!(entry.issue, "shallow isinstance check");
        assert!(entry.vulnerable_code.contains("isinstance"));
    }

    #[test]
    fn merge_prefers_the_entry_matching_the_candidate() {
        let analysis = FileAnalysis {
            vulnerabilities: vec![
                Vulnerability {
                    function: "other_fn".to_string(),
                    issue: "unrelated".to_string(),
                    ..Default::default()
                },
                Vulnerability {
                    function: "is_user".to_string(),
                    issue: "matching".to_string(),
                    ..Default::default()
                },
            ],
            error: None,
        };

        let entry = merge_finding(&candidate(PredicateKind::TypeGuard), analysis).unwrap();
        assert_eq!(entry.issue, "matching");
    }

    #[test]
    fn primary_candidates_survive_an_empty_response() {
        let entry = merge_finding(
            &candidate(PredicateKind::TypeGuard),
            FileAnalysis::default(),
        )
        .unwrap();
        assert_eq!(entry.function, "is_user");
        assert_eq!(entry.line, 7);
        assert_eq!(entry.issue, UNCONFIRMED_ISSUE);
        assert!(entry.error.is_none());
    }

    #[test]
    fn secondary_candidates_drop_out_without_a_finding() {
        assert!(merge_finding(
            &candidate(PredicateKind::BoolPredicate),
            FileAnalysis::default()
        )
        .is_none());
    }

    #[test]
    fn failure_entries_carry_the_reason() {
        let entry = failure_entry(
            &candidate(PredicateKind::BoolPredicate),
            "timeout".to_string(),
        );
        assert_eq!(entry.error.as_deref(), Some("timeout"));
        assert_eq!(entry.file, "src/guards.py");
    }
}
