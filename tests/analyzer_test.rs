use std::sync::Arc;

use async_trait::async_trait;

use predguard::enums::ai_provider_error::AiProviderError;
use predguard::services::code_analyzer::CodeAnalyzer;
use predguard::services::repository_manager::RepositoryManager;
use predguard::structs::file_info::FileInfo;
use predguard::traits::ai_provider::AiProvider;

/// Scripted stand-in for the Groq provider: the response is chosen by
/// which function the user prompt mentions. No network involved.
struct ScriptedProvider {
    scripts: Vec<(&'static str, String)>,
}

impl ScriptedProvider {
    fn new(scripts: Vec<(&'static str, String)>) -> Self {
        Self { scripts }
    }

    fn silent() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl AiProvider for ScriptedProvider {
    async fn chat(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, AiProviderError> {
        for (marker, response) in &self.scripts {
            if user_prompt.contains(marker) {
                return Ok(response.clone());
            }
        }
        Ok(r#"{"vulnerabilities": []}"#.to_string())
    }
}

struct FailingProvider;

#[async_trait]
impl AiProvider for FailingProvider {
    async fn chat(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, AiProviderError> {
        Err(AiProviderError::ApiError("HTTP 500: upstream exploded".to_string()))
    }
}

fn finding_json(function: &str, issue: &str) -> String {
    format!(
        r#"{{"vulnerabilities": [{{"file": "ignored.py", "function": "{}", "line": 1,
            "vulnerable_code": "", "issue": "{}", "corrected_code": "fixed",
            "recommendations": ["add runtime validation"]}}]}}"#,
        function, issue
    )
}

const PY_GUARDS: &str = r#"from typing import TypeGuard

def is_string_int_dict(x: object) -> TypeGuard[dict[str, int]]:
    return isinstance(x, dict)

def looks_valid(x: object) -> bool:
    return x is not None
"#;

const TS_GUARDS: &str = r#"export function isStringNumberMap(x: unknown): x is Record<string, number> {
    return typeof x === "object" && x !== null;
}
"#;

#[tokio::test]
async fn typeguard_entries_match_extraction_locations() {
    let provider = ScriptedProvider::new(vec![(
        "is_string_int_dict",
        finding_json("is_string_int_dict", "keys and values are never checked"),
    )]);
    let analyzer = CodeAnalyzer::new(Arc::new(provider));

    let files = vec![
        FileInfo {
            path: "src/guards.py".to_string(),
            content: PY_GUARDS.to_string(),
        },
        FileInfo {
            path: "src/guards.ts".to_string(),
            content: TS_GUARDS.to_string(),
        },
    ];

    let report = analyzer.analyze_files(&files).await;

    let py_entry = report
        .vulnerabilities
        .iter()
        .find(|v| v.function == "is_string_int_dict")
        .expect("TypeGuard function must be reported");
    assert_eq!(py_entry.file, "src/guards.py");
    assert_eq!(py_entry.line, 3);
    assert_eq!(py_entry.issue, "keys and values are never checked");
    assert!(py_entry.vulnerable_code.contains("isinstance"));

    // The model returned nothing for the TS predicate; the entry is still
    // present with the extractor's location.
    let ts_entry = report
        .vulnerabilities
        .iter()
        .find(|v| v.function == "isStringNumberMap")
        .expect("type-predicate function must be reported");
    assert_eq!(ts_entry.file, "src/guards.ts");
    assert_eq!(ts_entry.line, 1);
    assert!(ts_entry.error.is_none());
}

#[tokio::test]
async fn primary_entries_sort_before_secondary_entries() {
    let provider = ScriptedProvider::new(vec![
        (
            "looks_valid",
            finding_json("looks_valid", "returns True for any non-None value"),
        ),
        (
            "is_string_int_dict",
            finding_json("is_string_int_dict", "shallow isinstance check"),
        ),
    ]);
    let analyzer = CodeAnalyzer::new(Arc::new(provider));

    // The bool predicate appears first in the file; the TypeGuard entry
    // must still come first in the report.
    let content = format!(
        "def looks_valid(x: object) -> bool:\n    return x is not None\n\n{}",
        "def is_string_int_dict(x: object) -> TypeGuard[dict[str, int]]:\n    return isinstance(x, dict)\n"
    );
    let files = vec![FileInfo {
        path: "checks.py".to_string(),
        content,
    }];

    let report = analyzer.analyze_files(&files).await;

    assert_eq!(report.vulnerabilities.len(), 2);
    assert_eq!(report.vulnerabilities[0].function, "is_string_int_dict");
    assert_eq!(report.vulnerabilities[1].function, "looks_valid");
}

#[tokio::test]
async fn no_candidates_means_an_empty_report() {
    let analyzer = CodeAnalyzer::new(Arc::new(ScriptedProvider::silent()));

    let files = vec![FileInfo {
        path: "plain.py".to_string(),
        content: "def add(a: int, b: int) -> int:\n    return a + b\n".to_string(),
    }];

    let report = analyzer.analyze_files(&files).await;
    assert!(report.vulnerabilities.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("vulnerabilities").unwrap().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn clean_secondary_predicates_stay_out_of_the_report() {
    let analyzer = CodeAnalyzer::new(Arc::new(ScriptedProvider::silent()));

    let files = vec![FileInfo {
        path: "checks.py".to_string(),
        content: "def looks_valid(x: object) -> bool:\n    return x is not None\n".to_string(),
    }];

    let report = analyzer.analyze_files(&files).await;
    assert!(report.vulnerabilities.is_empty());
}

#[tokio::test]
async fn provider_failures_become_error_entries() {
    let analyzer = CodeAnalyzer::new(Arc::new(FailingProvider));

    let files = vec![FileInfo {
        path: "src/guards.py".to_string(),
        content: PY_GUARDS.to_string(),
    }];

    let report = analyzer.analyze_files(&files).await;

    // Both candidates fail, both failures are recorded, nothing panics.
    assert_eq!(report.vulnerabilities.len(), 2);
    for entry in &report.vulnerabilities {
        let reason = entry.error.as_deref().expect("failure must be recorded");
        assert!(reason.contains("upstream exploded"));
    }
}

#[tokio::test]
async fn garbage_responses_become_error_entries() {
    let provider = ScriptedProvider::new(vec![(
        "is_string_int_dict",
        "Sorry, I cannot help with that.".to_string(),
    )]);
    let analyzer = CodeAnalyzer::new(Arc::new(provider));

    let files = vec![FileInfo {
        path: "src/guards.py".to_string(),
        content: "def is_string_int_dict(x) -> TypeGuard[dict[str, int]]:\n    return isinstance(x, dict)\n"
            .to_string(),
    }];

    let report = analyzer.analyze_files(&files).await;
    assert_eq!(report.vulnerabilities.len(), 1);
    assert!(report.vulnerabilities[0].error.is_some());
    assert_eq!(report.vulnerabilities[0].line, 1);
}

#[tokio::test]
async fn local_file_pipeline_round_trips_through_admission() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guards.py");
    std::fs::write(&path, PY_GUARDS).unwrap();

    let file = RepositoryManager::read_local_file(path.to_str().unwrap()).unwrap();
    let analyzer = CodeAnalyzer::new(Arc::new(ScriptedProvider::silent()));
    let report = analyzer.analyze_files(&[file]).await;

    // Only the TypeGuard survives a silent model; the bool predicate drops.
    assert_eq!(report.vulnerabilities.len(), 1);
    assert_eq!(report.vulnerabilities[0].function, "is_string_int_dict");
    assert_eq!(report.vulnerabilities[0].line, 3);
}
