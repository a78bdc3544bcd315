use crate::structs::candidate::PredicateCandidate;

/// Builds the user prompt for one candidate: where the function lives,
/// what kind of predicate its signature claims it is, and the snippet.
pub fn generate_candidate_prompt(candidate: &PredicateCandidate) -> String {
    format!(
        "Analyze the following {} {} `{}` from {} (definition starts at line {}):\n\n```{}\n{}\n```\n\nReturn only the JSON object.",
        candidate.language.name(),
        candidate.kind.label(),
        candidate.function,
        candidate.file,
        candidate.line,
        candidate.language.fence(),
        candidate.snippet,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::predicate_kind::PredicateKind;
    use crate::enums::source_language::SourceLanguage;

    #[test]
    fn prompt_names_file_function_and_line() {
        let candidate = PredicateCandidate {
            file: "src/guards.py".to_string(),
            function: "is_user".to_string(),
            line: 12,
            snippet: "def is_user(x) -> TypeGuard[User]:\n    return isinstance(x, dict)".to_string(),
            kind: PredicateKind::TypeGuard,
            language: SourceLanguage::Python,
        };

        let prompt = generate_candidate_prompt(&candidate);
        assert!(prompt.contains("src/guards.py"));
        assert!(prompt.contains("`is_user`"));
        assert!(prompt.contains("line 12"));
        assert!(prompt.contains("```python"));
    }
}
