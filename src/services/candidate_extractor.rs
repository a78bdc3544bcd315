use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::constants::SNIPPET_MAX_LINES;
use crate::enums::predicate_kind::PredicateKind;
use crate::enums::source_language::SourceLanguage;
use crate::structs::candidate::PredicateCandidate;

// Signatures are matched textually, not parsed. Multi-line signatures are
// joined (bounded) before the return annotation is inspected.
const SIGNATURE_MAX_LINES: usize = 12;

static PY_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap());
static PY_RETURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"->\s*(.+?)\s*:\s*(?:#.*)?$").unwrap());
static PY_TYPEGUARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:typing\.|typing_extensions\.)?TypeGuard\[").unwrap());
static PY_CONTAINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:dict|list|set|tuple|frozenset|Dict|List|Set|Tuple|FrozenSet|Mapping|Sequence)\s*\[")
        .unwrap()
});

static TS_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s+([A-Za-z_$][\w$]*)\s*[(<]")
        .unwrap()
});
static TS_ARROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?[(<]")
        .unwrap()
});
static TS_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:public\s+|private\s+|protected\s+|static\s+|readonly\s+|abstract\s+)*([A-Za-z_$][\w$]*)\s*\(")
        .unwrap()
});
static TS_RETURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)\s*:\s*([^={;]+?)\s*(?:\{|=>|;|$)").unwrap());
static TS_PREDICATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:this|[A-Za-z_$][\w$]*)\s+is\s+\S").unwrap());
static TS_CONTAINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:Record|Array|ReadonlyArray|Map|ReadonlyMap|Set|ReadonlySet)\s*<|\[\]$").unwrap()
});

// Statement keywords that TS_METHOD would otherwise mistake for a method
// name (`if (...)`, `return (...)`, ...).
const TS_NON_METHOD_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "typeof", "new", "else", "do", "throw",
    "await", "function", "constructor", "super", "delete", "void", "yield", "in", "of", "case",
    "with",
];

pub struct CandidateExtractor;

impl CandidateExtractor {
    /// Finds predicate-function candidates in one source file. Files in
    /// other languages yield nothing.
    pub fn extract(path: &str, content: &str) -> Vec<PredicateCandidate> {
        match SourceLanguage::from_path(path) {
            Some(SourceLanguage::Python) => Self::extract_python(path, content),
            Some(SourceLanguage::TypeScript) => Self::extract_typescript(path, content),
            None => Vec::new(),
        }
    }

    fn extract_python(path: &str, content: &str) -> Vec<PredicateCandidate> {
        let lines: Vec<&str> = content.lines().collect();
        let mut candidates = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let Some(caps) = PY_DEF.captures(lines[i]) else {
                i += 1;
                continue;
            };
            let function = caps[1].to_string();
            let (signature, sig_end) = join_python_signature(&lines, i);

            if let Some(kind) = PY_RETURN
                .captures(&signature)
                .and_then(|ret| classify_python_return(&ret[1]))
            {
                candidates.push(PredicateCandidate {
                    file: path.to_string(),
                    function,
                    line: i + 1,
                    snippet: capture_python_block(&lines, i, sig_end),
                    kind,
                    language: SourceLanguage::Python,
                });
            }

            i = sig_end + 1;
        }

        candidates
    }

    fn extract_typescript(path: &str, content: &str) -> Vec<PredicateCandidate> {
        let lines: Vec<&str> = content.lines().collect();
        let mut candidates = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let Some(function) = ts_definition_name(lines[i]) else {
                i += 1;
                continue;
            };
            let (signature, sig_end) = join_ts_signature(&lines, i);

            if let Some(kind) = TS_RETURN
                .captures(&signature)
                .and_then(|ret| classify_ts_return(&ret[1]))
            {
                candidates.push(PredicateCandidate {
                    file: path.to_string(),
                    function,
                    line: i + 1,
                    snippet: capture_ts_block(&lines, i),
                    kind,
                    language: SourceLanguage::TypeScript,
                });
            }

            i = sig_end + 1;
        }

        candidates
    }
}

fn classify_python_return(annotation: &str) -> Option<PredicateKind> {
    let ann = annotation.trim().trim_matches('"').trim_matches('\'').trim();

    if PY_TYPEGUARD.is_match(ann) {
        Some(PredicateKind::TypeGuard)
    } else if ann == "bool" {
        Some(PredicateKind::BoolPredicate)
    } else if PY_CONTAINER.is_match(ann) {
        Some(PredicateKind::AnnotatedReturn)
    } else {
        None
    }
}

fn classify_ts_return(annotation: &str) -> Option<PredicateKind> {
    let ann = annotation.trim();

    if TS_PREDICATE.is_match(ann) {
        Some(PredicateKind::TypePredicate)
    } else if ann == "boolean" {
        Some(PredicateKind::BoolPredicate)
    } else if TS_CONTAINER.is_match(ann) {
        Some(PredicateKind::AnnotatedReturn)
    } else {
        None
    }
}

fn ts_definition_name(line: &str) -> Option<String> {
    if let Some(caps) = TS_FUNCTION.captures(line) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = TS_ARROW.captures(line) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = TS_METHOD.captures(line) {
        let name = &caps[1];
        if !TS_NON_METHOD_KEYWORDS.contains(&name) {
            return Some(name.to_string());
        }
    }
    None
}

/// Joins a `def` signature until its parentheses balance and the trailing
/// `:` appears, bounded by `SIGNATURE_MAX_LINES`.
fn join_python_signature(lines: &[&str], start: usize) -> (String, usize) {
    let limit = (start + SIGNATURE_MAX_LINES).min(lines.len());
    let mut joined = String::new();
    let mut depth: i32 = 0;
    let mut seen_open = false;

    for (idx, line) in lines.iter().enumerate().take(limit).skip(start) {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(line.trim());

        for ch in line.chars() {
            match ch {
                '(' | '[' => {
                    depth += 1;
                    seen_open = true;
                }
                ')' | ']' => depth -= 1,
                _ => {}
            }
        }

        if seen_open && depth <= 0 {
            return (joined, idx);
        }
    }

    (joined, limit.saturating_sub(1).max(start))
}

/// Joins a TypeScript signature until the parameter list balances and the
/// body (`{`), arrow (`=>`), or declaration end (`;`) shows up.
fn join_ts_signature(lines: &[&str], start: usize) -> (String, usize) {
    let limit = (start + SIGNATURE_MAX_LINES).min(lines.len());
    let mut joined = String::new();
    let mut depth: i32 = 0;
    let mut seen_open = false;

    for (idx, line) in lines.iter().enumerate().take(limit).skip(start) {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(line.trim());

        for ch in line.chars() {
            match ch {
                '(' => {
                    depth += 1;
                    seen_open = true;
                }
                ')' => depth -= 1,
                _ => {}
            }
        }

        if seen_open
            && depth <= 0
            && (joined.contains('{') || joined.contains("=>") || joined.trim_end().ends_with(';'))
        {
            return (joined, idx);
        }
    }

    (joined, limit.saturating_sub(1).max(start))
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Captures the indentation block of a Python function, capped.
fn capture_python_block(lines: &[&str], start: usize, sig_end: usize) -> String {
    let def_indent = indent_width(lines[start]);
    let mut end = sig_end;

    for (idx, line) in lines.iter().enumerate().skip(sig_end + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_width(line) > def_indent {
            end = idx;
        } else {
            break;
        }
    }

    let end = end.min(start + SNIPPET_MAX_LINES - 1);
    lines[start..=end].join("\n")
}

/// Captures a brace-balanced TypeScript block, or a single expression-bodied
/// arrow, capped.
fn capture_ts_block(lines: &[&str], start: usize) -> String {
    let mut depth: i32 = 0;
    let mut seen_brace = false;
    let mut end = start;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    seen_brace = true;
                }
                '}' => depth -= 1,
                _ => {}
            }
        }

        end = idx;
        if seen_brace && depth <= 0 {
            break;
        }
        if !seen_brace && line.trim_end().ends_with(';') {
            break;
        }
        if idx + 1 - start >= SNIPPET_MAX_LINES {
            break;
        }
    }

    lines[start..=end].join("\n")
}
