use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Python,
    TypeScript,
}

impl SourceLanguage {
    pub fn from_path(path: &str) -> Option<Self> {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("py") => Some(Self::Python),
            Some("ts") => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Language tag for fenced code blocks in prompts.
    pub fn fence(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::TypeScript => "typescript",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::TypeScript => "TypeScript",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_language_from_extension() {
        assert_eq!(SourceLanguage::from_path("src/checks.py"), Some(SourceLanguage::Python));
        assert_eq!(SourceLanguage::from_path("lib/guards.ts"), Some(SourceLanguage::TypeScript));
        assert_eq!(SourceLanguage::from_path("lib/types.d.ts"), Some(SourceLanguage::TypeScript));
        assert_eq!(SourceLanguage::from_path("README.md"), None);
        assert_eq!(SourceLanguage::from_path("Makefile"), None);
    }
}
