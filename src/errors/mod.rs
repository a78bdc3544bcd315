use std::error::Error as StdError;
use std::fmt;

use crate::enums::ai_provider_error::AiProviderError;

#[derive(Debug, Clone)]
pub enum PredguardError {
    ConfigurationError {
        message: String,
        suggestion: Option<String>,
    },

    RepositoryError {
        repository: String,
        operation: String,
        reason: String,
    },

    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    ParseError {
        content_type: String,
        reason: String,
    },

    AnalysisError {
        target: String,
        reason: String,
    },

    NetworkError {
        operation: String,
        status_code: Option<u16>,
        reason: String,
    },

    UserInputError {
        expected: String,
        suggestion: String,
    },
}

impl PredguardError {
    pub fn config_error(message: &str, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn repo_error(repository: &str, operation: &str, reason: &str) -> Self {
        Self::RepositoryError {
            repository: repository.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_error(target: &str, reason: &str) -> Self {
        Self::AnalysisError {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn user_input_error(expected: &str, suggestion: &str) -> Self {
        Self::UserInputError {
            expected: expected.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, suggestion } => {
                let mut msg = format!("Configuration error: {}", message);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 {}", suggestion));
                }
                msg
            }
            Self::RepositoryError { repository, operation, reason } => {
                format!(
                    "Repository '{}' error during {}: {}\n💡 Check the repository URL and that git is installed",
                    repository, operation, reason
                )
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}", operation, file_path, reason)
            }
            Self::ParseError { content_type, reason } => {
                format!("Parse error in {}: {}", content_type, reason)
            }
            Self::AnalysisError { target, reason } => {
                format!("Analysis error for '{}': {}", target, reason)
            }
            Self::NetworkError { operation, status_code, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (status: {})", code));
                }
                msg.push_str("\n💡 Check your internet connection and try again");
                msg
            }
            Self::UserInputError { expected, suggestion } => {
                format!("Invalid invocation: expected {}\n💡 {}", expected, suggestion)
            }
        }
    }
}

impl fmt::Display for PredguardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for PredguardError {}

pub type PredguardResult<T> = Result<T, PredguardError>;

impl From<std::io::Error> for PredguardError {
    fn from(error: std::io::Error) -> Self {
        PredguardError::FileOperationError {
            file_path: String::new(),
            operation: "I/O".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for PredguardError {
    fn from(error: serde_json::Error) -> Self {
        PredguardError::ParseError {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for PredguardError {
    fn from(error: toml::de::Error) -> Self {
        PredguardError::ParseError {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for PredguardError {
    fn from(error: reqwest::Error) -> Self {
        PredguardError::NetworkError {
            operation: "HTTP request".to_string(),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}

impl From<AiProviderError> for PredguardError {
    fn from(error: AiProviderError) -> Self {
        match error {
            AiProviderError::NetworkError(reason) => PredguardError::NetworkError {
                operation: "completion request".to_string(),
                status_code: None,
                reason,
            },
            AiProviderError::AuthenticationError(reason) => PredguardError::ConfigurationError {
                message: format!("the Groq API rejected the credentials: {}", reason),
                suggestion: Some("Verify GROQ_API_KEY in your environment or .env file".to_string()),
            },
            other => PredguardError::AnalysisError {
                target: "LLM completion".to_string(),
                reason: other.to_string(),
            },
        }
    }
}
