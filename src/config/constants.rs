/// Model and endpoint defaults. Groq serves the OpenAI chat-completions
/// protocol, so the provider only needs the base URL swapped.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_TOP_P: f32 = 0.95;

/// Free-tier friendly client-side ceiling.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 30;

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY_SECS: u64 = 5;

/// Files larger than this are skipped (whole-repo mode) or rejected
/// (single-file mode).
pub const MAX_FILE_SIZE_BYTES: u64 = 1_000_000;

pub const SOURCE_EXTENSIONS: &[&str] = &["py", "ts"];

/// Cap on captured candidate snippets, in lines.
pub const SNIPPET_MAX_LINES: usize = 40;

pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";
pub const ENV_FILE: &str = ".env";
pub const CONFIG_DIR: &str = ".predguard";
pub const CONFIG_FILE: &str = "config.toml";
