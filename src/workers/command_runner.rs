use std::sync::Arc;
use std::time::Instant;

use crate::config::config_manager::ConfigManager;
use crate::errors::{PredguardError, PredguardResult};
use crate::services::ai_providers::groq::GroqProvider;
use crate::services::code_analyzer::CodeAnalyzer;
use crate::services::rate_limiter::ApiRateLimiter;
use crate::services::repository_manager::RepositoryManager;
use crate::structs::cli::Cli;
use crate::structs::vulnerability_report::VulnerabilityReport;
use crate::traits::ai_provider::AiProvider;

/// Wires the invocation together: flags → config → provider → pipeline.
/// Returns the finished report; printing is the caller's concern so stdout
/// stays untouched until the report is complete.
pub struct CommandRunner;

impl CommandRunner {
    pub async fn run(cli: Cli) -> PredguardResult<VulnerabilityReport> {
        let start = Instant::now();

        if cli.repo_url.is_none() && cli.file_path.is_none() {
            return Err(PredguardError::user_input_error(
                "at least one of --repo-url or --file-path",
                "Pass --repo-url <url> to analyze a repository, or --file-path <path> for a local file",
            ));
        }

        ConfigManager::load_env_file();
        let config = ConfigManager::load()?;
        let api_key = ConfigManager::resolve_api_key(&config)?;

        let rate_limiter = Arc::new(ApiRateLimiter::new(config.requests_per_minute));
        let provider: Arc<dyn AiProvider> = Arc::new(
            GroqProvider::new(api_key, rate_limiter)
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_sampling(config.max_tokens, config.temperature, config.top_p),
        );
        let analyzer = CodeAnalyzer::new(provider);

        let report = match (&cli.repo_url, &cli.file_path) {
            (Some(repo_url), file_path) => {
                Self::analyze_repository(&analyzer, repo_url, file_path.as_deref()).await?
            }
            (None, Some(file_path)) => Self::analyze_local_file(&analyzer, file_path).await?,
            (None, None) => unreachable!("validated above"),
        };

        log::info!(
            "⏱️  Analysis completed in {:.2}s ({} finding(s))",
            start.elapsed().as_secs_f64(),
            report.vulnerabilities.len()
        );

        Ok(report)
    }

    async fn analyze_repository(
        analyzer: &CodeAnalyzer,
        repo_url: &str,
        specific_file: Option<&str>,
    ) -> PredguardResult<VulnerabilityReport> {
        // _checkout keeps the clone alive for the whole run.
        let (_checkout, repo_root) = RepositoryManager::clone_repository(repo_url)?;
        let files = RepositoryManager::gather_repository_sources(&repo_root, specific_file)?;

        log::info!("📂 {} source file(s) admitted for analysis", files.len());

        Ok(analyzer.analyze_files(&files).await)
    }

    async fn analyze_local_file(
        analyzer: &CodeAnalyzer,
        file_path: &str,
    ) -> PredguardResult<VulnerabilityReport> {
        let file = RepositoryManager::read_local_file(file_path)?;
        Ok(analyzer.analyze_files(&[file]).await)
    }
}
