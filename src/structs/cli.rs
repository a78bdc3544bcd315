use clap::Parser;

/// Analyze Python and TypeScript code for weak type-narrowing predicate
/// functions, prioritizing `TypeGuard` and `x is T` predicates.
#[derive(Parser, Debug)]
#[clap(name = "agent")]
#[clap(about = "AI-powered analyzer for weak type-narrowing predicates", long_about = None)]
pub struct Cli {
    /// URL of the git repository to analyze (e.g. https://github.com/user/repo.git)
    #[clap(long)]
    pub repo_url: Option<String>,

    /// Path to a specific file to analyze (relative to the repository root
    /// when --repo-url is given, otherwise a local file)
    #[clap(long)]
    pub file_path: Option<String>,
}
