use clap::Parser;

use predguard::structs::cli::Cli;
use predguard::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout carries only the JSON report.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match CommandRunner::run(cli).await {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to serialize report: {}", e);
                std::process::exit(2);
            }
        },
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
