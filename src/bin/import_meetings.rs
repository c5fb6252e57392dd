use clap::Parser;
use content_import::CliConfig;
use std::process::ExitCode;

/// Imports board meeting content as JSON files.
#[tokio::main]
async fn main() -> ExitCode {
    content_import::app::run(CliConfig::parse(), Some("meetings")).await
}
