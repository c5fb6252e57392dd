use clap::Parser;
use content_import::CliConfig;
use std::process::ExitCode;

/// Imports news posts as Markdown files with frontmatter.
#[tokio::main]
async fn main() -> ExitCode {
    content_import::app::run(CliConfig::parse(), Some("posts")).await
}
