use clap::Parser;
use content_import::CliConfig;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    content_import::app::run(CliConfig::parse(), None).await
}
