//! Binary entry point shared by `content-import`, `import_meetings` and `import_posts`.

use crate::config::cli::LocalStorage;
use crate::config::{CliConfig, ImportSettings};
use crate::core::etl::ImportEngine;
use crate::core::pipeline::ImportPipeline;
use crate::core::source::{BsqldbClient, ConnectionConfig};
use crate::utils::error::ImportError;
use crate::utils::logger;
use std::process::ExitCode;

pub fn usage_line(program: &str) -> String {
    format!("Usage: {} <directory to put posts in>", program)
}

fn program_name() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| "content-import".to_string())
}

/// Runs one import and maps the outcome to a process exit code.
pub async fn run(cli: CliConfig, default_profile: Option<&str>) -> ExitCode {
    if cli.target_dir.is_none() {
        println!("{}", usage_line(&program_name()));
        return ExitCode::from(1);
    }

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_json);

    let settings = match ImportSettings::resolve(&cli, default_profile) {
        Ok(settings) => settings,
        Err(e) => return report(&e),
    };

    tracing::info!(
        "Importing '{}' profile into {}",
        settings.profile.name,
        settings.target_dir
    );
    if cli.verbose {
        tracing::debug!("Resolved settings: {:?}", settings);
    }

    let connection = match ConnectionConfig::from_env() {
        Ok(connection) => connection,
        Err(e) => return report(&e),
    };

    let client = BsqldbClient::new(settings.client_program.clone(), connection);
    let storage = LocalStorage::new(settings.target_dir.clone());
    let engine = ImportEngine::new(ImportPipeline::new(storage, client, settings));

    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ Import completed: {} files written, {} rows skipped",
                summary.written,
                summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn report(e: &ImportError) -> ExitCode {
    tracing::error!(
        "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // bsqldb 的錯誤輸出照舊印到 stdout
    match e {
        ImportError::ClientFailedError { .. } => println!("{}", e.user_friendly_message()),
        _ => eprintln!("{}", e.user_friendly_message()),
    }

    ExitCode::from(e.severity().exit_code())
}
