pub mod cli;
pub mod toml_config;

use crate::core::profile::ImportProfile;
use crate::core::source::DEFAULT_CLIENT_PROGRAM;
use crate::core::ConfigProvider;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use toml_config::TomlConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "content-import")]
#[command(about = "Import content rows from the CMS database into JSON or Markdown files")]
pub struct CliConfig {
    /// Directory to put the imported files in
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: Option<String>,

    /// Built-in import profile (meetings, posts)
    #[arg(long)]
    pub profile: Option<String>,

    /// Path to a TOML profile file
    #[arg(short, long, conflicts_with = "profile")]
    pub config: Option<String>,

    /// SQL client program to run instead of bsqldb
    #[arg(long)]
    pub client: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(target_dir) = &self.target_dir {
            validate_path("target_dir", target_dir)?;
        }
        if let Some(client) = &self.client {
            validate_non_empty_string("client", client)?;
        }
        Ok(())
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub target_dir: String,
    pub profile: ImportProfile,
    pub client_program: String,
}

impl ImportSettings {
    /// Resolves the profile (`--config` file, then `--profile`, then the
    /// binary's default) and the client program (`--client`, then the TOML
    /// file, then bsqldb).
    pub fn resolve(cli: &CliConfig, default_profile: Option<&str>) -> Result<Self> {
        cli.validate()?;

        let target_dir = cli.target_dir.clone().ok_or_else(|| ImportError::ConfigError {
            message: "missing target directory".to_string(),
        })?;

        let (profile, file_program) = match (&cli.config, cli.profile.as_deref().or(default_profile)) {
            (Some(path), _) => {
                tracing::info!("Loading profile from: {}", path);
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                let program = config.client_program().map(str::to_string);
                (config.profile, program)
            }
            (None, Some(name)) => (ImportProfile::builtin(name)?, None),
            (None, None) => {
                return Err(ImportError::ConfigError {
                    message: "no profile selected; pass --profile or --config".to_string(),
                })
            }
        };
        profile.validate()?;

        let client_program = cli
            .client
            .clone()
            .or(file_program)
            .unwrap_or_else(|| DEFAULT_CLIENT_PROGRAM.to_string());

        Ok(Self {
            target_dir,
            profile,
            client_program,
        })
    }
}

impl ConfigProvider for ImportSettings {
    fn target_dir(&self) -> &str {
        &self.target_dir
    }

    fn profile(&self) -> &ImportProfile {
        &self.profile
    }
}
