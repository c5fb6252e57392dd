pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, ImportSettings};
pub use self::core::{etl::ImportEngine, pipeline::ImportPipeline, profile::ImportProfile};
pub use utils::error::{ImportError, Result};
