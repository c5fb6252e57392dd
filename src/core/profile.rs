use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_field_name, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ID_FIELD: &str = "meeting_id";
pub const DEFAULT_BODY_FIELD: &str = "Information";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

/// What to select and how to write it. The two historical importers are the
/// `meetings` and `posts` built-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProfile {
    pub name: String,
    pub query_filter: String,
    pub format: OutputFormat,
    #[serde(default)]
    pub create_target_dir: bool,
    /// JSON only: field that receives the row's content id.
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Markdown only: field moved out of the frontmatter into the body.
    #[serde(default = "default_body_field")]
    pub body_field: String,
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_body_field() -> String {
    DEFAULT_BODY_FIELD.to_string()
}

impl ImportProfile {
    pub fn meetings() -> Self {
        Self {
            name: "meetings".to_string(),
            query_filter: r#"xml_config_id="28" and content_type != "3""#.to_string(),
            format: OutputFormat::Json,
            create_target_dir: true,
            id_field: default_id_field(),
            body_field: default_body_field(),
        }
    }

    pub fn posts() -> Self {
        Self {
            name: "posts".to_string(),
            query_filter: r#"xml_config_id="60""#.to_string(),
            format: OutputFormat::Markdown,
            create_target_dir: false,
            id_field: default_id_field(),
            body_field: default_body_field(),
        }
    }

    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "meetings" => Ok(Self::meetings()),
            "posts" => Ok(Self::posts()),
            other => Err(ImportError::InvalidConfigValueError {
                field: "profile".to_string(),
                value: other.to_string(),
                reason: "Unknown profile. Built-in profiles: meetings, posts".to_string(),
            }),
        }
    }
}

impl Validate for ImportProfile {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("profile.name", &self.name)?;
        validate_non_empty_string("profile.query_filter", &self.query_filter)?;
        match self.format {
            OutputFormat::Json => validate_field_name("profile.id_field", &self.id_field),
            OutputFormat::Markdown => validate_field_name("profile.body_field", &self.body_field),
        }
    }
}
