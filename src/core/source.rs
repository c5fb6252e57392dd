use crate::core::profile::ImportProfile;
use crate::domain::model::{Row, Separator};
use crate::domain::ports::SqlClient;
use crate::utils::error::{ImportError, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const DEFAULT_CLIENT_PROGRAM: &str = "bsqldb";

pub const ENV_SERVER: &str = "MBTA_SQL_SERVER";
pub const ENV_USERNAME: &str = "MBTA_SQL_USERNAME";
pub const ENV_PASSWORD: &str = "MBTA_SQL_PASSWORD";
pub const ENV_DATABASE: &str = "MBTA_SQL_DATABASE";

/// Connection settings handed to the SQL client on its command line.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub server: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl ConnectionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &str| {
            lookup(var).ok_or_else(|| ImportError::MissingEnvError {
                var: var.to_string(),
            })
        };

        Ok(Self {
            server: require(ENV_SERVER)?,
            username: require(ENV_USERNAME)?,
            password: require(ENV_PASSWORD)?,
            database: require(ENV_DATABASE)?,
        })
    }
}

/// Builds the fetch query. Every selected row ends with the separator literal.
pub fn build_query(profile: &ImportProfile, separator: &Separator) -> String {
    format!(
        "select convert(varchar(30), date_created, 120), content_id, content_html, \"{}\" from dbo.content where {}\n",
        separator, profile.query_filter
    )
}

/// `bsqldb`-compatible client: query on stdin, rows on stdout.
#[derive(Debug, Clone)]
pub struct BsqldbClient {
    program: String,
    connection: ConnectionConfig,
}

impl BsqldbClient {
    pub fn new(program: impl Into<String>, connection: ConnectionConfig) -> Self {
        Self {
            program: program.into(),
            connection,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn args(&self) -> Vec<&str> {
        vec![
            "-t",
            "\\n",
            "-S",
            &self.connection.server,
            "-U",
            &self.connection.username,
            "-P",
            &self.connection.password,
            "-D",
            &self.connection.database,
        ]
    }
}

impl SqlClient for BsqldbClient {
    async fn execute(&self, query: &str) -> Result<Vec<u8>> {
        tracing::debug!(
            "Running {} against {}/{}",
            self.program,
            self.connection.server,
            self.connection.database
        );

        let spawn_error = |source| ImportError::ClientSpawnError {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            // 客戶端可能在讀完之前就結束，這裡的寫入錯誤交給退出碼判斷
            if let Err(e) = stdin.write_all(query.as_bytes()).await {
                tracing::debug!("Writing query to {} failed: {}", self.program, e);
            }
        }

        let output = child.wait_with_output().await.map_err(spawn_error)?;

        tracing::debug!(
            "{} exited with {} ({} bytes of output)",
            self.program,
            output.status,
            output.stdout.len()
        );

        if !output.status.success() {
            return Err(ImportError::ClientFailedError {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}

/// Lazily splits buffered client output into rows.
///
/// The text after the last separator is a framing artifact and never yields a row.
#[derive(Debug)]
pub struct RowStream {
    output: Vec<u8>,
    separator: Separator,
    cursor: usize,
    row: usize,
    failed: bool,
}

impl RowStream {
    pub fn new(output: Vec<u8>, separator: Separator) -> Self {
        Self {
            output,
            separator,
            cursor: 0,
            row: 0,
            failed: false,
        }
    }

    fn next_fragment(&mut self) -> Option<&[u8]> {
        let needle = self.separator.as_bytes();
        let rest = &self.output[self.cursor..];
        let position = memchr::memmem::find(rest, needle)?;
        let start = self.cursor;
        self.cursor += position + needle.len();
        Some(&self.output[start..start + position])
    }
}

impl Iterator for RowStream {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let row = self.row;
        let fragment = self.next_fragment()?;
        let parsed = parse_row(fragment, row);
        self.row += 1;
        self.failed = parsed.is_err();
        Some(parsed)
    }
}

/// Binds one output fragment to a row: the first line is the echo or header
/// line left over from the previous record, then timestamp, id and markup.
pub fn parse_row(fragment: &[u8], row: usize) -> Result<Row> {
    let text =
        std::str::from_utf8(fragment).map_err(|source| ImportError::RowEncodingError { row, source })?;

    let parts: Vec<&str> = text.splitn(4, '\n').collect();
    if parts.len() < 4 {
        return Err(ImportError::UnexpectedRowShapeError {
            row,
            parts: parts.len(),
        });
    }

    Ok(Row {
        date_created: parts[1].to_string(),
        content_id: parts[2].to_string(),
        content_html: parts[3].to_string(),
    })
}
