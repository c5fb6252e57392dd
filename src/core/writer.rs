use crate::core::profile::OutputFormat;
use crate::domain::model::{Document, ImportDocument, Row};
use crate::domain::ports::Storage;
use crate::utils::error::{ImportError, Result};

/// `{date}-{content_id}.{ext}`, with the date taken from before the first space.
pub fn row_filename(row: &Row, format: OutputFormat) -> Result<String> {
    let (date, _time) = row.date_created.split_once(' ').ok_or_else(|| {
        ImportError::MalformedTimestampError {
            timestamp: row.date_created.clone(),
            content_id: row.content_id.clone(),
        }
    })?;

    Ok(format!("{}-{}.{}", date, row.content_id, format.extension()))
}

pub fn render_json(document: &Document) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(document)?)
}

pub fn render_markdown(frontmatter: &Document, body: &str) -> String {
    let mut out = String::from("---\n");
    for (key, value) in frontmatter.iter() {
        out.push_str(&key.to_lowercase());
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push_str("---\n");
    out.push_str(body);
    out.push('\n');
    out
}

pub fn render(document: &ImportDocument) -> Result<(OutputFormat, Vec<u8>)> {
    match document {
        ImportDocument::Json(doc) => Ok((OutputFormat::Json, render_json(doc)?)),
        ImportDocument::Markdown { frontmatter, body } => Ok((
            OutputFormat::Markdown,
            render_markdown(frontmatter, body).into_bytes(),
        )),
    }
}

pub struct DocumentWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> DocumentWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Writes the document and returns the filename it was stored under.
    pub async fn write(&self, row: &Row, document: &ImportDocument) -> Result<String> {
        let (format, data) = render(document)?;
        let filename = row_filename(row, format)?;

        tracing::debug!("Writing {} ({} bytes)", filename, data.len());
        self.storage.write_file(&filename, &data).await?;

        Ok(filename)
    }
}
