use crate::core::profile::{ImportProfile, OutputFormat};
use crate::domain::model::{Document, ImportDocument, Row};
use crate::utils::error::{ImportError, Result};
use roxmltree::{Node, ParsingOptions};

fn parsing_options() -> ParsingOptions {
    ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    }
}

/// Escapes text that follows a child element, the way it reads when the
/// child is serialized together with its tail.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Flattens a node into its decoded leading text followed by each child
/// element's markup (copied verbatim from `source`) and the escaped text
/// trailing that child.
///
/// Comments and processing instructions are dropped; the text around them is joined.
pub fn flatten_node(node: Node<'_, '_>, source: &str) -> String {
    let mut flattened = String::new();
    let mut seen_element = false;

    for child in node.children() {
        if child.is_element() {
            flattened.push_str(&source[child.range()]);
            seen_element = true;
        } else if child.is_text() {
            let text = child.text().unwrap_or_default();
            if seen_element {
                flattened.push_str(&escape_text(text));
            } else {
                flattened.push_str(text);
            }
        }
    }

    flattened
}

/// Field name for a tag: the local name, prefixed with `{uri}` when the tag
/// is in a namespace.
pub fn field_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(uri) => format!("{{{}}}{}", uri, tag.name()),
        None => tag.name().to_string(),
    }
}

/// One entry per immediate child element of the root; repeated tags keep the last value.
pub fn to_document(markup: &str) -> Result<Document> {
    let tree = roxmltree::Document::parse_with_options(markup, parsing_options())?;

    let mut document = Document::new();
    for child in tree.root_element().children().filter(Node::is_element) {
        document.insert(field_name(child), flatten_node(child, markup));
    }

    Ok(document)
}

/// Applies the profile's post-processing policy to a flattened document.
pub fn apply_policy(profile: &ImportProfile, row: &Row, mut document: Document) -> Result<ImportDocument> {
    match profile.format {
        OutputFormat::Json => {
            document.insert(profile.id_field.as_str(), row.content_id.as_str());
            Ok(ImportDocument::Json(document))
        }
        OutputFormat::Markdown => {
            let body = document.remove(&profile.body_field).ok_or_else(|| {
                ImportError::MissingFieldError {
                    field: profile.body_field.clone(),
                    content_id: row.content_id.clone(),
                }
            })?;

            // 鍵名在輸出時才轉小寫，大小寫不同的標籤各自保留
            let mut frontmatter = Document::new();
            for (key, value) in document.iter().filter(|(_, value)| !value.is_empty()) {
                frontmatter.insert(key, value);
            }

            Ok(ImportDocument::Markdown { frontmatter, body })
        }
    }
}

/// Transforms a row. Markup that does not parse yields `Ok(None)` so the
/// caller can skip the row.
pub fn transform_row(profile: &ImportProfile, row: &Row) -> Result<Option<ImportDocument>> {
    let document = match to_document(&row.content_html) {
        Ok(document) => document,
        Err(e) if e.is_recoverable() => {
            tracing::warn!("Skipping content {}: {}", row.content_id, e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    apply_policy(profile, row, document).map(Some)
}
