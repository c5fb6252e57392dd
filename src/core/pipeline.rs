use crate::core::source::{build_query, RowStream};
use crate::core::transform::transform_row;
use crate::core::writer::DocumentWriter;
use crate::core::{ConfigProvider, ImportDocument, Pipeline, Row, SqlClient, Storage};
use crate::domain::model::Separator;
use crate::utils::error::Result;

pub struct ImportPipeline<S: Storage, Q: SqlClient, C: ConfigProvider> {
    writer: DocumentWriter<S>,
    client: Q,
    config: C,
    separator: Separator,
}

impl<S: Storage, Q: SqlClient, C: ConfigProvider> ImportPipeline<S, Q, C> {
    pub fn new(storage: S, client: Q, config: C) -> Self {
        Self::with_separator(storage, client, config, Separator::generate())
    }

    pub fn with_separator(storage: S, client: Q, config: C, separator: Separator) -> Self {
        Self {
            writer: DocumentWriter::new(storage),
            client,
            config,
            separator,
        }
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }
}

#[async_trait::async_trait]
impl<S: Storage, Q: SqlClient, C: ConfigProvider> Pipeline for ImportPipeline<S, Q, C> {
    type Rows = RowStream;

    async fn prepare(&self) -> Result<()> {
        if self.config.profile().create_target_dir {
            tracing::debug!("Ensuring target directory {} exists", self.config.target_dir());
            self.writer.storage().ensure_root().await?;
        }
        Ok(())
    }

    async fn extract(&self) -> Result<RowStream> {
        let profile = self.config.profile();
        let query = build_query(profile, &self.separator);

        tracing::debug!("Fetching '{}' rows where {}", profile.name, profile.query_filter);
        let output = self.client.execute(&query).await?;

        Ok(RowStream::new(output, self.separator.clone()))
    }

    fn transform(&self, row: &Row) -> Result<Option<ImportDocument>> {
        transform_row(self.config.profile(), row)
    }

    async fn load(&self, row: &Row, document: ImportDocument) -> Result<String> {
        let filename = self.writer.write(row, &document).await?;
        Ok(format!("{}/{}", self.config.target_dir(), filename))
    }
}
