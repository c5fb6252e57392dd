use crate::core::{ImportSummary, Pipeline};
use crate::utils::error::Result;

pub struct ImportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs the import. Each row is transformed and written before the next
    /// one is split out of the client output; the first fatal error aborts.
    pub async fn run(&self) -> Result<ImportSummary> {
        tracing::info!("Starting import...");
        self.pipeline.prepare().await?;

        // Extract
        let rows = self.pipeline.extract().await?;

        let mut summary = ImportSummary::default();
        for row in rows {
            let row = row?;

            // Transform
            let Some(document) = self.pipeline.transform(&row)? else {
                summary.skipped += 1;
                continue;
            };

            // Load
            let path = self.pipeline.load(&row, document).await?;
            tracing::debug!("Wrote {}", path);
            summary.written += 1;
        }

        tracing::info!(
            "Import finished: {} written, {} skipped",
            summary.written,
            summary.skipped
        );
        Ok(summary)
    }
}
