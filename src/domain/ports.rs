use crate::domain::model::{ImportDocument, Row};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn ensure_root(&self) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Runs a query through an external SQL client and returns its raw stdout.
pub trait SqlClient: Send + Sync {
    fn execute(&self, query: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn target_dir(&self) -> &str;
    fn profile(&self) -> &crate::core::profile::ImportProfile;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Rows: Iterator<Item = Result<Row>> + Send;

    async fn prepare(&self) -> Result<()>;
    async fn extract(&self) -> Result<Self::Rows>;
    fn transform(&self, row: &Row) -> Result<Option<ImportDocument>>;
    async fn load(&self, row: &Row, document: ImportDocument) -> Result<String>;
}
