pub mod etl;
pub mod pipeline;
pub mod profile;
pub mod source;
pub mod transform;
pub mod writer;

pub use crate::domain::model::{Document, ImportDocument, ImportSummary, Row, Separator};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SqlClient, Storage};
pub use crate::utils::error::Result;
