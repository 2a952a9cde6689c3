use thiserror::Error;

use recipe_export::ExportError;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = std::result::Result<T, StagingError>;
