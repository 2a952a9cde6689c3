use thiserror::Error;

/// Reading the file is the only failure mode; parsing itself never errors.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecipeError>;
