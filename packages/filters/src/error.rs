use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("Operator '{operator}' is not supported for field '{field}'")]
    UnsupportedOperator { field: String, operator: String },

    #[error("Invalid stage value: {0}")]
    InvalidStage(String),

    #[error("Invalid date value: {0}")]
    InvalidDate(String),

    #[error("Malformed filter expression: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
