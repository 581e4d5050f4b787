use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("variable '{0}' has no value")]
    UnboundVariable(char),
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression does not evaluate to a finite number")]
    NonFinite,
    #[error("card index {index} out of range for a set of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
