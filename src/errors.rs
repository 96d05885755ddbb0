use thiserror::Error;

/// Failure of a single `transform` call. There is no partial-success
/// output: every stage completes or the whole call fails with one of
/// these.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("input is empty or whitespace-only")]
    InvalidInput,
    #[error("engine failure: {0}")]
    EngineFailure(String),
    #[error("regex compile error: {0}")]
    RegexCompile(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("other error: {0}")]
    Other(String),
}
