use thiserror::Error;

/// Errors that can occur while running the stub backend
#[derive(Error, Debug)]
pub enum StubError {
    #[error("Server error: {0}")]
    ServerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
