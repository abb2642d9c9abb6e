use thiserror::Error;

/// A renderer could not produce a frame.  Always fatal for the stream.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),

    #[error("scene serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn failed(msg: impl Into<String>) -> Self {
        RenderError::Failed(msg.into())
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
