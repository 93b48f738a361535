use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::NodeTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    FileNotFound,
    Parse,
    Validation,
    Selection,
    Io,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMessage {
    pub code: ErrorCode,
    pub message: String,
}

/// Every failure is terminal to the operation that raised it; the editor
/// state is left as it was before the call.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("malformed sprite JSON: {0}")]
    Parse(String),
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Selection {
        required: Vec<NodeTag>,
        message: String,
    },
    #[error("i/o failure on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image failure: {0}")]
    Image(String),
}

pub type SpriteResult<T> = Result<T, SpriteError>;

impl SpriteError {
    pub fn selection(required: &[NodeTag], message: impl Into<String>) -> Self {
        Self::Selection {
            required: required.to_vec(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FileNotFound { .. } => ErrorCode::FileNotFound,
            Self::Parse(_) => ErrorCode::Parse,
            Self::Validation(_) => ErrorCode::Validation,
            Self::Selection { .. } => ErrorCode::Selection,
            Self::Io { .. } => ErrorCode::Io,
            Self::Image(_) => ErrorCode::Image,
        }
    }
}

impl From<serde_json::Error> for SpriteError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<&SpriteError> for UserMessage {
    fn from(value: &SpriteError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
