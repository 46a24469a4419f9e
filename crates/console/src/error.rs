#![forbid(unsafe_code)]

use crate::jsonrpc::{INVALID_PARAMS, REQUEST_REJECTED};
use std::path::PathBuf;
use thiserror::Error;
use tm_core::upload::{MetadataError, UploadError};
use tm_core::vocab::VocabError;
use tm_datasets::DatasetError;

#[derive(Debug, Error)]
pub(crate) enum ConsoleError {
    #[error("read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },
    #[error(transparent)]
    Datasets(#[from] DatasetError),
    #[error("{0}")]
    InvalidParams(String),
    #[error(transparent)]
    Vocabulary(#[from] VocabError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("encode view: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ConsoleError {
    pub(crate) fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// JSON-RPC error code for request-level failures.
    pub(crate) fn code(&self) -> i64 {
        match self {
            Self::InvalidParams(_) | Self::Vocabulary(_) => INVALID_PARAMS,
            Self::Upload(_) | Self::Metadata(_) => REQUEST_REJECTED,
            Self::ConfigIo { .. }
            | Self::ConfigParse { .. }
            | Self::InvalidSetting { .. }
            | Self::Datasets(_)
            | Self::Encode(_) => -32603,
        }
    }
}
