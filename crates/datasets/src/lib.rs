#![forbid(unsafe_code)]

mod builtin;

pub use builtin::builtin;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tm_core::records::RegistryError;
use tm_core::vocab::VocabError;
use tm_core::{DatasetName, MemoryRegistry, Record};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported dataset file format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },
    #[error("unknown dataset: {name}")]
    UnknownDataset { name: String },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("{dataset} record #{index}: {source}")]
    Vocabulary {
        dataset: &'static str,
        index: usize,
        source: VocabError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// On-disk shape: `{ "datasets": { "<name>": [<record>, ...] } }`.
#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    datasets: BTreeMap<String, Vec<Record>>,
}

/// Validates vocabulary tags and shape, then stores the dataset.
pub(crate) fn install(
    registry: &mut MemoryRegistry,
    name: DatasetName,
    records: Vec<Record>,
) -> Result<(), DatasetError> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate_tags()
            .map_err(|source| DatasetError::Vocabulary {
                dataset: name.as_str(),
                index,
                source,
            })?;
    }
    debug!(dataset = name.as_str(), records = records.len(), "dataset installed");
    registry.insert(name, records)?;
    Ok(())
}

/// Parses a dataset document and installs every dataset it names into `registry`.
///
/// Datasets the document does not mention keep their current records.
pub fn load_str(
    registry: &mut MemoryRegistry,
    text: &str,
    format: FileFormat,
) -> Result<usize, DatasetError> {
    let file: DatasetFile = match format {
        FileFormat::Json => serde_json::from_str(text)?,
        FileFormat::Yaml => serde_yaml::from_str(text)?,
    };
    let mut parsed = Vec::with_capacity(file.datasets.len());
    for (raw_name, records) in file.datasets {
        let name = DatasetName::parse(&raw_name)
            .ok_or(DatasetError::UnknownDataset { name: raw_name })?;
        parsed.push((name, records));
    }

    // Validate everything before touching the registry.
    let mut staged = registry.clone();
    let count = parsed.len();
    for (name, records) in parsed {
        install(&mut staged, name, records)?;
    }
    *registry = staged;
    Ok(count)
}

pub fn load_path(registry: &mut MemoryRegistry, path: &Path) -> Result<usize, DatasetError> {
    let format = FileFormat::from_path(path).ok_or_else(|| DatasetError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let count = load_str(registry, &text, format)?;
    info!(path = %path.display(), datasets = count, "dataset file loaded");
    Ok(count)
}

/// The bundled datasets, overlaid with `path` when given.
pub fn open(path: Option<&Path>) -> Result<MemoryRegistry, DatasetError> {
    let mut registry = builtin()?;
    if let Some(path) = path {
        load_path(&mut registry, path)?;
    }
    Ok(registry)
}
