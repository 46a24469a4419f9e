#![forbid(unsafe_code)]

use super::{DatasetName, Record};
use std::collections::BTreeMap;
use thiserror::Error;

/// Read-only access to the named datasets. Unknown or empty datasets yield an empty slice.
pub trait DatasetRegistry {
    fn dataset(&self, name: DatasetName) -> &[Record];
}

impl<T: DatasetRegistry + ?Sized> DatasetRegistry for &T {
    fn dataset(&self, name: DatasetName) -> &[Record] {
        (**self).dataset(name)
    }
}

impl<T: DatasetRegistry + ?Sized> DatasetRegistry for std::sync::Arc<T> {
    fn dataset(&self, name: DatasetName) -> &[Record] {
        (**self).dataset(name)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("record #{index} does not belong to dataset {dataset}")]
    RecordMismatch { dataset: &'static str, index: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryRegistry {
    datasets: BTreeMap<DatasetName, Vec<Record>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a dataset. Every record must have the dataset's shape.
    pub fn insert(&mut self, name: DatasetName, records: Vec<Record>) -> Result<(), RegistryError> {
        if let Some(index) = records.iter().position(|record| !record.belongs_to(name)) {
            return Err(RegistryError::RecordMismatch {
                dataset: name.as_str(),
                index,
            });
        }
        self.datasets.insert(name, records);
        Ok(())
    }

    pub fn with(mut self, name: DatasetName, records: Vec<Record>) -> Result<Self, RegistryError> {
        self.insert(name, records)?;
        Ok(self)
    }

    pub fn record_count(&self) -> usize {
        self.datasets.values().map(Vec::len).sum()
    }
}

impl DatasetRegistry for MemoryRegistry {
    fn dataset(&self, name: DatasetName) -> &[Record] {
        self.datasets.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }
}
