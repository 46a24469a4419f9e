#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const MAX_FILE_BYTES: u64 = 100 * 1024 * 1024;

const STRUCTURED: &[&str] = &["csv", "xlsx", "nc", "hdf5"];
const UNSTRUCTURED: &[&str] = &["jpg", "jpeg", "png", "pdf"];
const SEMI_STRUCTURED: &[&str] = &["json", "xml"];
const SEQUENCE_MARKERS: &[&str] = &["fasta", "fastq"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    Structured,
    Unstructured,
    SemiStructured,
}

impl FileKind {
    /// Classifies by file name only. `None` for formats the wizard does not accept.
    pub fn classify(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let extension = lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        if STRUCTURED.contains(&extension) {
            return Some(Self::Structured);
        }
        if UNSTRUCTURED.contains(&extension)
            || SEQUENCE_MARKERS.iter().any(|marker| lower.contains(marker))
        {
            return Some(Self::Unstructured);
        }
        if SEMI_STRUCTURED.contains(&extension) {
            return Some(Self::SemiStructured);
        }
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Upload,
    Metadata,
    Status,
}

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Metadata => "metadata",
            Self::Status => "status",
        }
    }
}

/// A file the user picked. Only the name and size are ever inspected.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FileCandidate {
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
    pub kind: FileKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMetadata {
    pub title: String,
    pub authors: Vec<String>,
    pub collection_date: String,
    pub parameters: Vec<String>,
    pub sharing_consent: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("files can only be attached in the upload step (current: {current})")]
    WrongStep { current: &'static str },
    #[error("no files selected")]
    NoFiles,
    #[error("invalid file type: {name}")]
    UnsupportedType { name: String },
    #[error("file too large: {name} ({size_bytes} bytes, limit is 100 MiB)")]
    TooLarge { name: String, size_bytes: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata can only be submitted in the metadata step (current: {current})")]
    WrongStep { current: &'static str },
    #[error("expected metadata for {expected} files, got {actual}")]
    FileCountMismatch { expected: usize, actual: usize },
    #[error("{file}: dataset title is required")]
    MissingTitle { file: String },
    #[error("{file}: lead author is required")]
    MissingAuthor { file: String },
    #[error("{file}: collection date is required")]
    MissingCollectionDate { file: String },
}

fn check_file(candidate: &FileCandidate) -> Result<UploadedFile, UploadError> {
    let kind = FileKind::classify(&candidate.name).ok_or_else(|| UploadError::UnsupportedType {
        name: candidate.name.clone(),
    })?;
    if candidate.size_bytes > MAX_FILE_BYTES {
        return Err(UploadError::TooLarge {
            name: candidate.name.clone(),
            size_bytes: candidate.size_bytes,
        });
    }
    Ok(UploadedFile {
        name: candidate.name.clone(),
        size_bytes: candidate.size_bytes,
        kind,
    })
}

fn check_metadata(file: &str, metadata: &FileMetadata) -> Result<(), MetadataError> {
    if metadata.title.trim().is_empty() {
        return Err(MetadataError::MissingTitle {
            file: file.to_string(),
        });
    }
    if metadata
        .authors
        .first()
        .is_none_or(|author| author.trim().is_empty())
    {
        return Err(MetadataError::MissingAuthor {
            file: file.to_string(),
        });
    }
    if metadata.collection_date.trim().is_empty() {
        return Err(MetadataError::MissingCollectionDate {
            file: file.to_string(),
        });
    }
    Ok(())
}

/// Three-step contribution flow: pick files, describe each one, review status.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UploadWizard {
    step: WizardStep,
    files: Vec<UploadedFile>,
    metadata: Vec<FileMetadata>,
}

impl Default for UploadWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Upload,
            files: Vec::new(),
            metadata: Vec::new(),
        }
    }
}

impl UploadWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn metadata(&self) -> &[FileMetadata] {
        &self.metadata
    }

    /// Validates the whole selection and advances to the metadata step.
    ///
    /// One bad file rejects the selection; the previous one is kept.
    pub fn attach(&mut self, candidates: &[FileCandidate]) -> Result<&[UploadedFile], UploadError> {
        if self.step != WizardStep::Upload {
            return Err(UploadError::WrongStep {
                current: self.step.as_str(),
            });
        }
        if candidates.is_empty() {
            return Err(UploadError::NoFiles);
        }
        let files = candidates
            .iter()
            .map(check_file)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(files = files.len(), "upload files attached");
        self.files = files;
        self.metadata.clear();
        self.step = WizardStep::Metadata;
        Ok(&self.files)
    }

    /// Accepts one metadata entry per attached file, in attachment order.
    pub fn submit_metadata(&mut self, metadata: Vec<FileMetadata>) -> Result<(), MetadataError> {
        if self.step != WizardStep::Metadata {
            return Err(MetadataError::WrongStep {
                current: self.step.as_str(),
            });
        }
        if metadata.len() != self.files.len() {
            return Err(MetadataError::FileCountMismatch {
                expected: self.files.len(),
                actual: metadata.len(),
            });
        }
        for (file, entry) in self.files.iter().zip(&metadata) {
            check_metadata(&file.name, entry)?;
        }
        self.metadata = metadata;
        self.step = WizardStep::Status;
        debug!("upload metadata accepted");
        Ok(())
    }

    /// Steps back one step; a no-op on the first step.
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Upload | WizardStep::Metadata => WizardStep::Upload,
            WizardStep::Status => WizardStep::Metadata,
        };
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, size_bytes: u64) -> FileCandidate {
        FileCandidate {
            name: name.to_string(),
            size_bytes,
        }
    }

    fn complete(title: &str) -> FileMetadata {
        FileMetadata {
            title: title.to_string(),
            authors: vec!["R. Nair".to_string()],
            collection_date: "2024-03-01".to_string(),
            ..FileMetadata::default()
        }
    }

    #[test]
    fn classifies_by_extension_and_sequence_markers() {
        assert_eq!(FileKind::classify("cruise.CSV"), Some(FileKind::Structured));
        assert_eq!(FileKind::classify("grid.nc"), Some(FileKind::Structured));
        assert_eq!(FileKind::classify("otolith.jpeg"), Some(FileKind::Unstructured));
        assert_eq!(FileKind::classify("sample.fastq.gz"), Some(FileKind::Unstructured));
        assert_eq!(FileKind::classify("stations.json"), Some(FileKind::SemiStructured));
        assert_eq!(FileKind::classify("notes.docx"), None);
        assert_eq!(FileKind::classify("README"), None);
    }

    #[test]
    fn attach_refuses_empty_unknown_and_oversized_selections() {
        let mut wizard = UploadWizard::new();
        assert_eq!(wizard.attach(&[]), Err(UploadError::NoFiles));
        assert_eq!(
            wizard.attach(&[candidate("a.csv", 10), candidate("b.exe", 10)]),
            Err(UploadError::UnsupportedType {
                name: "b.exe".to_string()
            })
        );
        assert!(matches!(
            wizard.attach(&[candidate("big.nc", MAX_FILE_BYTES + 1)]),
            Err(UploadError::TooLarge { .. })
        ));
        assert_eq!(wizard.step(), WizardStep::Upload);
        assert!(wizard.files().is_empty());

        let files = wizard
            .attach(&[candidate("edge.nc", MAX_FILE_BYTES)])
            .expect("attach");
        assert_eq!(files.len(), 1);
        assert_eq!(wizard.step(), WizardStep::Metadata);
    }

    #[test]
    fn metadata_requires_title_author_and_date_per_file() {
        let mut wizard = UploadWizard::new();
        wizard
            .attach(&[candidate("a.csv", 1), candidate("b.png", 1)])
            .expect("attach");

        assert_eq!(
            wizard.submit_metadata(vec![complete("A")]),
            Err(MetadataError::FileCountMismatch {
                expected: 2,
                actual: 1
            })
        );

        let mut missing_author = complete("B");
        missing_author.authors = vec!["  ".to_string()];
        assert_eq!(
            wizard.submit_metadata(vec![complete("A"), missing_author]),
            Err(MetadataError::MissingAuthor {
                file: "b.png".to_string()
            })
        );

        let mut missing_date = complete("B");
        missing_date.collection_date.clear();
        assert!(matches!(
            wizard.submit_metadata(vec![complete("A"), missing_date]),
            Err(MetadataError::MissingCollectionDate { .. })
        ));
        assert_eq!(
            wizard.submit_metadata(vec![complete(" "), complete("B")]),
            Err(MetadataError::MissingTitle {
                file: "a.csv".to_string()
            })
        );
        assert_eq!(wizard.step(), WizardStep::Metadata);

        wizard
            .submit_metadata(vec![complete("A"), complete("B")])
            .expect("metadata");
        assert_eq!(wizard.step(), WizardStep::Status);
        assert_eq!(wizard.metadata().len(), 2);
    }

    #[test]
    fn the_lead_author_must_be_named() {
        let mut wizard = UploadWizard::new();
        wizard.attach(&[candidate("a.csv", 1)]).expect("attach");

        let mut co_author_only = complete("A");
        co_author_only.authors = vec![String::new(), "R. Iyer".to_string()];
        assert_eq!(
            wizard.submit_metadata(vec![co_author_only]),
            Err(MetadataError::MissingAuthor {
                file: "a.csv".to_string()
            })
        );

        let mut no_authors = complete("A");
        no_authors.authors.clear();
        assert!(matches!(
            wizard.submit_metadata(vec![no_authors]),
            Err(MetadataError::MissingAuthor { .. })
        ));

        let mut with_blank_co_author = complete("A");
        with_blank_co_author.authors.push("  ".to_string());
        wizard
            .submit_metadata(vec![with_blank_co_author])
            .expect("metadata");
        assert_eq!(wizard.step(), WizardStep::Status);
    }

    #[test]
    fn back_walks_one_step_at_a_time() {
        let mut wizard = UploadWizard::new();
        assert_eq!(wizard.back(), WizardStep::Upload);
        wizard.attach(&[candidate("a.xml", 1)]).expect("attach");
        wizard.submit_metadata(vec![complete("A")]).expect("metadata");
        assert_eq!(wizard.back(), WizardStep::Metadata);
        assert_eq!(wizard.back(), WizardStep::Upload);
        assert!(matches!(
            wizard.submit_metadata(vec![complete("A")]),
            Err(MetadataError::WrongStep { current: "upload" })
        ));
    }
}
