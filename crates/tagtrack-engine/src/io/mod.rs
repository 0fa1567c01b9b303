use crate::buffer::{BufferError, RopeBuffer};
use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path} is not valid UTF-8: {source}")]
    InvalidUtf8 { path: PathBuf, source: BufferError },
    #[error("Invalid documents directory: {0}")]
    InvalidDocumentsDir(String),
}

/// A document read from disk, ready to be tagged.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub buffer: RopeBuffer,
    /// The raw text split on `\n`, as handed to the editor that displays it.
    pub lines: Vec<String>,
}

/// Decode a file as UTF-8 and load it into a buffer.
pub fn load_document(
    relative_path: &RelativePath,
    documents_root: &Path,
) -> Result<LoadedDocument, IoError> {
    let absolute_path = relative_path.to_path(documents_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let bytes = fs::read(&absolute_path)?;
    let buffer = RopeBuffer::from_bytes(&bytes).map_err(|source| IoError::InvalidUtf8 {
        path: absolute_path.clone(),
        source,
    })?;
    let lines = buffer.text().split('\n').map(str::to_string).collect();
    tracing::debug!(path = %absolute_path.display(), bytes = bytes.len(), "loaded document");
    Ok(LoadedDocument { buffer, lines })
}

/// Scan for XML files in the documents directory
pub fn scan_xml_files(documents_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !documents_root.exists() {
        return Err(IoError::InvalidDocumentsDir(
            "documents directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(documents_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "xml"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_documents_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDocumentsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
