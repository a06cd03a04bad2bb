//! Single-slot staging for the image file of the next photo.
//!
//! Selecting a file fills the slot; a successful add or a form reset empties
//! it. The bytes are only held for the session. The photo record keeps
//! nothing but a path built from the file name, so the operator still has to
//! copy the real file into place.

use std::io;
use std::path::Path;

/// A selected file awaiting attachment to a new photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    /// Original file name, e.g. `smeraldo.jpg`.
    pub name: String,
    pub data: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Read a local file into memory, keeping its file name.
    pub fn read(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no file name", path.display()),
                )
            })?;
        let data = std::fs::read(path)?;
        Ok(Self { name, data })
    }
}

/// The pending-upload slot. Holds at most one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedUpload {
    pending: Option<PendingFile>,
}

impl StagedUpload {
    /// Stage `file`, replacing whatever was staged before.
    pub fn stage(&mut self, file: PendingFile) {
        self.pending = Some(file);
    }

    pub fn pending(&self) -> Option<&PendingFile> {
        self.pending.as_ref()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
