//! Document import and export.
//!
//! There is no server: the admin tool reads the documents the site already
//! publishes and hands back a new document for the operator to put in
//! place. Exports are written under the export directory with the canonical
//! file name and never over the source document.
//!
//! Reading distinguishes a missing file from an unreadable one. Both leave
//! the store fresh, but only a missing document may be replaced by an
//! export; the admin session refuses to export over one it could not read.

use crate::store::{ContentStore, Gallery, LoadError, LoadOutcome, Testimonials};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const GALLERY_FILENAME: &str = "gallery-items.json";
pub const TESTIMONIALS_FILENAME: &str = "testimonials.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} could not be loaded; refusing to export a replacement for it")]
    UnusableSource(String),
}

/// A serialized document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub contents: String,
    /// Path of the published document this file is meant to replace.
    pub replaces: String,
}

impl ExportFile {
    /// Hand-off line shown after a successful export.
    pub fn handoff_message(&self) -> String {
        format!(
            "✓ JSON scaricato! Ricorda di sostituire il file {}",
            self.replaces
        )
    }
}

pub fn export_gallery(store: &ContentStore, replaces: &str) -> Result<ExportFile, ExportError> {
    Ok(ExportFile {
        filename: GALLERY_FILENAME,
        contents: store.serialize_gallery()?,
        replaces: replaces.to_string(),
    })
}

pub fn export_testimonials(
    store: &ContentStore,
    replaces: &str,
) -> Result<ExportFile, ExportError> {
    Ok(ExportFile {
        filename: TESTIMONIALS_FILENAME,
        contents: store.serialize_testimonials()?,
        replaces: replaces.to_string(),
    })
}

/// Write `file` into `dir`, creating it if needed. Returns the written path.
pub fn write_export(dir: &Path, file: &ExportFile) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file.filename);
    std::fs::write(&path, &file.contents)?;
    tracing::debug!(path = %path.display(), bytes = file.contents.len(), "export written");
    Ok(path)
}

/// Read a document, mapping a missing file to [`LoadError::Missing`].
pub fn read_document(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::Missing,
        _ => LoadError::Unreachable {
            path: path.to_path_buf(),
            source,
        },
    })
}

pub fn import_gallery(store: &mut ContentStore, path: &Path) -> LoadOutcome {
    let parsed = read_document(path).and_then(|json| Gallery::from_json(&json));
    let outcome = store.apply_gallery(parsed);
    if let LoadOutcome::StartedFresh(err) = &outcome {
        tracing::warn!(path = %path.display(), %err, "gallery document unusable, starting fresh");
    }
    outcome
}

pub fn import_testimonials(store: &mut ContentStore, path: &Path) -> LoadOutcome {
    let parsed = read_document(path).and_then(|json| Testimonials::from_json(&json));
    let outcome = store.apply_testimonials(parsed);
    if let LoadOutcome::StartedFresh(err) = &outcome {
        tracing::warn!(path = %path.display(), %err, "testimonials document unusable, starting fresh");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::Category;
    use tempfile::TempDir;

    #[test]
    fn import_existing_gallery() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(GALLERY_FILENAME);
        std::fs::write(&path, GALLERY_FIXTURE).unwrap();

        let mut store = ContentStore::new();
        assert!(matches!(import_gallery(&mut store, &path), LoadOutcome::Loaded));
        assert_eq!(
            photo_titles(&store.gallery, Category::Gemme),
            ["Smeraldo", "Zaffiro"]
        );
    }

    #[test]
    fn import_missing_file_starts_fresh() {
        let tmp = TempDir::new().unwrap();
        let mut store = ContentStore::new();
        store.gallery = gallery_with(Category::Gemme, 2);

        let outcome = import_gallery(&mut store, &tmp.path().join("nope.json"));
        assert!(matches!(outcome, LoadOutcome::StartedFresh(LoadError::Missing)));
        assert_eq!(store.gallery, Gallery::fresh());
    }

    #[test]
    fn import_directory_is_unreachable() {
        let tmp = TempDir::new().unwrap();
        let mut store = ContentStore::new();
        let outcome = import_testimonials(&mut store, tmp.path());
        assert!(matches!(
            outcome,
            LoadOutcome::StartedFresh(LoadError::Unreachable { .. })
        ));
    }

    #[test]
    fn import_malformed_testimonials_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(TESTIMONIALS_FILENAME);
        std::fs::write(&path, r#"{"testimonials":[{"name":"x"}]}"#).unwrap();

        let mut store = ContentStore::new();
        store.testimonials = vec![sample_testimonial("Anna", 5)].into();
        let outcome = import_testimonials(&mut store, &path);
        assert!(matches!(
            outcome,
            LoadOutcome::StartedFresh(LoadError::Malformed(_))
        ));
        assert!(store.testimonials.is_empty());
    }

    #[test]
    fn export_writes_canonical_name_and_reloads() {
        let tmp = TempDir::new().unwrap();
        let mut store = ContentStore::new();
        store.gallery = gallery_with(Category::Anelli, 2);

        let file = export_gallery(&store, "config/gallery-items.json").unwrap();
        let path = write_export(&tmp.path().join("out"), &file).unwrap();
        assert_eq!(path.file_name().unwrap(), GALLERY_FILENAME);

        let mut reloaded = ContentStore::new();
        assert!(!import_gallery(&mut reloaded, &path).is_fresh());
        assert_eq!(reloaded.gallery, store.gallery);
    }

    #[test]
    fn testimonials_export_wraps_list() {
        let mut store = ContentStore::new();
        store.testimonials = vec![sample_testimonial("Anna", 4)].into();
        let file = export_testimonials(&store, "config/testimonials.json").unwrap();

        let value: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(value["testimonials"][0]["name"], "Anna");
        assert_eq!(value["testimonials"][0]["rating"], 4);
    }

    #[test]
    fn handoff_names_replaced_document() {
        let file = export_testimonials(&ContentStore::new(), "config/testimonials.json").unwrap();
        assert_eq!(
            file.handoff_message(),
            "✓ JSON scaricato! Ricorda di sostituire il file config/testimonials.json"
        );
    }
}
