//! Admin session: the event adapter over the pure CRUD layer.
//!
//! A session owns one [`ContentStore`], the selected category, the staged
//! upload and the photo form. Every user action goes through a method that
//! calls into [`crate::crud`] and turns the outcome into a [`Notice`]; no
//! error escapes as anything but a notice. Rendering after an action is
//! left to the caller, which reads the session state back through
//! [`AdminSession::render_gallery`] and friends.
//!
//! ## Unreadable documents are read-only
//!
//! A missing document is a first run: the session starts empty and edits
//! are exported as a brand new document. A document that exists but cannot
//! be read or parsed is different. The session still starts empty so the
//! operator can look around, but adds, deletes and exports on that half are
//! refused: exporting would hand back a replacement that silently drops
//! everything the live document holds.

use crate::capacity::{CapacityTable, CounterState};
use crate::config::StudioConfig;
use crate::crud::{
    self, Confirmation, CrudError, Deletion, PhotoDraft, TestimonialDraft,
};
use crate::exchange::{self, ExportError, ExportFile};
use crate::render;
use crate::store::{ContentStore, LoadError, LoadOutcome};
use crate::types::{Category, PhotoSize};
use crate::upload::{PendingFile, StagedUpload};
use crate::validate::ValidationError;
use maud::Markup;
use std::fmt;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }
}

/// A transient message shown for `duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub duration: Duration,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.text)
    }
}

/// How the document behind one half of the session was obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentState {
    /// Nothing loaded yet.
    #[default]
    Unloaded,
    Loaded,
    /// No document on disk; starting a new one.
    Missing,
    /// The document exists but could not be read or parsed.
    Unusable,
}

impl DocumentState {
    fn after(outcome: &LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Loaded => DocumentState::Loaded,
            LoadOutcome::StartedFresh(LoadError::Missing) => DocumentState::Missing,
            LoadOutcome::StartedFresh(_) => DocumentState::Unusable,
        }
    }

    /// Whether edits and exports may replace the document.
    pub fn is_writable(self) -> bool {
        self != DocumentState::Unusable
    }
}

pub struct AdminSession {
    store: ContentStore,
    gallery_state: DocumentState,
    testimonials_state: DocumentState,
    category: Category,
    staging: StagedUpload,
    form: PhotoDraft,
    limits: CapacityTable,
    image_prefix: String,
    notice_duration: Duration,
    gallery_document: String,
    testimonials_document: String,
}

impl AdminSession {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            store: ContentStore::new(),
            gallery_state: DocumentState::default(),
            testimonials_state: DocumentState::default(),
            category: Category::default(),
            staging: StagedUpload::default(),
            form: PhotoDraft::default(),
            limits: CapacityTable::admin(&config.admin),
            image_prefix: config.paths.image_prefix.clone(),
            notice_duration: config.notices.duration(),
            gallery_document: config.paths.gallery_document.clone(),
            testimonials_document: config.paths.testimonials_document.clone(),
        }
    }

    fn notice(&self, level: NoticeLevel, text: impl Into<String>) -> Notice {
        Notice {
            level,
            text: text.into(),
            duration: self.notice_duration,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn gallery_state(&self) -> DocumentState {
        self.gallery_state
    }

    pub fn testimonials_state(&self) -> DocumentState {
        self.testimonials_state
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn staging(&self) -> &StagedUpload {
        &self.staging
    }

    pub fn form(&self) -> &PhotoDraft {
        &self.form
    }

    pub fn limits(&self) -> &CapacityTable {
        &self.limits
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load the gallery document. Exports then name `path` as the file to
    /// replace.
    pub fn load_gallery(&mut self, path: &Path) -> Notice {
        let outcome = exchange::import_gallery(&mut self.store, path);
        self.gallery_state = DocumentState::after(&outcome);
        self.gallery_document = path.display().to_string();
        match outcome {
            LoadOutcome::Loaded => self.notice(NoticeLevel::Info, "Configurazione caricata!"),
            LoadOutcome::StartedFresh(LoadError::Missing) => self.notice(
                NoticeLevel::Info,
                "Nessuna configurazione trovata — puoi iniziare ad aggiungere foto",
            ),
            LoadOutcome::StartedFresh(err) => self.unusable_notice(&self.gallery_document, &err),
        }
    }

    pub fn load_testimonials(&mut self, path: &Path) -> Notice {
        let outcome = exchange::import_testimonials(&mut self.store, path);
        self.testimonials_state = DocumentState::after(&outcome);
        self.testimonials_document = path.display().to_string();
        match outcome {
            LoadOutcome::Loaded => {
                self.notice(NoticeLevel::Success, "Configurazione caricata!")
            }
            LoadOutcome::StartedFresh(LoadError::Missing) => self.notice(
                NoticeLevel::Info,
                "Errore nel caricamento della configurazione",
            ),
            LoadOutcome::StartedFresh(err) => {
                self.unusable_notice(&self.testimonials_document, &err)
            }
        }
    }

    fn unusable_notice(&self, document: &str, err: &LoadError) -> Notice {
        self.notice(
            NoticeLevel::Error,
            format!("Impossibile leggere {document} ({err}): correggi il file prima di modificarlo"),
        )
    }

    fn read_only_notice(&self, document: &str) -> Notice {
        self.notice(
            NoticeLevel::Error,
            format!("{document} non è stato caricato: modifiche ed esportazione disabilitate"),
        )
    }

    // ------------------------------------------------------------------
    // Photo form
    // ------------------------------------------------------------------

    /// Switch category. The photo form is cleared.
    pub fn select_category(&mut self, category: Category) {
        self.category = category;
        self.reset_form();
    }

    pub fn stage_file(&mut self, file: PendingFile) {
        self.staging.stage(file);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    pub fn set_size(&mut self, size: PhotoSize) {
        self.form.size = size;
    }

    pub fn reset_form(&mut self) {
        self.form = PhotoDraft::default();
        self.staging.clear();
    }

    /// Submit the photo form for the selected category. The form is reset
    /// only on success.
    pub fn add_photo(&mut self) -> Notice {
        if !self.gallery_state.is_writable() {
            return self.read_only_notice(&self.gallery_document);
        }
        let result = crud::add_photo(
            &mut self.store.gallery,
            &self.limits,
            &mut self.staging,
            &self.image_prefix,
            self.category,
            &self.form,
        );
        match result {
            Ok(photo) => {
                self.reset_form();
                self.notice(
                    NoticeLevel::Success,
                    format!("✓ Foto \"{}\" aggiunta!", photo.title),
                )
            }
            Err(err) => self.error_notice(&err),
        }
    }

    pub fn delete_photo(&mut self, index: usize, confirmation: Confirmation) -> Option<Notice> {
        if !self.gallery_state.is_writable() {
            return Some(self.read_only_notice(&self.gallery_document));
        }
        let result = crud::delete_photo(
            &mut self.store.gallery,
            self.category,
            index,
            confirmation,
        );
        match result {
            Ok(Deletion::Removed(_)) => Some(self.notice(NoticeLevel::Success, "Foto eliminata")),
            Ok(Deletion::Cancelled) => None,
            Err(err) => Some(self.error_notice(&err)),
        }
    }

    pub fn counter(&self) -> CounterState {
        self.limits.counter(&self.store.gallery, self.category)
    }

    // ------------------------------------------------------------------
    // Testimonials
    // ------------------------------------------------------------------

    pub fn add_testimonial(&mut self, draft: &TestimonialDraft) -> Notice {
        if !self.testimonials_state.is_writable() {
            return self.read_only_notice(&self.testimonials_document);
        }
        match crud::add_testimonial(&mut self.store.testimonials, draft) {
            Ok(t) => self.notice(
                NoticeLevel::Success,
                format!("✓ Testimonianza di \"{}\" aggiunta!", t.name),
            ),
            Err(err) => self.error_notice(&err),
        }
    }

    pub fn delete_testimonial(
        &mut self,
        index: usize,
        confirmation: Confirmation,
    ) -> Option<Notice> {
        if !self.testimonials_state.is_writable() {
            return Some(self.read_only_notice(&self.testimonials_document));
        }
        match crud::delete_testimonial(&mut self.store.testimonials, index, confirmation) {
            Ok(Deletion::Removed(_)) => {
                Some(self.notice(NoticeLevel::Success, "Testimonianza eliminata"))
            }
            Ok(Deletion::Cancelled) => None,
            Err(err) => Some(self.error_notice(&err)),
        }
    }

    fn error_notice(&self, err: &CrudError) -> Notice {
        let text = match err {
            CrudError::Validation(ValidationError::MissingTitle) => {
                "Per favore inserisci un titolo".to_string()
            }
            CrudError::Validation(ValidationError::MissingFile) => {
                "Per favore seleziona un'immagine".to_string()
            }
            CrudError::Validation(
                ValidationError::MissingName
                | ValidationError::MissingText
                | ValidationError::MissingUrl
                | ValidationError::MissingDate,
            ) => "Compila tutti i campi obbligatori".to_string(),
            CrudError::Validation(ValidationError::Rating(_)) => {
                "Rating deve essere tra 1 e 5 stelle".to_string()
            }
            CrudError::Validation(ValidationError::InvalidDate(_)) => {
                "Data non valida".to_string()
            }
            CrudError::Capacity { limit, .. } => {
                format!("Limite raggiunto! Massimo {limit} foto per questa categoria")
            }
            CrudError::Index { index, len } => {
                format!("Elemento {index} non trovato ({len} presenti)")
            }
        };
        self.notice(NoticeLevel::Error, text)
    }

    // ------------------------------------------------------------------
    // Rendering and export
    // ------------------------------------------------------------------

    pub fn render_counter(&self) -> Markup {
        render::counter_badge(self.category, &self.counter())
    }

    pub fn render_gallery(&self) -> Markup {
        render::gallery_table(&self.store.gallery, self.category)
    }

    pub fn render_testimonials(&self) -> Markup {
        render::testimonials_table(&self.store.testimonials)
    }

    /// Refused when the gallery document could not be read.
    pub fn export_gallery(&self) -> Result<ExportFile, ExportError> {
        if !self.gallery_state.is_writable() {
            return Err(ExportError::UnusableSource(self.gallery_document.clone()));
        }
        exchange::export_gallery(&self.store, &self.gallery_document)
    }

    /// Refused when the testimonials document could not be read.
    pub fn export_testimonials(&self) -> Result<ExportFile, ExportError> {
        if !self.testimonials_state.is_writable() {
            return Err(ExportError::UnusableSource(self.testimonials_document.clone()));
        }
        exchange::export_testimonials(&self.store, &self.testimonials_document)
    }

    /// Success notice for a finished export.
    pub fn export_notice(&self, file: &ExportFile) -> Notice {
        self.notice(NoticeLevel::Success, file.handoff_message())
    }
}
