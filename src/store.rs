//! In-memory content store for one editing session.
//!
//! The store is the aggregate root the admin tools mutate: a [`Gallery`]
//! (category → ordered photos) and a flat [`Testimonials`] list. It is
//! constructed explicitly, owned by its caller and discarded when the
//! session ends unless exported.
//!
//! ## Loading
//!
//! Loading never fails from the caller's point of view. A document that is
//! missing, unreadable or malformed resets that half of the store to its
//! fresh state (every [`Category`] present and empty, or no testimonials) and
//! the reason is reported through [`LoadOutcome::StartedFresh`]. This keeps
//! the admin tool usable on a first run, before any document exists.
//!
//! ## Ordering
//!
//! Category keys keep the order in which the document listed them; a
//! category first touched by an add is appended after the existing ones.
//! Photos and testimonials keep insertion order, so
//! `load(serialize(s)) == s` for every reachable state.

use crate::types::{Category, GalleryPhoto, Testimonial};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("document not found")]
    Missing,
    #[error("could not read {path}: {source}")]
    Unreachable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result of replacing store contents from a document.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded,
    /// The document could not be used; the store was reset to empty.
    StartedFresh(LoadError),
}

impl LoadOutcome {
    pub fn is_fresh(&self) -> bool {
        matches!(self, LoadOutcome::StartedFresh(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    category: Category,
    photos: Vec<GalleryPhoto>,
}

/// Category-partitioned photo collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    sections: Vec<Section>,
}

impl Gallery {
    /// Every known category, empty, in canonical order.
    pub fn fresh() -> Self {
        Self {
            sections: Category::ALL
                .into_iter()
                .map(|category| Section {
                    category,
                    photos: Vec::new(),
                })
                .collect(),
        }
    }

    /// Parse a gallery document. Unknown category keys are an error.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Photos of `category` in order; empty if the category is unset.
    pub fn get(&self, category: Category) -> &[GalleryPhoto] {
        self.section(category)
            .map(|s| s.photos.as_slice())
            .unwrap_or(&[])
    }

    pub fn count_of(&self, category: Category) -> usize {
        self.get(category).len()
    }

    /// Categories present in the store, in document order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.iter().map(|s| s.category)
    }

    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.photos.len()).sum()
    }

    pub(crate) fn push(&mut self, category: Category, photo: GalleryPhoto) {
        self.section_mut(category).photos.push(photo);
    }

    pub(crate) fn remove(&mut self, category: Category, index: usize) -> Option<GalleryPhoto> {
        let section = self.sections.iter_mut().find(|s| s.category == category)?;
        if index < section.photos.len() {
            Some(section.photos.remove(index))
        } else {
            None
        }
    }

    fn section(&self, category: Category) -> Option<&Section> {
        self.sections.iter().find(|s| s.category == category)
    }

    fn section_mut(&mut self, category: Category) -> &mut Section {
        let pos = match self.sections.iter().position(|s| s.category == category) {
            Some(pos) => pos,
            None => {
                self.sections.push(Section {
                    category,
                    photos: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[pos]
    }
}

impl Serialize for Gallery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.category, &section.photos)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Gallery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GalleryVisitor;

        impl<'de> Visitor<'de> for GalleryVisitor {
            type Value = Gallery;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from category to a list of photos")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Gallery, A::Error> {
                let mut gallery = Gallery::default();
                while let Some((category, photos)) =
                    access.next_entry::<Category, Vec<GalleryPhoto>>()?
                {
                    // A repeated key replaces the earlier list in place.
                    gallery.section_mut(category).photos = photos;
                }
                Ok(gallery)
            }
        }

        deserializer.deserialize_map(GalleryVisitor)
    }
}

/// Flat, ordered testimonials list, serialized under a `testimonials` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonials {
    #[serde(default)]
    testimonials: Vec<Testimonial>,
}

impl Testimonials {
    /// Parse a testimonials document. A missing `testimonials` key is an
    /// empty list.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn all(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn len(&self) -> usize {
        self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.testimonials.is_empty()
    }

    pub(crate) fn push(&mut self, testimonial: Testimonial) {
        self.testimonials.push(testimonial);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Testimonial> {
        if index < self.testimonials.len() {
            Some(self.testimonials.remove(index))
        } else {
            None
        }
    }
}

impl From<Vec<Testimonial>> for Testimonials {
    fn from(testimonials: Vec<Testimonial>) -> Self {
        Self { testimonials }
    }
}

/// All gallery and testimonial content of one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentStore {
    pub gallery: Gallery,
    pub testimonials: Testimonials,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self {
            gallery: Gallery::fresh(),
            testimonials: Testimonials::default(),
        }
    }
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the gallery from a document; `None` means no document.
    pub fn load_gallery(&mut self, document: Option<&str>) -> LoadOutcome {
        let parsed = match document {
            Some(json) => Gallery::from_json(json),
            None => Err(LoadError::Missing),
        };
        self.apply_gallery(parsed)
    }

    /// Replace the testimonials from a document; `None` means no document.
    pub fn load_testimonials(&mut self, document: Option<&str>) -> LoadOutcome {
        let parsed = match document {
            Some(json) => Testimonials::from_json(json),
            None => Err(LoadError::Missing),
        };
        self.apply_testimonials(parsed)
    }

    pub(crate) fn apply_gallery(&mut self, parsed: Result<Gallery, LoadError>) -> LoadOutcome {
        match parsed {
            Ok(gallery) => {
                self.gallery = gallery;
                LoadOutcome::Loaded
            }
            Err(err) => {
                self.gallery = Gallery::fresh();
                LoadOutcome::StartedFresh(err)
            }
        }
    }

    pub(crate) fn apply_testimonials(
        &mut self,
        parsed: Result<Testimonials, LoadError>,
    ) -> LoadOutcome {
        match parsed {
            Ok(testimonials) => {
                self.testimonials = testimonials;
                LoadOutcome::Loaded
            }
            Err(err) => {
                self.testimonials = Testimonials::default();
                LoadOutcome::StartedFresh(err)
            }
        }
    }

    /// Pretty-printed gallery document.
    pub fn serialize_gallery(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.gallery)
    }

    /// Pretty-printed `{ "testimonials": [...] }` document.
    pub fn serialize_testimonials(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.testimonials)
    }
}
