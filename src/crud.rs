//! Add and delete operations over the content store.
//!
//! Every operation is synchronous and all-or-nothing: a call that returns an
//! error has not touched the store or the staging slot. Re-rendering after a
//! mutation is the caller's job.
//!
//! ## Deletion needs a confirmation
//!
//! Deletes take a [`Confirmation`]. A declined confirmation returns
//! [`Deletion::Cancelled`] without looking at the index, so a stale index
//! from a dismissed dialog is never an error.

use crate::capacity::CapacityTable;
use crate::store::{Gallery, Testimonials};
use crate::types::{Category, GalleryPhoto, PhotoSize, Platform, Testimonial};
use crate::upload::StagedUpload;
use crate::validate::{self, ValidationError};
use chrono::{Locale, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrudError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("category {category} is full ({limit} photos)")]
    Capacity { category: Category, limit: usize },
    #[error("no entry at index {index} (length {len})")]
    Index { index: usize, len: usize },
}

/// The caller's answer to "are you sure?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(yes: bool) -> Self {
        if yes {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion<T> {
    Removed(T),
    Cancelled,
}

/// Form values for a new photo. The image comes from the staging slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoDraft {
    pub title: String,
    pub description: String,
    pub size: PhotoSize,
}

/// Form values for a new testimonial, as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialDraft {
    pub name: String,
    pub text: String,
    pub url: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub rating: i64,
    pub platform: Platform,
}

/// Append a photo to `category`.
///
/// Checks run in order: title, staged file, capacity. On success the staged
/// file is consumed and the stored photo is returned.
pub fn add_photo(
    gallery: &mut Gallery,
    limits: &CapacityTable,
    staging: &mut StagedUpload,
    image_prefix: &str,
    category: Category,
    draft: &PhotoDraft,
) -> Result<GalleryPhoto, CrudError> {
    let title = validate::require_title(&draft.title)?;
    let file = validate::require_staged(staging)?;

    let limit = limits.limit(category);
    if gallery.count_of(category) >= limit {
        return Err(CrudError::Capacity { category, limit });
    }

    let description = draft.description.trim();
    let photo = GalleryPhoto {
        image: format!("{}{}", image_prefix, file.name),
        title: title.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        size: draft.size.clone(),
    };

    gallery.push(category, photo.clone());
    staging.clear();
    tracing::debug!(%category, image = %photo.image, "photo added");
    Ok(photo)
}

pub fn delete_photo(
    gallery: &mut Gallery,
    category: Category,
    index: usize,
    confirmation: Confirmation,
) -> Result<Deletion<GalleryPhoto>, CrudError> {
    if confirmation == Confirmation::Declined {
        return Ok(Deletion::Cancelled);
    }
    let len = gallery.count_of(category);
    let removed = gallery
        .remove(category, index)
        .ok_or(CrudError::Index { index, len })?;
    tracing::debug!(%category, index, "photo deleted");
    Ok(Deletion::Removed(removed))
}

/// Append a testimonial.
///
/// Required fields are checked first (name, text, url, date), then the
/// rating, then the date format. The stored date is the Italian long form.
pub fn add_testimonial(
    testimonials: &mut Testimonials,
    draft: &TestimonialDraft,
) -> Result<Testimonial, CrudError> {
    let name = validate::require_name(&draft.name)?;
    let text = validate::require_text(&draft.text)?;
    let url = validate::require_url(&draft.url)?;
    let date = validate::require_date(&draft.date)?;
    let rating = validate::require_rating(draft.rating)?;
    let date = validate::parse_review_date(date)?;

    let testimonial = Testimonial {
        name: name.to_string(),
        text: text.to_string(),
        rating,
        platform: draft.platform.clone(),
        url: url.to_string(),
        date: format_review_date(date),
    };

    testimonials.push(testimonial.clone());
    tracing::debug!(name = %testimonial.name, "testimonial added");
    Ok(testimonial)
}

pub fn delete_testimonial(
    testimonials: &mut Testimonials,
    index: usize,
    confirmation: Confirmation,
) -> Result<Deletion<Testimonial>, CrudError> {
    if confirmation == Confirmation::Declined {
        return Ok(Deletion::Cancelled);
    }
    let len = testimonials.len();
    let removed = testimonials
        .remove(index)
        .ok_or(CrudError::Index { index, len })?;
    tracing::debug!(index, "testimonial deleted");
    Ok(Deletion::Removed(removed))
}

/// `2024-06-15` → `15 giugno 2024`.
pub fn format_review_date(date: NaiveDate) -> String {
    date.format_localized("%-d %B %Y", Locale::it_IT).to_string()
}
