//! Shared test utilities for the officina test suite.
//!
//! Builders for photos, testimonials and galleries, a title extractor, and
//! small fixture documents in the on-disk format.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let gallery = gallery_with(Category::Anelli, 3);
//! assert_eq!(
//!     photo_titles(&gallery, Category::Anelli),
//!     ["Photo 1", "Photo 2", "Photo 3"]
//! );
//! ```

use crate::store::Gallery;
use crate::types::{Category, GalleryPhoto, PhotoSize, Platform, Rating, Testimonial};

/// Gallery document with two gems, one ring and one necklace, in that order.
pub const GALLERY_FIXTURE: &str = r#"{
  "gemme": [
    { "image": "images/gallery/smeraldo.jpg", "title": "Smeraldo", "description": "Taglio ottagonale", "size": "tall" },
    { "image": "images/gallery/zaffiro.jpg", "title": "Zaffiro", "description": "", "size": "normal" }
  ],
  "anelli": [
    { "image": "images/gallery/solitario.jpg", "title": "Solitario", "description": "Oro bianco", "size": "wide" }
  ],
  "collane": [
    { "image": "images/gallery/perle.jpg", "title": "Filo di perle", "description": "", "size": "normal" }
  ],
  "orecchini": [],
  "altro": []
}"#;

/// Testimonials document with two reviews.
pub const TESTIMONIALS_FIXTURE: &str = r#"{
  "testimonials": [
    {
      "name": "Giulia",
      "text": "Lavoro splendido, anello rimesso a nuovo.",
      "rating": 5,
      "platform": "google",
      "url": "https://g.page/r/example",
      "date": "3 marzo 2024"
    },
    {
      "name": "Paolo",
      "text": "Gentili e veloci.",
      "rating": 4,
      "platform": "facebook",
      "url": "https://facebook.com/example",
      "date": "15 giugno 2024"
    }
  ]
}"#;

/// `"Photo 1"` → `"photo-1"`.
fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn sample_photo(title: &str) -> GalleryPhoto {
    GalleryPhoto {
        image: format!("images/gallery/{}.jpg", slug(title)),
        title: title.to_string(),
        description: Some(format!("{title} description")),
        size: PhotoSize::Normal,
    }
}

/// Fresh gallery with `n` photos titled `Photo 1`..`Photo n` in `category`.
pub fn gallery_with(category: Category, n: usize) -> Gallery {
    let mut gallery = Gallery::fresh();
    for i in 1..=n {
        gallery.push(category, sample_photo(&format!("Photo {i}")));
    }
    gallery
}

pub fn sample_testimonial(name: &str, rating: i64) -> Testimonial {
    Testimonial {
        name: name.to_string(),
        text: format!("Review by {name}"),
        rating: Rating::new(rating).unwrap(),
        platform: Platform::Google,
        url: "https://g.page/r/example".to_string(),
        date: "15 giugno 2024".to_string(),
    }
}

pub fn photo_titles(gallery: &Gallery, category: Category) -> Vec<&str> {
    gallery
        .get(category)
        .iter()
        .map(|p| p.title.as_str())
        .collect()
}
