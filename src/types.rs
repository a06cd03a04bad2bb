//! Typed records shared by the store, the admin tools and the public site.
//!
//! Both JSON documents (`gallery-items.json` and `testimonials.json`) are
//! written by the admin tools and read by the public site, so these types
//! define the wire shape for both sides:
//!
//! ```json
//! { "gemme": [ { "image": "images/gallery/a.jpg", "title": "Emerald",
//!                "description": "", "size": "normal" } ] }
//!
//! { "testimonials": [ { "name": "Giulia", "text": "...", "rating": 5,
//!                       "platform": "google", "url": "https://...",
//!                       "date": "15 giugno 2024" } ] }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// A gallery partition. The set is closed: documents naming any other key
/// are rejected by the admin tools.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Gemme,
    Anelli,
    Collane,
    Orecchini,
    Altro,
}

impl Category {
    /// Canonical order, used when a fresh store is initialized.
    pub const ALL: [Category; 5] = [
        Category::Gemme,
        Category::Anelli,
        Category::Collane,
        Category::Orecchini,
        Category::Altro,
    ];

    /// Document key.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Gemme => "gemme",
            Category::Anelli => "anelli",
            Category::Collane => "collane",
            Category::Orecchini => "orecchini",
            Category::Altro => "altro",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Gemme => "Gemme",
            Category::Anelli => "Anelli",
            Category::Collane => "Collane",
            Category::Orecchini => "Orecchini",
            Category::Altro => "Altro",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Layout hint for a gallery card.
///
/// Values outside `normal | tall | wide` can appear in hand-edited
/// documents; they are kept verbatim so a load/export cycle never
/// rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhotoSize {
    #[default]
    Normal,
    Tall,
    Wide,
    Other(String),
}

impl PhotoSize {
    pub fn as_str(&self) -> &str {
        match self {
            PhotoSize::Normal => "normal",
            PhotoSize::Tall => "tall",
            PhotoSize::Wide => "wide",
            PhotoSize::Other(s) => s,
        }
    }
}

impl From<String> for PhotoSize {
    fn from(s: String) -> Self {
        match s.as_str() {
            "normal" => PhotoSize::Normal,
            "tall" => PhotoSize::Tall,
            "wide" => PhotoSize::Wide,
            _ => PhotoSize::Other(s),
        }
    }
}

impl From<&str> for PhotoSize {
    fn from(s: &str) -> Self {
        PhotoSize::from(s.to_string())
    }
}

impl From<PhotoSize> for String {
    fn from(size: PhotoSize) -> Self {
        size.as_str().to_string()
    }
}

/// Where a review was originally published.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    #[default]
    Google,
    Facebook,
    Instagram,
    Tripadvisor,
    Trustpilot,
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Google => "google",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Tripadvisor => "tripadvisor",
            Platform::Trustpilot => "trustpilot",
            Platform::Other(s) => s,
        }
    }

    /// Tag with its first letter upper-cased (`google` → `Google`).
    pub fn label(&self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        match s.as_str() {
            "google" => Platform::Google,
            "facebook" => Platform::Facebook,
            "instagram" => Platform::Instagram,
            "tripadvisor" => Platform::Tripadvisor,
            "trustpilot" => Platform::Trustpilot,
            _ => Platform::Other(s),
        }
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        Platform::from(s.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating {0} is outside 1-5")]
pub struct RatingOutOfRange(pub i64);

/// Star rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, RatingOutOfRange> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RatingOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A photo entry in one gallery category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    /// Image path, e.g. `images/gallery/smeraldo.jpg`.
    pub image: String,
    pub title: String,
    /// Written as `""` when absent; an empty string reads back as `None`.
    #[serde(default, with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub size: PhotoSize,
}

/// A customer review. `date` is the already-formatted display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub text: String,
    pub rating: Rating,
    pub platform: Platform,
    pub url: String,
    pub date: String,
}

mod empty_as_none {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_document_keys() {
        assert_eq!("anelli".parse::<Category>(), Ok(Category::Anelli));
        assert_eq!(
            "bracciali".parse::<Category>(),
            Err(UnknownCategory("bracciali".to_string()))
        );
    }

    #[test]
    fn category_keys_are_case_sensitive() {
        assert!("Gemme".parse::<Category>().is_err());
    }

    #[test]
    fn category_labels() {
        let labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Gemme", "Anelli", "Collane", "Orecchini", "Altro"]);
    }

    #[test]
    fn unknown_size_is_preserved() {
        let size: PhotoSize = serde_json::from_str(r#""panorama""#).unwrap();
        assert_eq!(size, PhotoSize::Other("panorama".to_string()));
        assert_eq!(serde_json::to_string(&size).unwrap(), r#""panorama""#);
    }

    #[test]
    fn platform_label_capitalizes_tag() {
        assert_eq!(Platform::Google.label(), "Google");
        assert_eq!(Platform::from("etsy").label(), "Etsy");
        assert_eq!(Platform::Other(String::new()).label(), "");
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(Rating::new(0), Err(RatingOutOfRange(0)));
        assert_eq!(Rating::new(6), Err(RatingOutOfRange(6)));
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().get() as i64, value);
        }
    }

    #[test]
    fn rating_rejected_on_deserialize() {
        let result: Result<Rating, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }

    #[test]
    fn photo_description_empty_string_is_none() {
        let photo: GalleryPhoto = serde_json::from_str(
            r#"{"image":"images/gallery/a.jpg","title":"Emerald","description":"","size":"normal"}"#,
        )
        .unwrap();
        assert_eq!(photo.description, None);
        let json = serde_json::to_value(&photo).unwrap();
        assert_eq!(json["description"], "");
    }

    #[test]
    fn photo_missing_optional_fields_use_defaults() {
        let photo: GalleryPhoto =
            serde_json::from_str(r#"{"image":"images/gallery/a.jpg","title":"Emerald"}"#).unwrap();
        assert_eq!(photo.description, None);
        assert_eq!(photo.size, PhotoSize::Normal);
    }

    #[test]
    fn testimonial_field_order_matches_documents() {
        let t = Testimonial {
            name: "Giulia".to_string(),
            text: "Bellissimo".to_string(),
            rating: Rating::new(5).unwrap(),
            platform: Platform::Google,
            url: "https://g.co/r/1".to_string(),
            date: "15 giugno 2024".to_string(),
        };
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Giulia","text":"Bellissimo","rating":5,"platform":"google","url":"https://g.co/r/1","date":"15 giugno 2024"}"#
        );
    }
}
