//! Public page display model.
//!
//! The public page does a reduced version of the admin flow: it reads the
//! same documents and merges them into what is already displayed, without
//! ever mutating the documents.
//!
//! ## Gallery grid
//!
//! - Items are appended in document order. An item is rejected when it has
//!   no image or when its category already holds the site limit (the site's
//!   own, looser [`CapacityTable`]).
//! - After the merge, [`GalleryGrid::init_load_more`] hides everything past
//!   the first `initial_visible` items behind a "load more" button.
//! - Filtering toggles visibility and never removes items. Choosing a filter
//!   also releases the load-more hiding; the button is only offered while
//!   the "all" filter is active.
//!
//! ## Testimonials
//!
//! Loaded testimonials go into an extra region that starts hidden. The
//! "see more reviews" button appears once at least one was merged and
//! disappears when the region is revealed.

use crate::capacity::CapacityTable;
use crate::render::star_rating;
use crate::store::Testimonials;
use crate::types::{PhotoSize, Testimonial};
use maud::{Markup, html};
use serde::Deserialize;

/// One loose entry of a gallery document. Missing or `null` fields fall
/// back to empty values; extra fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SiteEntry {
    image: Option<String>,
    title: Option<String>,
    description: Option<String>,
    size: Option<PhotoSize>,
}

/// A card in the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub category: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub size: PhotoSize,
    /// Hidden by the active category filter.
    pub filtered_out: bool,
    /// Hidden until "load more" is pressed.
    pub load_hidden: bool,
}

impl GridItem {
    pub fn new(
        category: impl Into<String>,
        image: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            image: image.into(),
            title: title.into(),
            description: String::new(),
            size: PhotoSize::Normal,
            filtered_out: false,
            load_hidden: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.filtered_out && !self.load_hidden
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    fn matches(&self, item: &GridItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => item.category == *c,
        }
    }
}

impl From<&str> for Filter {
    fn from(s: &str) -> Self {
        if s == "all" {
            Filter::All
        } else {
            Filter::Category(s.to_string())
        }
    }
}

/// The public gallery grid.
#[derive(Debug, Clone)]
pub struct GalleryGrid {
    items: Vec<GridItem>,
    limits: CapacityTable,
    filter: Filter,
    load_more_visible: bool,
}

impl GalleryGrid {
    /// Start from the items already on the page.
    pub fn new(limits: CapacityTable, static_items: Vec<GridItem>) -> Self {
        Self {
            items: static_items,
            limits,
            filter: Filter::All,
            load_more_visible: false,
        }
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn visible(&self) -> impl Iterator<Item = &GridItem> {
        self.items.iter().filter(|i| i.is_visible())
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    pub fn count_of(&self, category: &str) -> usize {
        self.items.iter().filter(|i| i.category == category).count()
    }

    /// Append one item. Returns `false` when it has no image or its category
    /// is at the site limit.
    pub fn add_item(&mut self, item: GridItem) -> bool {
        if item.image.is_empty() {
            return false;
        }
        let Some(limit) = self.limits.limit_for(&item.category) else {
            tracing::warn!(category = %item.category, "category without a limit, item not displayed");
            return false;
        };
        if self.count_of(&item.category) >= limit {
            tracing::warn!(
                category = %item.category,
                limit,
                "gallery limit reached, item not displayed"
            );
            return false;
        }
        self.items.push(item);
        true
    }

    /// Merge every list in a gallery document, in document order. Keys whose
    /// value is not a list, and entries that are not objects, are skipped.
    /// Returns how many items were added.
    pub fn merge_document(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut added = 0;
        for (category, entries) in document {
            let serde_json::Value::Array(entries) = entries else {
                continue;
            };
            for entry in entries {
                let entry: SiteEntry = match serde_json::from_value(entry) {
                    Ok(e) => e,
                    Err(err) => {
                        tracing::warn!(%category, %err, "skipping malformed gallery entry");
                        continue;
                    }
                };
                let item = GridItem {
                    category: category.clone(),
                    image: entry.image.unwrap_or_default(),
                    title: entry.title.unwrap_or_default(),
                    description: entry.description.unwrap_or_default(),
                    size: entry.size.unwrap_or_default(),
                    filtered_out: false,
                    load_hidden: false,
                };
                if self.add_item(item) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    /// Hide items past the first `initial` behind the load-more button.
    pub fn init_load_more(&mut self, initial: usize) {
        if self.items.len() <= initial {
            self.load_more_visible = false;
            return;
        }
        for item in self.items.iter_mut().skip(initial) {
            item.load_hidden = true;
        }
        self.load_more_visible = true;
    }

    /// Reveal every load-hidden item, keeping the active filter applied.
    pub fn show_more(&mut self) {
        for item in &mut self.items {
            item.load_hidden = false;
        }
        self.load_more_visible = false;
        let filter = self.filter.clone();
        for item in &mut self.items {
            item.filtered_out = !filter.matches(item);
        }
    }

    pub fn apply_filter(&mut self, filter: Filter) {
        for item in &mut self.items {
            item.load_hidden = false;
            item.filtered_out = !filter.matches(item);
        }
        self.load_more_visible = filter == Filter::All;
        self.filter = filter;
    }

    /// `(label, count, limit)` per category of the site table.
    pub fn counter(&self) -> Vec<(String, usize, usize)> {
        self.limits
            .entries()
            .map(|(category, limit)| {
                (
                    category.label().to_string(),
                    self.count_of(category.as_str()),
                    limit,
                )
            })
            .collect()
    }
}

/// The secondary testimonials region revealed on demand.
#[derive(Debug, Clone, Default)]
pub struct TestimonialsSection {
    extra: Vec<Testimonial>,
    revealed: bool,
    load_more_visible: bool,
}

impl TestimonialsSection {
    pub fn extra(&self) -> &[Testimonial] {
        &self.extra
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    /// Append every testimonial of a document to the hidden region.
    pub fn merge_document(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let document: Testimonials = serde_json::from_str(json)?;
        Ok(self.merge(document.all()))
    }

    pub fn merge(&mut self, testimonials: &[Testimonial]) -> usize {
        if testimonials.is_empty() {
            return 0;
        }
        self.extra.extend_from_slice(testimonials);
        self.load_more_visible = true;
        testimonials.len()
    }

    pub fn show_more(&mut self) {
        self.revealed = true;
        self.load_more_visible = false;
    }
}

// ============================================================================
// HTML Components
// ============================================================================

fn grid_item(item: &GridItem) -> Markup {
    let class = match &item.size {
        PhotoSize::Normal => "gallery-item reveal active".to_string(),
        other => format!("gallery-item reveal active {}", other.as_str()),
    };
    html! {
        div class=(class)
            data-category=(item.category)
            data-load-hidden=[item.load_hidden.then_some("true")]
            style=[(!item.is_visible()).then_some("display: none")] {
            img src=(item.image) alt=(item.title) loading="lazy";
            div.gallery-overlay {
                span.category { (item.category) }
                h4 { (item.title) }
                p { (item.description) }
            }
        }
    }
}

/// Gallery grid plus its load-more button.
pub fn render_grid(grid: &GalleryGrid) -> Markup {
    html! {
        div.gallery-grid id="galleryGrid" {
            @for item in grid.items() {
                (grid_item(item))
            }
        }
        button.btn-load-more id="galleryLoadMore" type="button"
            style=[(!grid.load_more_visible()).then_some("display: none")] {
            "Carica altro"
        }
    }
}

/// Per-category `Label: count/limit` strip.
pub fn render_counter(grid: &GalleryGrid) -> Markup {
    html! {
        div id="galleryCounter" {
            @for (label, count, limit) in grid.counter() {
                @let class = if count >= limit { "category-count limit-reached" } else { "category-count" };
                span class=(class) { (label) ": " (count) "/" (limit) }
            }
        }
    }
}

fn testimonial_card(t: &Testimonial) -> Markup {
    html! {
        div.testimonial.reveal.active {
            p.testimonial-quote { "\"" (t.text) "\"" }
            p.testimonial-author { "- " (t.name) }
            p.testimonial-stars { (star_rating(t.rating)) }
            a class={ "testimonial-link btn-" (t.platform.as_str()) } href=(t.url) target="_blank" rel="noopener" {
                "Leggi su " (t.platform.label()) " →"
            }
        }
    }
}

/// Extra testimonials region and its reveal button.
pub fn render_testimonials(section: &TestimonialsSection) -> Markup {
    html! {
        div.testimonials-extra.visible[section.is_revealed()] id="testimonialsExtra" {
            @for t in section.extra() {
                (testimonial_card(t))
            }
        }
        button.btn-load-more id="testimonialsLoadMore" type="button"
            style=[(!section.load_more_visible()).then_some("display: none")] {
            "Vedi altre recensioni"
        }
    }
}
