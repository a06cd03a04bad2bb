//! Admin table rendering.
//!
//! Rendering is a pure projection of store state. Rows are built first as
//! plain structs ([`PhotoRow`], [`TestimonialRow`]) so the CLI and the HTML
//! output share one projection, then turned into markup with
//! [maud](https://maud.lambda.xyz/). All interpolated text is escaped.
//!
//! Each row carries the index it was rendered at; the delete action is bound
//! to that index, which is why a re-render must follow every mutation.

use crate::capacity::{CounterLevel, CounterState};
use crate::store::{Gallery, Testimonials};
use crate::types::{Category, PhotoSize, Rating, Testimonial};
use maud::{Markup, html};

/// Shown for a photo without description.
pub const NO_DESCRIPTION: &str = "—";
/// Characters of review text shown in the admin table.
pub const PREVIEW_CHARS: usize = 50;

/// `normal`/`tall`/`wide` → Italian label; other sizes pass through.
pub fn size_label(size: &PhotoSize) -> &str {
    match size {
        PhotoSize::Normal => "Normale",
        PhotoSize::Tall => "Verticale",
        PhotoSize::Wide => "Orizzontale",
        PhotoSize::Other(s) => s,
    }
}

/// First `max` characters of `text`, with `...` appended only when
/// something was cut.
pub fn text_preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `★` per rating point, `☆` for the rest up to five.
pub fn star_rating(rating: Rating) -> String {
    let filled = usize::from(rating.get());
    let empty = usize::from(Rating::MAX) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRow<'a> {
    pub index: usize,
    pub thumbnail: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub size_label: &'a str,
}

pub fn photo_rows(gallery: &Gallery, category: Category) -> Vec<PhotoRow<'_>> {
    gallery
        .get(category)
        .iter()
        .enumerate()
        .map(|(index, photo)| PhotoRow {
            index,
            thumbnail: &photo.image,
            title: &photo.title,
            description: photo.description.as_deref().unwrap_or(NO_DESCRIPTION),
            size_label: size_label(&photo.size),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialRow<'a> {
    pub index: usize,
    pub name: &'a str,
    pub preview: String,
    pub stars: String,
    pub platform: &'a str,
    pub date: &'a str,
}

fn testimonial_row(index: usize, t: &Testimonial) -> TestimonialRow<'_> {
    TestimonialRow {
        index,
        name: &t.name,
        preview: text_preview(&t.text, PREVIEW_CHARS),
        stars: star_rating(t.rating),
        platform: t.platform.as_str(),
        date: &t.date,
    }
}

pub fn testimonial_rows(testimonials: &Testimonials) -> Vec<TestimonialRow<'_>> {
    testimonials
        .all()
        .iter()
        .enumerate()
        .map(|(i, t)| testimonial_row(i, t))
        .collect()
}

// ============================================================================
// HTML Components
// ============================================================================

fn empty_state(message: &str) -> Markup {
    html! {
        div.empty-state {
            div.empty-state-icon { "📭" }
            p { (message) }
        }
    }
}

fn delete_button(index: usize) -> Markup {
    html! {
        div.actions {
            button.btn-danger type="button" data-action="delete" data-index=(index) {
                "🗑️ Elimina"
            }
        }
    }
}

/// `count/limit` badge with `warning`/`full` modifiers.
pub fn counter_badge(category: Category, state: &CounterState) -> Markup {
    let class = match state.level {
        CounterLevel::Normal => "counter",
        CounterLevel::Warning => "counter warning",
        CounterLevel::Full => "counter full",
    };
    html! {
        div id="counterContainer" class=(class) {
            span id="categoryLabel" { (category.label()) }
            " "
            span id="counterText" { (state.count) "/" (state.limit) }
        }
    }
}

/// Photo table for the selected category, or the empty state.
pub fn gallery_table(gallery: &Gallery, category: Category) -> Markup {
    let rows = photo_rows(gallery, category);
    if rows.is_empty() {
        return empty_state("Nessuna foto in questa categoria");
    }
    html! {
        table.gallery-table {
            thead {
                tr {
                    th { "Anteprima" }
                    th { "Titolo" }
                    th { "Descrizione" }
                    th { "Dimensione" }
                    th { "Azioni" }
                }
            }
            tbody {
                @for row in &rows {
                    tr {
                        td { img.item-thumbnail src=(row.thumbnail) alt=(row.title); }
                        td { div.item-title { (row.title) } }
                        td { div.item-description { (row.description) } }
                        td { (row.size_label) }
                        td { (delete_button(row.index)) }
                    }
                }
            }
        }
    }
}

/// Testimonials table, or the empty state.
pub fn testimonials_table(testimonials: &Testimonials) -> Markup {
    let rows = testimonial_rows(testimonials);
    if rows.is_empty() {
        return empty_state("Nessuna testimonianza");
    }
    html! {
        table.testimonials-table {
            thead {
                tr {
                    th { "Nome" }
                    th { "Testo" }
                    th { "Rating" }
                    th { "Piattaforma" }
                    th { "Data" }
                    th { "Azioni" }
                }
            }
            tbody {
                @for row in &rows {
                    tr {
                        td { strong { (row.name) } }
                        td { em { "\"" (row.preview) "\"" } }
                        td { span.stars-display { (row.stars) } }
                        td {
                            span class={ "platform-badge platform-" (row.platform) } { (row.platform) }
                        }
                        td { (row.date) }
                        td { (delete_button(row.index)) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::GalleryPhoto;

    #[test]
    fn size_labels() {
        assert_eq!(size_label(&PhotoSize::Normal), "Normale");
        assert_eq!(size_label(&PhotoSize::Tall), "Verticale");
        assert_eq!(size_label(&PhotoSize::Wide), "Orizzontale");
        assert_eq!(size_label(&PhotoSize::from("square")), "square");
    }

    #[test]
    fn preview_exactly_fifty_chars_not_truncated() {
        let text = "a".repeat(50);
        assert_eq!(text_preview(&text, PREVIEW_CHARS), text);
    }

    #[test]
    fn preview_fifty_one_chars_truncated() {
        let text = "b".repeat(51);
        assert_eq!(
            text_preview(&text, PREVIEW_CHARS),
            format!("{}...", "b".repeat(50))
        );
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "è".repeat(51);
        assert_eq!(
            text_preview(&text, PREVIEW_CHARS),
            format!("{}...", "è".repeat(50))
        );
    }

    #[test]
    fn preview_empty() {
        assert_eq!(text_preview("", PREVIEW_CHARS), "");
    }

    #[test]
    fn stars() {
        assert_eq!(star_rating(Rating::new(5).unwrap()), "★★★★★");
        assert_eq!(star_rating(Rating::new(3).unwrap()), "★★★☆☆");
        assert_eq!(star_rating(Rating::new(1).unwrap()), "★☆☆☆☆");
    }

    #[test]
    fn photo_rows_follow_store_order_with_indices() {
        let gallery = gallery_with(Category::Anelli, 3);
        let rows = photo_rows(&gallery, Category::Anelli);
        let indexed: Vec<_> = rows.iter().map(|r| (r.index, r.title)).collect();
        assert_eq!(indexed, [(0, "Photo 1"), (1, "Photo 2"), (2, "Photo 3")]);
    }

    #[test]
    fn photo_row_description_placeholder() {
        let mut gallery = Gallery::fresh();
        gallery.push(
            Category::Gemme,
            GalleryPhoto {
                description: None,
                ..sample_photo("Opale")
            },
        );
        let rows = photo_rows(&gallery, Category::Gemme);
        assert_eq!(rows[0].description, NO_DESCRIPTION);
    }

    #[test]
    fn gallery_table_empty_state() {
        let html = gallery_table(&Gallery::fresh(), Category::Orecchini).into_string();
        assert!(html.contains("empty-state"));
        assert!(html.contains("Nessuna foto in questa categoria"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn gallery_table_rows_bind_delete_to_index() {
        let gallery = gallery_with(Category::Gemme, 2);
        let html = gallery_table(&gallery, Category::Gemme).into_string();
        assert!(html.contains("gallery-table"));
        assert!(html.contains(r#"data-index="0""#));
        assert!(html.contains(r#"data-index="1""#));
        assert!(!html.contains(r#"data-index="2""#));
        assert!(html.contains("images/gallery/photo-1.jpg"));
    }

    #[test]
    fn gallery_table_escapes_titles() {
        let mut gallery = Gallery::fresh();
        gallery.push(Category::Altro, sample_photo("<script>x</script>"));
        let html = gallery_table(&gallery, Category::Altro).into_string();
        assert!(!html.contains("<script>x"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn testimonials_table_empty_state() {
        let html = testimonials_table(&Testimonials::default()).into_string();
        assert!(html.contains("Nessuna testimonianza"));
    }

    #[test]
    fn testimonials_table_row_content() {
        let list: Testimonials = vec![sample_testimonial("Marco", 4)].into();
        let html = testimonials_table(&list).into_string();
        assert!(html.contains("<strong>Marco</strong>"));
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("platform-badge platform-google"));
        assert!(html.contains("15 giugno 2024"));
    }

    #[test]
    fn counter_badge_levels() {
        let full = counter_badge(Category::Anelli, &CounterState::new(15, 15)).into_string();
        assert!(full.contains("counter full"));
        assert!(full.contains("15/15"));

        let warn = counter_badge(Category::Anelli, &CounterState::new(12, 15)).into_string();
        assert!(warn.contains("counter warning"));

        let normal = counter_badge(Category::Gemme, &CounterState::new(1, 100)).into_string();
        assert!(normal.contains("Gemme"));
        assert!(!normal.contains("warning"));
    }
}
