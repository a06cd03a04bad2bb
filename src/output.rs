//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Listings are content inventories: every entry leads with its position and
//! title, with the stored details on indented context lines below. Positions
//! are 1-based, matching what `delete --index` expects.
//!
//! ## Gallery
//!
//! ```text
//! Anelli 2/15
//! 001 Solitario
//!     Image: images/gallery/solitario.jpg
//!     Description: Oro bianco
//!     Size: Orizzontale
//! 002 Fede
//!     Image: images/gallery/fede.jpg
//!     Description: —
//!     Size: Normale
//! ```
//!
//! ## Testimonials
//!
//! ```text
//! Testimonials (1)
//! 001 Giulia ★★★★★
//!     "Lavoro splendido, anello rimesso a nuovo."
//!     Platform: google
//!     Date: 3 marzo 2024
//! ```
//!
//! ## Notices and exports
//!
//! ```text
//! [success] ✓ Foto "Fede" aggiunta!
//! gallery-items.json → out/gallery-items.json
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::admin::Notice;
use crate::capacity::CounterState;
use crate::exchange::ExportFile;
use crate::render::{photo_rows, testimonial_rows};
use crate::store::{Gallery, Testimonials};
use crate::types::Category;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 0-based row index as a 1-based, 3-digit zero-padded position.
fn format_position(index: usize) -> String {
    format!("{:0>3}", index + 1)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 Title`, with an optional trailing detail.
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} {}", format_position(index), title, d),
        None => format!("{} {}", format_position(index), title),
    }
}

// ============================================================================
// Gallery
// ============================================================================

pub fn format_gallery(gallery: &Gallery, category: Category, counter: &CounterState) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}/{}",
        category.label(),
        counter.count,
        counter.limit
    )];
    let rows = photo_rows(gallery, category);
    if rows.is_empty() {
        lines.push(format!("{}Nessuna foto in questa categoria", indent(1)));
        return lines;
    }
    for row in rows {
        lines.push(entity_header(row.index, row.title, None));
        lines.push(format!("{}Image: {}", indent(1), row.thumbnail));
        lines.push(format!("{}Description: {}", indent(1), row.description));
        lines.push(format!("{}Size: {}", indent(1), row.size_label));
    }
    lines
}

pub fn print_gallery(gallery: &Gallery, category: Category, counter: &CounterState) {
    for line in format_gallery(gallery, category, counter) {
        println!("{}", line);
    }
}

// ============================================================================
// Testimonials
// ============================================================================

pub fn format_testimonials(testimonials: &Testimonials) -> Vec<String> {
    let mut lines = vec![format!("Testimonials ({})", testimonials.len())];
    let rows = testimonial_rows(testimonials);
    if rows.is_empty() {
        lines.push(format!("{}Nessuna testimonianza", indent(1)));
        return lines;
    }
    for row in rows {
        lines.push(entity_header(row.index, row.name, Some(row.stars.as_str())));
        lines.push(format!("{}\"{}\"", indent(1), row.preview));
        lines.push(format!("{}Platform: {}", indent(1), row.platform));
        lines.push(format!("{}Date: {}", indent(1), row.date));
    }
    lines
}

pub fn print_testimonials(testimonials: &Testimonials) {
    for line in format_testimonials(testimonials) {
        println!("{}", line);
    }
}

// ============================================================================
// Notices and exports
// ============================================================================

pub fn format_notice(notice: &Notice) -> String {
    notice.to_string()
}

pub fn print_notice(notice: &Notice) {
    println!("{}", format_notice(notice));
}

pub fn format_export(file: &ExportFile, written: &Path) -> String {
    format!("{} → {}", file.filename, written.display())
}

pub fn print_export(file: &ExportFile, written: &Path) {
    println!("{}", format_export(file, written));
}
