//! # Officina
//!
//! Content admin for a small jewelry workshop site. The site has no server
//! side: it reads two JSON documents, a photo gallery partitioned by
//! category and a flat list of customer testimonials. This crate loads
//! those documents, edits them under capacity and validation rules, and
//! exports replacements for the operator to publish by hand.
//!
//! # Data Flow
//!
//! ```text
//! document ──import──▶ ContentStore ──crud──▶ ContentStore ──export──▶ document
//!                           │
//!                           └──render──▶ admin tables (HTML, CLI lines)
//!
//! document ──merge──▶ GalleryGrid / TestimonialsSection ──render──▶ public page
//! ```
//!
//! The admin side and the public side read the same documents but apply
//! different capacity tables. Admin limits guard what gets written; site
//! limits guard what gets shown.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Records and closed vocabularies: `Category`, `GalleryPhoto`, `Testimonial`, `Rating` |
//! | [`store`] | The in-memory content store and its document (de)serialization |
//! | [`capacity`] | Per-category limit tables and the admin counter state |
//! | [`validate`] | One predicate per required field |
//! | [`upload`] | Single-slot staging for the next photo's file |
//! | [`crud`] | Add/delete operations over the store |
//! | [`render`] | Admin table rows and their Maud markup |
//! | [`exchange`] | Reading documents from disk and writing exports |
//! | [`site`] | Public page display model: grid, load-more, filters, testimonials |
//! | [`admin`] | Session adapter turning operation outcomes into notices |
//! | [`config`] | `officina.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Manual Hand-Off
//!
//! Exports never overwrite the published documents. A botched edit costs a
//! re-export, not the live site, and the operator stays the one who decides
//! when a change goes out.
//!
//! ## Load Never Fails
//!
//! A missing or broken document yields an empty store and a notice instead
//! of an error, so the tool works on day one before any document exists.
//!
//! ## Maud For Markup
//!
//! HTML is produced with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error and every interpolation is escaped, which matters here
//! because titles and review texts come from free-form input.

pub mod admin;
pub mod capacity;
pub mod config;
pub mod crud;
pub mod exchange;
pub mod output;
pub mod render;
pub mod site;
pub mod store;
pub mod types;
pub mod upload;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
