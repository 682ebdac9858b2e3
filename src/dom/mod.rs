//! Document model - the abstract page the magnifier works against.
//!
//! A real host binds these ids and style strings to its own DOM; the
//! in-crate [`Document`] arena carries exactly what the engine needs:
//! structure, text, geometry, style strings and a mutation counter.

pub mod document;
pub mod style;

pub use document::Document;
pub use style::{ComputedStyle, format_px, parse_leading_f32};
