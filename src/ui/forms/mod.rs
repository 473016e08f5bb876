//! Form rendering module
//!
//! - `field_renderer`: one control per field kind
//! - `form_view`: question groups, fields and the submit button

mod field_renderer;
mod form_view;

pub use form_view::draw_form;
