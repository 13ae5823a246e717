//! Form field rendering
//!
//! - `field_renderer`: bordered text inputs backed by `FormField`

mod field_renderer;

pub use field_renderer::draw_field;
