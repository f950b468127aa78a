//! Template resolution and rendering
//!
//! - [`resolver`]: ordered override directories with bundled fallback
//! - [`tera_renderer`]: compiles resolved templates into one Tera instance

pub mod resolver;
pub mod tera_renderer;

pub use resolver::{ResolvedTemplate, TemplateOrigin, TemplateResolver, bundled};
pub use tera_renderer::TeraTemplateRenderer;
