//! HTML document templates for exports.
//!
//! Templates live in `templates/exports/` and use Jinja2 syntax. They are
//! compiled into the binary, so exports do not depend on the working
//! directory.

pub mod engine;

pub use engine::{render_template, TemplateError};
