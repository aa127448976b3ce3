use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// `(name, source)` of every export template
const TEMPLATES: &[(&str, &str)] = &[
    (
        "layout.html",
        include_str!("../../../templates/exports/layout.html.jinja"),
    ),
    (
        "summary.html",
        include_str!("../../../templates/exports/summary.html.jinja"),
    ),
    (
        "students.html",
        include_str!("../../../templates/exports/students.html.jinja"),
    ),
    (
        "faculty.html",
        include_str!("../../../templates/exports/faculty.html.jinja"),
    ),
    (
        "enrollment.html",
        include_str!("../../../templates/exports/enrollment.html.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with any serializable context.
///
/// # Example
/// ```ignore
/// let html = render_template("students.html", &context)?;
/// ```
pub fn render_template<C: Serialize>(template_name: &str, ctx: &C) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(Value::from_serialize(ctx))
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_template() {
        let result = render_template("nonexistent.html", &json!({}));
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_every_template_compiles() {
        for &(name, _) in TEMPLATES {
            assert!(get_environment().get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_values_are_html_escaped() {
        let html = render_template(
            "enrollment.html",
            &json!({
                "title": "Enrollment Report",
                "institution": "Campus",
                "generated_at": "2025-06-01",
                "total": 1,
                "rows": [{
                    "student_id": "S-1",
                    "name": "<script>alert(1)</script>",
                    "course_name": "Unknown",
                    "academic_year_name": "2024-2025",
                    "category": "freshman",
                    "year_level": null,
                    "enrollment_date": null
                }],
                "by_course": [{"label": "Unknown", "count": 1}],
                "by_academic_year": [{"label": "2024-2025", "count": 1}]
            }),
        )
        .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("size: A4 landscape"));
        assert!(html.contains("1 record</div>"));
    }
}
