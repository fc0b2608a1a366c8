//! HTML rendering collaborator.
//!
//! Handlers depend on the [`TemplateRenderer`] trait so the table markup
//! can be swapped for a real template engine without touching the
//! pipeline. The built-in renderer emits a self-contained table page.

use features_protocol::Record;
use serde_json::Value;

/// Renders a record page for a named template.
pub trait TemplateRenderer: Send + Sync {
    /// Render `rows` projected to `fields` under the given title.
    fn render(&self, template: &str, title: &str, fields: &[String], rows: &[Record]) -> String;
}

/// Built-in renderer producing a plain HTML table.
pub struct TableRenderer;

impl TemplateRenderer for TableRenderer {
    fn render(&self, _template: &str, title: &str, fields: &[String], rows: &[Record]) -> String {
        let mut out = String::with_capacity(256 + rows.len() * 64);
        out.push_str("<!DOCTYPE html>\n<html>\n<head><title>");
        out.push_str(&escape(title));
        out.push_str("</title></head>\n<body>\n<h1>");
        out.push_str(&escape(title));
        out.push_str("</h1>\n<table>\n<tr>");
        for field in fields {
            out.push_str("<th>");
            out.push_str(&escape(field));
            out.push_str("</th>");
        }
        out.push_str("</tr>\n");

        for row in rows {
            out.push_str("<tr>");
            for field in fields {
                out.push_str("<td>");
                if let Some(value) = row.get(field) {
                    out.push_str(&escape(&display_value(value)));
                }
                out.push_str("</td>");
            }
            out.push_str("</tr>\n");
        }

        out.push_str("</table>\n</body>\n</html>\n");
        out
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
