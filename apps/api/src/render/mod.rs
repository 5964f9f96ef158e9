//! Server-side HTML rendering for persona and resume previews.
//!
//! Every renderer returns a complete standalone document so the output can be
//! shown in an iframe or handed straight to the PDF exporter. All user text
//! goes through [`escape`].

pub mod persona;
pub mod resume;

use crate::models::persona::Persona;
use crate::models::resume::Resume;

pub use persona::render_persona;
pub use resume::render_resume;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Wraps a rendered body in the shared document shell.
pub(crate) fn page(title: &str, style: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{}</title><style>{style}</style></head><body>{body}</body></html>",
        escape(title)
    )
}

/// `<ul>` of escaped items, or nothing when the list is empty.
pub(crate) fn list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul>");
    for item in items {
        out.push_str("<li>");
        out.push_str(&escape(item));
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    out
}

/// Inline tag chips, used for skills.
pub(crate) fn chips(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<span class=\"chip\">{}</span>", escape(item)))
        .collect()
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Preview title shared by both document kinds.
pub(crate) fn persona_title(persona: &Persona) -> String {
    format!("{} | Persona", persona.persona_name)
}

pub(crate) fn resume_title(resume: &Resume) -> String {
    format!("{} | Resume", resume.resume_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_list_is_empty_for_no_items() {
        assert_eq!(list(&[]), "");
        assert_eq!(list(&["a<b".to_string()]), "<ul><li>a&lt;b</li></ul>");
    }
}
