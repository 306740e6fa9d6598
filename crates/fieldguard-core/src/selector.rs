//! Best-effort locators for reported fields.

use fieldguard_protocols::{ElementRef, FormView};

/// Default upper bound on selector length, in characters.
pub const DEFAULT_SELECTOR_MAX_LEN: usize = 120;

const ELLIPSIS: &str = "...";

/// Build a locator for a field.
///
/// Form-bound fields are located through their form's `action`
/// (`form[action="/pay"] input[name="card"]`). Orphans fall back to their own
/// serialized opening tag. The result is truncated to `max_len` characters.
pub fn derive_selector(field: ElementRef<'_>, form: Option<&FormView<'_>>, max_len: usize) -> String {
    let selector = match form {
        Some(form) => {
            let form_part = match form.action() {
                Some(action) => format!("form[action=\"{}\"]", escape(action)),
                None => "form".to_string(),
            };
            format!("{} {}", form_part, field_part(field))
        }
        None => field.open_tag(),
    };
    truncate(&selector, max_len)
}

fn field_part(field: ElementRef<'_>) -> String {
    if let Some(id) = field.attr("id").filter(|v| !v.is_empty()) {
        return format!("{}#{}", field.tag(), id);
    }
    if let Some(name) = field.attr("name").filter(|v| !v.is_empty()) {
        return format!("{}[name=\"{}\"]", field.tag(), escape(name));
    }
    match field.attr("type").filter(|v| !v.is_empty()) {
        Some(t) => format!("{}[type=\"{}\"]", field.tag(), escape(t)),
        None => field.tag().to_string(),
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Truncate on a character boundary, marking the cut with an ellipsis.
pub fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        return value.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
