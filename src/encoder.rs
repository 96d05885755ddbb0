use crate::config::{Language, Level};
use base64::{engine::general_purpose, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;

// Escape-aware quoted literals, single or double quoted.
static PY_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#).unwrap());
static HTML_PARTIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>'"]"#).unwrap());

/// Replace literal text spans with an encoded equivalent.
///
/// Python rewrites quoted string literals into a base64 decode expression;
/// literals whose content is two characters or fewer are left untouched
/// (a policy outcome, not an error). HTML encodes characters as decimal
/// numeric character references: every character at `High`, only
/// `< > ' "` at `Medium`. CSS and JavaScript have no encoder stage.
pub fn encode_strings(text: &str, language: Language, level: Level, enabled: bool) -> String {
    match language {
        Language::Python => {
            if !enabled || level != Level::High {
                return text.to_string();
            }
            PY_STRING
                .replace_all(text, |caps: &regex::Captures| {
                    let literal = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                    let content = &literal[1..literal.len() - 1];
                    if content.chars().count() <= 2 {
                        return literal.to_string();
                    }
                    let payload = general_purpose::STANDARD.encode(content);
                    format!("__import__('base64').b64decode('{}').decode()", payload)
                })
                .into_owned()
        }
        Language::Html => match level {
            Level::High => text
                .chars()
                .map(|c| format!("&#{};", c as u32))
                .collect(),
            Level::Medium => HTML_PARTIAL
                .replace_all(text, |caps: &regex::Captures| {
                    let c = caps.get(0).and_then(|m| m.as_str().chars().next());
                    match c {
                        Some(c) => format!("&#{};", c as u32),
                        None => String::new(),
                    }
                })
                .into_owned(),
            Level::Low => text.to_string(),
        },
        Language::Css | Language::Javascript => text.to_string(),
    }
}
