use crate::config::Language;
use once_cell::sync::Lazy;
use regex::Regex;

static PY_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)#.*$").unwrap());
static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static CSS_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static CSS_DELIM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*([{}:;,])\s*").unwrap());

/// Remove comments and collapse insignificant whitespace for one
/// language. Identity when `compact` is false; JavaScript is left to the
/// external engine.
///
/// Matching is purely textual: comment-looking sequences inside string
/// literals are stripped too. Known lossy behavior, kept as-is.
pub fn strip(text: &str, language: Language, compact: bool) -> String {
    if !compact {
        return text.to_string();
    }

    match language {
        Language::Python => {
            let no_comments = PY_COMMENT.replace_all(text, "");
            let mut out = no_comments
                .lines()
                .filter(|line| !line.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if text.ends_with('\n') && !out.is_empty() {
                out.push('\n');
            }
            out
        }
        Language::Html => {
            let no_comments = HTML_COMMENT.replace_all(text, "");
            WS_RUN.replace_all(&no_comments, " ").trim().to_string()
        }
        Language::Css => {
            let no_comments = CSS_COMMENT.replace_all(text, "");
            let collapsed = WS_RUN.replace_all(&no_comments, " ");
            CSS_DELIM.replace_all(&collapsed, "$1").trim().to_string()
        }
        Language::Javascript => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_strip_removes_comments_and_blank_lines() {
        let src = "x = 1  # counter\n\n# standalone\ny = 2\n";
        // Only the comment text goes away; whitespace before the `#` stays.
        assert_eq!(strip(src, Language::Python, true), "x = 1  \ny = 2\n");
    }

    #[test]
    fn css_strip_is_idempotent() {
        let src = ".a {\n  color: red; /* warm */\n}\n";
        let once = strip(src, Language::Css, true);
        assert_eq!(once, ".a{color:red;}");
        assert_eq!(strip(&once, Language::Css, true), once);
    }

    #[test]
    fn compact_false_is_identity() {
        let src = "<p>  keep   me  </p><!-- note -->";
        assert_eq!(strip(src, Language::Html, false), src);
    }
}
