use crate::errors::TransformError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Python identifiers. Case-insensitive scan; matched tokens keep their
/// original casing.
pub static PY_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[a-z_][a-z0-9_]*\b").unwrap());
/// CSS class selectors, sigil included.
pub static CSS_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\w+").unwrap());
/// CSS id selectors, sigil included.
pub static CSS_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());

/// Python keywords and builtins that are never renamed. Filtering is an
/// exact, case-sensitive match.
pub const PYTHON_RESERVED: &[&str] = &[
    "def", "class", "if", "else", "elif", "for", "while", "return", "import", "from", "print",
    "True", "False", "None", "and", "or", "not", "in", "is", "lambda", "with", "as", "pass",
    "break", "continue", "try", "except", "finally", "raise",
];

/// How generated aliases are spelled. `Plain` yields `prefix + index`;
/// `Hex` yields `_0x{hex(index + offset)}`. CSS ids run with offset 1000
/// so their hex aliases never collide with class aliases drawn from the
/// same counter space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    Plain(&'static str),
    Hex { offset: usize },
}

impl NamingScheme {
    pub fn name(&self, index: usize) -> String {
        match self {
            NamingScheme::Plain(prefix) => format!("{}{}", prefix, index),
            NamingScheme::Hex { offset } => format!("_0x{:x}", index + offset),
        }
    }
}

/// Original token -> generated alias, built fresh per invocation and
/// discarded after use. Insertion order is first-seen order in the source
/// scan and is the order numeric suffixes are assigned, so output is
/// deterministic for a given input.
#[derive(Debug)]
pub struct RenameTable {
    entries: Vec<(String, String)>,
}

impl RenameTable {
    /// Scan `text` for tokens matching `pattern`, dedupe preserving
    /// first-occurrence order, drop reserved words, then assign aliases
    /// `scheme.name(0), scheme.name(1), …` prefixed with `alias_prefix`
    /// (the selector sigil for CSS, empty otherwise).
    ///
    /// Reserved-word filtering happens after dedup, so a reserved token
    /// never consumes an index.
    pub fn build(
        text: &str,
        pattern: &Regex,
        reserved: &[&str],
        scheme: NamingScheme,
        alias_prefix: &str,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        for m in pattern.find_iter(text) {
            let token = m.as_str();
            if seen.insert(token.to_string()) {
                tokens.push(token.to_string());
            }
        }
        tokens.retain(|t| !reserved.contains(&t.as_str()));

        let entries = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                let alias = format!("{}{}", alias_prefix, scheme.name(index));
                (token, alias)
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every whole-token occurrence of each original token with
    /// its alias, in a single combined-alternation pass. Capturing all
    /// originals before any rewriting (and using one pass) means a
    /// generated alias can never be re-matched as a later original token.
    ///
    /// No scope analysis: occurrences inside string literals are rewritten
    /// too. Known lossy behavior, kept as-is.
    pub fn apply(&self, text: &str) -> Result<String, TransformError> {
        if self.entries.is_empty() {
            return Ok(text.to_string());
        }

        let by_token: HashMap<&str, &str> = self
            .entries
            .iter()
            .map(|(token, alias)| (token.as_str(), alias.as_str()))
            .collect();

        // Tokens starting with a non-word sigil (`.foo`, `#bar`) cannot
        // take a leading word boundary; they get only the trailing one.
        let alternation = self
            .entries
            .iter()
            .map(|(token, _)| {
                let escaped = regex::escape(token);
                if token.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
                    format!(r"\b{}\b", escaped)
                } else {
                    format!(r"{}\b", escaped)
                }
            })
            .collect::<Vec<_>>()
            .join("|");
        let combined = Regex::new(&format!("(?:{})", alternation))
            .map_err(|e| TransformError::RegexCompile(e.to_string()))?;

        Ok(combined
            .replace_all(text, |caps: &regex::Captures| {
                let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                by_token
                    .get(matched)
                    .map(|alias| alias.to_string())
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned())
    }
}

/// Build-and-apply convenience used by the pipeline.
pub fn rename(
    text: &str,
    pattern: &Regex,
    reserved: &[&str],
    scheme: NamingScheme,
    alias_prefix: &str,
) -> Result<String, TransformError> {
    RenameTable::build(text, pattern, reserved, scheme, alias_prefix).apply(text)
}
