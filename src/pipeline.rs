use crate::config::{Language, Level, TransformConfig};
use crate::encoder::encode_strings;
use crate::engine::{EngineOptions, JsEngine};
use crate::errors::TransformError;
use crate::renamer::{self, NamingScheme};
use crate::stripper::strip;
use tracing::debug;

/// Run the fixed Stripper -> Identifier Renamer -> String Encoder pipeline
/// for one language, each stage gated by its condition from `config`.
///
/// Pure and atomic over the whole input: the same `(text, config)` always
/// yields the same output, and there is no partial result. JavaScript
/// performs no local text manipulation; it maps the config onto the
/// external engine's option schema and invokes the engine once.
pub fn transform(
    language: Language,
    source: &str,
    config: &TransformConfig,
    engine: Option<&dyn JsEngine>,
) -> Result<String, TransformError> {
    if source.trim().is_empty() {
        return Err(TransformError::InvalidInput);
    }

    match language {
        Language::Javascript => {
            let engine = engine.ok_or_else(|| {
                TransformError::EngineFailure("no JavaScript engine configured".to_string())
            })?;
            let options = EngineOptions::from_config(config);
            debug!("invoking external JavaScript engine");
            engine
                .obfuscate(source, &options)
                .map_err(|e| TransformError::EngineFailure(e.to_string()))
        }
        Language::Python => {
            let mut out = strip(source, language, config.compact);
            if config.level != Level::Low {
                let scheme = match config.level {
                    Level::High => NamingScheme::Hex { offset: 0 },
                    _ => NamingScheme::Plain("v"),
                };
                out = renamer::rename(
                    &out,
                    &renamer::PY_IDENT,
                    renamer::PYTHON_RESERVED,
                    scheme,
                    "",
                )?;
            }
            Ok(encode_strings(
                &out,
                language,
                config.level,
                config.string_array,
            ))
        }
        Language::Html => {
            let out = strip(source, language, config.compact);
            Ok(encode_strings(&out, language, config.level, true))
        }
        Language::Css => {
            let mut out = strip(source, language, config.compact);
            if config.level != Level::Low {
                let class_scheme = match config.level {
                    Level::High => NamingScheme::Hex { offset: 0 },
                    _ => NamingScheme::Plain("c"),
                };
                out = renamer::rename(&out, &renamer::CSS_CLASS, &[], class_scheme, ".")?;

                // Ids share the alias counter space with classes; the hex
                // scheme offsets them by 1000 to keep the two disjoint.
                let id_scheme = match config.level {
                    Level::High => NamingScheme::Hex { offset: 1000 },
                    _ => NamingScheme::Plain("i"),
                };
                out = renamer::rename(&out, &renamer::CSS_ID, &[], id_scheme, "#")?;
            }
            debug!(bytes = out.len(), "css transform complete");
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: Level) -> TransformConfig {
        TransformConfig {
            level,
            ..TransformConfig::default()
        }
    }

    #[test]
    fn empty_input_is_rejected_before_any_stage() {
        for language in [
            Language::Javascript,
            Language::Python,
            Language::Html,
            Language::Css,
        ] {
            let err = transform(language, "   \n\t ", &config(Level::High), None).unwrap_err();
            assert!(matches!(err, TransformError::InvalidInput));
        }
    }

    #[test]
    fn css_high_renames_to_hex() {
        let out = transform(
            Language::Css,
            ".container { width: 100%; }",
            &config(Level::High),
            None,
        )
        .unwrap();
        assert_eq!(out, "._0x0{width:100%;}");
    }

    #[test]
    fn javascript_without_engine_fails() {
        let err = transform(Language::Javascript, "var x = 1;", &config(Level::Low), None)
            .unwrap_err();
        assert!(matches!(err, TransformError::EngineFailure(_)));
    }
}
