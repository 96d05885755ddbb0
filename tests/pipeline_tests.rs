use code_obfuscator::config::{Language, Level, TransformConfig};
use code_obfuscator::engine::{EngineError, EngineOptions, JsEngine};
use code_obfuscator::errors::TransformError;
use code_obfuscator::pipeline::transform;

fn config(level: Level) -> TransformConfig {
    TransformConfig {
        level,
        ..TransformConfig::default()
    }
}

struct StubEngine {
    fail: bool,
}

impl JsEngine for StubEngine {
    fn obfuscate(&self, code: &str, options: &EngineOptions) -> Result<String, EngineError> {
        if self.fail {
            return Err(EngineError::Failed {
                status: 1,
                stderr: "boom".into(),
            });
        }
        Ok(format!(
            "/*{:?}*/{}",
            options.identifier_names_generator, code
        ))
    }
}

#[test]
fn empty_input_fails_for_every_language() {
    for language in [
        Language::Javascript,
        Language::Python,
        Language::Html,
        Language::Css,
    ] {
        let err = transform(language, "", &config(Level::Medium), None).unwrap_err();
        assert!(matches!(err, TransformError::InvalidInput));
        let err = transform(language, " \n\t ", &config(Level::Medium), None).unwrap_err();
        assert!(matches!(err, TransformError::InvalidInput));
    }
}

#[test]
fn css_high_concrete_scenario() {
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
fn css_medium_uses_plain_class_and_id_prefixes() {
    let out = transform(
        Language::Css,
        ".nav { color: red; }\n#main { color: blue; }",
        &config(Level::Medium),
        None,
    )
    .unwrap();
    assert_eq!(out, ".c0{color:red;}#i0{color:blue;}");
}

#[test]
fn css_low_only_minifies() {
    let out = transform(
        Language::Css,
        ".nav {\n  color: red;\n}\n",
        &config(Level::Low),
        None,
    )
    .unwrap();
    assert_eq!(out, ".nav{color:red;}");
}

#[test]
fn python_high_renames_and_encodes() {
    let cfg = TransformConfig {
        level: Level::High,
        string_array: true,
        ..TransformConfig::default()
    };
    let out = transform(Language::Python, "message = \"!!!! 1234\"", &cfg, None).unwrap();
    // `message` is the only identifier; the literal content matches no
    // identifier pattern, so the payload decodes to it verbatim.
    assert!(out.starts_with("_0x0 = "));
    assert!(out.contains("__import__('base64').b64decode('"));
    assert!(out.contains(".decode()"));
    assert!(!out.contains("!!!! 1234"));
}

#[test]
fn python_renamer_reaches_into_string_literals() {
    // Purely lexical renaming: identifiers inside literals are rewritten
    // too. Kept lossy on purpose.
    let cfg = TransformConfig {
        level: Level::Medium,
        ..TransformConfig::default()
    };
    let out = transform(Language::Python, "greeting = \"hello\"", &cfg, None).unwrap();
    assert_eq!(out, "v0 = \"v1\"");
}

#[test]
fn python_low_skips_renaming() {
    let out = transform(
        Language::Python,
        "x = 1  # note\n\ny = 2\n",
        &config(Level::Low),
        None,
    )
    .unwrap();
    assert_eq!(out, "x = 1  \ny = 2\n");
}

#[test]
fn html_medium_concrete_scenario() {
    let out = transform(Language::Html, "<p>A & B</p>", &config(Level::Medium), None).unwrap();
    assert_eq!(out, "&#60;p&#62;A & B&#60;/p&#62;");
}

#[test]
fn html_high_encodes_whole_document() {
    let out = transform(Language::Html, "<b>x</b>", &config(Level::High), None).unwrap();
    assert_eq!(out, "&#60;&#98;&#62;&#120;&#60;&#47;&#98;&#62;");
}

#[test]
fn html_compact_strips_comments_before_encoding() {
    let out = transform(
        Language::Html,
        "<p>hi</p> <!-- secret -->",
        &config(Level::Low),
        None,
    )
    .unwrap();
    assert_eq!(out, "<p>hi</p>");
}

#[test]
fn javascript_requires_an_engine() {
    let err = transform(Language::Javascript, "var x;", &config(Level::Low), None).unwrap_err();
    match err {
        TransformError::EngineFailure(msg) => assert!(msg.contains("no JavaScript engine")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn javascript_delegates_to_engine() {
    let engine = StubEngine { fail: false };
    let out = transform(
        Language::Javascript,
        "var x = 1;",
        &config(Level::High),
        Some(&engine),
    )
    .unwrap();
    assert_eq!(out, "/*Hexadecimal*/var x = 1;");
}

#[test]
fn engine_failure_is_wrapped_with_its_message() {
    let engine = StubEngine { fail: true };
    let err = transform(
        Language::Javascript,
        "var x = 1;",
        &config(Level::Low),
        Some(&engine),
    )
    .unwrap_err();
    match err {
        TransformError::EngineFailure(msg) => assert!(msg.contains("boom")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn transform_is_deterministic() {
    let cfg = TransformConfig {
        level: Level::High,
        string_array: true,
        ..TransformConfig::default()
    };
    let src = "def greet(name):\n    message = \"!!!! 1234\"\n    return message\n";
    let first = transform(Language::Python, src, &cfg, None).unwrap();
    let second = transform(Language::Python, src, &cfg, None).unwrap();
    assert_eq!(first, second);
}
