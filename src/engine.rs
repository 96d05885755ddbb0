use crate::config::{Level, TransformConfig};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("engine exited with {status}: {stderr}")]
    Failed { status: i32, stderr: String },
    #[error("engine produced non-UTF-8 output")]
    InvalidOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierNamesGenerator {
    Mangled,
    Hexadecimal,
}

/// Option schema of the external JavaScript obfuscation engine, pinned
/// here as an explicit versioned boundary. Optional fields are omitted
/// from the serialized form unless set, matching how the engine treats
/// absent options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    pub compact: bool,
    pub simplify: bool,
    pub string_array: bool,
    pub string_array_rotate: bool,
    pub string_array_shuffle: bool,
    pub rename_globals: bool,
    pub log: bool,
    pub unicode_escape_sequence: bool,
    pub identifier_names_generator: IdentifierNamesGenerator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_flow_flattening: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_flow_flattening_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_code_injection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_code_injection_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_calls_transform: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_wrappers_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_wrappers_chained_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_wrappers_parameters_max_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_wrappers_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_index_shift: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers_to_expressions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_strings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_strings_chunk_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_array_encoding: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_console_output: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_defending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_protection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_protection_interval: Option<u32>,
}

impl EngineOptions {
    /// Translate the UI-facing `TransformConfig` into the engine's option
    /// schema. Medium and high levels enable the control-flow / dead-code
    /// / string-array bundle; high additionally turns on hexadecimal
    /// identifier names, numeric-expression rewriting, string splitting
    /// and base64 string-array encoding, and raises both thresholds.
    pub fn from_config(config: &TransformConfig) -> Self {
        let mut options = Self {
            compact: config.compact,
            simplify: true,
            string_array: config.string_array,
            string_array_rotate: config.rotate_string_array,
            string_array_shuffle: true,
            rename_globals: false,
            log: false,
            unicode_escape_sequence: false,
            identifier_names_generator: IdentifierNamesGenerator::Mangled,
            control_flow_flattening: None,
            control_flow_flattening_threshold: None,
            dead_code_injection: None,
            dead_code_injection_threshold: None,
            string_array_calls_transform: None,
            string_array_threshold: None,
            string_array_wrappers_count: None,
            string_array_wrappers_chained_calls: None,
            string_array_wrappers_parameters_max_count: None,
            string_array_wrappers_type: None,
            string_array_index_shift: None,
            numbers_to_expressions: None,
            split_strings: None,
            split_strings_chunk_length: None,
            string_array_encoding: None,
            disable_console_output: None,
            self_defending: None,
            debug_protection: None,
            debug_protection_interval: None,
        };

        if matches!(config.level, Level::Medium | Level::High) {
            options.control_flow_flattening = Some(true);
            options.control_flow_flattening_threshold = Some(0.5);
            options.dead_code_injection = Some(true);
            options.dead_code_injection_threshold = Some(0.3);
            options.string_array_calls_transform = Some(true);
            options.string_array_threshold = Some(0.75);
            options.string_array_wrappers_count = Some(1);
            options.string_array_wrappers_chained_calls = Some(true);
            options.string_array_wrappers_parameters_max_count = Some(2);
            options.string_array_wrappers_type = Some("variable".to_string());
            options.string_array_index_shift = Some(true);
        }

        if config.level == Level::High {
            options.identifier_names_generator = IdentifierNamesGenerator::Hexadecimal;
            options.numbers_to_expressions = Some(true);
            options.split_strings = Some(true);
            options.split_strings_chunk_length = Some(10);
            options.string_array_encoding = Some(vec!["base64".to_string()]);
            options.disable_console_output = Some(true);
            options.control_flow_flattening_threshold = Some(0.75);
            options.dead_code_injection_threshold = Some(0.4);
        }

        if config.self_defending {
            options.self_defending = Some(true);
        }

        if config.debug_protection {
            options.debug_protection = Some(true);
            options.debug_protection_interval = Some(2000);
        }

        options
    }
}

/// The external obfuscation engine as an injectable capability. One call
/// per transform; blocking, no timeout. A hang in the engine hangs the
/// operation.
pub trait JsEngine {
    fn obfuscate(&self, code: &str, options: &EngineOptions) -> Result<String, EngineError>;
}

/// Engine backed by a user-supplied executable. The request is written to
/// the child's stdin as `{"code": …, "options": …}` JSON; the obfuscated
/// code is read from stdout; a nonzero exit is a failure.
pub struct CommandEngine {
    program: PathBuf,
}

impl CommandEngine {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl JsEngine for CommandEngine {
    fn obfuscate(&self, code: &str, options: &EngineOptions) -> Result<String, EngineError> {
        let request = serde_json::json!({ "code": code, "options": options });

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(request.to_string().as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let code = String::from_utf8(output.stdout).map_err(|_| EngineError::InvalidOutput)?;
        Ok(code.trim_end_matches('\n').to_string())
    }
}
