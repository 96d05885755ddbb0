use clap::Parser;
use code_obfuscator::config::{load_config, Language, Level};
use code_obfuscator::engine::{CommandEngine, JsEngine};
use code_obfuscator::errors::AppError;
use code_obfuscator::logger;
use code_obfuscator::metrics::Metrics;
use code_obfuscator::pipeline;
use code_obfuscator::stats::TransformStats;
use prometheus::Registry;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "code-obfuscator", version)]
struct Cli {
    /// Source file to transform; reads stdin when omitted
    input: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    language: Language,

    /// Obfuscation intensity; overrides preset and environment
    #[arg(long, value_enum)]
    level: Option<Level>,

    /// Strip comments and collapse whitespace
    #[arg(long)]
    compact: bool,

    /// Encode string literals (Python) / enable the engine string array
    #[arg(long)]
    string_array: bool,

    #[arg(long)]
    rotate_string_array: bool,

    #[arg(long)]
    self_defending: bool,

    #[arg(long)]
    debug_protection: bool,

    /// JSON preset file with a TransformConfig
    #[arg(long)]
    preset: Option<String>,

    /// Executable implementing the JavaScript engine boundary
    #[arg(long)]
    engine_cmd: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logger::init();
    let cli = Cli::parse();

    let mut cfg = load_config(cli.preset.as_deref())?;
    if let Some(level) = cli.level {
        cfg.level = level;
    }
    cfg.compact |= cli.compact;
    cfg.string_array |= cli.string_array;
    cfg.rotate_string_array |= cli.rotate_string_array;
    cfg.self_defending |= cli.self_defending;
    cfg.debug_protection |= cli.debug_protection;

    let source = match &cli.input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let registry = Registry::new();
    let metrics = Metrics::new(&registry);

    let engine = cli.engine_cmd.map(CommandEngine::new);
    let engine_ref = engine.as_ref().map(|e| e as &dyn JsEngine);

    info!("Transforming {} source ({} bytes)", cli.language, source.len());
    match pipeline::transform(cli.language, &source, &cfg, engine_ref) {
        Ok(transformed) => {
            metrics
                .transform_count
                .with_label_values(&[cli.language.as_str()])
                .inc();

            let stats = TransformStats::measure(&source, &transformed);
            info!(
                "Done: {} -> {} bytes ({:.2}% compression)",
                stats.original_bytes,
                stats.transformed_bytes,
                stats.compression_percent()
            );

            match &cli.output {
                Some(path) => tokio::fs::write(path, &transformed).await?,
                None => println!("{}", transformed),
            }
            Ok(())
        }
        Err(e) => {
            metrics
                .failure_count
                .with_label_values(&[cli.language.as_str()])
                .inc();
            error!("Transform failed: {}", e);
            Err(e.into())
        }
    }
}
