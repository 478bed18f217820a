//! # engine_app — Script host
//!
//! Runs Rhai scripts against the engine's script bindings (`Timer`,
//! `Duration`).
//!
//! ## Startup Sequence
//!
//! 1. Load configuration: JSON file, then `ENGINE_SCRIPT_MAX_OPERATIONS`,
//!    then command-line flags.
//! 2. Build the script runtime and register every binding. A failed
//!    registration aborts start-up.
//! 3. Run the script file or `--eval` expression and print its value.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine_script::{Dynamic, ScriptConfig, ScriptRuntime};

#[derive(Debug, Parser)]
#[command(name = "engine_app", about = "Run engine scripts")]
struct Args {
    /// Script file to run
    script: Option<PathBuf>,

    /// Evaluate an expression instead of a file
    #[arg(short, long, conflicts_with = "script")]
    eval: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum operations per evaluation (0 = unlimited)
    #[arg(long)]
    max_operations: Option<u64>,

    /// Print the registered bindings as JSON and exit
    #[arg(long)]
    list_bindings: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so script output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut runtime = ScriptRuntime::new(config).context("failed to initialise script bindings")?;
    runtime.engine_mut().on_print(|text| println!("{text}"));

    if args.list_bindings {
        println!("{}", runtime.bindings().to_json()?);
        return Ok(());
    }

    let result = match (&args.script, &args.eval) {
        (Some(path), _) => runtime
            .run_file(path)
            .with_context(|| format!("failed to run {}", path.display()))?,
        (None, Some(expr)) => runtime.eval::<Dynamic>(expr)?,
        (None, None) => bail!("nothing to run: pass a script file or --eval <EXPR>"),
    };

    if !result.is_unit() {
        println!("{result}");
    }

    info!("script finished");
    Ok(())
}

/// Build the runtime configuration, later sources overriding earlier ones.
fn load_config(args: &Args) -> Result<ScriptConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading script config");
            ScriptConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => ScriptConfig::default(),
    }
    .with_env_overrides();

    if let Some(max) = args.max_operations {
        config = config.with_max_operations(max);
    }
    Ok(config)
}
