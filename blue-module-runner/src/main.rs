use blue_core::prelude::*;
use clap::Parser;
use libloading::{Library, Symbol};
use serde_json::json;
use std::io::{stdout, stderr};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
use config::RunnerConfig;

#[derive(Parser)]
#[command(name = "blue-module-runner")]
struct Args {
    /// Path of the module library
    #[arg(long)]
    module_path: String,

    /// Method path, colon separated (e.g. change:status)
    #[arg(long)]
    method: String,

    /// JSON object, or key=value pairs separated by commas
    #[arg(long, default_value = "")]
    args: String,

    /// TOML file with connection defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report what would change without changing it
    #[arg(long)]
    check: bool,
}

fn parse_args(args_str: &str) -> Result<Value> {
    let trimmed = args_str.trim();
    if trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed)?;
        if !value.is_object() {
            return Err(Error::Module("Arguments must be a JSON object".to_string()));
        }
        return Ok(value);
    }

    let mut map = serde_json::Map::new();
    if !trimmed.is_empty() {
        for pair in trimmed.split(',') {
            if let Some((key, value)) = pair.split_once('=') {
                map.insert(key.trim().to_string(), Value::String(value.to_string()));
            }
        }
    }
    Ok(Value::Object(map))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(result) => {
            // Only print result if it's not null
            if !result.is_null() {
                println!("{}", result);
            }
        }
        Err(e) => {
            tracing::debug!("Module call failed: {:?}", e);
            println!("{}", json!({ "failed": true, "msg": e.to_string() }));
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Value> {
    let args = Args::parse();

    // Load module
    let lib = unsafe { Library::new(&args.module_path) }
        .map_err(|e| Error::Module(format!("Failed to load module: {}", e)))?;
    let create_module: Symbol<fn() -> Box<dyn Module>> = unsafe {
        lib.get(b"create_module")
            .map_err(|e| Error::Module(format!("Failed to get create_module symbol: {}", e)))?
    };
    let mut module = create_module();

    // Parse method and args
    let method_parts: Vec<&str> = args.method.split(':').collect();
    let mut call_args = parse_args(&args.args)?;
    if let Some(path) = &args.config {
        RunnerConfig::load(path)?.apply_defaults(&mut call_args);
    }
    if args.check {
        call_args["check_mode"] = Value::Bool(true);
    }

    tracing::debug!("Calling {} on {}", method_parts.join(" "), module.name());

    // Call module with stdout/stderr
    let mut stdout = stdout();
    let mut stderr = stderr();
    module.call(
        &method_parts,
        call_args,
        Some(&mut stdout),
        Some(&mut stderr)
    )
}
