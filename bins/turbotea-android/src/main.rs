//! Turbo Tea Android CLI
//!
//! Resolves build-time values for the Android app and renders manifest templates.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use turbotea_android::{manifest, BuildDefaults, ManifestPlaceholders};
use turbotea_cli::output::{self, Status};
use turbotea_core::config::Config;
use turbotea_core::env_file::ValueSource;
use turbotea_core::error::exit_codes;
use turbotea_telemetry::TelemetryConfig;

#[derive(Parser)]
#[command(name = "turbotea-android")]
#[command(about = "Build-time helpers for the Turbo Tea Android app")]
#[command(version)]
struct Cli {
    /// Project root containing .env and the tool config
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved application display name
    #[command(name = "app-name")]
    AppName {
        /// Output as JSON, including where the value came from
        #[arg(long)]
        json: bool,
    },

    /// Print the manifest placeholders
    Placeholders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Substitute placeholders into a manifest template
    #[command(name = "render-manifest")]
    RenderManifest {
        /// Template containing ${name} tokens
        template: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the resolved defaultConfig values
    Defaults {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        output::set_color(false);
    }

    turbotea_telemetry::init_with_config(TelemetryConfig::for_verbosity(cli.verbose, cli.quiet))?;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let exit_code = match cli.command {
        Commands::AppName { json } => run_app_name(&cli.project_dir, &config, json),
        Commands::Placeholders { json } => run_placeholders(&cli.project_dir, &config, json),
        Commands::RenderManifest { template, output } => {
            run_render_manifest(&cli.project_dir, &config, &template, output.as_deref(), cli.quiet)
        }
        Commands::Defaults { json } => run_defaults(&cli.project_dir, &config, json),
    };

    std::process::exit(exit_code);
}

fn load_config(cli: &Cli) -> turbotea_core::Result<Config> {
    match &cli.config {
        Some(path) => Config::load(Some(path.as_path())),
        None => Config::load_from(&cli.project_dir),
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            exit_codes::SUCCESS
        }
        Err(e) => {
            let err = turbotea_core::Error::from(e);
            Status::error(&err.to_string());
            err.exit_code()
        }
    }
}

fn describe_source(source: &ValueSource) -> String {
    match source {
        ValueSource::File { path, line } => format!("{}:{}", path.display(), line),
        ValueSource::Default => "default".to_string(),
    }
}

fn run_app_name(project_dir: &Path, config: &Config, json: bool) -> i32 {
    let resolved = manifest::resolve_app_name(project_dir, &config.schema.app_name);
    tracing::info!(source = %describe_source(&resolved.source), "app name resolved");

    if json {
        return print_json(&resolved);
    }
    println!("{}", resolved.value);
    exit_codes::SUCCESS
}

fn run_placeholders(project_dir: &Path, config: &Config, json: bool) -> i32 {
    let placeholders = ManifestPlaceholders::for_project(project_dir, &config.schema.app_name);

    if json {
        return print_json(&placeholders);
    }
    let rows: Vec<(&str, &str)> = placeholders.iter().collect();
    output::print_key_values(&rows);
    exit_codes::SUCCESS
}

fn run_render_manifest(
    project_dir: &Path,
    config: &Config,
    template: &Path,
    out_path: Option<&Path>,
    quiet: bool,
) -> i32 {
    let placeholders = ManifestPlaceholders::for_project(project_dir, &config.schema.app_name);

    let result = match out_path {
        Some(out) => manifest::render_file(template, out, &placeholders).map(|()| {
            if !quiet {
                Status::success(&format!(
                    "Rendered {} ({})",
                    out.display(),
                    output::format_count(placeholders.len(), "placeholder", "placeholders")
                ));
            }
        }),
        None => std::fs::read_to_string(template)
            .map_err(|e| turbotea_core::Error::from(e).with_context(template.display().to_string()))
            .and_then(|source| manifest::substitute(&source, &placeholders))
            .map(|rendered| print!("{}", rendered)),
    };

    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            Status::error(&e.to_string());
            e.exit_code()
        }
    }
}

fn run_defaults(project_dir: &Path, config: &Config, json: bool) -> i32 {
    let defaults = BuildDefaults::resolve(project_dir, &config.schema);

    if json {
        return print_json(&defaults);
    }

    let source = describe_source(&defaults.app_name.source);
    Status::header("defaultConfig");
    output::print_key_values(&[
        ("namespace", defaults.namespace.as_str()),
        ("applicationId", defaults.application_id.as_str()),
        ("jvmTarget", defaults.jvm_target.as_str()),
        ("appName", defaults.app_name.value.as_str()),
        ("appName source", source.as_str()),
    ]);

    if let Some(path) = &config.path {
        Status::info(&format!("Config: {}", path.display()));
    }
    exit_codes::SUCCESS
}
