use anyhow::{Context, Result};
use batchname_core::interrupt::{confirmation_prompt_active, is_interrupted, request_interrupt};
use batchname_core::{
    BatchError, CollectOptions, Config, OutputFormatter, PlanOperationOptions, Preview,
    RenameOperationOptions, RuleError, RuleInput, VersionResult,
};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;
mod logs;
mod presets;
mod preview;
mod rename;

use cli::{Cli, Commands, FilterArgs, InputArgs, OutputFormat, PreviewArg};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        if confirmation_prompt_active() {
            eprintln!("\nAborted.");
            process::exit(130);
        }
        if is_interrupted() {
            process::exit(130);
        }
        eprintln!("\nReceived SIGINT. Stopping after the current file...");
        request_interrupt();
    }) {
        warn!("Could not install Ctrl-C handler: {e}");
    }

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config: {e:#}");
        Config::default()
    });
    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };

    let result = match cli.command {
        Commands::Preview {
            preset,
            dir,
            inputs,
            filter,
            preview,
            output,
            quiet,
        } => {
            let options = PlanOperationOptions {
                collect: collect_options(&filter, &config),
                preview: preview_format(preview, output, quiet, &config),
                use_color,
            };
            preview::handle_preview(
                &target_dir(dir),
                preset,
                &rule_input(inputs),
                &options,
                output,
                quiet,
            )
        },

        Commands::Rename {
            preset,
            dir,
            inputs,
            filter,
            preview,
            dry_run,
            no_log,
            output,
            quiet,
        } => {
            let options = RenameOperationOptions {
                collect: collect_options(&filter, &config),
                preview: preview_format(preview, output, quiet, &config),
                use_color,
                dry_run,
                auto_approve: cli.yes,
                write_rollback_log: !no_log && config.defaults.write_rollback_log,
            };
            rename::handle_rename(
                &target_dir(dir),
                preset,
                &rule_input(inputs),
                &options,
                output,
                quiet,
            )
        },

        Commands::Presets { output } => presets::handle_presets(output),

        Commands::Examples { output } => presets::handle_examples(output),

        Commands::Logs { dir, limit, output } => logs::handle_logs(&target_dir(dir), limit, output),

        Commands::Version { output } => handle_version(output),

        Commands::Completions { shell, out_dir } => {
            let mut cmd = Cli::command();
            match out_dir {
                Some(dir) => generate_completions(shell, &mut cmd, "batchname", &dir),
                None => {
                    clap_complete::generate(shell, &mut cmd, "batchname", &mut std::io::stdout());
                    Ok(())
                },
            }
        },
    };

    if is_interrupted() {
        eprintln!("Operation interrupted.");
        process::exit(130);
    }

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("BATCHNAME_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 1 for collisions, 2 for invalid input, 3 for anything else
fn exit_code(e: &anyhow::Error) -> i32 {
    for cause in e.chain() {
        if cause.is::<RuleError>() {
            return 2;
        }
        if let Some(err) = cause.downcast_ref::<BatchError>() {
            return match err {
                BatchError::Collisions(_) => 1,
                BatchError::DirectoryNotFound(_)
                | BatchError::NonInteractive
                | BatchError::InvalidGlob { .. } => 2,
            };
        }
    }
    3
}

fn target_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from("."))
}

fn rule_input(inputs: InputArgs) -> RuleInput {
    RuleInput::new(inputs.text, inputs.replace_with)
}

fn collect_options(filter: &FilterArgs, config: &Config) -> CollectOptions {
    CollectOptions {
        include: filter.include.clone(),
        exclude: filter.exclude.clone(),
        skip_hidden: filter.skip_hidden || config.defaults.skip_hidden,
        ..CollectOptions::default()
    }
}

/// Use preview format from CLI arg or config default (no preview for JSON output)
fn preview_format(
    preview: Option<PreviewArg>,
    output: OutputFormat,
    quiet: bool,
    config: &Config,
) -> Option<Preview> {
    if output == OutputFormat::Json || quiet {
        return None;
    }
    Some(preview.map(Into::into).unwrap_or_else(|| {
        Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Summary)
    }))
}

pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "batchname".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
