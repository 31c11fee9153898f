//! hullkit CLI - Command-line interface for convex decomposition
//!
//! This binary decomposes meshes into convex hulls with V-HACD and finds or
//! renames existing hulls by their names.

mod cli_args;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use cli_args::{Cli, Commands, ConfigCommands};
use hullkit_cli::commands;
use hullkit_cli::commands::decompose::{DecomposeArgs, ParamOverrides};
use hullkit_cli::config::Preferences;
use hullkit_vhacd::FillMode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

/// Initializes `env_logger`; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_preferences() -> Result<(PathBuf, Preferences)> {
    let path = Preferences::path()?;
    let prefs = Preferences::load_from(&path)?;
    Ok((path, prefs))
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Decompose {
            input,
            objects,
            output,
            executable,
            data_dir,
            template,
            params,
            keep_doubles,
            timeout,
            max_hulls,
            resolution,
            volume_error,
            max_depth,
            shrinkwrap,
            fill_mode,
            max_vertices,
            run_async,
            min_edge_length,
            optimal_split,
            show_progress,
            json,
        } => {
            let (_, prefs) = load_preferences()?;
            let fill_mode = fill_mode
                .map(|m| {
                    m.parse::<FillMode>()
                        .expect("clap should have validated fill mode")
                });
            let args = DecomposeArgs {
                input: PathBuf::from(input),
                objects,
                output: output.map(PathBuf::from),
                executable: executable.map(PathBuf::from),
                data_dir: data_dir.map(PathBuf::from),
                template,
                params: params.map(PathBuf::from),
                keep_doubles,
                timeout_secs: timeout,
                overrides: ParamOverrides {
                    max_convex_hulls: max_hulls,
                    voxel_resolution: resolution,
                    volume_error_percent: volume_error,
                    max_recursion_depth: max_depth,
                    shrinkwrap,
                    fill_mode,
                    max_hull_vert_count: max_vertices,
                    run_async,
                    min_edge_length,
                    optimal_split,
                },
                show_progress,
                json,
            };
            commands::decompose::run(&args, &prefs)
        }
        Commands::Select {
            scene,
            objects,
            template,
            only_hulls,
            json,
        } => {
            let (_, prefs) = load_preferences()?;
            let template = prefs.template_or(template);
            commands::select::run(&scene, &objects, &template, only_hulls, json)
        }
        Commands::Rename {
            scene,
            active,
            objects,
            template,
            output,
            json,
        } => {
            let (_, prefs) = load_preferences()?;
            let template = prefs.template_or(template);
            commands::rename::run(
                &scene,
                &active,
                &objects,
                &template,
                output.as_deref(),
                json,
            )
        }
        Commands::Config { command } => {
            let path = Preferences::path()?;
            match command {
                ConfigCommands::Show { json } => commands::config::show(&path, json),
                ConfigCommands::Set {
                    executable,
                    data_dir,
                    template,
                } => commands::config::set(
                    &path,
                    executable.as_deref(),
                    data_dir.as_deref(),
                    template.as_deref(),
                ),
                ConfigCommands::Path => commands::config::path(&path),
            }
        }
        Commands::Doctor => commands::doctor::run(&Preferences::path()?),
    }
}
