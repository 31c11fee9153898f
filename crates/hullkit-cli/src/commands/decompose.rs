//! Decompose command implementation
//!
//! Reads a mesh scene, runs V-HACD on the requested objects and writes the
//! named hulls to an OBJ file.

use anyhow::{Context, Result};
use colored::Colorize;
use hullkit_mesh::{obj, read_scene};
use hullkit_naming::NameTemplate;
use hullkit_vhacd::{
    DecomposeOptions, Decomposer, DecompositionSummary, FillMode, Orchestrator,
    OrchestratorConfig, VhacdParams,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Preferences;

/// Command-line overrides for individual V-HACD parameters.
#[derive(Debug, Clone, Default)]
pub struct ParamOverrides {
    pub max_convex_hulls: Option<u32>,
    pub voxel_resolution: Option<u32>,
    pub volume_error_percent: Option<f64>,
    pub max_recursion_depth: Option<u32>,
    pub shrinkwrap: Option<bool>,
    pub fill_mode: Option<FillMode>,
    pub max_hull_vert_count: Option<u32>,
    pub run_async: Option<bool>,
    pub min_edge_length: Option<u32>,
    pub optimal_split: Option<bool>,
}

impl ParamOverrides {
    /// Applies every set override to `params`.
    pub fn apply(&self, params: &mut VhacdParams) {
        if let Some(v) = self.max_convex_hulls {
            params.max_convex_hulls = v;
        }
        if let Some(v) = self.voxel_resolution {
            params.voxel_resolution = v;
        }
        if let Some(v) = self.volume_error_percent {
            params.volume_error_percent = v;
        }
        if let Some(v) = self.max_recursion_depth {
            params.max_recursion_depth = v;
        }
        if let Some(v) = self.shrinkwrap {
            params.shrinkwrap = v;
        }
        if let Some(v) = self.fill_mode {
            params.fill_mode = v;
        }
        if let Some(v) = self.max_hull_vert_count {
            params.max_hull_vert_count = v;
        }
        if let Some(v) = self.run_async {
            params.run_async = v;
        }
        if let Some(v) = self.min_edge_length {
            params.min_edge_length = v;
        }
        if let Some(v) = self.optimal_split {
            params.optimal_split = v;
        }
    }
}

/// Arguments of the decompose command.
#[derive(Debug, Clone, Default)]
pub struct DecomposeArgs {
    pub input: PathBuf,
    /// Objects to decompose; empty means all.
    pub objects: Vec<String>,
    pub output: Option<PathBuf>,
    pub executable: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub template: Option<String>,
    /// JSON parameter preset.
    pub params: Option<PathBuf>,
    pub keep_doubles: bool,
    pub timeout_secs: Option<u64>,
    pub overrides: ParamOverrides,
    /// Leave V-HACD's stdout and stderr on the terminal.
    pub show_progress: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DecomposeOutput {
    success: bool,
    output: Option<String>,
    #[serde(flatten)]
    summary: DecompositionSummary,
}

/// Returns `<dir>/<input stem>_hulls.obj`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string());
    input.with_file_name(format!("{}_hulls.obj", stem))
}

/// Resolves the V-HACD parameters: preset first, then flag overrides.
pub fn resolve_params(args: &DecomposeArgs) -> Result<VhacdParams> {
    let mut params = match &args.params {
        Some(path) => VhacdParams::from_json_file(path)?,
        None => VhacdParams::default(),
    };
    args.overrides.apply(&mut params);
    params.validate()?;
    Ok(params)
}

/// Builds the orchestrator configuration; flags win over preferences.
pub fn orchestrator_config(args: &DecomposeArgs, prefs: &Preferences) -> OrchestratorConfig {
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| prefs.data_path.clone());
    let mut config = OrchestratorConfig::with_data_dir(data_dir);
    if let Some(exe) = args.executable.as_ref().or(prefs.executable_path.as_ref()) {
        config = config.executable_path(exe);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.timeout_secs(secs);
    }
    config.capture_output(!args.show_progress)
}

/// Run the decompose command
///
/// # Returns
/// Exit code: 0 if hulls were written, 1 if nothing was produced
pub fn run(args: &DecomposeArgs, prefs: &Preferences) -> Result<ExitCode> {
    let scene = read_scene(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    if scene.is_empty() {
        anyhow::bail!("No meshes to process!");
    }

    let params = resolve_params(args)?;
    let template = NameTemplate::new(prefs.template_or(args.template.clone()));
    let options = DecomposeOptions {
        template,
        params,
        remove_doubles: !args.keep_doubles,
        protected_paths: vec![args.input.clone()],
        ..Default::default()
    };
    let orchestrator = Orchestrator::with_config(orchestrator_config(args, prefs));

    if !args.json {
        let count = if args.objects.is_empty() {
            scene.len()
        } else {
            args.objects.len()
        };
        println!(
            "{} {} ({} object{})",
            "Decomposing:".cyan().bold(),
            args.input.display(),
            count,
            if count == 1 { "" } else { "s" }
        );
    }

    let decomposer = Decomposer::new(orchestrator, options);
    let result = decomposer.decompose_scene(&scene, &args.objects)?;
    let summary = result.summary();

    if result.hull_count() == 0 {
        if args.json {
            print_json(&DecomposeOutput {
                success: false,
                output: None,
                summary,
            })?;
        } else {
            for name in &summary.skipped {
                println!("  {} {}: no output from V-HACD", "!!".yellow(), name);
            }
            println!("{} No hulls were produced", "FAILED".red().bold());
        }
        return Ok(ExitCode::from(1));
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    obj::write_obj_file(&result.into_scene(), &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if args.json {
        print_json(&DecomposeOutput {
            success: true,
            output: Some(output.display().to_string()),
            summary,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    for source in &summary.sources {
        println!(
            "  {} {} -> {} hull{} ({:.1}s)",
            "ok".green(),
            source.source,
            source.hulls.len(),
            if source.hulls.len() == 1 { "" } else { "s" },
            source.duration_secs
        );
        for hull in &source.hulls {
            println!("     {}", hull.dimmed());
        }
    }
    for name in &summary.skipped {
        println!("  {} {}: no output from V-HACD", "!!".yellow(), name);
    }
    println!(
        "{} Wrote {}",
        "SUCCESS".green().bold(),
        output.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_json(output: &DecomposeOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
