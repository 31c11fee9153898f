//! CLI argument definitions for the hullkit command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Parser, Subcommand};

/// hullkit - Convex decomposition and hull naming
#[derive(Parser)]
#[command(name = "hullkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Decompose mesh objects into convex hulls with V-HACD
    Decompose {
        /// Path to the input mesh (OBJ or OFF)
        #[arg(short, long)]
        input: String,

        /// Object to decompose (repeatable; default: every object)
        #[arg(long = "object")]
        objects: Vec<String>,

        /// Output OBJ file (default: <input stem>_hulls.obj)
        #[arg(short, long)]
        output: Option<String>,

        /// V-HACD executable or the directory containing it
        #[arg(long)]
        executable: Option<String>,

        /// Directory for exported meshes and V-HACD output
        #[arg(long)]
        data_dir: Option<String>,

        /// Hull name template ('?' = object name, '#' = hull index)
        #[arg(short, long)]
        template: Option<String>,

        /// JSON preset with V-HACD parameters
        #[arg(long)]
        params: Option<String>,

        /// Skip merging duplicate vertices before export
        #[arg(long)]
        keep_doubles: bool,

        /// Timeout per object in seconds (default: 600)
        #[arg(long)]
        timeout: Option<u64>,

        /// Maximum number of convex hulls per object
        #[arg(long)]
        max_hulls: Option<u32>,

        /// Total number of voxels
        #[arg(long)]
        resolution: Option<u32>,

        /// Allowed volume error, in percent
        #[arg(long)]
        volume_error: Option<f64>,

        /// Maximum recursion depth
        #[arg(long)]
        max_depth: Option<u32>,

        /// Shrinkwrap hulls to the source mesh
        #[arg(long)]
        shrinkwrap: Option<bool>,

        /// Voxel fill mode
        #[arg(long, value_parser = ["flood", "surface", "raycast"])]
        fill_mode: Option<String>,

        /// Maximum number of vertices per hull
        #[arg(long)]
        max_vertices: Option<u32>,

        /// Run V-HACD asynchronously
        #[arg(long = "async")]
        run_async: Option<bool>,

        /// Minimum voxel edge length
        #[arg(long)]
        min_edge_length: Option<u32>,

        /// Search for the optimal split plane
        #[arg(long)]
        optimal_split: Option<bool>,

        /// Let V-HACD print its progress instead of capturing its output
        #[arg(long, conflicts_with = "json")]
        show_progress: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Select existing hulls of the given objects
    Select {
        /// Scene file (OBJ or OFF)
        #[arg(short, long)]
        scene: String,

        /// Object whose hulls to select (repeatable)
        #[arg(long = "object", required = true)]
        objects: Vec<String>,

        /// Hull name template (default: from preferences)
        #[arg(short, long)]
        template: Option<String>,

        /// Print only the hulls, not the selected objects
        #[arg(long)]
        only_hulls: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Rename objects as hulls of the active object
    Rename {
        /// Scene file (OBJ)
        #[arg(short, long)]
        scene: String,

        /// Object the hulls belong to
        #[arg(short, long)]
        active: String,

        /// Object to rename, in hull order (repeatable)
        #[arg(long = "object", required = true)]
        objects: Vec<String>,

        /// Hull name template (default: from preferences)
        #[arg(short, long)]
        template: Option<String>,

        /// Output OBJ file (default: overwrite the scene)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show or change preferences
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Check the V-HACD installation and preferences
    Doctor,
}

/// Subcommands for preference management
#[derive(Subcommand, Debug)]
pub(crate) enum ConfigCommands {
    /// Print the current preferences
    Show {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one or more preferences
    Set {
        /// V-HACD executable or the directory containing it
        #[arg(long)]
        executable: Option<String>,

        /// Directory for exported meshes and V-HACD output
        #[arg(long)]
        data_dir: Option<String>,

        /// Hull name template
        #[arg(long)]
        template: Option<String>,
    },
    /// Print the preferences file location
    Path,
}
