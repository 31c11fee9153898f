//! hullkit V-HACD backend
//!
//! Convex decomposition by running the V-HACD command-line tool (`TestVHACD`)
//! as a subprocess.
//!
//! # Architecture
//!
//! 1. **Export** - the source object is triangulated, optionally welded, and
//!    written as OBJ into the data directory
//! 2. **Orchestrator** - spawns V-HACD with the data directory as working
//!    directory and waits for it with a timeout
//! 3. **Import** - `decomp.obj` is read back and every hull is renamed after
//!    the source object with the configured name template
//!
//! # Example
//!
//! ```ignore
//! use hullkit_vhacd::{Decomposer, DecomposeOptions, Orchestrator, OrchestratorConfig};
//!
//! let scene = hullkit_mesh::read_scene(Path::new("level.obj"))?;
//! let orchestrator = Orchestrator::with_config(
//!     OrchestratorConfig::with_data_dir("/tmp/vhacd").executable_path("/opt/v-hacd/bin"),
//! );
//! let decomposer = Decomposer::new(orchestrator, DecomposeOptions::default());
//! let result = decomposer.decompose_scene(&scene, &["Rock"])?;
//! println!("{} hulls", result.hull_count());
//! ```
//!
//! # V-HACD Requirements
//!
//! The orchestrator searches for the executable in:
//!
//! 1. The configured path (a file, or a directory containing `TestVHACD`)
//! 2. `VHACD_PATH` environment variable
//! 3. System PATH
//!
//! # Crate Structure
//!
//! - [`params`] - Decomposition parameters and command line
//! - [`orchestrator`] - Subprocess management
//! - [`pipeline`] - Export, run, import and rename
//! - [`error`] - Error types

pub mod error;
pub mod orchestrator;
pub mod params;
pub mod pipeline;

pub use error::{VhacdError, VhacdResult};
pub use orchestrator::{
    Orchestrator, OrchestratorConfig, RunOutput, DEFAULT_TIMEOUT_SECS, OUTPUT_FILE_NAME,
    VHACD_PATH_ENV,
};
pub use params::{FillMode, VhacdParams};
pub use pipeline::{
    export_file_stem, DecomposeOptions, Decomposer, Decomposition, DecompositionSummary, HullSet,
    SourceSummary,
};
