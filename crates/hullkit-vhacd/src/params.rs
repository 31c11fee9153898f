//! V-HACD decomposition parameters and their command line.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{VhacdError, VhacdResult};

/// Voxel fill mode used to decide which voxels are inside the mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Flood fill from the outside.
    #[default]
    Flood,
    /// Only voxels on the surface.
    Surface,
    /// Ray casting, for meshes with holes.
    Raycast,
}

impl FillMode {
    /// Returns the command-line identifier for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            FillMode::Flood => "flood",
            FillMode::Surface => "surface",
            FillMode::Raycast => "raycast",
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillMode {
    type Err = VhacdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flood" => Ok(FillMode::Flood),
            "surface" => Ok(FillMode::Surface),
            "raycast" => Ok(FillMode::Raycast),
            other => Err(VhacdError::invalid_parameter(
                "fill_mode",
                format!("unknown fill mode '{}' (expected flood, surface or raycast)", other),
            )),
        }
    }
}

/// Parameters passed to the V-HACD executable.
///
/// Defaults follow the V-HACD command-line tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VhacdParams {
    /// Maximum number of output convex hulls (`-h`).
    pub max_convex_hulls: u32,
    /// Total number of voxels to use (`-r`).
    pub voxel_resolution: u32,
    /// Volume error allowed, as a percentage (`-e`).
    pub volume_error_percent: f64,
    /// Maximum number of recursive splits (`-d`).
    pub max_recursion_depth: u32,
    /// Shrinkwrap output hulls to the source mesh (`-s`).
    pub shrinkwrap: bool,
    /// Voxel fill mode (`-f`).
    pub fill_mode: FillMode,
    /// Maximum number of vertices per output hull (`-v`).
    pub max_hull_vert_count: u32,
    /// Let V-HACD run its worker threads asynchronously (`-a`).
    pub run_async: bool,
    /// Minimum voxel edge length, in voxels (`-l`).
    pub min_edge_length: u32,
    /// Search for the best split plane instead of splitting in the middle (`-p`).
    pub optimal_split: bool,
}

impl Default for VhacdParams {
    fn default() -> Self {
        Self {
            max_convex_hulls: 32,
            voxel_resolution: 100_000,
            volume_error_percent: 1.0,
            max_recursion_depth: 10,
            shrinkwrap: true,
            fill_mode: FillMode::Flood,
            max_hull_vert_count: 64,
            run_async: true,
            min_edge_length: 2,
            optimal_split: false,
        }
    }
}

impl VhacdParams {
    /// Loads parameters from a JSON preset. Missing fields take their defaults.
    pub fn from_json(json: &str) -> VhacdResult<Self> {
        let params: Self = serde_json::from_str(json).map_err(VhacdError::ParseParamsFailed)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads parameters from a JSON preset file.
    pub fn from_json_file(path: &Path) -> VhacdResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| VhacdError::ReadParamsFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Checks every parameter against the range V-HACD accepts.
    pub fn validate(&self) -> VhacdResult<()> {
        check_range("max_convex_hulls", self.max_convex_hulls, 1, u32::MAX)?;
        check_range("voxel_resolution", self.voxel_resolution, 10_000, 64_000_000)?;
        check_range("max_recursion_depth", self.max_recursion_depth, 1, 32)?;
        check_range("max_hull_vert_count", self.max_hull_vert_count, 4, 1024)?;
        check_range("min_edge_length", self.min_edge_length, 1, u32::MAX)?;
        if !(0.001..=10.0).contains(&self.volume_error_percent) {
            return Err(VhacdError::invalid_parameter(
                "volume_error_percent",
                format!(
                    "{} is outside the range 0.001..=10",
                    self.volume_error_percent
                ),
            ));
        }
        Ok(())
    }

    /// Builds the argument list for `TestVHACD <input> ...`.
    ///
    /// Booleans are passed as `1`/`0`. The output format is always OBJ.
    pub fn to_args(&self, input: &Path) -> Vec<String> {
        let flag = |b: bool| String::from(if b { "1" } else { "0" });
        vec![
            input.to_string_lossy().into_owned(),
            "-h".to_string(),
            self.max_convex_hulls.to_string(),
            "-r".to_string(),
            self.voxel_resolution.to_string(),
            "-e".to_string(),
            self.volume_error_percent.to_string(),
            "-d".to_string(),
            self.max_recursion_depth.to_string(),
            "-s".to_string(),
            flag(self.shrinkwrap),
            "-f".to_string(),
            self.fill_mode.as_str().to_string(),
            "-v".to_string(),
            self.max_hull_vert_count.to_string(),
            "-a".to_string(),
            flag(self.run_async),
            "-l".to_string(),
            self.min_edge_length.to_string(),
            "-o".to_string(),
            "obj".to_string(),
            "-p".to_string(),
            flag(self.optimal_split),
        ]
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> VhacdResult<()> {
    if value < min || value > max {
        let range = if max == u32::MAX {
            format!("at least {}", min)
        } else {
            format!("within {}..={}", min, max)
        };
        return Err(VhacdError::invalid_parameter(
            name,
            format!("{} must be {}", value, range),
        ));
    }
    Ok(())
}
