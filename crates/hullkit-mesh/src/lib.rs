//! hullkit meshes
//!
//! A deliberately small mesh model: named polygon meshes grouped into a
//! [`Scene`], plus the two file formats the decomposition pipeline exchanges
//! with the V-HACD executable.
//!
//! | Format | Objects per file | Module |
//! |--------|------------------|--------|
//! | Wavefront OBJ | many (`o` / `g`) | [`obj`] |
//! | OFF | one | [`off`] |
//!
//! # Crate Structure
//!
//! - [`mesh`] - Mesh objects, scenes and pre-processing
//! - [`obj`] - Wavefront OBJ
//! - [`off`] - Object File Format
//! - [`error`] - Error types

pub mod error;
pub mod mesh;
pub mod obj;
pub mod off;

use std::path::Path;

pub use error::{MeshError, MeshResult};
pub use mesh::{BoundingBox, MeshObject, Scene, DEFAULT_MERGE_DISTANCE};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// Wavefront OBJ.
    Obj,
    /// Object File Format.
    Off,
}

impl MeshFormat {
    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> MeshResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("obj") => Ok(MeshFormat::Obj),
            Some("off") => Ok(MeshFormat::Off),
            _ => Err(MeshError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            MeshFormat::Obj => "obj",
            MeshFormat::Off => "off",
        }
    }
}

/// Reads a mesh file of either format into a scene.
pub fn read_scene(path: &Path) -> MeshResult<Scene> {
    match MeshFormat::from_path(path)? {
        MeshFormat::Obj => obj::read_obj_file(path),
        MeshFormat::Off => Ok(Scene::from_objects(vec![off::read_off_file(path)?])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            MeshFormat::from_path(Path::new("a/b/Cube.OBJ")).unwrap(),
            MeshFormat::Obj
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("Cube.off")).unwrap(),
            MeshFormat::Off
        );
        assert!(MeshFormat::from_path(Path::new("Cube.wrl")).is_err());
        assert!(MeshFormat::from_path(Path::new("Cube")).is_err());
        assert_eq!(MeshFormat::Off.extension(), "off");
    }
}
