//! Decomposition pipeline: export, run V-HACD, import and name the hulls.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hullkit_mesh::obj::{read_obj_file, write_obj_file};
use hullkit_mesh::{MeshObject, Scene, DEFAULT_MERGE_DISTANCE};
use hullkit_naming::{rename_items, NameTemplate};
use serde::Serialize;

use crate::error::{VhacdError, VhacdResult};
use crate::orchestrator::{Orchestrator, OUTPUT_FILE_STEM};
use crate::params::VhacdParams;

/// Options controlling one decomposition.
#[derive(Debug, Clone)]
pub struct DecomposeOptions {
    /// Template used to name the hulls.
    pub template: NameTemplate,
    /// V-HACD parameters.
    pub params: VhacdParams,
    /// Merge nearly coincident vertices before export.
    pub remove_doubles: bool,
    /// Merge distance for `remove_doubles`.
    pub merge_distance: f64,
    /// Files an export must never overwrite, such as the scene being read.
    pub protected_paths: Vec<PathBuf>,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self {
            template: NameTemplate::default(),
            params: VhacdParams::default(),
            remove_doubles: true,
            merge_distance: DEFAULT_MERGE_DISTANCE,
            protected_paths: Vec::new(),
        }
    }
}

/// Hulls produced for one source object.
#[derive(Debug, Clone)]
pub struct HullSet {
    /// Name of the source object.
    pub source: String,
    /// The renamed hulls, in the order V-HACD wrote them.
    pub hulls: Vec<MeshObject>,
    /// Mesh exported for V-HACD.
    pub input_path: PathBuf,
    /// Time spent in V-HACD.
    pub duration: Duration,
}

/// Serializable summary of a decomposition run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecompositionSummary {
    pub sources: Vec<SourceSummary>,
    /// Objects for which V-HACD produced no output.
    pub skipped: Vec<String>,
}

/// Per-object entry of [`DecompositionSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub source: String,
    pub hulls: Vec<String>,
    pub triangle_count: usize,
    pub duration_secs: f64,
}

/// Result of decomposing several objects.
#[derive(Debug, Clone, Default)]
pub struct Decomposition {
    pub hull_sets: Vec<HullSet>,
    pub skipped: Vec<String>,
}

impl Decomposition {
    /// Total number of hulls produced.
    pub fn hull_count(&self) -> usize {
        self.hull_sets.iter().map(|s| s.hulls.len()).sum()
    }

    /// Collects every hull into one scene, grouped by source object.
    pub fn into_scene(self) -> Scene {
        Scene::from_objects(self.hull_sets.into_iter().flat_map(|s| s.hulls).collect())
    }

    /// Builds the serializable summary.
    pub fn summary(&self) -> DecompositionSummary {
        DecompositionSummary {
            sources: self
                .hull_sets
                .iter()
                .map(|set| SourceSummary {
                    source: set.source.clone(),
                    hulls: set.hulls.iter().map(|h| h.name.clone()).collect(),
                    triangle_count: set.hulls.iter().map(MeshObject::triangle_count).sum(),
                    duration_secs: set.duration.as_secs_f64(),
                })
                .collect(),
            skipped: self.skipped.clone(),
        }
    }
}

/// Returns the file stem used when exporting `name`.
///
/// Characters other than alphanumerics, space, `.` and `_` are dropped and
/// trailing whitespace is trimmed. An empty result becomes `mesh`, and the
/// stem of V-HACD's own output file gets a trailing `_`.
pub fn export_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_'))
        .collect();
    let stem = stem.trim_end();
    if stem.is_empty() {
        "mesh".to_string()
    } else if stem.eq_ignore_ascii_case(OUTPUT_FILE_STEM) {
        format!("{}_", stem)
    } else {
        stem.to_string()
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Runs the full decomposition pipeline for mesh objects.
#[derive(Debug, Clone)]
pub struct Decomposer {
    orchestrator: Orchestrator,
    options: DecomposeOptions,
}

impl Decomposer {
    /// Creates a new decomposer.
    pub fn new(orchestrator: Orchestrator, options: DecomposeOptions) -> Self {
        Self {
            orchestrator,
            options,
        }
    }

    /// Returns the options.
    pub fn options(&self) -> &DecomposeOptions {
        &self.options
    }

    /// Picks `<data_dir>/<stem>.obj`, adding `_` to the stem until the path is
    /// not protected.
    fn export_path(&self, data_dir: &Path, name: &str) -> PathBuf {
        let mut stem = export_file_stem(name);
        loop {
            let path = data_dir.join(format!("{}.obj", stem));
            if !self
                .options
                .protected_paths
                .iter()
                .any(|p| same_file(p, &path))
            {
                return path;
            }
            stem.push('_');
        }
    }

    /// Decomposes one object.
    ///
    /// Returns `None` when V-HACD exits cleanly without writing any output.
    pub fn decompose_object(&self, object: &MeshObject) -> VhacdResult<Option<HullSet>> {
        let data_dir = self.orchestrator.data_dir()?;

        let mut mesh = object.clone();
        if self.options.remove_doubles {
            mesh.remove_doubles(self.options.merge_distance);
        }
        mesh.triangulate();

        let input_path = self.export_path(&data_dir, &object.name);
        log::info!("exporting mesh for V-HACD: {}", input_path.display());
        write_obj_file(&Scene::from_objects(vec![mesh]), &input_path)?;

        let run = match self.orchestrator.run(&input_path, &self.options.params) {
            Ok(run) => run,
            Err(VhacdError::OutputNotFound { path }) => {
                log::warn!(
                    "V-HACD produced no output for '{}' ({} missing)",
                    object.name,
                    path.display()
                );
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let mut hulls = read_obj_file(&run.output_path)?.objects;
        let renames = rename_items(self.options.template.raw(), &object.name, &mut hulls);
        log::info!("'{}': {} hull(s)", object.name, renames.len());

        Ok(Some(HullSet {
            source: object.name.clone(),
            hulls,
            input_path,
            duration: run.duration,
        }))
    }

    /// Decomposes the selected objects of `scene` one after another.
    ///
    /// An empty selection means every object. Unknown names fail before any
    /// work is done.
    pub fn decompose_scene<S: AsRef<str>>(
        &self,
        scene: &Scene,
        selection: &[S],
    ) -> VhacdResult<Decomposition> {
        let objects: Vec<&MeshObject> = if selection.is_empty() {
            scene.objects.iter().collect()
        } else {
            selection
                .iter()
                .map(|name| {
                    scene
                        .get(name.as_ref())
                        .ok_or_else(|| VhacdError::ObjectNotFound {
                            name: name.as_ref().to_string(),
                        })
                })
                .collect::<VhacdResult<_>>()?
        };

        let mut result = Decomposition::default();
        for object in objects {
            match self.decompose_object(object)? {
                Some(set) => result.hull_sets.push(set),
                None => result.skipped.push(object.name.clone()),
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_file_stem() {
        assert_eq!(export_file_stem("Cube.001"), "Cube.001");
        assert_eq!(export_file_stem("my/rock:*"), "myrock");
        assert_eq!(export_file_stem("Tree trunk  "), "Tree trunk");
        assert_eq!(export_file_stem("Tree ?"), "Tree");
        assert_eq!(export_file_stem("???"), "mesh");
        assert_eq!(export_file_stem("decomp"), "decomp_");
        assert_eq!(export_file_stem("DeComp"), "DeComp_");
        assert_eq!(export_file_stem("decomp.001"), "decomp.001");
    }

    #[test]
    fn test_decomposition_summary() {
        let hull = MeshObject::with_geometry(
            "Cube_hull_1",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![vec![0, 1, 2]],
        );
        let result = Decomposition {
            hull_sets: vec![HullSet {
                source: "Cube".to_string(),
                hulls: vec![hull],
                input_path: PathBuf::from("Cube.obj"),
                duration: Duration::from_millis(1500),
            }],
            skipped: vec!["Plane".to_string()],
        };

        assert_eq!(result.hull_count(), 1);
        let summary = result.summary();
        assert_eq!(summary.sources[0].hulls, vec!["Cube_hull_1"]);
        assert_eq!(summary.sources[0].triangle_count, 1);
        assert_eq!(summary.sources[0].duration_secs, 1.5);
        assert_eq!(summary.skipped, vec!["Plane"]);
        assert_eq!(result.into_scene().names(), vec!["Cube_hull_1"]);
    }
}
