//! Named polygon meshes and the scenes that hold them.

use std::collections::HashMap;

use hullkit_naming::{NamedItem, NamedItemMut};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

/// Merge distance used by the decomposition pre-processing step.
pub const DEFAULT_MERGE_DISTANCE: f64 = 0.0001;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner [X, Y, Z].
    pub min: [f64; 3],
    /// Maximum corner [X, Y, Z].
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Creates a new bounding box.
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// A named polygon mesh.
///
/// Faces index into `vertices` (0-based) and may have any number of corners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshObject {
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<Vec<usize>>,
}

impl MeshObject {
    /// Creates an empty mesh with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a mesh from its parts.
    pub fn with_geometry(
        name: impl Into<String>,
        vertices: Vec<[f64; 3]>,
        faces: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
        }
    }

    /// Returns true if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of triangles after fan triangulation.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.len().saturating_sub(2))
            .sum()
    }

    /// Returns the bounding box, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let first = *self.vertices.first()?;
        let mut bounds = BoundingBox::new(first, first);
        for v in &self.vertices[1..] {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(v[axis]);
                bounds.max[axis] = bounds.max[axis].max(v[axis]);
            }
        }
        Some(bounds)
    }

    /// Checks that every face index refers to an existing vertex.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    object: self.name.clone(),
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Fan-triangulates every polygon. Faces with fewer than three corners
    /// are dropped.
    pub fn triangulate(&mut self) {
        let mut triangles = Vec::with_capacity(self.triangle_count());
        for face in &self.faces {
            if face.len() < 3 {
                continue;
            }
            for i in 1..face.len() - 1 {
                triangles.push(vec![face[0], face[i], face[i + 1]]);
            }
        }
        self.faces = triangles;
    }

    /// Merges vertices that lie within `distance` of an already kept vertex.
    ///
    /// Faces are remapped; faces left with fewer than three distinct corners
    /// are dropped. Returns the number of vertices removed.
    pub fn remove_doubles(&mut self, distance: f64) -> usize {
        let cell = distance.max(f64::MIN_POSITIVE);
        let limit = distance * distance;
        let cell_of = |p: &[f64; 3]| {
            [
                (p[0] / cell).floor() as i64,
                (p[1] / cell).floor() as i64,
                (p[2] / cell).floor() as i64,
            ]
        };

        let mut grid: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
        let mut kept: Vec<[f64; 3]> = Vec::with_capacity(self.vertices.len());
        let mut remap = Vec::with_capacity(self.vertices.len());

        for v in &self.vertices {
            let key = cell_of(v);
            let mut found = None;
            'search: for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        // Keys saturate for huge coordinates.
                        let neighbor = [
                            key[0].saturating_add(dx),
                            key[1].saturating_add(dy),
                            key[2].saturating_add(dz),
                        ];
                        let Some(bucket) = grid.get(&neighbor) else {
                            continue;
                        };
                        if let Some(&j) = bucket.iter().find(|&&j| distance_sq(&kept[j], v) <= limit)
                        {
                            found = Some(j);
                            break 'search;
                        }
                    }
                }
            }
            let index = found.unwrap_or_else(|| {
                kept.push(*v);
                grid.entry(key).or_default().push(kept.len() - 1);
                kept.len() - 1
            });
            remap.push(index);
        }

        let removed = self.vertices.len() - kept.len();
        self.vertices = kept;
        self.faces = self
            .faces
            .iter()
            .filter_map(|face| collapse_face(face.iter().map(|&i| remap[i])))
            .collect();

        if removed > 0 {
            log::debug!("'{}': merged {} duplicate vertices", self.name, removed);
        }
        removed
    }
}

fn distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Drops repeated corners; returns `None` when fewer than three remain.
fn collapse_face(indices: impl Iterator<Item = usize>) -> Option<Vec<usize>> {
    let mut out: Vec<usize> = Vec::new();
    for i in indices {
        if out.last() != Some(&i) {
            out.push(i);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    (out.len() >= 3).then_some(out)
}

impl NamedItem for MeshObject {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedItemMut for MeshObject {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// An ordered collection of mesh objects, as stored in one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub objects: Vec<MeshObject>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene from a list of objects.
    pub fn from_objects(objects: Vec<MeshObject>) -> Self {
        Self { objects }
    }

    /// Returns the first object with the given name.
    pub fn get(&self, name: &str) -> Option<&MeshObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Returns the position of the first object with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }

    /// Returns the names of all objects in order.
    pub fn names(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.name.as_str()).collect()
    }

    /// Appends an object.
    pub fn push(&mut self, object: MeshObject) {
        self.objects.push(object);
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Validates every object.
    pub fn validate(&self) -> MeshResult<()> {
        self.objects.iter().try_for_each(MeshObject::validate)
    }
}

impl Extend<MeshObject> for Scene {
    fn extend<I: IntoIterator<Item = MeshObject>>(&mut self, iter: I) {
        self.objects.extend(iter);
    }
}

impl IntoIterator for Scene {
    type Item = MeshObject;
    type IntoIter = std::vec::IntoIter<MeshObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}
