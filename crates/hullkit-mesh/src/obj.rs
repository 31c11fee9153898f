//! Wavefront OBJ reading and writing.
//!
//! Only geometry is handled: `v`, `f`, `o` and `g` statements. Normals,
//! texture coordinates, materials and smoothing groups are skipped on read
//! and never written.
//!
//! OBJ files index a single vertex pool shared by every object. On read the
//! pool is split so that each [`MeshObject`] owns the vertices its faces
//! use, in pool order.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{MeshObject, Scene};

/// Object name used for geometry that appears before any `o` or `g` line.
pub const DEFAULT_OBJECT_NAME: &str = "default";

/// Parses an OBJ document.
pub fn read_obj<R: Read>(reader: R) -> MeshResult<Scene> {
    let mut parser = ObjParser::default();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        parser.parse_line(i + 1, &line?)?;
    }
    Ok(parser.finish())
}

/// Parses an OBJ document held in memory.
pub fn parse_obj(text: &str) -> MeshResult<Scene> {
    read_obj(text.as_bytes())
}

/// Returns the distinct statement keywords in `text` that reading drops,
/// such as `vn`, `vt`, `usemtl` or `mtllib`, in sorted order.
pub fn skipped_statements(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(split_statement)
        .map(|(keyword, _)| keyword)
        .filter(|keyword| !matches!(*keyword, "v" | "f" | "o" | "g"))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Splits a line into keyword and arguments; `None` for blanks and comments.
fn split_statement(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(match line.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (line, ""),
    })
}

/// Reads an OBJ file from disk.
pub fn read_obj_file(path: &Path) -> MeshResult<Scene> {
    let file = fs::File::open(path).map_err(|e| MeshError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    let scene = read_obj(file)?;
    log::debug!("read {} object(s) from {}", scene.len(), path.display());
    Ok(scene)
}

/// Writes a scene as OBJ.
pub fn write_obj<W: Write>(scene: &Scene, writer: W) -> MeshResult<()> {
    let mut out = BufWriter::new(writer);
    writeln!(out, "# hullkit")?;
    let mut base = 1usize;
    for object in &scene.objects {
        object.validate()?;
        writeln!(out, "o {}", object.name)?;
        for v in &object.vertices {
            writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
        }
        for face in &object.faces {
            write!(out, "f")?;
            for &i in face {
                write!(out, " {}", i + base)?;
            }
            writeln!(out)?;
        }
        base += object.vertices.len();
    }
    out.flush()?;
    Ok(())
}

/// Writes a scene to an OBJ file on disk.
pub fn write_obj_file(scene: &Scene, path: &Path) -> MeshResult<()> {
    let file = fs::File::create(path).map_err(|e| MeshError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_obj(scene, file)?;
    log::debug!("wrote {} object(s) to {}", scene.len(), path.display());
    Ok(())
}

#[derive(Default)]
struct ObjParser {
    positions: Vec<[f64; 3]>,
    objects: Vec<MeshObject>,
    current: Option<PendingObject>,
}

struct PendingObject {
    name: String,
    /// Faces as indices into the shared position pool.
    faces: Vec<Vec<usize>>,
    /// Set by `o`; a following `g` before any face does not split the object.
    from_o: bool,
}

impl PendingObject {
    fn new(name: &str, from_o: bool) -> Self {
        Self {
            name: name.to_string(),
            faces: Vec::new(),
            from_o,
        }
    }

    /// Builds the object, keeping the used positions in pool order.
    fn into_object(self, positions: &[[f64; 3]]) -> MeshObject {
        let used: BTreeSet<usize> = self.faces.iter().flatten().copied().collect();
        let local: HashMap<usize, usize> = used.iter().enumerate().map(|(i, &g)| (g, i)).collect();
        let vertices = used.iter().map(|&g| positions[g]).collect();
        let faces = self
            .faces
            .into_iter()
            .map(|face| face.into_iter().map(|g| local[&g]).collect())
            .collect();
        MeshObject::with_geometry(self.name, vertices, faces)
    }
}

impl ObjParser {
    fn parse_line(&mut self, line_no: usize, line: &str) -> MeshResult<()> {
        let (keyword, rest) = match split_statement(line) {
            Some(statement) => statement,
            None => return Ok(()),
        };

        match keyword {
            "v" => {
                let coords = rest
                    .split_whitespace()
                    .take(3)
                    .map(|t| {
                        t.parse::<f64>().map_err(|_| {
                            MeshError::parse(line_no, format!("invalid vertex coordinate '{}'", t))
                        })
                    })
                    .collect::<MeshResult<Vec<f64>>>()?;
                if coords.len() < 3 {
                    return Err(MeshError::parse(line_no, "vertex needs 3 coordinates"));
                }
                self.positions.push([coords[0], coords[1], coords[2]]);
            }
            "f" => self.parse_face(line_no, rest)?,
            "o" => self.start_object(rest, true),
            "g" => {
                let keep = matches!(&self.current, Some(p) if p.from_o && p.faces.is_empty());
                if !keep {
                    self.start_object(rest, false);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn parse_face(&mut self, line_no: usize, rest: &str) -> MeshResult<()> {
        let count = self.positions.len();
        let mut globals = Vec::new();
        for token in rest.split_whitespace() {
            let index_str = token.split('/').next().unwrap_or("");
            let raw: i64 = index_str.parse().map_err(|_| {
                MeshError::parse(line_no, format!("invalid face index '{}'", token))
            })?;
            let global = match raw {
                0 => return Err(MeshError::parse(line_no, "face index 0 is not valid")),
                r if r > 0 => (r - 1) as usize,
                r => {
                    let back = r.unsigned_abs() as usize;
                    if back > count {
                        return Err(MeshError::parse(
                            line_no,
                            format!("relative face index {} out of range", r),
                        ));
                    }
                    count - back
                }
            };
            if global >= count {
                return Err(MeshError::parse(
                    line_no,
                    format!("face index {} exceeds vertex count {}", raw, count),
                ));
            }
            globals.push(global);
        }
        if globals.len() < 3 {
            return Err(MeshError::parse(line_no, "face needs at least 3 vertices"));
        }

        self.current
            .get_or_insert_with(|| PendingObject::new(DEFAULT_OBJECT_NAME, false))
            .faces
            .push(globals);
        Ok(())
    }

    fn start_object(&mut self, name: &str, from_o: bool) {
        self.flush();
        let name = if name.is_empty() {
            DEFAULT_OBJECT_NAME
        } else {
            name
        };
        self.current = Some(PendingObject::new(name, from_o));
    }

    fn flush(&mut self) {
        if let Some(pending) = self.current.take() {
            if pending.faces.is_empty() {
                log::debug!("skipping OBJ object '{}' without faces", pending.name);
            } else {
                self.objects.push(pending.into_object(&self.positions));
            }
        }
    }

    fn finish(mut self) -> Scene {
        self.flush();
        Scene::from_objects(self.objects)
    }
}
