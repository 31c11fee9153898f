//! Object File Format (OFF) reading and writing.
//!
//! ```text
//! OFF
//! <vertex count> <face count> <edge count>
//! x y z            (one line per vertex)
//! n i0 i1 ... in-1 (one line per face, 0-based indices)
//! ```
//!
//! OFF holds a single mesh with no name; readers name it after the file.

use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshObject;

/// Writes a mesh as OFF. The edge count is written as 0.
pub fn write_off<W: Write>(mesh: &MeshObject, writer: W) -> MeshResult<()> {
    mesh.validate()?;
    let mut out = BufWriter::new(writer);
    writeln!(out, "OFF")?;
    writeln!(out, "{} {} 0", mesh.vertices.len(), mesh.faces.len())?;
    for v in &mesh.vertices {
        writeln!(out, "{} {} {}", v[0], v[1], v[2])?;
    }
    for face in &mesh.faces {
        write!(out, "{}", face.len())?;
        for i in face {
            write!(out, " {}", i)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a mesh to an OFF file on disk.
pub fn write_off_file(mesh: &MeshObject, path: &Path) -> MeshResult<()> {
    let file = fs::File::create(path).map_err(|e| MeshError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_off(mesh, file)
}

/// Parses an OFF document into a mesh called `name`.
pub fn read_off<R: Read>(mut reader: R, name: &str) -> MeshResult<MeshObject> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_off(&text, name)
}

/// Reads an OFF file, naming the mesh after the file stem.
pub fn read_off_file(path: &Path) -> MeshResult<MeshObject> {
    let text = fs::read_to_string(path).map_err(|e| MeshError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    parse_off(&text, &name)
}

/// Parses OFF text held in memory.
pub fn parse_off(text: &str, name: &str) -> MeshResult<MeshObject> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.split('#').next().unwrap_or("").trim()))
        .filter(|(_, l)| !l.is_empty());

    let (mut line_no, mut line) = lines
        .next()
        .ok_or_else(|| MeshError::parse(1, "empty OFF file"))?;
    if let Some(rest) = line.strip_prefix("OFF") {
        let rest = rest.trim();
        if rest.is_empty() {
            (line_no, line) = lines
                .next()
                .ok_or_else(|| MeshError::parse(line_no, "missing OFF counts line"))?;
        } else {
            line = rest;
        }
    }

    let counts = parse_numbers::<usize>(line_no, line)?;
    if counts.len() < 2 {
        return Err(MeshError::parse(line_no, "expected vertex and face counts"));
    }
    let (vertex_count, face_count) = (counts[0], counts[1]);

    // Counts come from the file; never size buffers from them.
    let mut mesh = MeshObject::new(name);
    for _ in 0..vertex_count {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| MeshError::parse(line_no, "unexpected end of vertex list"))?;
        let coords = parse_numbers::<f64>(line_no, line)?;
        if coords.len() < 3 {
            return Err(MeshError::parse(line_no, "vertex needs 3 coordinates"));
        }
        mesh.vertices.push([coords[0], coords[1], coords[2]]);
    }

    for _ in 0..face_count {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| MeshError::parse(line_no, "unexpected end of face list"))?;
        let mut tokens = line.split_whitespace();
        let n: usize = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| MeshError::parse(line_no, "missing face vertex count"))?;
        // Trailing color values after the indices are ignored.
        let indices = tokens
            .take(n)
            .map(|t| {
                t.parse::<usize>()
                    .map_err(|_| MeshError::parse(line_no, format!("invalid face index '{}'", t)))
            })
            .collect::<MeshResult<Vec<usize>>>()?;
        if indices.len() != n {
            return Err(MeshError::parse(
                line_no,
                format!("face declares {} vertices but lists {}", n, indices.len()),
            ));
        }
        mesh.faces.push(indices);
    }

    mesh.validate()?;
    Ok(mesh)
}

fn parse_numbers<T: std::str::FromStr>(line_no: usize, line: &str) -> MeshResult<Vec<T>> {
    line.split_whitespace()
        .map(|t| {
            t.parse::<T>()
                .map_err(|_| MeshError::parse(line_no, format!("invalid number '{}'", t)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn triangle() -> MeshObject {
        MeshObject::with_geometry(
            "Tri",
            vec![[0.0, 0.0, 0.0], [1.5, 0.0, 0.0], [0.0, 1.0, -2.0]],
            vec![vec![0, 1, 2]],
        )
    }

    #[test]
    fn test_write_off() {
        let mut buf = Vec::new();
        write_off(&triangle(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "OFF\n3 1 0\n0 0 0\n1.5 0 0\n0 1 -2\n3 0 1 2\n"
        );
    }

    #[test]
    fn test_read_off_with_comments_and_colors() {
        let text = "OFF\n# a comment\n\n4 2 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n3 0 1 2 255 0 0\n3 0 2 3\n";
        let mesh = parse_off(text, "Quad").unwrap();
        assert_eq!(mesh.name, "Quad");
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
    }

    #[test]
    fn test_read_off_counts_on_header_line() {
        let mesh = parse_off("OFF 3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n", "x").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_read_off_round_trips_writer_output() {
        let mut buf = Vec::new();
        write_off(&triangle(), &mut buf).unwrap();
        let mesh = read_off(buf.as_slice(), "Tri").unwrap();
        assert_eq!(mesh, triangle());
    }

    #[test]
    fn test_read_off_errors() {
        assert!(matches!(
            parse_off("", "x").unwrap_err(),
            MeshError::Parse { line: 1, .. }
        ));
        assert!(matches!(
            parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n", "x").unwrap_err(),
            MeshError::Parse { .. }
        ));
        assert!(matches!(
            parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1\n", "x").unwrap_err(),
            MeshError::Parse { line: 6, .. }
        ));
        assert!(matches!(
            parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 5\n", "x").unwrap_err(),
            MeshError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn test_read_off_huge_counts_are_parse_errors() {
        assert!(matches!(
            parse_off("OFF\n18446744073709551615 0 0\n0 0 0\n", "x").unwrap_err(),
            MeshError::Parse { line: 2, .. }
        ));
        assert!(matches!(
            parse_off("OFF\n3 4000000000 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n", "x").unwrap_err(),
            MeshError::Parse { line: 2, .. }
        ));
    }
}
