//! Rename command implementation
//!
//! Renames objects of a scene as hulls of an active object.

use anyhow::{Context, Result};
use colored::Colorize;
use hullkit_mesh::{obj, read_scene, MeshFormat, Scene};
use hullkit_naming::{rename_items, Rename};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Serialize)]
struct RenameOutput<'a> {
    output: String,
    renamed: Vec<RenameEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct RenameEntry<'a> {
    from: &'a str,
    to: &'a str,
}

/// Renames `objects` after `active` in list order.
///
/// The active object itself is skipped if listed. Every name must exist in
/// the scene and appear only once.
pub fn rename_in_scene(
    scene: &mut Scene,
    active: &str,
    objects: &[String],
    template: &str,
) -> Result<Vec<Rename>> {
    if scene.get(active).is_none() {
        anyhow::bail!("Active object '{}' not found in scene", active);
    }

    let mut positions = Vec::with_capacity(objects.len());
    for name in objects.iter().filter(|n| n.as_str() != active) {
        let pos = scene
            .position(name)
            .with_context(|| format!("Object '{}' not found in scene", name))?;
        if positions.contains(&pos) {
            anyhow::bail!("Object '{}' listed more than once", name);
        }
        positions.push(pos);
    }

    let mut names: Vec<String> = positions
        .iter()
        .map(|&pos| scene.objects[pos].name.clone())
        .collect();
    let renames = rename_items(template, active, &mut names);
    for (&pos, name) in positions.iter().zip(names) {
        scene.objects[pos].name = name;
    }
    Ok(renames)
}

/// Describes the OBJ statements of `scene_path` that writing `output` loses.
pub fn dropped_statements_warning(scene_path: &Path, output: &Path) -> Result<Option<String>> {
    if MeshFormat::from_path(scene_path).ok() != Some(MeshFormat::Obj) {
        return Ok(None);
    }
    let text = fs::read_to_string(scene_path)
        .with_context(|| format!("failed to read {}", scene_path.display()))?;
    let skipped = obj::skipped_statements(&text);
    if skipped.is_empty() {
        return Ok(None);
    }
    let action = if output == scene_path {
        "overwriting"
    } else {
        "writing"
    };
    Ok(Some(format!(
        "{} {} drops unsupported OBJ statements: {}",
        action,
        output.display(),
        skipped.join(", ")
    )))
}

/// Run the rename command
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    scene_path: &str,
    active: &str,
    objects: &[String],
    template: &str,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let scene_path = Path::new(scene_path);
    let output = output.map(PathBuf::from).unwrap_or_else(|| scene_path.to_path_buf());
    if MeshFormat::from_path(&output).ok() != Some(MeshFormat::Obj) {
        anyhow::bail!(
            "renamed scenes are written as OBJ; pass an .obj path with --output (got {})",
            output.display()
        );
    }

    let mut scene = read_scene(scene_path)
        .with_context(|| format!("failed to load {}", scene_path.display()))?;
    let renames = rename_in_scene(&mut scene, active, objects, template)?;
    if let Some(warning) = dropped_statements_warning(scene_path, &output)? {
        eprintln!("{} {}", "WARNING".yellow().bold(), warning);
    }
    obj::write_obj_file(&scene, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if json_output {
        let out = RenameOutput {
            output: output.display().to_string(),
            renamed: renames
                .iter()
                .map(|r| RenameEntry {
                    from: &r.old_name,
                    to: &r.new_name,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    for r in &renames {
        println!("  {} -> {}", r.old_name.dimmed(), r.new_name);
    }
    println!(
        "{} Renamed {} object{} in {}",
        "SUCCESS".green().bold(),
        renames.len(),
        if renames.len() == 1 { "" } else { "s" },
        output.display()
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hullkit_mesh::MeshObject;
    use pretty_assertions::assert_eq;

    fn scene(names: &[&str]) -> Scene {
        Scene::from_objects(names.iter().map(|n| MeshObject::new(*n)).collect())
    }

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_rename_in_list_order() {
        let mut scene = scene(&["Rock", "convex0", "convex1", "Tree"]);
        let renames = rename_in_scene(
            &mut scene,
            "Rock",
            &owned(&["convex1", "convex0"]),
            "?_hull_#",
        )
        .unwrap();

        assert_eq!(renames[0].old_name, "convex1");
        assert_eq!(
            scene.names(),
            vec!["Rock", "Rock_hull_2", "Rock_hull_1", "Tree"]
        );
    }

    #[test]
    fn test_active_object_is_skipped() {
        let mut scene = scene(&["Rock", "a"]);
        let renames =
            rename_in_scene(&mut scene, "Rock", &owned(&["Rock", "a"]), "UCX_?_#").unwrap();
        assert_eq!(renames.len(), 1);
        assert_eq!(scene.names(), vec!["Rock", "UCX_Rock_1"]);
    }

    #[test]
    fn test_template_without_index_appends_it() {
        let mut scene = scene(&["Rock", "a", "b"]);
        rename_in_scene(&mut scene, "Rock", &owned(&["a", "b"]), "col").unwrap();
        assert_eq!(scene.names(), vec!["Rock", "col1", "col2"]);
    }

    #[test]
    fn test_dropped_statements_warning() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("level.obj");
        std::fs::write(&scene, "mtllib level.mtl\no Rock\nv 0 0 0\nvn 0 0 1\n").unwrap();

        let warning = dropped_statements_warning(&scene, &scene).unwrap().unwrap();
        assert!(warning.starts_with("overwriting"), "got: {}", warning);
        assert!(warning.ends_with("mtllib, vn"), "got: {}", warning);

        let other = dir.path().join("out.obj");
        let warning = dropped_statements_warning(&scene, &other).unwrap().unwrap();
        assert!(warning.starts_with("writing"), "got: {}", warning);

        let plain = dir.path().join("plain.obj");
        std::fs::write(&plain, "o Rock\nv 0 0 0\n").unwrap();
        assert!(dropped_statements_warning(&plain, &plain).unwrap().is_none());
    }

    #[test]
    fn test_unknown_and_duplicate_objects() {
        let mut s = scene(&["Rock", "a"]);
        let err = rename_in_scene(&mut s, "Cliff", &owned(&["a"]), "?_#").unwrap_err();
        assert!(err.to_string().contains("Active object 'Cliff'"));

        let err = rename_in_scene(&mut s, "Rock", &owned(&["b"]), "?_#").unwrap_err();
        assert_eq!(err.to_string(), "Object 'b' not found in scene");

        let err = rename_in_scene(&mut s, "Rock", &owned(&["a", "a"]), "?_#").unwrap_err();
        assert!(err.to_string().contains("more than once"));
        assert_eq!(s.names(), vec!["Rock", "a"]);
    }
}
