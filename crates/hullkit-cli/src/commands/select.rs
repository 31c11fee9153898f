//! Select command implementation
//!
//! Finds the hulls that belong to the given objects by their names.

use anyhow::{Context, Result};
use colored::Colorize;
use hullkit_mesh::{read_scene, Scene};
use hullkit_naming::discover_matches;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// Outcome of a hull selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Every selected object: the requested objects (unless only hulls were
    /// asked for) followed by their hulls.
    pub selected: Vec<String>,
    /// The discovered hulls, in discovery order.
    pub hulls: Vec<String>,
}

/// Computes the selection for `objects` within `scene`.
pub fn select_hulls(
    scene: &Scene,
    objects: &[String],
    template: &str,
    only_hulls: bool,
) -> Result<Selection> {
    if objects.is_empty() {
        anyhow::bail!("First select an object to find its matching hulls");
    }
    for name in objects {
        if scene.get(name).is_none() {
            anyhow::bail!("Object '{}' not found in scene", name);
        }
    }

    let discovery = discover_matches(template, &scene.objects, objects)?;
    let hulls: Vec<String> = discovery.names().into_iter().map(String::from).collect();

    let mut selected = if only_hulls {
        Vec::new()
    } else {
        objects.to_vec()
    };
    for hull in &hulls {
        if !selected.contains(hull) {
            selected.push(hull.clone());
        }
    }
    Ok(Selection { selected, hulls })
}

/// Run the select command
///
/// # Returns
/// Exit code: 0 on success (also when no hulls match)
pub fn run(
    scene_path: &str,
    objects: &[String],
    template: &str,
    only_hulls: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let scene = read_scene(Path::new(scene_path))
        .with_context(|| format!("failed to load {}", scene_path))?;
    let selection = select_hulls(&scene, objects, template, only_hulls)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&selection)?);
        return Ok(ExitCode::SUCCESS);
    }

    if selection.hulls.is_empty() {
        println!(
            "{} No hulls matching '{}' found for {}",
            "WARNING".yellow().bold(),
            template,
            objects.join(", ")
        );
    } else {
        println!(
            "{} {} hull{}",
            "Found".cyan().bold(),
            selection.hulls.len(),
            if selection.hulls.len() == 1 { "" } else { "s" }
        );
    }
    for name in &selection.selected {
        println!("{}", name);
    }
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
    fn test_selection_keeps_objects() {
        let scene = scene(&["Cube", "Cube_hull_1", "Sphere", "Cube_hull_2"]);
        let selection = select_hulls(&scene, &owned(&["Cube"]), "?_hull_#", false).unwrap();
        assert_eq!(selection.hulls, vec!["Cube_hull_2", "Cube_hull_1"]);
        assert_eq!(selection.selected, vec!["Cube", "Cube_hull_2", "Cube_hull_1"]);
    }

    #[test]
    fn test_only_hulls() {
        let scene = scene(&["Cube", "Cube_hull_1", "Sphere", "Sphere_hull_1"]);
        let selection =
            select_hulls(&scene, &owned(&["Cube", "Sphere"]), "?_hull_#", true).unwrap();
        assert_eq!(selection.selected, vec!["Cube_hull_1", "Sphere_hull_1"]);
    }

    #[test]
    fn test_no_hulls_is_not_an_error() {
        let scene = scene(&["Cube", "Sphere"]);
        let selection = select_hulls(&scene, &owned(&["Cube"]), "?_hull_#", true).unwrap();
        assert!(selection.hulls.is_empty());
        assert!(selection.selected.is_empty());
    }

    #[test]
    fn test_template_without_name_token() {
        let scene = scene(&["Cube", "hull_1"]);
        let err = select_hulls(&scene, &owned(&["Cube"]), "hull_#", false).unwrap_err();
        assert!(err.to_string().contains("'?'"));
    }

    #[test]
    fn test_unknown_object() {
        let scene = scene(&["Cube"]);
        let err = select_hulls(&scene, &owned(&["Sphere"]), "?_hull_#", false).unwrap_err();
        assert_eq!(err.to_string(), "Object 'Sphere' not found in scene");
    }
}
