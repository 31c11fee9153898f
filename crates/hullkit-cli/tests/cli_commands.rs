//! Integration tests for the `hullkit` binary.
//!
//! Every invocation points `HULLKIT_CONFIG` at a temporary file so the user's
//! own preferences are never read or written.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

const SCENE: &str = "\
o Cube
v 0 0 0
v 1 0 0
v 1 1 0
f 1 2 3
o Cube_hull_1
v 0 0 0
v 1 0 0
v 0 1 0
f 4 5 6
o Sphere
v 0 0 1
v 1 0 1
v 0 1 1
f 7 8 9
o Cube_hull_2
v 0 0 2
v 1 0 2
v 0 1 2
f 10 11 12
";

fn hullkit(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hullkit"))
        .args(args)
        .env("HULLKIT_CONFIG", config)
        .env_remove("RUST_LOG")
        .env_remove("VHACD_PATH")
        .output()
        .expect("Failed to execute hullkit")
}

#[test]
fn test_select_json_output() {
    let tmp = tempdir().unwrap();
    let scene = tmp.path().join("level.obj");
    fs::write(&scene, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &["select", "--scene", scene.to_str().unwrap(), "--object", "Cube", "--json"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected success, got: {}", stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["hulls"], serde_json::json!(["Cube_hull_2", "Cube_hull_1"]));
    assert_eq!(
        json["selected"],
        serde_json::json!(["Cube", "Cube_hull_2", "Cube_hull_1"])
    );
}

#[test]
fn test_select_uses_template_from_preferences() {
    let tmp = tempdir().unwrap();
    let prefs = tmp.path().join("prefs.json");
    let scene = tmp.path().join("level.obj");
    fs::write(&scene, SCENE.replace("Cube_hull_", "UCX_Cube_")).unwrap();

    let output = hullkit(&prefs, &["config", "set", "--template", "UCX_?_#"]);
    assert!(output.status.success());

    let output = hullkit(
        &prefs,
        &[
            "select",
            "--scene",
            scene.to_str().unwrap(),
            "--object",
            "Cube",
            "--only-hulls",
            "--json",
        ],
    );
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["selected"], serde_json::json!(["UCX_Cube_2", "UCX_Cube_1"]));
}

#[test]
fn test_select_without_hulls_warns() {
    let tmp = tempdir().unwrap();
    let scene = tmp.path().join("level.obj");
    fs::write(&scene, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &["select", "--scene", scene.to_str().unwrap(), "--object", "Sphere"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("No hulls"), "got: {}", stdout);
}

#[test]
fn test_rename_writes_scene() {
    let tmp = tempdir().unwrap();
    let scene = tmp.path().join("level.obj");
    let out = tmp.path().join("renamed.obj");
    fs::write(&scene, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &[
            "rename",
            "--scene",
            scene.to_str().unwrap(),
            "--active",
            "Sphere",
            "--object",
            "Cube_hull_2",
            "--object",
            "Cube_hull_1",
            "--output",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());

    let written = hullkit_mesh::obj::read_obj_file(&out).unwrap();
    assert_eq!(
        written.names(),
        vec!["Cube", "Sphere_hull_2", "Sphere", "Sphere_hull_1"]
    );
}

#[test]
fn test_config_show_json() {
    let tmp = tempdir().unwrap();
    let prefs = tmp.path().join("prefs.json");

    let output = hullkit(
        &prefs,
        &["config", "set", "--data-dir", tmp.path().to_str().unwrap()],
    );
    assert!(output.status.success());

    let output = hullkit(&prefs, &["config", "show", "--json"]);
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["data_path"], tmp.path().to_str().unwrap());
    assert_eq!(json["name_template"], "?_hull_#");

    let output = hullkit(&prefs, &["config", "path"]);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        prefs.to_str().unwrap()
    );
}

#[test]
fn test_missing_scene_is_an_error() {
    let tmp = tempdir().unwrap();
    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &["select", "--scene", "/nonexistent/level.obj", "--object", "Cube"],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "got: {}", stderr);
    assert!(stderr.contains("/nonexistent/level.obj"), "got: {}", stderr);
}

#[test]
fn test_decompose_without_executable_fails() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("rock.obj");
    fs::write(&input, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &[
            "decompose",
            "--input",
            input.to_str().unwrap(),
            "--executable",
            tmp.path().join("missing").to_str().unwrap(),
            "--data-dir",
            tmp.path().to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot find V-HACD executable"));
}

#[cfg(unix)]
#[test]
fn test_decompose_with_fake_vhacd() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempdir().unwrap();
    let bin = tmp.path().join("bin");
    let data = tmp.path().join("data");
    fs::create_dir_all(&bin).unwrap();
    fs::create_dir_all(&data).unwrap();

    let exe = bin.join("TestVHACD");
    fs::write(
        &exe,
        "#!/bin/sh\nprintf 'o convex0\\nv 0 0 0\\nv 1 0 0\\nv 0 1 0\\nf 1 2 3\\n' > decomp.obj\n",
    )
    .unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

    let input = tmp.path().join("rock.obj");
    fs::write(&input, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &[
            "decompose",
            "--input",
            input.to_str().unwrap(),
            "--object",
            "Sphere",
            "--executable",
            bin.to_str().unwrap(),
            "--data-dir",
            data.to_str().unwrap(),
            "--template",
            "UCX_?_#",
            "--json",
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected success, got: {}", stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["sources"][0]["hulls"], serde_json::json!(["UCX_Sphere_1"]));

    let hulls = hullkit_mesh::obj::read_obj_file(&tmp.path().join("rock_hulls.obj")).unwrap();
    assert_eq!(hulls.names(), vec!["UCX_Sphere_1"]);
    assert!(data.join("Sphere.obj").exists());
}

#[test]
fn test_rename_empty_template_uses_preferences() {
    let tmp = tempdir().unwrap();
    let scene = tmp.path().join("level.obj");
    fs::write(&scene, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &[
            "rename",
            "-s",
            scene.to_str().unwrap(),
            "-a",
            "Cube",
            "--object",
            "Sphere",
            "-t",
            "",
            "--json",
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected success, got: {}", stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["renamed"][0]["to"], "Cube_hull_1");
}

#[test]
fn test_select_empty_template_uses_preferences() {
    let tmp = tempdir().unwrap();
    let scene = tmp.path().join("level.obj");
    fs::write(&scene, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &[
            "select",
            "--scene",
            scene.to_str().unwrap(),
            "--object",
            "Cube",
            "--template",
            "",
            "--only-hulls",
            "--json",
        ],
    );
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["selected"], serde_json::json!(["Cube_hull_2", "Cube_hull_1"]));
}

#[test]
fn test_rename_in_place_warns_about_dropped_statements() {
    let tmp = tempdir().unwrap();
    let scene = tmp.path().join("level.obj");
    fs::write(&scene, format!("mtllib level.mtl\nvn 0 0 1\n{}", SCENE)).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &[
            "rename",
            "--scene",
            scene.to_str().unwrap(),
            "--active",
            "Cube",
            "--object",
            "Sphere",
            "--json",
        ],
    );
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING"), "got: {}", stderr);
    assert!(stderr.contains("mtllib, vn"), "got: {}", stderr);

    // Stdout stays valid JSON.
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["renamed"][0]["to"], "Cube_hull_1");
}

#[cfg(unix)]
#[test]
fn test_decompose_keeps_input_inside_data_dir() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempdir().unwrap();
    let bin = tmp.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let exe = bin.join("TestVHACD");
    fs::write(
        &exe,
        "#!/bin/sh\n[ -f \"$1\" ] || exit 2\nprintf 'o convex0\\nv 0 0 0\\nv 1 0 0\\nv 0 1 0\\nf 1 2 3\\n' > decomp.obj\n",
    )
    .unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

    // Object "Sphere" would export to Sphere.obj, the input itself.
    let input = tmp.path().join("Sphere.obj");
    fs::write(&input, SCENE).unwrap();

    let output = hullkit(
        &tmp.path().join("prefs.json"),
        &[
            "decompose",
            "--input",
            input.to_str().unwrap(),
            "--object",
            "Sphere",
            "--executable",
            bin.to_str().unwrap(),
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "--json",
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected success, got: {}", stdout);
    assert_eq!(fs::read_to_string(&input).unwrap(), SCENE);
    assert!(tmp.path().join("Sphere_.obj").exists());
}
