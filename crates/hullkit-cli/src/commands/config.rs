//! Preference management commands

use anyhow::Result;
use colored::Colorize;
use hullkit_naming::NameTemplate;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Preferences;

/// Print the current preferences
pub fn show(path: &Path, json_output: bool) -> Result<ExitCode> {
    let prefs = Preferences::load_from(path)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&prefs)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Preferences".cyan().bold());
    println!("  {}: {}", "File".dimmed(), path.display());
    println!(
        "  {}: {}",
        "Executable path".dimmed(),
        prefs
            .executable_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(search VHACD_PATH and PATH)".to_string())
    );
    println!("  {}: {}", "Data path".dimmed(), prefs.data_path.display());
    println!("  {}: {}", "Name template".dimmed(), prefs.name_template);
    Ok(ExitCode::SUCCESS)
}

/// Apply changes to the preferences file.
///
/// An empty executable path clears it.
pub fn set(
    path: &Path,
    executable: Option<&str>,
    data_dir: Option<&str>,
    template: Option<&str>,
) -> Result<ExitCode> {
    if executable.is_none() && data_dir.is_none() && template.is_none() {
        anyhow::bail!("nothing to set (use --executable, --data-dir or --template)");
    }

    let mut prefs = Preferences::load_from(path)?;
    if let Some(exe) = executable {
        prefs.executable_path = if exe.is_empty() {
            None
        } else {
            Some(PathBuf::from(exe))
        };
    }
    if let Some(dir) = data_dir {
        prefs.data_path = PathBuf::from(dir);
    }
    if let Some(template) = template {
        if !NameTemplate::new(template).has_name_token() {
            println!(
                "{} template '{}' has no '?'; existing hulls cannot be selected by name",
                "WARNING".yellow().bold(),
                template
            );
        }
        prefs.name_template = template.to_string();
    }
    prefs.save_to(path)?;

    println!(
        "{} Saved {}",
        "SUCCESS".green().bold(),
        path.display()
    );
    Ok(ExitCode::SUCCESS)
}

/// Print the preferences file location
pub fn path(path: &Path) -> Result<ExitCode> {
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_updates_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        set(&path, Some("/opt/v-hacd"), None, None).unwrap();
        set(&path, None, None, Some("UCX_?_#")).unwrap();

        let prefs = Preferences::load_from(&path).unwrap();
        assert_eq!(prefs.executable_path, Some(PathBuf::from("/opt/v-hacd")));
        assert_eq!(prefs.name_template, "UCX_?_#");
        assert_eq!(prefs.data_path, std::env::temp_dir());
    }

    #[test]
    fn test_set_empty_executable_clears_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        set(&path, Some("/opt/v-hacd"), Some("/tmp/hulls"), None).unwrap();
        set(&path, Some(""), None, None).unwrap();

        let prefs = Preferences::load_from(&path).unwrap();
        assert!(prefs.executable_path.is_none());
        assert_eq!(prefs.data_path, PathBuf::from("/tmp/hulls"));
    }

    #[test]
    fn test_set_requires_a_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        assert!(set(&path, None, None, None).is_err());
        assert!(!path.exists());
    }
}
