//! Doctor command implementation
//!
//! Checks the V-HACD installation and the preferences.

use anyhow::Result;
use colored::Colorize;
use hullkit_naming::NameTemplate;
use hullkit_vhacd::{Orchestrator, OrchestratorConfig};
use std::path::Path;
use std::process::ExitCode;

use crate::config::Preferences;

/// Result of a single doctor check.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    Ok(String),
    Warning(String),
    Failed(String),
}

impl CheckStatus {
    fn is_failure(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }

    fn print(&self) {
        match self {
            CheckStatus::Ok(msg) => println!("  {} {}", "ok".green(), msg),
            CheckStatus::Warning(msg) => println!("  {} {}", "!!".yellow(), msg),
            CheckStatus::Failed(msg) => println!("  {} {}", "!!".red(), msg),
        }
    }
}

/// Run the doctor command
///
/// Checks:
/// - V-HACD executable discovery
/// - Data directory exists and is writable
/// - Name template can be used to find hulls again
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(prefs_path: &Path) -> Result<ExitCode> {
    println!("{}", "hullkit Doctor".cyan().bold());
    println!("{}", "==============".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!("  {} hullkit v{}", "->".green(), env!("CARGO_PKG_VERSION"));
    println!();

    let prefs = match Preferences::load_from(prefs_path) {
        Ok(prefs) => {
            println!("{}", "Preferences:".bold());
            println!("  {} {}", "ok".green(), prefs_path.display());
            prefs
        }
        Err(e) => {
            println!("{}", "Preferences:".bold());
            println!("  {} {:#}", "!!".red(), e);
            println!();
            println!(
                "{} Some checks failed. See above for details.",
                "WARNING".yellow().bold()
            );
            return Ok(ExitCode::from(1));
        }
    };
    println!();

    let mut config = OrchestratorConfig::with_data_dir(&prefs.data_path);
    if let Some(exe) = &prefs.executable_path {
        config = config.executable_path(exe);
    }
    let orchestrator = Orchestrator::with_config(config);

    let checks = [
        ("Dependencies:", check_executable(&orchestrator)),
        ("Data directory:", check_data_dir(&orchestrator)),
        ("Name template:", check_template(&prefs.name_template)),
    ];

    let mut all_ok = true;
    for (title, status) in &checks {
        println!("{}", title.bold());
        status.print();
        println!();
        all_ok &= !status.is_failure();
    }

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Checks that the V-HACD executable can be found.
pub fn check_executable(orchestrator: &Orchestrator) -> CheckStatus {
    match orchestrator.find_executable() {
        Ok(path) => CheckStatus::Ok(format!("V-HACD found at {}", path.display())),
        Err(e) => CheckStatus::Failed(e.to_string()),
    }
}

/// Checks that the data directory exists and accepts files.
pub fn check_data_dir(orchestrator: &Orchestrator) -> CheckStatus {
    let dir = match orchestrator.data_dir() {
        Ok(dir) => dir,
        Err(e) => return CheckStatus::Failed(e.to_string()),
    };
    let marker = dir.join(".hullkit_write_test");
    match std::fs::write(&marker, "test") {
        Ok(_) => {
            let _ = std::fs::remove_file(&marker);
            CheckStatus::Ok(format!("{} is writable", dir.display()))
        }
        Err(e) => CheckStatus::Failed(format!("cannot write to {}: {}", dir.display(), e)),
    }
}

/// Checks that hulls named with `template` can be selected again.
pub fn check_template(template: &str) -> CheckStatus {
    let template = NameTemplate::new(template);
    let example = template.generate("Cube", 1);
    match template.ensure_matchable() {
        Ok(()) => CheckStatus::Ok(format!("'{}' (e.g. {})", template, example)),
        Err(e) => CheckStatus::Warning(format!("{} (hulls are still named, e.g. {})", e, example)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_template() {
        assert_eq!(
            check_template("?_hull_#"),
            CheckStatus::Ok("'?_hull_#' (e.g. Cube_hull_1)".to_string())
        );
        assert!(matches!(check_template("hull_#"), CheckStatus::Warning(_)));
    }

    #[test]
    fn test_check_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator =
            Orchestrator::with_config(OrchestratorConfig::with_data_dir(dir.path()));
        assert!(matches!(check_data_dir(&orchestrator), CheckStatus::Ok(_)));
        assert!(!dir.path().join(".hullkit_write_test").exists());

        let orchestrator = Orchestrator::with_config(OrchestratorConfig::with_data_dir(
            dir.path().join("missing"),
        ));
        assert!(check_data_dir(&orchestrator).is_failure());
    }

    #[test]
    fn test_check_executable_missing() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_config(
            OrchestratorConfig::default().executable_path(dir.path().join("TestVHACD")),
        );
        assert!(check_executable(&orchestrator).is_failure());
    }
}
