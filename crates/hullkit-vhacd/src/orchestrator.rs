//! V-HACD subprocess orchestrator.
//!
//! This module locates the V-HACD executable and runs it on an exported mesh
//! inside the data directory, where it writes `decomp.obj`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{VhacdError, VhacdResult};
use crate::params::VhacdParams;

/// Default timeout for one decomposition (10 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// File V-HACD writes into its working directory when `-o obj` is given.
pub const OUTPUT_FILE_NAME: &str = "decomp.obj";

/// Stem of [`OUTPUT_FILE_NAME`]; exported meshes never use it.
pub const OUTPUT_FILE_STEM: &str = "decomp";

/// Environment variable consulted when no executable path is configured.
pub const VHACD_PATH_ENV: &str = "VHACD_PATH";

/// Executable names tried inside a directory and on `PATH`.
const EXECUTABLE_NAMES: &[&str] = if cfg!(windows) {
    &["TestVHACD.exe", "testVHACD.exe"]
} else {
    &["TestVHACD", "testVHACD"]
};

/// Configuration for the V-HACD orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Path to the V-HACD executable or the directory containing it.
    pub executable_path: Option<PathBuf>,
    /// Directory for exported meshes and V-HACD output.
    pub data_dir: PathBuf,
    /// Timeout for one V-HACD run.
    pub timeout: Duration,
    /// Whether to capture V-HACD's stderr (stdout is discarded). When false
    /// both streams are inherited so progress is visible.
    pub capture_output: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            executable_path: None,
            data_dir: std::env::temp_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }
}

impl OrchestratorConfig {
    /// Creates a new config with the given data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the V-HACD executable path.
    pub fn executable_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Sets whether output is captured.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }
}

/// Result of one V-HACD run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Path of the decomposed mesh.
    pub output_path: PathBuf,
    /// Wall-clock duration of the run.
    pub duration: Duration,
    /// Captured stderr (empty when output is not captured).
    pub stderr: String,
}

/// The V-HACD subprocess orchestrator.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Creates a new orchestrator with default configuration.
    pub fn new() -> Self {
        Self {
            config: OrchestratorConfig::default(),
        }
    }

    /// Creates a new orchestrator with the given configuration.
    pub fn with_config(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Finds the V-HACD executable.
    ///
    /// A configured path wins; a directory is searched for `TestVHACD`. Without
    /// configuration `VHACD_PATH` and then `PATH` are consulted.
    pub fn find_executable(&self) -> VhacdResult<PathBuf> {
        if let Some(ref path) = self.config.executable_path {
            return resolve_configured(path);
        }

        if let Ok(path) = std::env::var(VHACD_PATH_ENV) {
            if !path.is_empty() {
                return resolve_configured(Path::new(&path));
            }
        }

        for name in EXECUTABLE_NAMES {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        Err(VhacdError::ExecutableNotFound)
    }

    /// Returns the data directory with trailing separators removed, checking
    /// that it exists.
    pub fn data_dir(&self) -> VhacdResult<PathBuf> {
        let raw = self.config.data_dir.to_string_lossy();
        let trimmed = raw.trim_end_matches(['/', '\\']);
        let dir = if trimmed.is_empty() {
            self.config.data_dir.clone()
        } else {
            PathBuf::from(trimmed)
        };
        if !dir.is_dir() {
            return Err(VhacdError::InvalidDataDir { path: dir });
        }
        Ok(dir)
    }

    /// Runs V-HACD on `input` and returns the path of `decomp.obj`.
    ///
    /// The process runs with the data directory as its working directory.
    pub fn run(&self, input: &Path, params: &VhacdParams) -> VhacdResult<RunOutput> {
        params.validate()?;
        let executable = self.find_executable()?;
        let data_dir = self.data_dir()?;
        // The child runs inside the data directory.
        let input = if input.is_relative() {
            std::env::current_dir()?.join(input)
        } else {
            input.to_path_buf()
        };

        // A stale result from a previous run must not be mistaken for this one.
        let output_path = data_dir.join(OUTPUT_FILE_NAME);
        if output_path.exists() {
            std::fs::remove_file(&output_path)?;
        }

        // TestVHACD <input> -h .. -r .. -e .. -d .. -s .. -f .. -v .. -a .. -l .. -o obj -p ..
        let mut cmd = Command::new(&executable);
        cmd.args(params.to_args(&input))
            .current_dir(&data_dir)
            .stdin(Stdio::null());

        if self.config.capture_output {
            // Progress on stdout is discarded.
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        log::info!(
            "running {} {}",
            executable.display(),
            params.to_args(&input).join(" ")
        );

        let start = Instant::now();
        let child = cmd.spawn().map_err(VhacdError::SpawnFailed)?;
        let (status, stderr) = wait_with_timeout(child, self.config.timeout)?;
        let duration = start.elapsed();

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(VhacdError::process_failed(exit_code, stderr));
        }

        if !output_path.exists() {
            return Err(VhacdError::OutputNotFound { path: output_path });
        }

        log::info!("V-HACD finished in {:.1}s", duration.as_secs_f64());
        Ok(RunOutput {
            output_path,
            duration,
            stderr,
        })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_configured(path: &Path) -> VhacdResult<PathBuf> {
    if path.is_dir() {
        return EXECUTABLE_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| VhacdError::ExecutableMissing {
                path: path.join(EXECUTABLE_NAMES[0]),
            });
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    Err(VhacdError::ExecutableMissing {
        path: path.to_path_buf(),
    })
}

fn wait_with_timeout(mut child: Child, timeout: Duration) -> VhacdResult<(ExitStatus, String)> {
    // Stderr is drained concurrently; a full pipe would stall the child.
    let stderr_reader = child.stderr.take().map(|mut err| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = err.read_to_string(&mut buf);
            buf
        })
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if start.elapsed() > timeout => {
                let _ = child.kill();
                let _ = child.wait();
                log::warn!("V-HACD killed after {}s", timeout.as_secs());
                return Err(VhacdError::Timeout {
                    timeout_secs: timeout.as_secs(),
                });
            }
            Ok(None) => std::thread::sleep(Duration::from_millis(100)),
            Err(e) => return Err(VhacdError::SpawnFailed(e)),
        }
    };

    let stderr = stderr_reader
        .and_then(|reader| reader.join().ok())
        .unwrap_or_default();
    Ok((status, stderr))
}
