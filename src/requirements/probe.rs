//! Module probe: can the interpreter import a set of modules?
//!
//! All modules are probed in a single interpreter process. The probe script
//! imports each name in turn and reports the failures on stdout behind a
//! marker, so anything a module prints while importing cannot be mistaken
//! for a result.
//!
//! # Example
//!
//! ```no_run
//! use dashboard_launcher::requirements::probe::run_probe;
//!
//! let modules = vec!["pandas".to_string(), "plotly".to_string()];
//! let report = run_probe("python3", &modules, None);
//! if !report.all_present() {
//!     println!("missing: {}", report.missing.join(", "));
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::requirements::status::ProbeReport;
use crate::shell::{execute_quiet, executable_names, CommandSpec};

/// Prefix of each line naming a module that failed to import.
pub const MISSING_MARKER: &str = "__launcher_missing__ ";

/// Python source run with `-c`; module names arrive in `sys.argv[1:]`.
const PROBE_SCRIPT: &str = "\
import importlib, sys
for name in sys.argv[1:]:
    try:
        importlib.import_module(name)
    except Exception:
        print('__launcher_missing__ ' + name)
";

/// Build the probe invocation for `modules`.
pub fn probe_command(python: &str, modules: &[String]) -> CommandSpec {
    CommandSpec::new(python)
        .arg("-c")
        .arg(PROBE_SCRIPT)
        .args(modules.iter().cloned())
}

/// Extract missing module names from probe output.
///
/// Only names that were actually probed are returned, in probe order.
pub fn parse_probe_output(stdout: &str, modules: &[String]) -> Vec<String> {
    let reported: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.trim_end().strip_prefix(MISSING_MARKER))
        .collect();

    modules
        .iter()
        .filter(|m| reported.contains(&m.as_str()))
        .cloned()
        .collect()
}

/// Probe `modules` with the given interpreter.
///
/// `cwd` should be the directory the dashboard will run in: the interpreter
/// puts its working directory first on `sys.path`, so local files can shadow
/// installed modules.
///
/// Never fails: an interpreter that cannot be started, or a probe script
/// that exits non-zero, yields a report with every module missing.
pub fn run_probe(python: &str, modules: &[String], cwd: Option<&Path>) -> ProbeReport {
    let spec = probe_command(python, modules);

    match execute_quiet(&spec, cwd) {
        Ok(result) if result.success => {
            let missing = parse_probe_output(&result.stdout, modules);
            tracing::debug!(
                "Probe finished in {:?}: {} of {} missing",
                result.duration,
                missing.len(),
                modules.len()
            );
            ProbeReport::new(modules, missing)
        }
        Ok(result) => {
            let detail = result.stderr.lines().last().unwrap_or("").trim().to_string();
            tracing::debug!("Probe exited with {:?}: {}", result.exit_code, detail);
            ProbeReport::failed(
                modules,
                format!(
                    "probe exited with code {}{}",
                    result
                        .exit_code
                        .map_or_else(|| "?".to_string(), |c| c.to_string()),
                    if detail.is_empty() {
                        String::new()
                    } else {
                        format!(": {}", detail)
                    }
                ),
            )
        }
        Err(e) => {
            tracing::debug!("Probe could not start: {}", e);
            ProbeReport::failed(modules, format!("could not run '{}'", python))
        }
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = executable_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Locate the configured interpreter.
///
/// A value containing a path separator is checked as a path; a bare name
/// is looked up on PATH.
pub fn resolve_interpreter(python: &str) -> Option<PathBuf> {
    let path = Path::new(python);
    if path.components().count() > 1 {
        return (path.is_file() && is_executable(path)).then(|| path.to_path_buf());
    }
    resolve_tool_path(python, &parse_system_path())
}
