//! Platform-specific helpers.

/// Check if running in a CI environment.
///
/// Used to auto-detect CI and force the non-interactive UI in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// File names a program may have on disk.
///
/// On Windows a bare `python` is found as `python.exe`, `python.bat`, and
/// so on, following `PATHEXT`. Elsewhere the name is used as-is.
pub fn executable_names(program: &str) -> Vec<String> {
    if !cfg!(target_os = "windows") {
        return vec![program.to_string()];
    }

    let has_extension = std::path::Path::new(program).extension().is_some();
    let mut names = Vec::new();
    if has_extension {
        names.push(program.to_string());
    }
    let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    for ext in pathext.split(';').filter(|e| !e.is_empty()) {
        names.push(format!("{}{}", program, ext.to_lowercase()));
    }
    names
}
