//! Integration tests for the launch sequence through the public API.

use std::cell::RefCell;
use std::path::Path;

use dashboard_launcher::config::LauncherConfig;
use dashboard_launcher::launcher::{BootstrapOptions, Bootstrapper, LaunchPlan, Toolchain};
use dashboard_launcher::requirements::{InstallMode, InstallOutcome, PackageSpec, ProbeReport};
use dashboard_launcher::ui::MockUI;

/// Toolchain whose probe always reports the same missing modules.
struct FixedToolchain {
    missing: Vec<String>,
    install_outcome: InstallOutcome,
    log: RefCell<Vec<String>>,
}

impl Toolchain for FixedToolchain {
    fn probe(&self, modules: &[String]) -> ProbeReport {
        self.log.borrow_mut().push("probe".to_string());
        let missing = modules
            .iter()
            .filter(|m| self.missing.contains(m))
            .cloned()
            .collect();
        ProbeReport::new(modules, missing)
    }

    fn install(&self, _packages: &[PackageSpec], mode: InstallMode) -> InstallOutcome {
        self.log.borrow_mut().push(format!("install:{mode:?}"));
        self.install_outcome.clone()
    }

    fn launch(&self, _plan: &LaunchPlan) -> dashboard_launcher::Result<Option<i32>> {
        self.log.borrow_mut().push("launch".to_string());
        Ok(None)
    }
}

fn quick_config() -> LauncherConfig {
    let mut config = LauncherConfig::default();
    config.launch.pause_secs = 0;
    config
}

#[test]
fn spawn_failure_of_pip_still_launches() {
    let config = quick_config();
    let toolchain = FixedToolchain {
        missing: vec!["streamlit".to_string()],
        install_outcome: InstallOutcome::SpawnFailed {
            message: "could not run 'python3'".to_string(),
        },
        log: RefCell::new(Vec::new()),
    };

    let bootstrapper =
        Bootstrapper::new(&config, Path::new("."), toolchain, BootstrapOptions::default());
    let mut ui = MockUI::new();
    let report = bootstrapper.run(&mut ui).unwrap();

    assert!(report.launched);
    assert_eq!(report.exit_code, None);
    assert_eq!(
        bootstrapper.toolchain().log.borrow().as_slice(),
        ["probe", "install:Visible", "probe", "launch"]
    );
    assert!(ui.has_warning("could not run pip"));
}

#[test]
fn missing_extra_alone_never_runs_pip() {
    let config = quick_config();
    let toolchain = FixedToolchain {
        missing: vec!["kaleido".to_string()],
        install_outcome: InstallOutcome::Failed { exit_code: Some(1) },
        log: RefCell::new(Vec::new()),
    };

    let bootstrapper =
        Bootstrapper::new(&config, Path::new("."), toolchain, BootstrapOptions::default());
    let report = bootstrapper.run(&mut MockUI::new()).unwrap();

    assert!(!report.installed());
    assert!(report.extras_installed.is_empty());
    assert_eq!(
        bootstrapper.toolchain().log.borrow().as_slice(),
        ["probe", "launch"]
    );
}
