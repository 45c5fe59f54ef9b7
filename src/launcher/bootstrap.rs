//! The bootstrap sequence: probe, remediate, launch.
//!
//! The sequence is strictly linear with one branch. The install step runs
//! at most once and its failure never stops the launch; the dashboard's
//! own error output is the only report of a broken environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{LauncherConfig, CSV_COLUMNS};
use crate::error::Result;
use crate::launcher::plan::LaunchPlan;
use crate::launcher::toolchain::Toolchain;
use crate::requirements::{
    describe_packages, install_command, InstallMode, InstallOutcome, PackageSpec, ProbeReport,
};
use crate::ui::UserInterface;

/// Command-line adjustments to the sequence.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Probe only; never install.
    pub skip_install: bool,
    /// Install even when the probe passes.
    pub force_install: bool,
    /// Start the dashboard without the pre-launch pause.
    pub no_pause: bool,
    /// Replace the configured pre-launch pause.
    pub pause: Option<Duration>,
    /// Print what would run without running anything.
    pub dry_run: bool,
    /// Arguments appended to the dashboard command.
    pub app_args: Vec<String>,
}

/// What happened during one run of the sequence.
#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    /// Result of the dependency probe (None in dry-run mode).
    pub probe: Option<ProbeReport>,
    /// Result of the install step, if it ran.
    pub install: Option<InstallOutcome>,
    /// Optional modules that were installed silently.
    pub extras_installed: Vec<String>,
    /// Whether the dashboard was started.
    pub launched: bool,
    /// Dashboard exit code (None if not launched or killed by a signal).
    pub exit_code: Option<i32>,
}

impl BootstrapReport {
    /// Whether the install command was executed.
    pub fn installed(&self) -> bool {
        self.install.is_some()
    }
}

/// Runs the probe, install and launch steps against a [`Toolchain`].
pub struct Bootstrapper<'a, T: Toolchain> {
    config: &'a LauncherConfig,
    project_root: PathBuf,
    toolchain: T,
    options: BootstrapOptions,
}

impl<'a, T: Toolchain> Bootstrapper<'a, T> {
    /// Create a bootstrapper for a project.
    pub fn new(
        config: &'a LauncherConfig,
        project_root: &Path,
        toolchain: T,
        options: BootstrapOptions,
    ) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
            toolchain,
            options,
        }
    }

    /// Access the toolchain (tests inspect recorded calls through this).
    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// The launch plan this bootstrapper will execute.
    pub fn plan(&self) -> LaunchPlan {
        let plan =
            LaunchPlan::from_config(self.config, &self.project_root, &self.options.app_args);
        match (self.options.no_pause, self.options.pause) {
            (true, _) => plan.without_pause(),
            (false, Some(pause)) => LaunchPlan { pause, ..plan },
            (false, None) => plan,
        }
    }

    /// Run the full sequence, blocking until the dashboard exits.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<BootstrapReport> {
        let packages = PackageSpec::parse_all(&self.config.requirements.packages)?;
        let plan = self.plan();

        ui.show_header(&self.config.app_name);

        if self.options.dry_run {
            self.show_dry_run(ui, &packages, &plan);
            return Ok(BootstrapReport::default());
        }

        let mut report = BootstrapReport::default();

        let probe = self.probe_required(ui);
        let needs_install = self.options.force_install || !probe.all_present();
        report.probe = Some(probe);

        if needs_install {
            if self.options.skip_install {
                ui.warning("Skipping package installation (--skip-install)");
            } else {
                report.install = Some(self.install_required(ui, &packages));
                report.extras_installed = self.install_extras(&packages);
            }
        }

        report.exit_code = self.launch(ui, &plan)?;
        report.launched = true;
        Ok(report)
    }

    fn probe_required(&self, ui: &mut dyn UserInterface) -> ProbeReport {
        let modules = &self.config.requirements.modules;
        let mut spinner = ui.start_spinner(&format!(
            "Checking {} Python modules with {}",
            modules.len(),
            self.config.python
        ));

        let report = self.toolchain.probe(modules);
        tracing::debug!("Probe result: {:?}", report);

        if report.all_present() {
            spinner.finish_success(&format!("All {} modules available", modules.len()));
        } else if let Some(error) = &report.probe_error {
            spinner.finish_error(&format!("Could not check modules: {}", error));
        } else {
            spinner.finish_error(&format!("Missing modules: {}", report.missing.join(", ")));
        }
        report
    }

    fn install_required(
        &self,
        ui: &mut dyn UserInterface,
        packages: &[PackageSpec],
    ) -> InstallOutcome {
        ui.message(&format!("Installing packages: {}", describe_packages(packages)));

        let outcome = self.toolchain.install(packages, InstallMode::Visible);
        match &outcome {
            InstallOutcome::Installed { duration } => {
                ui.success(&format!("Packages installed in {:.1}s", duration.as_secs_f64()));
            }
            failed => {
                tracing::warn!("Package installation failed: {:?}", failed);
                ui.warning(&format!(
                    "Package installation failed ({}); starting the dashboard anyway",
                    failed.describe()
                ));
            }
        }
        outcome
    }

    /// Silently install optional modules still missing after the required
    /// install. Failures are only logged.
    ///
    /// An extra whose package also appears in `packages` is installed with
    /// that entry's version constraint.
    fn install_extras(&self, packages: &[PackageSpec]) -> Vec<String> {
        let mut installed = Vec::new();

        for extra in &self.config.requirements.extras {
            let module = std::slice::from_ref(&extra.module);
            if self.toolchain.probe(module).all_present() {
                continue;
            }

            let package = match PackageSpec::parse(&extra.package) {
                Ok(p) => pinned_spec(packages, p),
                Err(e) => {
                    tracing::debug!("Skipping extra '{}': {}", extra.module, e);
                    continue;
                }
            };

            let outcome = self
                .toolchain
                .install(std::slice::from_ref(&package), InstallMode::Silent);
            if outcome.is_success() {
                tracing::debug!("Installed optional module '{}'", extra.module);
                installed.push(extra.module.clone());
            } else {
                tracing::debug!(
                    "Optional module '{}' not installed: {}",
                    extra.module,
                    outcome.describe()
                );
            }
        }

        installed
    }

    fn launch(&self, ui: &mut dyn UserInterface, plan: &LaunchPlan) -> Result<Option<i32>> {
        if !plan.entry_exists() {
            ui.warning(&format!(
                "Dashboard file not found: {}",
                plan.entry_path().display()
            ));
        }

        ui.message(&format!("Starting {}...", self.config.app_name));
        ui.show_hint(&format!("Command: {}", plan.display_command()));
        ui.show_hint(&format!(
            "Upload a CSV with columns: {}",
            CSV_COLUMNS.join(", ")
        ));
        ui.show_hint("Press Ctrl+C to stop the dashboard");

        if !plan.pause.is_zero() {
            std::thread::sleep(plan.pause);
        }

        let code = self.toolchain.launch(plan)?;
        tracing::debug!("Dashboard exited with {:?}", code);
        Ok(code)
    }

    fn show_dry_run(&self, ui: &mut dyn UserInterface, packages: &[PackageSpec], plan: &LaunchPlan) {
        ui.message("Running in dry-run mode; no commands will be executed.");
        ui.message("");
        ui.message(&format!(
            "1. Probe:   {} -c <import check> {}",
            self.config.python,
            self.config.requirements.modules.join(" ")
        ));

        let install = install_command(&self.config.python, packages, InstallMode::Visible);
        let when = if self.options.skip_install {
            "skipped (--skip-install)"
        } else if self.options.force_install {
            "always (--force-install)"
        } else {
            "only if a module is missing"
        };
        ui.message(&format!("2. Install: {} [{}]", install, when));
        ui.message(&format!(
            "3. Launch:  {} (after {}s)",
            plan.display_command(),
            plan.pause.as_secs()
        ));
    }
}

/// The entry of `packages` naming the same distribution as `extra`, if any.
fn pinned_spec(packages: &[PackageSpec], extra: PackageSpec) -> PackageSpec {
    packages
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(&extra.name))
        .cloned()
        .unwrap_or(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LauncherError;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Probe(Vec<String>),
        Install(Vec<String>, InstallMode),
        Launch(String),
    }

    /// Toolchain that records calls and answers from fixed state.
    struct RecordingToolchain {
        present: RefCell<HashSet<String>>,
        install_succeeds: bool,
        install_makes_present: bool,
        launch_result: std::result::Result<Option<i32>, String>,
        calls: RefCell<Vec<Call>>,
    }

    impl RecordingToolchain {
        fn with_present(modules: &[&str]) -> Self {
            Self {
                present: RefCell::new(modules.iter().map(|s| s.to_string()).collect()),
                install_succeeds: true,
                install_makes_present: true,
                launch_result: Ok(Some(0)),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn installs(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| matches!(c, Call::Install(..)))
                .collect()
        }
    }

    impl Toolchain for RecordingToolchain {
        fn probe(&self, modules: &[String]) -> ProbeReport {
            self.calls.borrow_mut().push(Call::Probe(modules.to_vec()));
            let present = self.present.borrow();
            let missing = modules
                .iter()
                .filter(|m| !present.contains(*m))
                .cloned()
                .collect();
            ProbeReport::new(modules, missing)
        }

        fn install(&self, packages: &[PackageSpec], mode: InstallMode) -> InstallOutcome {
            let names: Vec<String> = packages.iter().map(|p| p.to_string()).collect();
            self.calls
                .borrow_mut()
                .push(Call::Install(names.clone(), mode));
            if !self.install_succeeds {
                return InstallOutcome::Failed { exit_code: Some(1) };
            }
            if self.install_makes_present {
                let mut present = self.present.borrow_mut();
                present.extend(ALL.iter().map(|m| m.to_string()));
            }
            InstallOutcome::Installed {
                duration: Duration::from_millis(10),
            }
        }

        fn launch(&self, plan: &LaunchPlan) -> Result<Option<i32>> {
            self.calls
                .borrow_mut()
                .push(Call::Launch(plan.display_command()));
            self.launch_result
                .clone()
                .map_err(|message| LauncherError::LaunchFailed {
                    command: plan.display_command(),
                    message,
                })
        }
    }

    const ALL: &[&str] = &["streamlit", "pandas", "plotly", "fpdf", "PIL", "kaleido"];

    fn config() -> LauncherConfig {
        let mut config = LauncherConfig::default();
        config.launch.pause_secs = 0;
        config
    }

    fn run_with(
        toolchain: RecordingToolchain,
        options: BootstrapOptions,
    ) -> (BootstrapReport, Vec<Call>, MockUI) {
        let config = config();
        let temp = tempfile::TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(&config, temp.path(), toolchain, options);
        let mut ui = MockUI::new();
        let report = bootstrapper.run(&mut ui).unwrap();
        (report, bootstrapper.toolchain().calls(), ui)
    }

    #[test]
    fn all_present_skips_install() {
        let (report, calls, ui) =
            run_with(RecordingToolchain::with_present(ALL), BootstrapOptions::default());

        assert!(!report.installed());
        assert!(!calls.iter().any(|c| matches!(c, Call::Install(..))));
        assert!(report.launched);
        assert_eq!(report.exit_code, Some(0));
        assert!(ui.has_success("All 5 modules available"));
    }

    #[test]
    fn missing_module_installs_once_before_launch() {
        let toolchain = RecordingToolchain::with_present(&["streamlit", "pandas", "kaleido"]);
        let (report, calls, ui) = run_with(toolchain, BootstrapOptions::default());

        let install_positions: Vec<usize> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Call::Install(_, InstallMode::Visible)))
            .map(|(i, _)| i)
            .collect();
        let launch_position = calls
            .iter()
            .position(|c| matches!(c, Call::Launch(_)))
            .unwrap();

        assert_eq!(install_positions.len(), 1);
        assert!(install_positions[0] < launch_position);
        assert_eq!(
            calls[install_positions[0]],
            Call::Install(
                vec![
                    "streamlit".to_string(),
                    "pandas".to_string(),
                    "plotly".to_string(),
                    "fpdf2".to_string(),
                    "pillow".to_string(),
                    "kaleido==0.2.1".to_string(),
                ],
                InstallMode::Visible
            )
        );
        assert!(report.install.unwrap().is_success());
        assert!(ui.has_error("Missing modules: plotly, fpdf, PIL"));
    }

    #[test]
    fn failed_install_still_launches() {
        let mut toolchain = RecordingToolchain::with_present(&[]);
        toolchain.install_succeeds = false;
        let (report, calls, ui) = run_with(toolchain, BootstrapOptions::default());

        assert!(matches!(
            report.install,
            Some(InstallOutcome::Failed { exit_code: Some(1) })
        ));
        assert!(matches!(calls.last(), Some(Call::Launch(_))));
        assert!(report.launched);
        assert!(ui.has_warning("starting the dashboard anyway"));
    }

    #[test]
    fn launch_is_last_call() {
        let (_, calls, _) =
            run_with(RecordingToolchain::with_present(&["pandas"]), BootstrapOptions::default());
        assert!(matches!(calls.last(), Some(Call::Launch(cmd)) if cmd.ends_with("run dashboard.py")));
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::Launch(_))).count(),
            1
        );
    }

    #[test]
    fn skip_install_never_installs() {
        let options = BootstrapOptions {
            skip_install: true,
            ..Default::default()
        };
        let (report, calls, ui) = run_with(RecordingToolchain::with_present(&[]), options);

        assert!(!report.installed());
        assert!(calls.iter().all(|c| !matches!(c, Call::Install(..))));
        assert!(report.launched);
        assert!(ui.has_warning("--skip-install"));
    }

    #[test]
    fn force_install_runs_even_when_present() {
        let options = BootstrapOptions {
            force_install: true,
            ..Default::default()
        };
        let toolchain = RecordingToolchain::with_present(ALL);
        let (report, _, _) = run_with(toolchain, options);

        assert!(report.installed());
    }

    #[test]
    fn force_install_runs_exactly_once() {
        let options = BootstrapOptions {
            force_install: true,
            ..Default::default()
        };
        let config = config();
        let temp = tempfile::TempDir::new().unwrap();
        let bootstrapper =
            Bootstrapper::new(&config, temp.path(), RecordingToolchain::with_present(ALL), options);
        bootstrapper.run(&mut MockUI::new()).unwrap();

        assert_eq!(bootstrapper.toolchain().installs().len(), 1);
    }

    #[test]
    fn missing_extra_alone_installs_nothing() {
        let toolchain =
            RecordingToolchain::with_present(&["streamlit", "pandas", "plotly", "fpdf", "PIL"]);
        let (report, calls, _) = run_with(toolchain, BootstrapOptions::default());

        assert!(!report.installed());
        assert!(report.extras_installed.is_empty());
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::Probe(_))).count(),
            1
        );
        assert!(calls.iter().all(|c| !matches!(c, Call::Install(..))));
    }

    #[test]
    fn extra_still_missing_after_install_gets_pinned_spec() {
        let mut toolchain = RecordingToolchain::with_present(&["streamlit", "pandas"]);
        toolchain.install_makes_present = false;
        let (report, calls, ui) = run_with(toolchain, BootstrapOptions::default());

        assert!(report.installed());
        assert_eq!(report.extras_installed, vec!["kaleido".to_string()]);
        assert!(calls.contains(&Call::Install(
            vec!["kaleido==0.2.1".to_string()],
            InstallMode::Silent
        )));
        assert!(ui.warnings().iter().all(|w| !w.contains("kaleido")));
    }

    #[test]
    fn failed_extra_is_not_reported_to_user() {
        let mut toolchain = RecordingToolchain::with_present(&["streamlit"]);
        toolchain.install_succeeds = false;
        let (report, calls, ui) = run_with(toolchain, BootstrapOptions::default());

        assert!(report.extras_installed.is_empty());
        assert!(calls.contains(&Call::Install(
            vec!["kaleido==0.2.1".to_string()],
            InstallMode::Silent
        )));
        assert!(ui.warnings().iter().all(|w| !w.contains("kaleido")));
        assert!(report.launched);
    }

    #[test]
    fn skip_install_leaves_extras_alone() {
        let options = BootstrapOptions {
            skip_install: true,
            ..Default::default()
        };
        let (_, calls, _) = run_with(RecordingToolchain::with_present(&["pandas"]), options);
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::Probe(_))).count(),
            1
        );
    }

    #[test]
    fn pinned_spec_prefers_required_entry() {
        let packages = PackageSpec::parse_all(&[
            "pandas".to_string(),
            "Kaleido==0.2.1".to_string(),
        ])
        .unwrap();
        let spec = pinned_spec(&packages, PackageSpec::parse("kaleido").unwrap());
        assert_eq!(spec.to_string(), "Kaleido==0.2.1");

        let spec = pinned_spec(&packages, PackageSpec::parse("orjson>=3").unwrap());
        assert_eq!(spec.to_string(), "orjson>=3");
    }

    #[test]
    fn dry_run_calls_nothing() {
        let options = BootstrapOptions {
            dry_run: true,
            ..Default::default()
        };
        let (report, calls, ui) = run_with(RecordingToolchain::with_present(&[]), options);

        assert!(calls.is_empty());
        assert!(!report.launched);
        assert!(ui.has_message("dry-run mode"));
        assert!(ui.has_message("pip install"));
        assert!(ui.has_message("streamlit run dashboard.py"));
    }

    #[test]
    fn banner_lists_csv_columns() {
        let (_, _, ui) =
            run_with(RecordingToolchain::with_present(ALL), BootstrapOptions::default());
        assert!(ui.has_hint("Data, Categoria, Subcategoria, Tipo, Cliente, Valor"));
        assert!(ui.has_warning("Dashboard file not found"));
    }

    #[test]
    fn exit_code_is_propagated() {
        let mut toolchain = RecordingToolchain::with_present(ALL);
        toolchain.launch_result = Ok(Some(3));
        let (report, _, _) = run_with(toolchain, BootstrapOptions::default());
        assert_eq!(report.exit_code, Some(3));
    }

    #[test]
    fn launch_failure_is_an_error() {
        let mut toolchain = RecordingToolchain::with_present(ALL);
        toolchain.launch_result = Err("No such file or directory".to_string());

        let config = config();
        let temp = tempfile::TempDir::new().unwrap();
        let bootstrapper =
            Bootstrapper::new(&config, temp.path(), toolchain, BootstrapOptions::default());
        let err = bootstrapper.run(&mut MockUI::new()).unwrap_err();
        assert!(matches!(err, LauncherError::LaunchFailed { .. }));
    }

    #[test]
    fn pause_override_replaces_configured_pause() {
        let config = LauncherConfig::default();
        let options = BootstrapOptions {
            pause: Some(Duration::from_secs(1)),
            ..Default::default()
        };
        let bootstrapper = Bootstrapper::new(
            &config,
            Path::new("."),
            RecordingToolchain::with_present(ALL),
            options.clone(),
        );
        assert_eq!(bootstrapper.plan().pause, Duration::from_secs(1));

        let no_pause = BootstrapOptions {
            no_pause: true,
            ..options
        };
        let bootstrapper = Bootstrapper::new(
            &config,
            Path::new("."),
            RecordingToolchain::with_present(ALL),
            no_pause,
        );
        assert_eq!(bootstrapper.plan().pause, Duration::ZERO);
    }

    #[test]
    fn app_args_reach_the_launch_command() {
        let options = BootstrapOptions {
            app_args: vec!["--server.port".to_string(), "8600".to_string()],
            ..Default::default()
        };
        let (_, calls, _) = run_with(RecordingToolchain::with_present(ALL), options);
        assert!(matches!(
            calls.last(),
            Some(Call::Launch(cmd)) if cmd.ends_with("dashboard.py --server.port 8600")
        ));
    }
}
