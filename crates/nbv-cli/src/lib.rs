//! NBV command line
//!
//! Argument definitions and the glue between parsed arguments and the
//! procedures in [`nbv_core`]. The `nbv` binary is a thin wrapper that
//! installs logging, calls into here, and turns the outcome into an exit
//! code.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use nbv_core::{
    bump_version, rebuild_history, BumpReport, Project, ProjectConfig, RebuildReport,
    VersionError,
};
use nbv_snapshot::{LocalFilesystem, SnapshotMode};

/// Message printed when a bump fails part-way
pub const BUMP_FAILURE: &str = "Error during version bump. Unclean git state may have been created.";

/// Argument parser for the `nbv` binary
#[must_use]
pub fn command() -> Command {
    Command::new("nbv")
        .version(nbv_core::VERSION)
        .about("Stamp versioned snapshots of a notebook site")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .global(true)
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Project root containing the site configuration"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (defaults to nbv.toml in the project root)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the report as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log subprocess invocations and other debug detail"),
        )
        .subcommand(
            Command::new("rebuild")
                .about("Snapshot every git tag and rebuild the version menu")
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Report copies and menu changes without writing"),
                ),
        )
        .subcommand(
            Command::new("bump")
                .about("Archive the latest version and announce the next one"),
        )
}

/// Options shared by every subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Project root
    pub project_dir: PathBuf,
    /// Explicit settings file
    pub config: Option<PathBuf>,
    /// Print reports as JSON
    pub json: bool,
    /// Debug logging
    pub verbose: bool,
}

impl GlobalOptions {
    /// Extract from parsed arguments (top level or any subcommand)
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            project_dir: matches
                .get_one::<PathBuf>("project-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            config: matches.get_one::<PathBuf>("config").cloned(),
            json: matches.get_flag("json"),
            verbose: matches.get_flag("verbose"),
        }
    }

    /// Open the project these options point at
    ///
    /// # Errors
    /// Returns [`VersionError::Config`] if a settings file cannot be read or
    /// parsed.
    pub fn open_project(&self) -> Result<Project, VersionError> {
        match &self.config {
            Some(path) => {
                let config = ProjectConfig::load(path)?;
                Ok(Project::new(&self.project_dir, config))
            }
            None => Ok(Project::open(&self.project_dir)?),
        }
    }

    /// Default log filter directive
    #[inline]
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Run `nbv rebuild`
///
/// # Errors
/// Any [`VersionError`] from opening the project or rebuilding, with context.
pub fn run_rebuild(options: &GlobalOptions, dry_run: bool) -> anyhow::Result<RebuildReport> {
    let project = options.open_project().context("failed to open project")?;
    let git = project.git();
    let snapshotter = project.snapshotter(LocalFilesystem);
    rebuild_history(&project, &git, &snapshotter, SnapshotMode::from_dry_run(dry_run))
        .with_context(|| format!("failed to rebuild history in {}", project.root().display()))
}

/// Run `nbv bump`
///
/// # Errors
/// Any [`VersionError`]; the menu may already be rewritten when the
/// snapshot step fails.
pub fn run_bump(options: &GlobalOptions) -> Result<BumpReport, VersionError> {
    let project = options.open_project()?;
    let snapshotter = project.snapshotter(LocalFilesystem);
    bump_version(&project, &snapshotter)
}

/// Human-readable rebuild summary
#[must_use]
pub fn render_rebuild(report: &RebuildReport) -> String {
    let mut out = String::new();
    if report.dry_run {
        out.push_str("Dry run: no files were written\n");
    }
    out.push_str(&format!(
        "Processed {} tags, restored '{}'\n",
        report.tags.len(),
        report.restored
    ));
    out.push_str("Version menu:\n");
    for item in &report.menu {
        out.push_str(&format!(
            "  - {} -> {}\n",
            item.label(),
            item.href.as_deref().unwrap_or("")
        ));
    }
    out
}

/// Human-readable bump summary
#[must_use]
pub fn render_bump(report: &BumpReport) -> String {
    format!(
        "Updated YAML: {} -> {}\nCopied files for {}\nVersion bump completed successfully!\n",
        report.previous, report.next, report.previous
    )
}

/// Bump failure line
#[must_use]
pub fn render_bump_failure(error: &VersionError) -> String {
    format!("{BUMP_FAILURE} Error: {error}")
}

/// Serialize a report as pretty JSON
///
/// # Errors
/// Returns an error if the report cannot be serialized.
pub fn to_json<T: serde::Serialize>(report: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}
