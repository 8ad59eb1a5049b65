//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface of both binaries.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

/// Show layer, recipe, version and license of every package built by BitBake.
#[derive(Parser, Debug)]
#[command(
    name = "pkgmeta-report",
    version,
    long_about = None,
    disable_version_flag = true
)]
pub struct ReportCli {
    /// Comma separated layer names to show.
    #[arg(short = 'l', long = "layers", value_name = "LAYERS")]
    pub layers: Option<String>,

    /// Show program version.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Show all package info, ignoring --layers.
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Read the image license.manifest instead of per-package recipeinfo files.
    #[arg(short = 'r', long = "rootfs")]
    pub rootfs: bool,

    /// License directory (image license dir with -r, deploy/licenses otherwise).
    #[arg(value_name = "LICENSE_DIRECTORY")]
    pub license_directory: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Report licensed packages that were not built from a debian source package.
#[derive(Parser, Debug)]
#[command(
    name = "pkgmeta-debcheck",
    version,
    long_about = None,
    disable_version_flag = true
)]
pub struct DebcheckCli {
    /// Rootfs image directory whose license.manifest limits the checked packages.
    #[arg(short = 'r', long = "rootfs", value_name = "ROOTFS_IMAGE_DIR")]
    pub rootfs: Option<PathBuf>,

    /// Show program version.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by both binaries.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to a pkgmeta.toml configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_report_cli_defaults() {
        let cli = ReportCli::try_parse_from(["pkgmeta-report", "/deploy/licenses"])
            .expect("parse succeeded");
        assert_eq!(
            cli.license_directory,
            Some(PathBuf::from("/deploy/licenses"))
        );
        assert!(cli.layers.is_none());
        assert!(!cli.version);
        assert!(!cli.all);
        assert!(!cli.rootfs);
        assert_eq!(cli.common.output, OutputFormat::Text);
        assert!(cli.common.config.is_none());
    }

    #[test]
    fn test_report_cli_all_flags() {
        let cli = ReportCli::try_parse_from([
            "pkgmeta-report",
            "-l",
            "meta,meta-custom",
            "-a",
            "-r",
            "--output",
            "json",
            "--log-level",
            "debug",
            "/images/core-image",
        ])
        .expect("parse succeeded");
        assert_eq!(cli.layers.as_deref(), Some("meta,meta-custom"));
        assert!(cli.all);
        assert!(cli.rootfs);
        assert_eq!(cli.common.output, OutputFormat::Json);
        assert_eq!(cli.common.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_report_cli_version_without_directory() {
        let cli = ReportCli::try_parse_from(["pkgmeta-report", "-v"]).expect("parse succeeded");
        assert!(cli.version);
        assert!(cli.license_directory.is_none());
    }

    #[test]
    fn test_report_cli_rejects_unknown_output() {
        let result = ReportCli::try_parse_from(["pkgmeta-report", "--output", "xml", "/dir"]);
        assert!(result.is_err(), "unknown output format should fail");
    }

    #[test]
    fn test_debcheck_cli_rootfs() {
        let cli = DebcheckCli::try_parse_from(["pkgmeta-debcheck", "-r", "/images/core-image"])
            .expect("parse succeeded");
        assert_eq!(cli.rootfs, Some(PathBuf::from("/images/core-image")));
    }

    #[test]
    fn test_debcheck_cli_no_args() {
        let cli = DebcheckCli::try_parse_from(["pkgmeta-debcheck"]).expect("parse succeeded");
        assert!(cli.rootfs.is_none());
        assert!(!cli.version);
    }

    #[test]
    fn test_cli_debug_assert() {
        ReportCli::command().debug_assert();
        DebcheckCli::command().debug_assert();
    }

    #[test]
    fn test_render_version_has_name() {
        let version = ReportCli::command().render_version();
        assert!(version.starts_with("pkgmeta-report "));
    }
}
