//! `pkgmeta-debcheck` command handler

use colored::Colorize;
use tracing::info;

use pkgmeta_core::config::PkgMetaConfig;
use pkgmeta_inventory::{BitbakeProvider, PackageInventory, PackageInventoryConfig};

use crate::cli::DebcheckCli;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the debian origin check.
///
/// Returns [`CliError::Findings`] when at least one package lacks a source descriptor.
pub fn execute(
    args: &DebcheckCli,
    config: &PkgMetaConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let inventory_config = PackageInventoryConfig::from_core(config);
    let provider = BitbakeProvider::new(&inventory_config);
    provider.ensure_layers_tool()?;
    provider.ensure_env_tool()?;

    let inventory = PackageInventory::new(inventory_config, provider)?;
    let report = inventory.check_debian_origin(args.rootfs.as_deref())?;

    info!(findings = report.packages.len(), "debian origin check finished");
    writer.render(&report)?;

    if report.is_empty() {
        return Ok(());
    }

    eprintln!(
        "{} {} package(s) have no debian source descriptor",
        "warning:".yellow().bold(),
        report.packages.len().to_string().red()
    );
    Err(CliError::Findings(report.packages.len()))
}
