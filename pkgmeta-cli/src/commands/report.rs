//! `pkgmeta-report` command handler

use std::path::Path;

use tracing::info;

use pkgmeta_core::config::PkgMetaConfig;
use pkgmeta_inventory::{
    BitbakeProvider, LicenseSource, PackageInventory, PackageInventoryConfig, PackageReport,
    parse_layer_list,
};

use crate::cli::ReportCli;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the package report.
///
/// Checks run in order: license directory, then `bitbake-layers` on `$PATH`.
pub fn execute(
    args: &ReportCli,
    config: &PkgMetaConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let license_dir = args
        .license_directory
        .as_deref()
        .ok_or_else(|| CliError::Usage("must specify license directory".to_owned()))?;
    ensure_license_dir(license_dir)?;

    let inventory_config = PackageInventoryConfig::from_core(config);
    let provider = BitbakeProvider::new(&inventory_config);
    provider.ensure_layers_tool()?;

    let inventory = PackageInventory::new(inventory_config, provider)?;
    let report = build_report(&inventory, args, license_dir)?;

    info!(
        packages = report.packages.len(),
        scope = ?report.scope,
        "package report ready"
    );
    writer.render(&report)?;
    Ok(())
}

/// Run the inventory pipeline for the given arguments.
pub fn build_report<P: pkgmeta_inventory::MetadataProvider>(
    inventory: &PackageInventory<P>,
    args: &ReportCli,
    license_dir: &Path,
) -> Result<PackageReport, CliError> {
    let source = if args.rootfs {
        LicenseSource::Manifest
    } else {
        LicenseSource::RecipeInfo
    };
    // An empty list means no filter.
    let layers = args
        .layers
        .as_deref()
        .map(parse_layer_list)
        .filter(|layers| !layers.is_empty());

    Ok(inventory.report(license_dir, source, layers.as_deref(), args.all)?)
}

fn ensure_license_dir(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::LicenseDirNotFound(path.to_path_buf()))
    }
}
