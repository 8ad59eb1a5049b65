//! Shared plumbing for the `pkgmeta-report` and `pkgmeta-debcheck` binaries.
//!
//! - [`cli`]: clap argument definitions
//! - [`commands`]: one handler per binary
//! - [`error`]: `CliError` and exit code mapping
//! - [`logging`]: `tracing-subscriber` setup (stderr)
//! - [`output`]: text / JSON rendering

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

use clap::{CommandFactory, Parser};

use pkgmeta_core::config::PkgMetaConfig;

use crate::cli::CommonArgs;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Parse arguments, exiting with status 1 on usage errors.
///
/// `--help` still exits 0.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Print `<name> <version>` for the given command.
pub fn print_version<T: CommandFactory>() {
    print!("{}", T::command().render_version());
}

/// Load the effective configuration.
///
/// An explicit `--config` path must exist. Otherwise `PKGMETA_CONFIG` or `./pkgmeta.toml`
/// is used when present, falling back to defaults. `--log-level` overrides the file.
pub fn load_config(common: &CommonArgs) -> Result<PkgMetaConfig, CliError> {
    let mut config = match &common.config {
        Some(path) => PkgMetaConfig::load(path)?,
        None => PkgMetaConfig::discover()?,
    };
    if let Some(level) = &common.log_level {
        config.general.log_level = level.clone();
        config.validate()?;
    }
    Ok(config)
}

/// Load configuration, install the tracing subscriber and build the output writer.
pub fn bootstrap(common: &CommonArgs) -> Result<(PkgMetaConfig, OutputWriter), CliError> {
    let config = load_config(common)?;
    logging::init_tracing(&config.general).map_err(|e| CliError::Logging(e.to_string()))?;
    Ok((config, OutputWriter::new(common.output)))
}

/// Print the error (if any) to stderr and terminate with its exit code.
///
/// Exit code -1 becomes process status 255.
pub fn exit_with(result: Result<(), CliError>) -> ! {
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            // findings already summarised by the handler
            if !matches!(e, CliError::Findings(_)) {
                eprintln!("{e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
