//! Package layer/license report for BitBake builds.

use pkgmeta_cli::cli::ReportCli;
use pkgmeta_cli::{bootstrap, commands, exit_with, parse_args, print_version};

fn main() {
    let args: ReportCli = parse_args();

    if args.version {
        print_version::<ReportCli>();
        return;
    }

    let result = bootstrap(&args.common)
        .and_then(|(config, writer)| commands::report::execute(&args, &config, &writer));
    exit_with(result);
}
