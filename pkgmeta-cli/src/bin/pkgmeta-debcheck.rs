//! Debian source origin check for BitBake builds.

use pkgmeta_cli::cli::DebcheckCli;
use pkgmeta_cli::{bootstrap, commands, exit_with, parse_args, print_version};

fn main() {
    let args: DebcheckCli = parse_args();

    if args.version {
        print_version::<DebcheckCli>();
        return;
    }

    let result = bootstrap(&args.common)
        .and_then(|(config, writer)| commands::debcheck::execute(&args, &config, &writer));
    exit_with(result);
}
