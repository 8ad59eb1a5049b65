#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgmeta_inventory::parser::environment::parse_environment;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        let _ = parse_environment(output, "TMPDIR", "BASE_WORKDIR");
    }
});
