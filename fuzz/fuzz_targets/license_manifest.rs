#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgmeta_inventory::parser::manifest::{parse_manifest, parse_package_list};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(records) = parse_manifest(content, "fuzz/license.manifest") {
            for (name, record) in &records {
                assert_eq!(name, &record.package_name);
            }
        }
        let _ = parse_package_list(content, "PACKAGE NAME:");
    }
});
