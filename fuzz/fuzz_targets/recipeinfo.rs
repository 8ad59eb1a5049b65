#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgmeta_inventory::parser::recipeinfo::parse_recipeinfo;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = parse_recipeinfo(content, "fuzz-pkg", "fuzz/recipeinfo");
    }
});
