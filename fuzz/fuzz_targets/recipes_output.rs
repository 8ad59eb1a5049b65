#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgmeta_inventory::parser::recipes::parse_recipes;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        if let Ok(recipes) = parse_recipes(output, "fuzz show-recipes") {
            for (name, recipe) in &recipes {
                assert!(!name.is_empty());
                assert_eq!(name, &recipe.name);
            }
        }
    }
});
