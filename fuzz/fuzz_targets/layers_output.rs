#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgmeta_inventory::parser::layers::parse_layers;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        if let Ok(layers) = parse_layers(output, "fuzz show-layers") {
            for (name, layer) in &layers {
                assert_eq!(name, &layer.name);
            }
        }
    }
});
