#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pkgmeta_inventory::{Layer, LayerTable, Recipe, TieBreak, select_layer};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 레이어 우선순위 (최대 8개로 제한)
    priorities: Vec<i64>,
    /// 바인딩 순서 (레이어 인덱스)
    bindings: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let priorities: Vec<i64> = input.priorities.into_iter().take(8).collect();
    if priorities.is_empty() {
        return;
    }

    let layers: LayerTable = priorities
        .iter()
        .enumerate()
        .map(|(i, priority)| {
            let name = format!("layer-{i}");
            let layer = Layer {
                name: name.clone(),
                path: format!("/layers/{i}"),
                priority: *priority,
            };
            (name, layer)
        })
        .collect();

    let mut recipe = Recipe::new("fuzz");
    for index in input.bindings.iter().take(16) {
        let i = usize::from(*index) % priorities.len();
        recipe.bind(format!("layer-{i}"), "1.0");
    }

    let max = select_layer(&recipe, &layers, TieBreak::HighestPriority);
    let lagged = select_layer(&recipe, &layers, TieBreak::Lagged);

    if recipe.bindings.is_empty() {
        assert!(max.is_err() && lagged.is_err());
        return;
    }

    let max = max.expect("every bound layer exists");
    let lagged = lagged.expect("every bound layer exists");
    let best = recipe
        .bindings
        .keys()
        .map(|name| layers[name].priority)
        .max()
        .expect("bindings not empty");

    // 최대 모드는 항상 최댓값, 지연 비교 모드는 바인딩된 레이어 중 하나
    assert_eq!(max.priority, best);
    assert!(recipe.bindings.contains_key(&lagged.name));
});
