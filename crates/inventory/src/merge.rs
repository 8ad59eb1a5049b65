//! 메타데이터 병합 -- 레이어 테이블, 레시피 테이블, 라이선스 레코드를 패키지 레코드로
//!
//! 각 라이선스 레코드의 레시피를 찾고, 레시피가 바인딩된 레이어 중 하나를
//! [`TieBreak`] 규칙으로 선택하여 [`PackageRecord`]를 만듭니다.
//!
//! # 레이어 선택 규칙
//!
//! ```text
//! bindings: A(1) -> B(5) -> C(3)
//!
//! HighestPriority: 최댓값 추적          -> B
//! Lagged:          직전 바인딩과만 비교 -> B
//!
//! bindings: A(5) -> B(1) -> C(3)
//!
//! HighestPriority:                      -> A
//! Lagged:          C(3) > B(1) 이므로   -> C
//! ```

use tracing::debug;

use crate::error::InventoryError;
use crate::types::{Layer, LayerTable, LicenseRecordSet, PackageRecord, Recipe, RecipeTable, TieBreak};

/// 레시피가 바인딩된 레이어 중 하나를 선택합니다.
///
/// 바인딩된 모든 레이어는 레이어 테이블에 있어야 합니다.
///
/// # Errors
///
/// - 레이어 테이블에 없는 레이어: [`InventoryError::LayerNotFound`]
/// - 바인딩이 없는 레시피: [`InventoryError::NoLayerBinding`]
pub fn select_layer<'a>(
    recipe: &Recipe,
    layers: &'a LayerTable,
    tie_break: TieBreak,
) -> Result<&'a Layer, InventoryError> {
    let mut selected: Option<&Layer> = None;
    let mut previous: Option<&Layer> = None;

    for layer_name in recipe.bindings.keys() {
        let layer = layers
            .get(layer_name)
            .ok_or_else(|| InventoryError::LayerNotFound {
                recipe: recipe.name.clone(),
                layer: layer_name.clone(),
            })?;

        let baseline = match tie_break {
            TieBreak::HighestPriority => selected,
            TieBreak::Lagged => previous,
        };
        match baseline {
            None if selected.is_none() => selected = Some(layer),
            Some(base) if layer.priority > base.priority => selected = Some(layer),
            _ => {}
        }
        previous = Some(layer);
    }

    selected.ok_or_else(|| InventoryError::NoLayerBinding {
        recipe: recipe.name.clone(),
    })
}

/// 라이선스 레코드마다 패키지 레코드 하나를 만듭니다.
///
/// 출력 순서는 `records`의 삽입 순서와 같습니다. 레시피 이름이 없는 레코드는
/// 패키지 이름을 레시피 이름으로 사용합니다.
///
/// # Errors
///
/// - 레시피 테이블에 없는 레시피: [`InventoryError::RecipeNotFound`]
/// - [`select_layer`]의 에러
pub fn merge(
    layers: &LayerTable,
    recipes: &RecipeTable,
    records: &LicenseRecordSet,
    tie_break: TieBreak,
) -> Result<Vec<PackageRecord>, InventoryError> {
    let mut merged = Vec::with_capacity(records.len());

    for record in records.values() {
        let recipe_name = record.recipe.as_deref().unwrap_or(&record.package_name);
        let recipe = recipes
            .get(recipe_name)
            .ok_or_else(|| InventoryError::RecipeNotFound {
                package: record.package_name.clone(),
                recipe: recipe_name.to_owned(),
            })?;

        let layer = select_layer(recipe, layers, tie_break)?;

        merged.push(PackageRecord {
            package_name: record.package_name.clone(),
            recipe_name: recipe.name.clone(),
            layer_name: layer.name.clone(),
            version: record.version.clone(),
            license: record.license.clone(),
        });
    }

    debug!(packages = merged.len(), %tie_break, "merged package metadata");
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LicenseRecord;

    fn layer_table(layers: &[(&str, i64)]) -> LayerTable {
        layers
            .iter()
            .map(|(name, priority)| {
                (
                    name.to_string(),
                    Layer {
                        name: name.to_string(),
                        path: format!("/layers/{name}"),
                        priority: *priority,
                    },
                )
            })
            .collect()
    }

    fn recipe_bound_to(name: &str, layers: &[&str]) -> Recipe {
        let mut recipe = Recipe::new(name);
        for layer in layers {
            recipe.bind(*layer, "1.0-r0");
        }
        recipe
    }

    fn records(entries: &[(&str, Option<&str>)]) -> LicenseRecordSet {
        entries
            .iter()
            .map(|(name, recipe)| {
                (
                    name.to_string(),
                    LicenseRecord {
                        package_name: name.to_string(),
                        version: "1.0".to_owned(),
                        license: "MIT".to_owned(),
                        recipe: recipe.map(str::to_owned),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn highest_priority_picks_true_maximum() {
        let layers = layer_table(&[("A", 1), ("B", 5), ("C", 3)]);
        let recipe = recipe_bound_to("r", &["A", "B", "C"]);
        let layer = select_layer(&recipe, &layers, TieBreak::HighestPriority).unwrap();
        assert_eq!(layer.name, "B");
    }

    #[test]
    fn lagged_matches_maximum_on_simple_order() {
        let layers = layer_table(&[("A", 1), ("B", 5), ("C", 3)]);
        let recipe = recipe_bound_to("r", &["A", "B", "C"]);
        let layer = select_layer(&recipe, &layers, TieBreak::Lagged).unwrap();
        assert_eq!(layer.name, "B");
    }

    #[test]
    fn lagged_compares_only_with_predecessor() {
        let layers = layer_table(&[("A", 5), ("B", 1), ("C", 3)]);
        let recipe = recipe_bound_to("r", &["A", "B", "C"]);

        let lagged = select_layer(&recipe, &layers, TieBreak::Lagged).unwrap();
        assert_eq!(lagged.name, "C");

        let max = select_layer(&recipe, &layers, TieBreak::HighestPriority).unwrap();
        assert_eq!(max.name, "A");
    }

    #[test]
    fn ascending_then_descending_order() {
        // A(1) -> C(3) -> B(2): 두 규칙 모두 C
        let layers = layer_table(&[("A", 1), ("B", 2), ("C", 3)]);
        let recipe = recipe_bound_to("r", &["A", "C", "B"]);
        for mode in [TieBreak::HighestPriority, TieBreak::Lagged] {
            assert_eq!(select_layer(&recipe, &layers, mode).unwrap().name, "C");
        }
    }

    #[test]
    fn ties_keep_first_encountered() {
        let layers = layer_table(&[("meta", 5), ("meta-poky", 5)]);
        let recipe = recipe_bound_to("r", &["meta-poky", "meta"]);
        for mode in [TieBreak::HighestPriority, TieBreak::Lagged] {
            assert_eq!(select_layer(&recipe, &layers, mode).unwrap().name, "meta-poky");
        }
    }

    #[test]
    fn single_binding_is_selected() {
        let layers = layer_table(&[("meta", 5)]);
        let recipe = recipe_bound_to("r", &["meta"]);
        assert_eq!(
            select_layer(&recipe, &layers, TieBreak::HighestPriority)
                .unwrap()
                .name,
            "meta"
        );
    }

    #[test]
    fn unknown_layer_fails() {
        let layers = layer_table(&[("meta", 5)]);
        let recipe = recipe_bound_to("r", &["meta", "meta-gone"]);
        let err = select_layer(&recipe, &layers, TieBreak::HighestPriority).unwrap_err();
        assert!(matches!(err, InventoryError::LayerNotFound { ref layer, .. } if layer == "meta-gone"));
    }

    #[test]
    fn recipe_without_bindings_fails() {
        let layers = layer_table(&[("meta", 5)]);
        let recipe = Recipe::new("empty");
        let err = select_layer(&recipe, &layers, TieBreak::HighestPriority).unwrap_err();
        assert!(matches!(err, InventoryError::NoLayerBinding { .. }));
    }

    #[test]
    fn merge_builds_records_in_input_order() {
        let layers = layer_table(&[("meta", 5), ("meta-custom", 10)]);
        let recipes: RecipeTable = [
            ("zlib".to_owned(), recipe_bound_to("zlib", &["meta"])),
            ("busybox".to_owned(), recipe_bound_to("busybox", &["meta", "meta-custom"])),
        ]
        .into_iter()
        .collect();
        let input = records(&[("libz1", Some("zlib")), ("busybox", Some("busybox"))]);

        let merged = merge(&layers, &recipes, &input, TieBreak::HighestPriority).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].package_name, "libz1");
        assert_eq!(merged[0].recipe_name, "zlib");
        assert_eq!(merged[0].layer_name, "meta");
        assert_eq!(merged[1].layer_name, "meta-custom");
        assert_eq!(merged[1].license, "MIT");
    }

    #[test]
    fn merge_is_deterministic() {
        let layers = layer_table(&[("A", 5), ("B", 1), ("C", 3)]);
        let recipes: RecipeTable = [("r".to_owned(), recipe_bound_to("r", &["A", "B", "C"]))]
            .into_iter()
            .collect();
        let input = records(&[("p1", Some("r")), ("p2", Some("r"))]);

        for mode in [TieBreak::HighestPriority, TieBreak::Lagged] {
            let first = merge(&layers, &recipes, &input, mode).unwrap();
            let second = merge(&layers, &recipes, &input, mode).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn merge_empty_records() {
        let layers = layer_table(&[("meta", 5)]);
        let merged = merge(&layers, &RecipeTable::new(), &LicenseRecordSet::new(), TieBreak::default())
            .unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn merge_unknown_recipe_fails() {
        let layers = layer_table(&[("meta", 5)]);
        let input = records(&[("libfoo", Some("foo"))]);
        let err = merge(&layers, &RecipeTable::new(), &input, TieBreak::default()).unwrap_err();
        assert!(matches!(err, InventoryError::RecipeNotFound { ref recipe, .. } if recipe == "foo"));
    }

    #[test]
    fn merge_without_recipe_uses_package_name() {
        let layers = layer_table(&[("meta", 5)]);
        let recipes: RecipeTable = [("zlib".to_owned(), recipe_bound_to("zlib", &["meta"]))]
            .into_iter()
            .collect();
        let input = records(&[("zlib", None)]);
        let merged = merge(&layers, &recipes, &input, TieBreak::default()).unwrap();
        assert_eq!(merged[0].recipe_name, "zlib");
    }
}
