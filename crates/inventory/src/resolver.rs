//! 레시피 해석기 -- 패키지 이름에서 레시피 이름 찾기
//!
//! `recipeinfo`에서 읽은 라이선스 레코드에는 레시피 이름이 없습니다.
//! 패키지 이름으로 레시피 테이블을 찾되, 빌드 호스트 전용 변형(`nss-native`)은
//! 접미사를 떼고(`nss`) 한 번 더 찾습니다. 다른 정규화는 하지 않습니다.

use tracing::{debug, info, warn};

use crate::types::{LicenseRecordSet, RecipeTable};

/// 레시피 해석 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// 레시피 이름
    Found(&'a str),
    /// 정확히 일치하는 이름도, 접미사를 뗀 이름도 없음
    NotFound,
}

/// 패키지 이름에 대응하는 레시피 이름을 찾습니다.
///
/// 정확히 일치하는 키를 먼저 찾고, 없으면 `native_suffix`로 끝나는 경우에만
/// 접미사를 정확히 한 번 떼고 다시 찾습니다. 빈 접미사는 재시도하지 않습니다.
pub fn resolve<'a>(package_name: &str, recipes: &'a RecipeTable, native_suffix: &str) -> Resolution<'a> {
    if let Some((name, _)) = recipes.get_key_value(package_name) {
        return Resolution::Found(name.as_str());
    }

    if native_suffix.is_empty() {
        return Resolution::NotFound;
    }

    match package_name
        .strip_suffix(native_suffix)
        .and_then(|stripped| recipes.get_key_value(stripped))
    {
        Some((name, _)) => Resolution::Found(name.as_str()),
        None => Resolution::NotFound,
    }
}

/// 레시피 이름이 비어 있는 레코드마다 레시피를 채웁니다.
///
/// 해석하지 못한 레코드는 경고를 남기고 결과에서 제외합니다. 이미 레시피 이름이 있는
/// 레코드는 그대로 둡니다. 입력 순서는 유지됩니다.
pub fn resolve_records(
    records: LicenseRecordSet,
    recipes: &RecipeTable,
    native_suffix: &str,
) -> LicenseRecordSet {
    let total = records.len();
    let mut resolved = LicenseRecordSet::with_capacity(total);

    for (name, mut record) in records {
        if record.recipe.is_none() {
            match resolve(&name, recipes, native_suffix) {
                Resolution::Found(recipe) => {
                    if recipe != name {
                        debug!(package = %name, recipe, "resolved package via suffix-stripped name");
                    }
                    record.recipe = Some(recipe.to_owned());
                }
                Resolution::NotFound => {
                    warn!(package = %name, "package is not in recipe table, skipping");
                    continue;
                }
            }
        }
        resolved.insert(name, record);
    }

    let dropped = total - resolved.len();
    if dropped > 0 {
        info!(dropped, kept = resolved.len(), "unresolved license records dropped");
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LicenseRecord, Recipe};

    fn recipe_table(names: &[&str]) -> RecipeTable {
        names
            .iter()
            .map(|n| {
                let mut recipe = Recipe::new(*n);
                recipe.bind("meta", "1.0");
                (n.to_string(), recipe)
            })
            .collect()
    }

    fn record(name: &str, recipe: Option<&str>) -> (String, LicenseRecord) {
        (
            name.to_owned(),
            LicenseRecord {
                package_name: name.to_owned(),
                version: "1.0".to_owned(),
                license: "MIT".to_owned(),
                recipe: recipe.map(str::to_owned),
            },
        )
    }

    #[test]
    fn exact_match_wins() {
        let recipes = recipe_table(&["nss", "nss-native"]);
        assert_eq!(
            resolve("nss-native", &recipes, "-native"),
            Resolution::Found("nss-native")
        );
    }

    #[test]
    fn native_suffix_is_stripped_on_miss() {
        let recipes = recipe_table(&["nss"]);
        assert_eq!(resolve("nss-native", &recipes, "-native"), Resolution::Found("nss"));
    }

    #[test]
    fn stripped_name_missing_is_not_found() {
        let recipes = recipe_table(&["zlib"]);
        assert_eq!(resolve("nss-native", &recipes, "-native"), Resolution::NotFound);
    }

    #[test]
    fn suffix_stripped_only_once() {
        let recipes = recipe_table(&["foo"]);
        assert_eq!(
            resolve("foo-native-native", &recipes, "-native"),
            Resolution::NotFound
        );
    }

    #[test]
    fn name_without_suffix_is_not_normalized() {
        let recipes = recipe_table(&["libz"]);
        assert_eq!(resolve("libz1", &recipes, "-native"), Resolution::NotFound);
    }

    #[test]
    fn empty_suffix_disables_retry() {
        let recipes = recipe_table(&["nss"]);
        assert_eq!(resolve("nss-native", &recipes, ""), Resolution::NotFound);
    }

    #[test]
    fn resolve_records_fills_and_drops() {
        let recipes = recipe_table(&["nss", "zlib"]);
        let records: LicenseRecordSet = [
            record("zlib", None),
            record("nss-native", None),
            record("orphan", None),
        ]
        .into_iter()
        .collect();

        let resolved = resolve_records(records, &recipes, "-native");
        let names: Vec<&str> = resolved.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zlib", "nss-native"]);
        assert_eq!(resolved["nss-native"].recipe.as_deref(), Some("nss"));
        assert_eq!(resolved["zlib"].recipe.as_deref(), Some("zlib"));
    }

    #[test]
    fn resolve_records_keeps_existing_recipe() {
        let recipes = recipe_table(&["zlib"]);
        let records: LicenseRecordSet = [record("libz1", Some("zlib"))].into_iter().collect();
        let resolved = resolve_records(records, &recipes, "-native");
        assert_eq!(resolved["libz1"].recipe.as_deref(), Some("zlib"));
    }

    #[test]
    fn resolve_records_empty_input() {
        let recipes = recipe_table(&["zlib"]);
        let resolved = resolve_records(LicenseRecordSet::new(), &recipes, "-native");
        assert!(resolved.is_empty());
    }
}
