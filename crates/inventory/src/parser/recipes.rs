//! `bitbake-layers show-recipes` 출력 파서
//!
//! # 출력 형식 예시
//!
//! ```text
//! NOTE: Starting bitbake server...
//! Loading cache...done.
//! === Available recipes: ===
//! busybox:
//!   meta                 1.36.1
//!   meta-custom          1.36.1
//! zlib:
//!   meta                 1.3.1
//! ```
//!
//! `:`로 끝나는 첫 행 이전은 헤더입니다. `:`로 끝나는 행이 레시피를 시작하고,
//! 이어지는 행마다 첫 토큰(레이어)과 마지막 토큰(버전)만 사용합니다.

use crate::error::InventoryError;
use crate::types::{Recipe, RecipeTable};

#[derive(Debug)]
enum State {
    ExpectHeader,
    InRecipe(Recipe),
}

/// 레시피 목록을 파싱합니다.
///
/// 빈 행은 건너뜁니다. 레시피 이름이 비어 있으면 [`InventoryError::MalformedOutput`]을 반환합니다.
pub fn parse_recipes(output: &str, origin: &str) -> Result<RecipeTable, InventoryError> {
    let mut state = State::ExpectHeader;
    let mut recipes = RecipeTable::new();

    for (idx, raw) in output.lines().enumerate() {
        let line = raw.trim();

        if let Some(name) = line.strip_suffix(':') {
            let name = name.trim();
            if name.is_empty() {
                return Err(InventoryError::MalformedOutput {
                    origin: origin.to_owned(),
                    line: idx + 1,
                    reason: "empty recipe name".to_owned(),
                });
            }
            if let State::InRecipe(done) = std::mem::replace(&mut state, State::ExpectHeader) {
                recipes.insert(done.name.clone(), done);
            }
            state = State::InRecipe(Recipe::new(name));
            continue;
        }

        match &mut state {
            State::ExpectHeader => {}
            State::InRecipe(recipe) => {
                let mut tokens = line.split_whitespace();
                let Some(layer) = tokens.next() else {
                    continue;
                };
                let version = tokens.next_back().unwrap_or(layer);
                recipe.bind(layer, version);
            }
        }
    }

    if let State::InRecipe(done) = state {
        recipes.insert(done.name.clone(), done);
    }

    Ok(recipes)
}
