//! 텍스트 파서 -- 외부 명령 출력과 라이선스 메타데이터 파일
//!
//! 모든 파서는 행 단위로 동작하며, 상태를 이름 있는 enum으로 표현합니다.
//! 형식이 맞지 않으면 행 번호와 함께 에러를 반환합니다.
//!
//! # 지원 형식
//!
//! - `bitbake-layers show-layers` -- [`layers`]
//! - `bitbake-layers show-recipes` -- [`recipes`]
//! - `license.manifest` 스탠자 및 패키지 목록 -- [`manifest`]
//! - 패키지별 `recipeinfo` -- [`recipeinfo`]
//! - `bitbake -e` -- [`environment`]

pub mod environment;
pub mod layers;
pub mod manifest;
pub mod recipeinfo;
pub mod recipes;

/// `KEY: value` 행을 첫 번째 콜론에서 나누고 양쪽을 trim합니다.
///
/// 콜론이 없으면 `None`을 반환합니다.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}
