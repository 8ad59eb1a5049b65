//! 레이어 필터 -- 병합 결과를 허용 레이어 목록으로 좁히기

use crate::types::PackageRecord;

/// 레이어 허용 목록으로 패키지 레코드를 거릅니다.
///
/// `allowed_layers`가 `None`이면 모든 레코드를 그대로 반환합니다.
/// 레이어 이름 비교는 대소문자를 구분하는 정확한 일치입니다. 결과가 비어도 에러가 아닙니다.
pub fn filter_by_layers(
    records: Vec<PackageRecord>,
    allowed_layers: Option<&[String]>,
) -> Vec<PackageRecord> {
    match allowed_layers {
        None => records,
        Some(allowed) => records
            .into_iter()
            .filter(|r| allowed.iter().any(|layer| *layer == r.layer_name))
            .collect(),
    }
}

/// 쉼표로 구분된 레이어 목록을 나눕니다. 빈 항목은 버립니다.
pub fn parse_layer_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
