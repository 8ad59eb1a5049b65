//! 패키지별 `recipeinfo` 파서
//!
//! 전체 이미지 라이선스 디렉토리(`deploy/licenses/<package>/recipeinfo`)의 파일을 읽습니다.
//!
//! ```text
//! LICENSE: MIT
//! PR: r0
//! PV: 1.0
//! ```
//!
//! 1행은 라이선스, 2행은 출처 정보(사용하지 않음), 3행은 버전입니다.
//! 레시피 이름은 이 파일에 없으므로 [`resolver`](crate::resolver)가 채웁니다.

use crate::error::InventoryError;
use crate::parser::split_key_value;
use crate::types::LicenseRecord;

const LICENSE_LINE: usize = 0;
const VERSION_LINE: usize = 2;

/// recipeinfo 내용을 파싱합니다.
///
/// # Arguments
///
/// - `content`: 파일 내용
/// - `package_name`: 패키지 이름 (디렉토리 이름)
/// - `path`: 파일 경로 (에러 메시지용)
pub fn parse_recipeinfo(
    content: &str,
    package_name: &str,
    path: &str,
) -> Result<LicenseRecord, InventoryError> {
    let lines: Vec<&str> = content.lines().collect();

    let field = |index: usize| -> Result<String, InventoryError> {
        let line = lines.get(index).ok_or_else(|| InventoryError::MalformedInput {
            path: path.to_owned(),
            line: index + 1,
            reason: format!("expected at least {} lines, found {}", VERSION_LINE + 1, lines.len()),
        })?;
        split_key_value(line)
            .map(|(_, value)| value.to_owned())
            .ok_or_else(|| InventoryError::MalformedInput {
                path: path.to_owned(),
                line: index + 1,
                reason: format!("expected 'KEY: value', got '{}'", line.trim()),
            })
    };

    let license = field(LICENSE_LINE)?;
    let version = field(VERSION_LINE)?;

    Ok(LicenseRecord {
        package_name: package_name.to_owned(),
        version,
        license,
        recipe: None,
    })
}
