//! `bitbake -e` 출력 파서
//!
//! 전역 변수 덤프에서 빌드 출력 루트와 작업 디렉토리 루트만 추출합니다.
//!
//! ```text
//! # $TMPDIR [3 operations]
//! TMPDIR="/srv/build/tmp"
//! export BASE_WORKDIR="/srv/build/tmp/work"
//! ```

use crate::error::InventoryError;
use crate::types::BuildEnvironment;

/// 환경 덤프에서 두 키의 값을 찾아 [`BuildEnvironment`]를 만듭니다.
///
/// - `#`로 시작하는 행과 들여쓰기된 행(셸 함수 본문)은 무시합니다.
/// - `export ` 접두사와 값의 바깥쪽 큰따옴표를 제거합니다.
/// - 같은 키가 여러 번 나오면 첫 값을 사용합니다.
///
/// # Errors
///
/// 끝까지 읽은 뒤에도 키가 없으면 [`InventoryError::MissingEnvironmentKey`]를 반환합니다.
pub fn parse_environment(
    output: &str,
    tmpdir_key: &str,
    workdir_key: &str,
) -> Result<BuildEnvironment, InventoryError> {
    let mut tmpdir = None;
    let mut workdir = None;

    for line in output.lines() {
        if tmpdir.is_some() && workdir.is_some() {
            break;
        }
        let Some((key, value)) = parse_assignment(line) else {
            continue;
        };
        if key == tmpdir_key && tmpdir.is_none() {
            tmpdir = Some(value.to_owned());
        } else if key == workdir_key && workdir.is_none() {
            workdir = Some(value.to_owned());
        }
    }

    let tmpdir = tmpdir.ok_or_else(|| InventoryError::MissingEnvironmentKey {
        key: tmpdir_key.to_owned(),
    })?;
    let workdir = workdir.ok_or_else(|| InventoryError::MissingEnvironmentKey {
        key: workdir_key.to_owned(),
    })?;

    Ok(BuildEnvironment { tmpdir, workdir })
}

fn parse_assignment(line: &str) -> Option<(&str, &str)> {
    if line.starts_with('#') || line.starts_with(char::is_whitespace) {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Some((key.trim(), value))
}
