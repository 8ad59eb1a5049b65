//! `license.manifest` 파서
//!
//! rootfs 이미지와 함께 배포되는 라이선스 매니페스트를 읽습니다.
//!
//! # 형식 예시
//!
//! ```text
//! PACKAGE NAME: busybox
//! PACKAGE VERSION: 1.36.1
//! RECIPE NAME: busybox
//! LICENSE: GPL-2.0-only & bzip2-1.0.4
//!
//! PACKAGE NAME: zlib
//! PACKAGE VERSION: 1.3.1
//! RECIPE NAME: zlib
//! LICENSE: Zlib
//! ```
//!
//! 스탠자는 고정 순서의 4행이며 빈 행으로 구분됩니다.

use crate::error::InventoryError;
use crate::parser::split_key_value;
use crate::types::{LicenseRecord, LicenseRecordSet};

/// 스탠자 필드 키 (순서 고정)
pub const STANZA_KEYS: [&str; 4] = ["PACKAGE NAME", "PACKAGE VERSION", "RECIPE NAME", "LICENSE"];

#[derive(Debug)]
enum State {
    ExpectStanzaStart,
    InStanzaBody {
        start_line: usize,
        values: Vec<String>,
    },
}

/// 매니페스트를 파싱하여 패키지 이름 순서대로 라이선스 레코드를 반환합니다.
///
/// 같은 패키지가 다시 나오면 나중 스탠자가 값을 덮어씁니다.
///
/// # Errors
///
/// 스탠자가 4행보다 짧거나, 콜론이 없거나, 키 순서가 다르면
/// [`InventoryError::MalformedInput`]을 반환합니다.
pub fn parse_manifest(content: &str, path: &str) -> Result<LicenseRecordSet, InventoryError> {
    let mut state = State::ExpectStanzaStart;
    let mut records = LicenseRecordSet::new();

    let malformed = |line: usize, reason: String| InventoryError::MalformedInput {
        path: path.to_owned(),
        line,
        reason,
    };

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        match &mut state {
            State::ExpectStanzaStart => {
                if line.is_empty() {
                    continue;
                }
                let value = expect_field(line, 0).map_err(|r| malformed(line_no, r))?;
                state = State::InStanzaBody {
                    start_line: line_no,
                    values: vec![value],
                };
            }
            State::InStanzaBody { start_line, values } => {
                if line.is_empty() {
                    return Err(malformed(
                        line_no,
                        format!(
                            "stanza starting at line {start_line} ends after {} of {} fields",
                            values.len(),
                            STANZA_KEYS.len()
                        ),
                    ));
                }
                let value = expect_field(line, values.len()).map_err(|r| malformed(line_no, r))?;
                values.push(value);

                if values.len() == STANZA_KEYS.len() {
                    let fields: [String; 4] = std::mem::take(values).try_into().map_err(
                        |v: Vec<String>| {
                            malformed(line_no, format!("stanza has {} fields", v.len()))
                        },
                    )?;
                    let [name, version, recipe, license] = fields;
                    records.insert(
                        name.clone(),
                        LicenseRecord {
                            package_name: name,
                            version,
                            license,
                            recipe: Some(recipe),
                        },
                    );
                    state = State::ExpectStanzaStart;
                }
            }
        }
    }

    if let State::InStanzaBody { start_line, values } = state {
        return Err(malformed(
            content.lines().count(),
            format!(
                "stanza starting at line {start_line} truncated after {} of {} fields",
                values.len(),
                STANZA_KEYS.len()
            ),
        ));
    }

    Ok(records)
}

fn expect_field(line: &str, position: usize) -> Result<String, String> {
    let expected = STANZA_KEYS[position];
    let (key, value) =
        split_key_value(line).ok_or_else(|| format!("expected '{expected}: <value>'"))?;
    if key != expected {
        return Err(format!("expected key '{expected}', found '{key}'"));
    }
    Ok(value.to_owned())
}

/// 매니페스트에서 `marker`로 시작하는 행만 골라 패키지 이름 목록을 반환합니다.
///
/// rootfs에 설치된 패키지 집합을 구할 때 사용합니다. 이름이 빈 행은 무시합니다.
pub fn parse_package_list(content: &str, marker: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(marker))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
