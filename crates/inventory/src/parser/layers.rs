//! `bitbake-layers show-layers` 출력 파서
//!
//! # 출력 형식 예시
//!
//! ```text
//! NOTE: Starting bitbake server...
//! layer                 path                                      priority
//! ==========================================================================
//! meta                  /srv/poky/meta                            5
//! meta-custom           /srv/layers/meta-custom                   10
//! ```
//!
//! 처음 3행은 헤더로 버리고, 이후 각 행의 처음 세 토큰을 이름/경로/우선순위로 읽습니다.

use crate::error::InventoryError;
use crate::types::{Layer, LayerTable};

/// 레이어 목록 앞의 헤더 행 수
pub const LAYER_HEADER_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectHeader { remaining: usize },
    InRows,
}

/// 레이어 목록을 파싱합니다.
///
/// - 빈 행은 건너뜁니다.
/// - 헤더가 3행보다 짧거나, 토큰이 3개 미만이거나, 우선순위가 정수가 아니면
///   [`InventoryError::MalformedOutput`]을 반환합니다.
///
/// # Arguments
///
/// - `output`: 명령 표준 출력
/// - `origin`: 출력을 만든 명령 (에러 메시지용)
pub fn parse_layers(output: &str, origin: &str) -> Result<LayerTable, InventoryError> {
    let mut state = State::ExpectHeader {
        remaining: LAYER_HEADER_LINES,
    };
    let mut layers = LayerTable::new();

    for (idx, line) in output.lines().enumerate() {
        match state {
            State::ExpectHeader { remaining } => {
                state = if remaining > 1 {
                    State::ExpectHeader {
                        remaining: remaining - 1,
                    }
                } else {
                    State::InRows
                };
            }
            State::InRows => {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                if tokens.is_empty() {
                    continue;
                }
                if tokens.len() < 3 {
                    return Err(InventoryError::MalformedOutput {
                        origin: origin.to_owned(),
                        line: idx + 1,
                        reason: format!("expected '<name> <path> <priority>', got '{}'", line.trim()),
                    });
                }

                let priority = tokens[2].parse::<i64>().map_err(|e| {
                    InventoryError::MalformedOutput {
                        origin: origin.to_owned(),
                        line: idx + 1,
                        reason: format!("invalid priority '{}': {e}", tokens[2]),
                    }
                })?;

                let layer = Layer {
                    name: tokens[0].to_owned(),
                    path: tokens[1].to_owned(),
                    priority,
                };
                layers.insert(layer.name.clone(), layer);
            }
        }
    }

    if let State::ExpectHeader { .. } = state {
        return Err(InventoryError::MalformedOutput {
            origin: origin.to_owned(),
            line: output.lines().count(),
            reason: format!("expected {LAYER_HEADER_LINES} header lines"),
        });
    }

    Ok(layers)
}
