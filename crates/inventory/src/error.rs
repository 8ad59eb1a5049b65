//! 인벤토리 에러 타입
//!
//! [`InventoryError`]는 인벤토리 크레이트에서 발생할 수 있는 모든 에러를 나타냅니다.
//! CLI는 이 타입을 그대로 받아 종료 코드를 정합니다.
//!
//! # 에러 카테고리
//!
//! - **환경**: `ToolNotFound`
//! - **입력 없음**: `InputNotFound`
//! - **정합성**: `RecipeNotFound`, `LayerNotFound`, `NoLayerBinding`
//! - **형식 오류**: `MalformedOutput`, `MalformedInput`, `MissingEnvironmentKey`
//! - **외부 명령**: `CommandFailed`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`
//!
//! 레시피를 찾지 못한 개별 라이선스 레코드는 에러가 아니라 경고 후 건너뜁니다
//! ([`resolver`](crate::resolver) 참고).

/// 인벤토리 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// 외부 도구가 PATH에 없음
    #[error("{tool} command isn't in your $PATH")]
    ToolNotFound {
        /// 도구 이름
        tool: String,
    },

    /// 외부 명령이 0이 아닌 종료 코드로 끝남
    #[error("command '{command}' failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// 실행한 명령줄
        command: String,
        /// 종료 코드 (시그널 종료 시 -1)
        code: i32,
        /// 표준 에러 출력
        stderr: String,
    },

    /// 필수 파일/디렉토리 없음
    #[error("input not found: {path}")]
    InputNotFound {
        /// 찾지 못한 경로
        path: String,
    },

    /// 외부 명령 출력 형식 오류
    #[error("malformed output from {origin} at line {line}: {reason}")]
    MalformedOutput {
        /// 출력을 만든 명령
        origin: String,
        /// 1부터 시작하는 행 번호
        line: usize,
        /// 실패 사유
        reason: String,
    },

    /// 입력 파일 형식 오류
    #[error("malformed input {path} at line {line}: {reason}")]
    MalformedInput {
        /// 파일 경로
        path: String,
        /// 1부터 시작하는 행 번호
        line: usize,
        /// 실패 사유
        reason: String,
    },

    /// 빌드 환경 출력에 필수 키가 없음
    #[error("environment key '{key}' not found in build environment")]
    MissingEnvironmentKey {
        /// 찾지 못한 키
        key: String,
    },

    /// 병합 시 레시피 테이블에 없는 레시피
    #[error("recipe '{recipe}' of package '{package}' is not in recipe table")]
    RecipeNotFound {
        /// 패키지 이름
        package: String,
        /// 레시피 이름
        recipe: String,
    },

    /// 레시피가 참조하는 레이어가 레이어 테이블에 없음
    #[error("layer '{layer}' of recipe '{recipe}' is not in layer table")]
    LayerNotFound {
        /// 레시피 이름
        recipe: String,
        /// 레이어 이름
        layer: String,
    },

    /// 레이어 바인딩이 하나도 없는 레시피
    #[error("recipe '{recipe}' has no layer binding")]
    NoLayerBinding {
        /// 레시피 이름
        recipe: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

impl InventoryError {
    /// I/O 에러를 경로와 함께 감쌉니다. `NotFound`는 [`InventoryError::InputNotFound`]가 됩니다.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::InputNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
