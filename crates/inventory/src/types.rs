//! 도메인 타입 -- 레이어, 레시피, 라이선스 레코드, 병합 결과
//!
//! 모든 매핑은 [`IndexMap`]으로 표현하여 입력 순서를 그대로 보존합니다.
//! 레이어 선택 규칙이 바인딩 순서에 의존하므로 순서 보존은 필수입니다.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 레이어 이름 -> 레이어
pub type LayerTable = IndexMap<String, Layer>;

/// 레시피 이름 -> 레시피
pub type RecipeTable = IndexMap<String, Recipe>;

/// 패키지 이름 -> 라이선스 레코드
pub type LicenseRecordSet = IndexMap<String, LicenseRecord>;

/// 빌드 레이어
///
/// `bitbake-layers show-layers` 한 행에 대응합니다. 로드 후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// 레이어 이름 (고유 키)
    pub name: String,
    /// 레이어 경로
    pub path: String,
    /// 레이어 우선순위 (클수록 우선)
    pub priority: i64,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (priority {})", self.name, self.priority)
    }
}

/// 레시피와 레이어의 연결 -- 해당 레이어가 만드는 버전
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLayerBinding {
    /// 레이어 이름
    pub layer: String,
    /// 이 레이어에서 생성되는 버전
    pub produced_version: String,
}

/// 레시피
///
/// 하나의 레시피는 여러 레이어에 바인딩될 수 있습니다
/// (예: 기본 레이어에 있고 상위 레이어에서 재정의).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// 레시피 이름 (고유 키)
    pub name: String,
    /// 레이어 이름 -> 바인딩, 출력 순서 유지
    pub bindings: IndexMap<String, RecipeLayerBinding>,
}

impl Recipe {
    /// 바인딩이 없는 레시피를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: IndexMap::new(),
        }
    }

    /// 레이어 바인딩을 추가합니다. 같은 레이어가 다시 나오면 버전만 갱신되고 위치는 유지됩니다.
    pub fn bind(&mut self, layer: impl Into<String>, produced_version: impl Into<String>) {
        let layer = layer.into();
        self.bindings.insert(
            layer.clone(),
            RecipeLayerBinding {
                layer,
                produced_version: produced_version.into(),
            },
        );
    }
}

/// 패키지별 라이선스 레코드
///
/// 매니페스트 스탠자에서 읽으면 `recipe`가 채워져 있고,
/// `recipeinfo` 파일에서 읽으면 비어 있어 별도로 해석해야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// 패키지 이름 (고유 키)
    pub package_name: String,
    /// 패키지 버전
    pub version: String,
    /// 선언된 라이선스
    pub license: String,
    /// 패키지를 만든 레시피 이름
    pub recipe: Option<String>,
}

/// 병합 결과 -- 패키지 하나당 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// 패키지 이름
    pub package_name: String,
    /// 레시피 이름
    pub recipe_name: String,
    /// 선택된 레이어 이름
    pub layer_name: String,
    /// 패키지 버전
    pub version: String,
    /// 라이선스
    pub license: String,
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} ({}/{})",
            self.package_name, self.version, self.layer_name, self.recipe_name
        )
    }
}

/// 레시피가 여러 레이어에 바인딩되었을 때의 선택 규칙
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// 실제 최대 우선순위. 동률이면 먼저 나온 바인딩 유지
    #[default]
    HighestPriority,
    /// 각 바인딩을 바로 앞 바인딩의 우선순위와만 비교 (기존 도구 동작 재현)
    Lagged,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighestPriority => write!(f, "highest-priority"),
            Self::Lagged => write!(f, "lagged"),
        }
    }
}

impl TieBreak {
    /// 설정 값에서 선택 규칙을 파싱합니다.
    ///
    /// 허용 값은 [`pkgmeta_core::config::TIE_BREAK_MODES`]와 같습니다 (대소문자 구분).
    pub fn from_config_value(s: &str) -> Option<Self> {
        match s {
            "highest-priority" => Some(Self::HighestPriority),
            "lagged" => Some(Self::Lagged),
            _ => None,
        }
    }
}

/// 라이선스 레코드의 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseSource {
    /// rootfs 이미지의 `license.manifest` (레시피 이름 포함)
    Manifest,
    /// 패키지 디렉토리별 `recipeinfo` (레시피 이름 없음)
    RecipeInfo,
}

impl fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest => write!(f, "manifest"),
            Self::RecipeInfo => write!(f, "recipeinfo"),
        }
    }
}

/// `bitbake -e`에서 추출한 빌드 환경
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEnvironment {
    /// 빌드 출력 루트
    pub tmpdir: String,
    /// 패키지별 작업 디렉토리 루트
    pub workdir: String,
}
