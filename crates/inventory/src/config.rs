//! 인벤토리 설정
//!
//! [`PackageInventoryConfig`]는 core의 [`PkgMetaConfig`](pkgmeta_core::config::PkgMetaConfig)에서
//! 인벤토리/검사 섹션을 읽어 문자열 설정을 타입으로 바꾼 값입니다.
//!
//! # 사용 예시
//!
//! ```
//! use pkgmeta_inventory::{PackageInventoryConfigBuilder, TieBreak};
//!
//! let config = PackageInventoryConfigBuilder::new()
//!     .tie_break(TieBreak::Lagged)
//!     .native_suffix("-native")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.tie_break, TieBreak::Lagged);
//! ```

use serde::{Deserialize, Serialize};

use pkgmeta_core::config::PkgMetaConfig;

use crate::error::InventoryError;
use crate::types::TieBreak;

/// 인벤토리 및 Debian 출처 검사 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInventoryConfig {
    /// 레이어/레시피 목록 도구
    pub layers_tool: String,
    /// 빌드 환경 도구
    pub env_tool: String,
    /// 빌드 호스트 전용 패키지 접미사
    pub native_suffix: String,
    /// 라이선스 매니페스트 파일명
    pub manifest_file: String,
    /// 패키지별 메타데이터 파일명
    pub recipeinfo_file: String,
    /// 레이어 선택 규칙
    pub tie_break: TieBreak,

    // --- Debian 출처 검사 ---
    /// 빌드 출력 루트 환경 키
    pub tmpdir_key: String,
    /// 작업 디렉토리 루트 환경 키
    pub workdir_key: String,
    /// 빌드 출력 루트 기준 라이선스 디렉토리
    pub license_subdir: String,
    /// 소스 패키지 디스크립터 접미사
    pub descriptor_suffixes: Vec<String>,
    /// 매니페스트 패키지 이름 행 접두사
    pub package_marker: String,
}

impl Default for PackageInventoryConfig {
    fn default() -> Self {
        Self::from_core(&PkgMetaConfig::default())
    }
}

impl PackageInventoryConfig {
    /// core 설정에서 인벤토리 설정을 생성합니다.
    ///
    /// 알 수 없는 `tie_break` 값은 기본 규칙(highest-priority)으로 대체됩니다.
    pub fn from_core(core: &PkgMetaConfig) -> Self {
        let inventory = &core.inventory;
        let debcheck = &core.debcheck;

        Self {
            layers_tool: inventory.layers_tool.clone(),
            env_tool: inventory.env_tool.clone(),
            native_suffix: inventory.native_suffix.clone(),
            manifest_file: inventory.manifest_file.clone(),
            recipeinfo_file: inventory.recipeinfo_file.clone(),
            tie_break: TieBreak::from_config_value(&inventory.tie_break).unwrap_or_default(),
            tmpdir_key: debcheck.tmpdir_key.clone(),
            workdir_key: debcheck.workdir_key.clone(),
            license_subdir: debcheck.license_subdir.clone(),
            descriptor_suffixes: debcheck.descriptor_suffixes.clone(),
            package_marker: debcheck.package_marker.clone(),
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// 파일명 설정은 경로 구분자를 포함할 수 없습니다.
    pub fn validate(&self) -> Result<(), InventoryError> {
        for (field, value) in [
            ("layers_tool", &self.layers_tool),
            ("env_tool", &self.env_tool),
            ("manifest_file", &self.manifest_file),
            ("recipeinfo_file", &self.recipeinfo_file),
            ("tmpdir_key", &self.tmpdir_key),
            ("workdir_key", &self.workdir_key),
            ("package_marker", &self.package_marker),
        ] {
            if value.trim().is_empty() {
                return Err(InventoryError::Config {
                    field: field.to_owned(),
                    reason: "must not be empty".to_owned(),
                });
            }
        }

        for (field, value) in [
            ("manifest_file", &self.manifest_file),
            ("recipeinfo_file", &self.recipeinfo_file),
        ] {
            if value.contains('/') {
                return Err(InventoryError::Config {
                    field: field.to_owned(),
                    reason: format!("'{value}' must be a plain file name"),
                });
            }
        }

        if self.descriptor_suffixes.is_empty()
            || self.descriptor_suffixes.iter().any(|s| s.is_empty())
        {
            return Err(InventoryError::Config {
                field: "descriptor_suffixes".to_owned(),
                reason: "at least one non-empty suffix required".to_owned(),
            });
        }

        if std::path::Path::new(&self.license_subdir)
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(InventoryError::Config {
                field: "license_subdir".to_owned(),
                reason: "must not contain '..'".to_owned(),
            });
        }

        Ok(())
    }
}

/// [`PackageInventoryConfig`] 빌더
#[derive(Default)]
pub struct PackageInventoryConfigBuilder {
    config: PackageInventoryConfig,
}

impl PackageInventoryConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 레이어/레시피 목록 도구를 설정합니다.
    pub fn layers_tool(mut self, tool: impl Into<String>) -> Self {
        self.config.layers_tool = tool.into();
        self
    }

    /// 빌드 환경 도구를 설정합니다.
    pub fn env_tool(mut self, tool: impl Into<String>) -> Self {
        self.config.env_tool = tool.into();
        self
    }

    /// 빌드 호스트 전용 패키지 접미사를 설정합니다. 빈 문자열이면 접미사 재시도를 하지 않습니다.
    pub fn native_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.native_suffix = suffix.into();
        self
    }

    /// 매니페스트 파일명을 설정합니다.
    pub fn manifest_file(mut self, name: impl Into<String>) -> Self {
        self.config.manifest_file = name.into();
        self
    }

    /// recipeinfo 파일명을 설정합니다.
    pub fn recipeinfo_file(mut self, name: impl Into<String>) -> Self {
        self.config.recipeinfo_file = name.into();
        self
    }

    /// 레이어 선택 규칙을 설정합니다.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    /// 디스크립터 접미사 목록을 설정합니다.
    pub fn descriptor_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.config.descriptor_suffixes = suffixes;
        self
    }

    /// 매니페스트 패키지 이름 접두사를 설정합니다.
    pub fn package_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.package_marker = marker.into();
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `InventoryError::Config` 반환
    pub fn build(self) -> Result<PackageInventoryConfig, InventoryError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
