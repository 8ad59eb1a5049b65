//! 설정 관리 — pkgmeta.toml 파싱 및 런타임 설정
//!
//! [`PkgMetaConfig`]는 두 도구의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`PKGMETA_INVENTORY_NATIVE_SUFFIX=-native` 형식)
//! 3. 설정 파일 (`pkgmeta.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), pkgmeta_core::error::PkgMetaError> {
//! use pkgmeta_core::config::PkgMetaConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = PkgMetaConfig::load("pkgmeta.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PkgMetaConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, PkgMetaError};

/// 설정 파일 경로를 지정하는 환경변수
pub const CONFIG_PATH_ENV: &str = "PKGMETA_CONFIG";

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "pkgmeta.toml";

/// `inventory.tie_break`에 허용되는 값
pub const TIE_BREAK_MODES: [&str; 2] = ["highest-priority", "lagged"];

/// pkgmeta 통합 설정
///
/// `pkgmeta.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 도구는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PkgMetaConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 인벤토리 (레이어/레시피/라이선스 병합) 설정
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Debian 출처 검사 설정
    #[serde(default)]
    pub debcheck: DebcheckConfig,
}

impl PkgMetaConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PkgMetaError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// `PKGMETA_CONFIG` 또는 기본 경로에서 설정을 로드합니다.
    ///
    /// 환경변수로 지정된 파일은 반드시 존재해야 합니다.
    /// 기본 경로(`pkgmeta.toml`)가 없으면 기본값에 환경변수 오버라이드만 적용합니다.
    pub fn discover() -> Result<Self, PkgMetaError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load(path);
        }

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::load(DEFAULT_CONFIG_PATH);
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PkgMetaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PkgMetaError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PkgMetaError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PkgMetaError> {
        toml::from_str(toml_str).map_err(|e| {
            PkgMetaError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `PKGMETA_{SECTION}_{FIELD}`
    /// 예: `PKGMETA_INVENTORY_TIE_BREAK=lagged`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "PKGMETA_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "PKGMETA_GENERAL_LOG_FORMAT");

        // Inventory
        override_string(
            &mut self.inventory.layers_tool,
            "PKGMETA_INVENTORY_LAYERS_TOOL",
        );
        override_string(&mut self.inventory.env_tool, "PKGMETA_INVENTORY_ENV_TOOL");
        override_string(
            &mut self.inventory.native_suffix,
            "PKGMETA_INVENTORY_NATIVE_SUFFIX",
        );
        override_string(
            &mut self.inventory.manifest_file,
            "PKGMETA_INVENTORY_MANIFEST_FILE",
        );
        override_string(
            &mut self.inventory.recipeinfo_file,
            "PKGMETA_INVENTORY_RECIPEINFO_FILE",
        );
        override_string(&mut self.inventory.tie_break, "PKGMETA_INVENTORY_TIE_BREAK");

        // Debcheck
        override_string(&mut self.debcheck.tmpdir_key, "PKGMETA_DEBCHECK_TMPDIR_KEY");
        override_string(
            &mut self.debcheck.workdir_key,
            "PKGMETA_DEBCHECK_WORKDIR_KEY",
        );
        override_string(
            &mut self.debcheck.license_subdir,
            "PKGMETA_DEBCHECK_LICENSE_SUBDIR",
        );
        override_csv(
            &mut self.debcheck.descriptor_suffixes,
            "PKGMETA_DEBCHECK_DESCRIPTOR_SUFFIXES",
        );
        override_string(
            &mut self.debcheck.package_marker,
            "PKGMETA_DEBCHECK_PACKAGE_MARKER",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PkgMetaError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["compact", "pretty", "json"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // tie_break 검증
        if !TIE_BREAK_MODES.contains(&self.inventory.tie_break.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "inventory.tie_break".to_owned(),
                reason: format!("must be one of: {}", TIE_BREAK_MODES.join(", ")),
            }
            .into());
        }

        for (field, value) in [
            ("inventory.layers_tool", &self.inventory.layers_tool),
            ("inventory.env_tool", &self.inventory.env_tool),
            ("inventory.manifest_file", &self.inventory.manifest_file),
            ("inventory.recipeinfo_file", &self.inventory.recipeinfo_file),
            ("debcheck.tmpdir_key", &self.debcheck.tmpdir_key),
            ("debcheck.workdir_key", &self.debcheck.workdir_key),
            ("debcheck.package_marker", &self.debcheck.package_marker),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: "must not be empty".to_owned(),
                }
                .into());
            }
        }

        if self.debcheck.descriptor_suffixes.is_empty()
            || self.debcheck.descriptor_suffixes.iter().any(|s| s.is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "debcheck.descriptor_suffixes".to_owned(),
                reason: "at least one non-empty suffix required".to_owned(),
            }
            .into());
        }

        if Path::new(&self.debcheck.license_subdir).is_absolute() {
            return Err(ConfigError::InvalidValue {
                field: "debcheck.license_subdir".to_owned(),
                reason: "must be relative to the build output root".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (compact, pretty, json)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "compact".to_owned(),
        }
    }
}

/// 인벤토리 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// 레이어/레시피 목록을 출력하는 도구 (`bitbake-layers`)
    pub layers_tool: String,
    /// 빌드 환경을 출력하는 도구 (`bitbake`)
    pub env_tool: String,
    /// 빌드 호스트 전용 패키지 접미사
    pub native_suffix: String,
    /// rootfs 모드의 라이선스 매니페스트 파일명
    pub manifest_file: String,
    /// 전체 이미지 모드의 패키지별 메타데이터 파일명
    pub recipeinfo_file: String,
    /// 레이어 우선순위 동률 처리 방식 (highest-priority, lagged)
    pub tie_break: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            layers_tool: "bitbake-layers".to_owned(),
            env_tool: "bitbake".to_owned(),
            native_suffix: "-native".to_owned(),
            manifest_file: "license.manifest".to_owned(),
            recipeinfo_file: "recipeinfo".to_owned(),
            tie_break: "highest-priority".to_owned(),
        }
    }
}

/// Debian 출처 검사 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebcheckConfig {
    /// 빌드 출력 루트를 담은 환경 키
    pub tmpdir_key: String,
    /// 패키지별 작업 디렉토리 루트를 담은 환경 키
    pub workdir_key: String,
    /// 빌드 출력 루트 기준 라이선스 디렉토리 상대 경로
    pub license_subdir: String,
    /// 소스 패키지 디스크립터 파일 접미사
    pub descriptor_suffixes: Vec<String>,
    /// 매니페스트에서 패키지 이름 행을 식별하는 접두사
    pub package_marker: String,
}

impl Default for DebcheckConfig {
    fn default() -> Self {
        Self {
            tmpdir_key: "TMPDIR".to_owned(),
            workdir_key: "BASE_WORKDIR".to_owned(),
            license_subdir: "deploy/licenses".to_owned(),
            descriptor_suffixes: vec![".dsc".to_owned()],
            package_marker: "PACKAGE NAME:".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        let items: Vec<String> = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        if items.is_empty() {
            warn!(env_key, "empty list in env var, ignoring");
            return;
        }
        *target = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = PkgMetaConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.log_format, "compact");
        assert_eq!(config.inventory.native_suffix, "-native");
        assert_eq!(config.inventory.tie_break, "highest-priority");
        assert_eq!(config.debcheck.descriptor_suffixes, vec![".dsc"]);
    }

    #[test]
    fn default_config_passes_validation() {
        let config = PkgMetaConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = PkgMetaConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.inventory.layers_tool, "bitbake-layers");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[inventory]
tie_break = "lagged"
"#;
        let config = PkgMetaConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "compact");
        assert_eq!(config.inventory.tie_break, "lagged");
        assert_eq!(config.inventory.manifest_file, "license.manifest");
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let result = PkgMetaConfig::parse("invalid = [[[toml");
        assert!(matches!(
            result.unwrap_err(),
            PkgMetaError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = PkgMetaConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = PkgMetaConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_unknown_tie_break() {
        let mut config = PkgMetaConfig::default();
        config.inventory.tie_break = "lowest".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tie_break"));
    }

    #[test]
    fn validate_accepts_every_tie_break_mode_and_nothing_else() {
        for mode in TIE_BREAK_MODES {
            let mut config = PkgMetaConfig::default();
            config.inventory.tie_break = mode.to_owned();
            assert!(config.validate().is_ok(), "{mode} should be accepted");
        }
        for alias in ["max", "highest", "legacy", "Lagged"] {
            let mut config = PkgMetaConfig::default();
            config.inventory.tie_break = alias.to_owned();
            assert!(config.validate().is_err(), "{alias} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_empty_tool_name() {
        let mut config = PkgMetaConfig::default();
        config.inventory.layers_tool = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layers_tool"));
    }

    #[test]
    fn validate_rejects_empty_descriptor_suffixes() {
        let mut config = PkgMetaConfig::default();
        config.debcheck.descriptor_suffixes.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("descriptor_suffixes"));
    }

    #[test]
    fn validate_rejects_absolute_license_subdir() {
        let mut config = PkgMetaConfig::default();
        config.debcheck.license_subdir = "/deploy/licenses".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("license_subdir"));
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 환경변수 동시 접근이 없습니다.
        unsafe { std::env::set_var("TEST_PKGMETA_STR", "overridden") };
        override_string(&mut val, "TEST_PKGMETA_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_PKGMETA_STR") };
    }

    #[test]
    #[serial]
    fn env_override_csv() {
        let mut val = vec![".dsc".to_owned()];
        // SAFETY: serial 테스트로 환경변수 동시 접근이 없습니다.
        unsafe { std::env::set_var("TEST_PKGMETA_CSV", ".dsc, .changes") };
        override_csv(&mut val, "TEST_PKGMETA_CSV");
        assert_eq!(val, vec![".dsc", ".changes"]);
        unsafe { std::env::remove_var("TEST_PKGMETA_CSV") };
    }

    #[test]
    #[serial]
    fn env_override_empty_csv_keeps_original() {
        let mut val = vec![".dsc".to_owned()];
        // SAFETY: serial 테스트로 환경변수 동시 접근이 없습니다.
        unsafe { std::env::set_var("TEST_PKGMETA_CSV_EMPTY", " , ") };
        override_csv(&mut val, "TEST_PKGMETA_CSV_EMPTY");
        assert_eq!(val, vec![".dsc"]);
        unsafe { std::env::remove_var("TEST_PKGMETA_CSV_EMPTY") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_PKGMETA_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = PkgMetaConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = PkgMetaConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.inventory.native_suffix, parsed.inventory.native_suffix);
        assert_eq!(
            config.debcheck.descriptor_suffixes,
            parsed.debcheck.descriptor_suffixes
        );
    }

    #[test]
    fn from_file_not_found() {
        let result = PkgMetaConfig::from_file("/nonexistent/path/pkgmeta.toml");
        assert!(matches!(
            result.unwrap_err(),
            PkgMetaError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
