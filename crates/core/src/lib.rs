//! pkgmeta 공통 크레이트
//!
//! 인벤토리 도구와 Debian 출처 검사 도구가 공유하는 에러 타입과 설정을 제공합니다.
//!
//! - [`error`]: 최상위 에러 타입 (`PkgMetaError`, `ConfigError`)
//! - [`config`]: `pkgmeta.toml` 파싱 및 환경변수 오버라이드 (`PkgMetaConfig`)

pub mod config;
pub mod error;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, PkgMetaError};

// 설정
pub use config::{DebcheckConfig, GeneralConfig, InventoryConfig, PkgMetaConfig};
