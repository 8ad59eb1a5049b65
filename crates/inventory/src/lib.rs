//! # pkgmeta-inventory
//!
//! 빌드 레이어, 레시피, 패키지 라이선스 메타데이터를 패키지 단위 레코드로 병합하고,
//! Debian 소스 패키지 없이 빌드된 패키지를 찾습니다.
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 타입 (`InventoryError`)
//! - [`config`]: 인벤토리 설정 (`PackageInventoryConfig`, builder)
//! - [`types`]: 도메인 타입 (`Layer`, `Recipe`, `LicenseRecord`, `PackageRecord`, `TieBreak`)
//! - [`parser`]: 외부 명령 출력과 라이선스 파일 파서
//! - [`provider`]: 메타데이터 공급자 (`MetadataProvider` trait, `BitbakeProvider`)
//! - [`loader`]: 라이선스 디렉토리 로더
//! - [`resolver`]: 패키지 이름 -> 레시피 이름 해석
//! - [`merge`]: 레이어 선택과 병합
//! - [`filter`]: 레이어 필터
//! - [`report`]: 고정 폭 텍스트 리포트 (`PackageReport`)
//! - [`debcheck`]: Debian 출처 검사
//! - [`inventory`]: 오케스트레이터 (`PackageInventory`)
//!
//! # Architecture
//!
//! ```text
//! MetadataProvider --> LayerTable + RecipeTable --+
//!                                                 |
//! license dir --> LicenseRecordSet --> resolve ---+--> merge --> Vec<PackageRecord>
//!                                                                  |
//!                                              +-------------------+------------------+
//!                                              |                                      |
//!                                       filter_by_layers                   find_non_debian_origin
//!                                              |                                      |
//!                                              +------------> PackageReport <---------+
//! ```

pub mod config;
pub mod debcheck;
pub mod error;
pub mod filter;
pub mod inventory;
pub mod loader;
pub mod merge;
pub mod parser;
pub mod provider;
pub mod report;
pub mod resolver;
pub mod types;

// --- Public API Re-exports ---

// Orchestrator
pub use inventory::PackageInventory;

// Configuration
pub use config::{PackageInventoryConfig, PackageInventoryConfigBuilder};

// Error
pub use error::InventoryError;

// Types
pub use types::{
    BuildEnvironment, Layer, LayerTable, LicenseRecord, LicenseRecordSet, LicenseSource,
    PackageRecord, Recipe, RecipeLayerBinding, RecipeTable, TieBreak,
};

// Provider
pub use provider::{BitbakeProvider, MetadataProvider};

// Pipeline stages
pub use debcheck::{CrossCheckOptions, find_non_debian_origin};
pub use filter::{filter_by_layers, parse_layer_list};
pub use merge::{merge, select_layer};
pub use report::{PackageReport, ReportScope};
pub use resolver::{Resolution, resolve, resolve_records};
