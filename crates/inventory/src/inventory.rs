//! 인벤토리 오케스트레이터 -- 전체 수집 흐름 관리
//!
//! [`PackageInventory`]는 공급자와 설정을 묶어 두 가지 흐름을 제공합니다.
//!
//! # 내부 아키텍처
//!
//! ```text
//! 패키지 리포트:
//!   MetadataProvider --> LayerTable, RecipeTable
//!   license dir ------> LicenseRecordSet --> resolve --> merge --> filter --> PackageReport
//!
//! Debian 출처 검사:
//!   MetadataProvider --> BuildEnvironment (TMPDIR, BASE_WORKDIR)
//!   <TMPDIR>/deploy/licenses --> resolve --> merge --> find_non_debian_origin --> PackageReport
//!   <rootfs>/license.manifest --> 후보 패키지 (없으면 병합된 전체)
//! ```
//!
//! 각 단계는 한 번만 실행되며 어느 단계든 실패하면 전체 실행이 중단됩니다.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::config::PackageInventoryConfig;
use crate::debcheck::{CrossCheckOptions, find_non_debian_origin};
use crate::error::InventoryError;
use crate::filter::filter_by_layers;
use crate::loader::{load_license_records, read_rootfs_packages};
use crate::merge::merge;
use crate::provider::MetadataProvider;
use crate::report::{PackageReport, ReportScope};
use crate::resolver::resolve_records;
use crate::types::{LicenseSource, PackageRecord};

/// 패키지 인벤토리
pub struct PackageInventory<P: MetadataProvider> {
    config: PackageInventoryConfig,
    provider: P,
}

impl<P: MetadataProvider> PackageInventory<P> {
    /// 새 인벤토리를 생성합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패 시 [`InventoryError::Config`]
    pub fn new(config: PackageInventoryConfig, provider: P) -> Result<Self, InventoryError> {
        config.validate()?;
        Ok(Self { config, provider })
    }

    /// 현재 설정
    pub fn config(&self) -> &PackageInventoryConfig {
        &self.config
    }

    /// 라이선스 디렉토리를 읽어 병합된 패키지 레코드를 반환합니다.
    pub fn collect(
        &self,
        license_dir: &Path,
        source: LicenseSource,
    ) -> Result<Vec<PackageRecord>, InventoryError> {
        let layers = self.provider.list_layers()?;
        let recipes = self.provider.list_recipes()?;
        info!(
            layers = layers.len(),
            recipes = recipes.len(),
            "build metadata loaded"
        );

        let records = load_license_records(
            license_dir,
            source,
            &self.config.manifest_file,
            &self.config.recipeinfo_file,
        )?;
        let records = resolve_records(records, &recipes, &self.config.native_suffix);

        merge(&layers, &recipes, &records, self.config.tie_break)
    }

    /// 패키지 리포트를 만듭니다.
    ///
    /// `show_all`이면 레이어 필터를 무시합니다.
    pub fn report(
        &self,
        license_dir: &Path,
        source: LicenseSource,
        layers: Option<&[String]>,
        show_all: bool,
    ) -> Result<PackageReport, InventoryError> {
        let records = self.collect(license_dir, source)?;
        let scope = ReportScope::from_filter(layers, show_all);
        let records = match &scope {
            ReportScope::Layers(allowed) => filter_by_layers(records, Some(allowed.as_slice())),
            _ => records,
        };
        Ok(PackageReport::new(scope, records))
    }

    /// Debian 소스 패키지 없이 빌드된 패키지를 찾습니다.
    ///
    /// `rootfs_dir`가 주어지면 그 매니페스트에 있는 패키지만 검사하고,
    /// 없으면 병합된 모든 패키지를 검사합니다.
    pub fn check_debian_origin(
        &self,
        rootfs_dir: Option<&Path>,
    ) -> Result<PackageReport, InventoryError> {
        let env = self.provider.environment()?;
        let license_dir = Path::new(&env.tmpdir).join(&self.config.license_subdir);
        let workdir = Path::new(&env.workdir);
        info!(
            license_dir = %license_dir.display(),
            workdir = %workdir.display(),
            "build environment resolved"
        );

        let packages: IndexMap<String, PackageRecord> = self
            .collect(&license_dir, LicenseSource::RecipeInfo)?
            .into_iter()
            .map(|record| (record.package_name.clone(), record))
            .collect();

        let candidates: BTreeSet<String> = match rootfs_dir {
            Some(dir) => read_rootfs_packages(
                dir,
                &self.config.manifest_file,
                &self.config.package_marker,
            )?
            .into_iter()
            .collect(),
            None => packages.keys().cloned().collect(),
        };

        let findings = find_non_debian_origin(
            &candidates,
            &packages,
            workdir,
            CrossCheckOptions::from_config(&self.config),
        )?;
        Ok(PackageReport::new(ReportScope::NonDebianOrigin, findings))
    }
}
