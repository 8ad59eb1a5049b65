//! 라이선스 디렉토리 로더
//!
//! 두 가지 배치를 지원합니다.
//!
//! ```text
//! <image license dir>/license.manifest       -- 매니페스트 모드
//! <deploy/licenses>/<package>/recipeinfo     -- recipeinfo 모드
//! ```

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::InventoryError;
use crate::parser::manifest::{parse_manifest, parse_package_list};
use crate::parser::recipeinfo::parse_recipeinfo;
use crate::types::{LicenseRecordSet, LicenseSource};

/// 지정한 방식으로 라이선스 레코드를 읽습니다.
pub fn load_license_records(
    dir: &Path,
    source: LicenseSource,
    manifest_file: &str,
    recipeinfo_file: &str,
) -> Result<LicenseRecordSet, InventoryError> {
    match source {
        LicenseSource::Manifest => read_license_manifest(dir, manifest_file),
        LicenseSource::RecipeInfo => read_package_licenses(dir, recipeinfo_file),
    }
}

/// `<dir>/<manifest_file>`를 읽어 파싱합니다.
///
/// # Errors
///
/// 파일이 없으면 [`InventoryError::InputNotFound`]
pub fn read_license_manifest(
    dir: &Path,
    manifest_file: &str,
) -> Result<LicenseRecordSet, InventoryError> {
    let path = dir.join(manifest_file);
    let content = std::fs::read_to_string(&path).map_err(|e| InventoryError::io(&path, e))?;
    let records = parse_manifest(&content, &path.display().to_string())?;
    debug!(path = %path.display(), records = records.len(), "license manifest loaded");
    Ok(records)
}

/// `<dir>/<package>/<recipeinfo_file>`를 모두 읽습니다.
///
/// 하위 디렉토리 이름이 패키지 이름입니다. 파일이 없는 디렉토리는 건너뜁니다.
/// 결과는 디렉토리 이름 순입니다.
///
/// # Errors
///
/// `dir`이 없으면 [`InventoryError::InputNotFound`]
pub fn read_package_licenses(
    dir: &Path,
    recipeinfo_file: &str,
) -> Result<LicenseRecordSet, InventoryError> {
    if !dir.is_dir() {
        return Err(InventoryError::InputNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut records = LicenseRecordSet::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let info_path = entry.path().join(recipeinfo_file);
        if !info_path.is_file() {
            continue;
        }

        let Some(package_name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping non UTF-8 package directory");
            continue;
        };

        let content =
            std::fs::read_to_string(&info_path).map_err(|e| InventoryError::io(&info_path, e))?;
        let record = parse_recipeinfo(&content, package_name, &info_path.display().to_string())?;
        records.insert(package_name.to_owned(), record);
    }

    debug!(dir = %dir.display(), records = records.len(), "package licenses loaded");
    Ok(records)
}

/// rootfs 이미지 디렉토리의 매니페스트에서 설치된 패키지 이름 목록을 읽습니다.
pub fn read_rootfs_packages(
    dir: &Path,
    manifest_file: &str,
    marker: &str,
) -> Result<Vec<String>, InventoryError> {
    let path = dir.join(manifest_file);
    let content = std::fs::read_to_string(&path).map_err(|e| InventoryError::io(&path, e))?;
    let packages = parse_package_list(&content, marker);
    debug!(path = %path.display(), packages = packages.len(), "rootfs package list loaded");
    Ok(packages)
}

pub(crate) fn walk_error(root: &Path, err: walkdir::Error) -> InventoryError {
    let path = err
        .path()
        .unwrap_or(root)
        .to_path_buf();
    match err.into_io_error() {
        Some(io) => InventoryError::io(&path, io),
        None => InventoryError::Io {
            path: path.display().to_string(),
            source: std::io::Error::other("filesystem loop detected"),
        },
    }
}
