//! Debian 출처 검사 -- 소스 패키지 디스크립터 없이 빌드된 패키지 찾기
//!
//! 작업 디렉토리 루트 아래 빌드 디렉토리를 훑어, 후보 패키지의 빌드 디렉토리에
//! 디스크립터(`*.dsc`)가 하나도 없으면 보고합니다.
//!
//! ```text
//! <BASE_WORKDIR>/
//!   <arch>/
//!     foo/            -> foo/1.0-r0/foo_1.0.dsc 있음 -> 통과
//!     bar/            -> 디스크립터 없음             -> 보고
//!     nss-native/     -> nss 로 취급
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::PackageInventoryConfig;
use crate::error::InventoryError;
use crate::loader::walk_error;
use crate::types::PackageRecord;

/// 빌드 디렉토리 탐색 깊이
pub const BUILD_DIR_DEPTH: usize = 2;
/// 빌드 디렉토리 안에서 디스크립터를 찾는 깊이
pub const DESCRIPTOR_DEPTH: usize = 2;

/// 검사 옵션
#[derive(Debug, Clone, Copy)]
pub struct CrossCheckOptions<'a> {
    /// 빌드 호스트 전용 패키지 접미사
    pub native_suffix: &'a str,
    /// 디스크립터 파일 접미사
    pub descriptor_suffixes: &'a [String],
}

impl<'a> CrossCheckOptions<'a> {
    /// 인벤토리 설정에서 옵션을 만듭니다.
    pub fn from_config(config: &'a PackageInventoryConfig) -> Self {
        Self {
            native_suffix: &config.native_suffix,
            descriptor_suffixes: &config.descriptor_suffixes,
        }
    }
}

/// 디스크립터 없이 빌드된 후보 패키지를 찾습니다.
///
/// - `candidates`: 검사할 패키지 이름
/// - `packages`: 병합된 패키지 레코드. 여기에 없는 패키지는 검사하지 않습니다.
///
/// 빌드 디렉토리가 여러 개인 패키지는 어느 디렉토리에도 디스크립터가 없을 때만 보고합니다.
/// 결과는 중복 없이 패키지 이름 순입니다.
///
/// # Errors
///
/// `workdir_root`가 없으면 [`InventoryError::InputNotFound`]
pub fn find_non_debian_origin(
    candidates: &BTreeSet<String>,
    packages: &IndexMap<String, PackageRecord>,
    workdir_root: &Path,
    options: CrossCheckOptions<'_>,
) -> Result<Vec<PackageRecord>, InventoryError> {
    if !workdir_root.is_dir() {
        return Err(InventoryError::InputNotFound {
            path: workdir_root.display().to_string(),
        });
    }

    // 패키지 이름 -> 디스크립터 발견 여부
    let mut seen: BTreeMap<String, bool> = BTreeMap::new();

    let walker = WalkDir::new(workdir_root)
        .min_depth(1)
        .max_depth(BUILD_DIR_DEPTH)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(walk_error(workdir_root, e)),
            Err(e) => {
                warn!(error = %e, "skipping unreadable work directory");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(dir_name) = entry.file_name().to_str() else {
            continue;
        };
        let name = package_name_of(dir_name, options.native_suffix);
        if !candidates.contains(name) || !packages.contains_key(name) {
            continue;
        }

        let found = has_descriptor(entry.path(), options.descriptor_suffixes);
        debug!(package = name, dir = %entry.path().display(), found, "checked build directory");
        *seen.entry(name.to_owned()).or_insert(false) |= found;
    }

    let findings: Vec<PackageRecord> = seen
        .into_iter()
        .filter(|(_, found)| !found)
        .filter_map(|(name, _)| packages.get(&name).cloned())
        .collect();

    info!(
        candidates = candidates.len(),
        findings = findings.len(),
        "debian origin check complete"
    );
    Ok(findings)
}

/// 빌드 디렉토리 이름에서 패키지 이름을 구합니다. 접미사는 한 번만 뗍니다.
pub fn package_name_of<'a>(dir_name: &'a str, native_suffix: &str) -> &'a str {
    if native_suffix.is_empty() {
        return dir_name;
    }
    dir_name.strip_suffix(native_suffix).unwrap_or(dir_name)
}

fn has_descriptor(build_dir: &Path, suffixes: &[String]) -> bool {
    WalkDir::new(build_dir)
        .min_depth(1)
        .max_depth(DESCRIPTOR_DEPTH)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .any(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| suffixes.iter().any(|s| name.ends_with(s.as_str())))
        })
}
