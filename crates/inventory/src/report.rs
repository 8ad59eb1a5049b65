//! 리포트 -- 패키지 레코드를 고정 폭 표로 출력
//!
//! ```text
//! ==== Packages info ====
//! package name                  \tlayer               \trecipe name ...
//! busybox                       \tmeta                \tbusybox     ...
//! ```
//!
//! 각 열은 최소 폭까지 왼쪽 정렬로 채운 뒤 탭으로 구분합니다.
//! 레코드가 없으면 표 대신 안내 한 줄만 출력합니다.

use std::io::Write;

use serde::Serialize;

use crate::types::PackageRecord;

/// 열 제목과 최소 폭
pub const COLUMNS: [(&str, usize); 5] = [
    ("package name", 30),
    ("layer", 20),
    ("recipe name", 30),
    ("version", 10),
    ("license", 20),
];

/// 리포트 범위 -- 제목과 빈 결과 안내 문구를 결정합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "layers", rename_all = "snake_case")]
pub enum ReportScope {
    /// 필터 없이 모든 패키지
    AllPackages,
    /// 지정한 레이어의 패키지만
    Layers(Vec<String>),
    /// 소스 패키지 디스크립터가 없는 패키지
    NonDebianOrigin,
}

impl ReportScope {
    /// 레이어 필터와 전체 표시 여부로 범위를 정합니다. 전체 표시가 필터보다 우선합니다.
    pub fn from_filter(layers: Option<&[String]>, show_all: bool) -> Self {
        match layers {
            Some(layers) if !show_all && !layers.is_empty() => Self::Layers(layers.to_vec()),
            _ => Self::AllPackages,
        }
    }

    /// 표 위에 출력할 제목 행
    pub fn header(&self) -> String {
        match self {
            Self::AllPackages => "==== Packages info ====".to_owned(),
            Self::Layers(layers) => format!("===== Package in layer {} ====", layers.join(",")),
            Self::NonDebianOrigin => "==== Packages not built from debian source ====".to_owned(),
        }
    }

    /// 결과가 비었을 때 출력할 안내 문구
    pub fn empty_message(&self) -> String {
        match self {
            Self::AllPackages => "No package data found".to_owned(),
            Self::Layers(layers) => format!("Packages not using layers {}", layers.join(",")),
            Self::NonDebianOrigin => {
                "All checked packages were built from debian source packages".to_owned()
            }
        }
    }
}

/// 출력용 리포트
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    /// 리포트 범위
    pub scope: ReportScope,
    /// 출력할 패키지 레코드
    pub packages: Vec<PackageRecord>,
}

impl PackageReport {
    /// 리포트를 생성합니다.
    pub fn new(scope: ReportScope, packages: Vec<PackageRecord>) -> Self {
        Self { scope, packages }
    }

    /// 출력할 레코드가 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// 텍스트 표를 씁니다.
    pub fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.is_empty() {
            writeln!(w, "{}", self.scope.empty_message())?;
            return Ok(());
        }

        writeln!(w, "{}", self.scope.header())?;
        writeln!(w, "{}", format_row(COLUMNS.map(|(title, _)| title)))?;
        for p in &self.packages {
            writeln!(
                w,
                "{}",
                format_row([
                    p.package_name.as_str(),
                    p.layer_name.as_str(),
                    p.recipe_name.as_str(),
                    p.version.as_str(),
                    p.license.as_str(),
                ])
            )?;
        }
        Ok(())
    }
}

fn format_row(cells: [&str; 5]) -> String {
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, &(_, width))| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("\t")
}
