//! 메타데이터 공급자 -- 빌드 시스템에서 레이어/레시피/환경 정보를 얻기
//!
//! [`MetadataProvider`] trait으로 외부 명령 호출을 한 곳에 모읍니다.
//! 실제 빌드 트리에서는 [`BitbakeProvider`]를, 테스트에서는 메모리 구현을 사용합니다.
//!
//! 모든 명령은 순차적으로 실행되며 완료될 때까지 블로킹됩니다.
//! 재시도와 타임아웃은 없습니다.

use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::config::PackageInventoryConfig;
use crate::error::InventoryError;
use crate::parser::environment::parse_environment;
use crate::parser::layers::parse_layers;
use crate::parser::recipes::parse_recipes;
use crate::types::{BuildEnvironment, LayerTable, RecipeTable};

/// 빌드 메타데이터 공급자
pub trait MetadataProvider {
    /// 레이어 테이블을 반환합니다.
    fn list_layers(&self) -> Result<LayerTable, InventoryError>;

    /// 레시피 테이블을 반환합니다.
    fn list_recipes(&self) -> Result<RecipeTable, InventoryError>;

    /// 빌드 출력 루트와 작업 디렉토리 루트를 반환합니다.
    fn environment(&self) -> Result<BuildEnvironment, InventoryError>;
}

/// 명령 실행 결과
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// 종료 상태
    pub status: ExitStatus,
    /// 표준 출력
    pub stdout: String,
    /// 표준 에러 출력
    pub stderr: String,
}

impl CommandOutput {
    /// 종료 코드. 시그널로 종료되면 -1
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }
}

/// 외부 명령 빌더
pub struct Cmd {
    program: String,
    args: Vec<String>,
}

impl Cmd {
    /// 새 명령을 생성합니다.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
        }
    }

    /// 인자를 하나 추가합니다.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// 사람이 읽을 수 있는 명령줄
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 명령을 실행하고 출력을 수집합니다.
    ///
    /// # Errors
    ///
    /// - 실행 파일을 찾지 못함: [`InventoryError::ToolNotFound`]
    /// - 0이 아닌 종료 코드: [`InventoryError::CommandFailed`]
    pub fn run(self) -> Result<CommandOutput, InventoryError> {
        let command = self.command_line();
        debug!(%command, "running command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => InventoryError::ToolNotFound {
                    tool: self.program.clone(),
                },
                _ => InventoryError::Io {
                    path: self.program.clone(),
                    source: e,
                },
            })?;

        let result = CommandOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.status.success() {
            return Err(InventoryError::CommandFailed {
                command,
                code: result.code(),
                stderr: result.stderr.trim().to_owned(),
            });
        }

        Ok(result)
    }
}

/// PATH에 도구가 있는지 확인합니다.
///
/// # Errors
///
/// 도구가 없으면 [`InventoryError::ToolNotFound`]
pub fn ensure_tool(tool: &str) -> Result<(), InventoryError> {
    which::which(tool)
        .map(|path| debug!(tool, path = %path.display(), "tool found"))
        .map_err(|_| InventoryError::ToolNotFound {
            tool: tool.to_owned(),
        })
}

/// `bitbake-layers`/`bitbake` 명령을 호출하는 공급자
#[derive(Debug, Clone)]
pub struct BitbakeProvider {
    layers_tool: String,
    env_tool: String,
    tmpdir_key: String,
    workdir_key: String,
}

impl BitbakeProvider {
    /// 설정에서 공급자를 생성합니다.
    pub fn new(config: &PackageInventoryConfig) -> Self {
        Self {
            layers_tool: config.layers_tool.clone(),
            env_tool: config.env_tool.clone(),
            tmpdir_key: config.tmpdir_key.clone(),
            workdir_key: config.workdir_key.clone(),
        }
    }

    /// 레이어/레시피 도구가 PATH에 있는지 확인합니다.
    pub fn ensure_layers_tool(&self) -> Result<(), InventoryError> {
        ensure_tool(&self.layers_tool)
    }

    /// 환경 도구가 PATH에 있는지 확인합니다.
    pub fn ensure_env_tool(&self) -> Result<(), InventoryError> {
        ensure_tool(&self.env_tool)
    }
}

impl MetadataProvider for BitbakeProvider {
    fn list_layers(&self) -> Result<LayerTable, InventoryError> {
        let cmd = Cmd::new(&self.layers_tool).arg("show-layers");
        let origin = cmd.command_line();
        let output = cmd.run()?;
        parse_layers(&output.stdout, &origin)
    }

    fn list_recipes(&self) -> Result<RecipeTable, InventoryError> {
        let cmd = Cmd::new(&self.layers_tool).arg("show-recipes");
        let origin = cmd.command_line();
        let output = cmd.run()?;
        parse_recipes(&output.stdout, &origin)
    }

    fn environment(&self) -> Result<BuildEnvironment, InventoryError> {
        let output = Cmd::new(&self.env_tool).arg("-e").run()?;
        parse_environment(&output.stdout, &self.tmpdir_key, &self.workdir_key)
    }
}
