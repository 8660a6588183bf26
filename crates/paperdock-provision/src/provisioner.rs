//! Provisioner本体
//!
//! ワンショットの変換 `(version, server_dir, secret) → provisioned
//! directory` を実行します。どのステップが失敗してもエラーを伝播し、
//! 呼び出し側（CLI / Dockerビルドステップ）が非ゼロ終了することで
//! イメージビルド全体を中断させます。部分的に構成されたディレクトリが
//! エントリポイントに接続されることはありません。

use crate::api::PaperApi;
use crate::config::ServerConfigWriter;
use crate::download::download_jar;
use crate::error::{ProvisionError, Result};
use paperdock_core::{CoreError, PipelinePhase};
use std::path::{Path, PathBuf};
use tracing::info;

/// jarダウンロードの種別キー（PaperMC APIのdownloadsマップ）
const DOWNLOAD_KIND: &str = "application";

pub struct Provisioner {
    api: PaperApi,
}

impl Default for Provisioner {
    fn default() -> Self {
        Self::new()
    }
}

impl Provisioner {
    pub fn new() -> Self {
        Self {
            api: PaperApi::new(),
        }
    }

    pub fn with_api(api: PaperApi) -> Self {
        Self { api }
    }

    /// サーバーディレクトリをプロビジョニング
    ///
    /// 1. シークレットを検証（空はハードエラー、fail-closed）
    /// 2. バージョンをビルドに解決
    /// 3. サーバーディレクトリを作成しjarをダウンロード
    /// 4. eula.txt と server.properties を書き出し
    ///
    /// 成功時はプロビジョニング済みディレクトリのパスを返します。
    pub async fn provision(
        &self,
        version: &str,
        server_dir: &Path,
        rcon_password: &str,
    ) -> Result<PathBuf> {
        if rcon_password.trim().is_empty() {
            return Err(ProvisionError::MissingSecret(CoreError::EmptySecret {
                path: PathBuf::from("<inline>"),
            }));
        }

        info!(version = %version, dir = %server_dir.display(), "Provisioning server directory");

        let build = self.api.resolve_build(version).await?;
        let download = build.downloads.get(DOWNLOAD_KIND).ok_or_else(|| {
            ProvisionError::DownloadMissing {
                build: build.build,
                kind: DOWNLOAD_KIND.to_string(),
            }
        })?;

        std::fs::create_dir_all(server_dir).map_err(|e| {
            ProvisionError::FilesystemWriteFailure {
                path: server_dir.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        download_jar(&self.api, version, build.build, &download.name, server_dir).await?;

        let writer = ServerConfigWriter::new(server_dir);
        writer.write_eula()?;
        writer.write_properties(version, rcon_password)?;

        info!(
            phase = %PipelinePhase::Provisioned,
            dir = %server_dir.display(),
            "Provisioning complete"
        );
        Ok(server_dir.to_path_buf())
    }
}
