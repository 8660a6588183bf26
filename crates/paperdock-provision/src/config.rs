//! サーバー設定ファイルの生成
//!
//! `eula.txt` と `server.properties` を書き出します。properties は
//! Teraテンプレートから展開され、RCONパスワードが埋め込まれます。
//! 埋め込まれたパスワードはプロビジョニング済みディレクトリの一部として
//! イメージに永続化されます。ビルドメタデータには残りません。

use crate::error::{ProvisionError, Result};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::{debug, info};

/// 組み込みのserver.propertiesテンプレート
const PROPERTIES_TEMPLATE: &str = include_str!("../templates/server.properties.tera");

/// プロジェクト側で上書き可能なテンプレートのファイル名
const TEMPLATE_OVERRIDE: &str = "server.properties.tera";

/// 設定ファイルライター
pub struct ServerConfigWriter {
    server_dir: PathBuf,
}

impl ServerConfigWriter {
    pub fn new(server_dir: impl Into<PathBuf>) -> Self {
        Self {
            server_dir: server_dir.into(),
        }
    }

    /// eula.txt を書き出す（EULA承諾）
    pub fn write_eula(&self) -> Result<PathBuf> {
        let path = self.server_dir.join("eula.txt");
        std::fs::write(&path, "eula=true\n").map_err(|e| {
            ProvisionError::FilesystemWriteFailure {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;
        debug!(path = %path.display(), "Wrote eula.txt");
        Ok(path)
    }

    /// server.properties を書き出す
    ///
    /// カレントディレクトリに `server.properties.tera` があればそれを、
    /// なければ組み込みテンプレートを使用します。パスワード自体は
    /// ログに出力されません。
    pub fn write_properties(&self, version: &str, rcon_password: &str) -> Result<PathBuf> {
        let template = match std::fs::read_to_string(TEMPLATE_OVERRIDE) {
            Ok(content) => {
                info!(file = TEMPLATE_OVERRIDE, "Using template override");
                content
            }
            Err(_) => PROPERTIES_TEMPLATE.to_string(),
        };

        let mut context = Context::new();
        context.insert("version", version);
        context.insert("rcon_password", rcon_password);

        let rendered = Tera::one_off(&template, &context, false)?;

        let path = self.server_dir.join("server.properties");
        std::fs::write(&path, rendered).map_err(|e| ProvisionError::FilesystemWriteFailure {
            path: path.clone(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Wrote server.properties");
        Ok(path)
    }
}
