//! ビルドパラメータ定義
//!
//! `(version, server_dir)` はイメージビルド時に固定され、以降は不変です。
//! Dockerビルド引数のキー名もここで一元管理します。

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dockerビルド引数: サーバーバージョン
pub const ARG_VERSION: &str = "VERSION";
/// Dockerビルド引数: プロビジョニング先ディレクトリ
pub const ARG_SERVER_DIR: &str = "SERVER_DIR";

/// イメージビルドに渡されるパラメータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildParams {
    /// PaperMCサーバーのバージョン（例: "1.20.4"）
    pub version: String,
    /// プロビジョニング先ディレクトリ（イメージ内の相対パス）
    pub server_dir: String,
}

impl BuildParams {
    pub fn new(version: impl Into<String>, server_dir: impl Into<String>) -> Result<Self> {
        let params = Self {
            version: version.into(),
            server_dir: server_dir.into(),
        };
        params.validate()?;
        Ok(params)
    }

    /// パラメータを検証
    ///
    /// デフォルト値は存在しません。欠落は設定エラーとして扱われます。
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(CoreError::MissingBuildParam(ARG_VERSION));
        }
        if self.server_dir.trim().is_empty() {
            return Err(CoreError::MissingBuildParam(ARG_SERVER_DIR));
        }
        if Path::new(&self.server_dir).is_absolute() {
            return Err(CoreError::InvalidBuildParam(format!(
                "server_dir は相対パスで指定してください: {}",
                self.server_dir
            )));
        }
        if self.server_dir.contains("..") {
            return Err(CoreError::InvalidBuildParam(format!(
                "server_dir に '..' は使用できません: {}",
                self.server_dir
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let params = BuildParams::new("1.20.4", "server").unwrap();
        assert_eq!(params.version, "1.20.4");
        assert_eq!(params.server_dir, "server");
    }

    #[test]
    fn test_missing_version() {
        let err = BuildParams::new("", "server").unwrap_err();
        assert!(matches!(err, CoreError::MissingBuildParam(ARG_VERSION)));
    }

    #[test]
    fn test_missing_server_dir() {
        let err = BuildParams::new("1.20.4", "  ").unwrap_err();
        assert!(matches!(err, CoreError::MissingBuildParam(ARG_SERVER_DIR)));
    }

    #[test]
    fn test_absolute_server_dir_rejected() {
        let err = BuildParams::new("1.20.4", "/srv/minecraft").unwrap_err();
        assert!(matches!(err, CoreError::InvalidBuildParam(_)));
    }

    #[test]
    fn test_parent_traversal_rejected() {
        let err = BuildParams::new("1.20.4", "../server").unwrap_err();
        assert!(matches!(err, CoreError::InvalidBuildParam(_)));
    }
}
