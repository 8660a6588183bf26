use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error(
        "バージョン '{version}' を解決できません\nヒント: `paperdock versions` で利用可能なバージョンを確認してください"
    )]
    UnresolvableVersion { version: String },

    #[error("バージョン '{version}' にはダウンロード可能なビルドがありません")]
    NoBuilds { version: String },

    #[error("ビルド {build} にダウンロード '{kind}' が含まれていません")]
    DownloadMissing { build: u32, kind: String },

    #[error(transparent)]
    MissingSecret(#[from] paperdock_core::CoreError),

    #[error("PaperMC APIへのリクエストに失敗しました: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ファイル書き込みエラー: {path}\n理由: {message}")]
    FilesystemWriteFailure { path: PathBuf, message: String },

    #[error("server.properties のテンプレート展開に失敗しました: {0}")]
    Template(#[from] tera::Error),
}

impl ProvisionError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            ProvisionError::UnresolvableVersion { version } => {
                format!(
                    "バージョン '{}' を解決できません\n\
                     \n\
                     解決方法:\n\
                     1. バージョン表記を確認してください（例: 1.20.4）\n\
                     2. `paperdock versions` で利用可能なバージョンを一覧できます",
                    version
                )
            }
            ProvisionError::Http(e) => {
                format!(
                    "PaperMC APIに接続できません: {}\n\
                     \n\
                     ネットワーク接続とプロキシ設定を確認してください。",
                    e
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
