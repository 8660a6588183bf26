use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error(
        "シークレットファイルが必要です: {0}\nヒント: RCONパスワードを書いたファイルを --password-file で指定してください"
    )]
    SecretFile(#[from] paperdock_core::CoreError),

    #[error(
        "ビルド引数 '{key}' は機密情報を運んでいる可能性があるため拒否しました\nビルド引数はイメージ履歴に記録されます。シークレットマウントを使用してください"
    )]
    SecretBuildArg { key: String },

    #[error("Dockerfileのテンプレート展開に失敗しました: {0}")]
    Template(#[from] tera::Error),

    #[error(
        "docker buildx の実行に失敗しました (exit: {status})\n{stderr}\nヒント: Docker BuildKitが有効か確認してください"
    )]
    BuildxFailed { status: i32, stderr: String },

    #[error(
        "Dockerに接続できません: {0}\nヒント:\n  • Dockerが起動しているか確認してください\n  • OrbStackまたはDocker Desktopがインストールされているか確認してください"
    )]
    DockerConnection(String),

    #[error("Docker APIエラー: {0}")]
    DockerApi(#[from] bollard::errors::Error),

    #[error("ビルドコンテキストが見つかりません: {0}")]
    ContextNotFound(PathBuf),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;
