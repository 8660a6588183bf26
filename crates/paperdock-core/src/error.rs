use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(
        "シークレットファイルが見つかりません: {path}\nヒント: ビルド時は `--secret id=rcon_password,src=<file>` でマウントしてください"
    )]
    SecretNotFound { path: PathBuf },

    #[error(
        "シークレットが空です: {path}\nRCONパスワードにデフォルト値はありません。空でない値を指定してください"
    )]
    EmptySecret { path: PathBuf },

    #[error("シークレット読み込みエラー: {path}\n理由: {message}")]
    SecretReadError { path: PathBuf, message: String },

    #[error("ビルドパラメータ '{0}' が指定されていません")]
    MissingBuildParam(&'static str),

    #[error("無効なビルドパラメータ: {0}")]
    InvalidBuildParam(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
