use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(
        "サーバーディレクトリが見つかりません: {dir}\nヒント: `paperdock provision` でプロビジョニングしてから起動してください"
    )]
    ServerDirNotFound { dir: PathBuf },

    #[error(
        "PaperMCのjarファイルが見つかりません: {dir}\nヒント: ディレクトリに paper-*.jar が存在するか確認してください"
    )]
    JarNotFound { dir: PathBuf },

    #[error(
        "javaを起動できません: {message}\nヒント: Javaがインストールされ、PATHに存在するか確認してください"
    )]
    SpawnFailed { message: String },

    #[error("コマンドファイルが見つかりません: {path}")]
    CommandFileNotFound { path: PathBuf },

    #[error("サーバープロセスの標準入力を取得できません")]
    StdinUnavailable,

    #[error("シグナルハンドラの登録に失敗しました: {0}")]
    SignalSetup(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
