//! 自動実行コマンドの読み込み
//!
//! 起動直後にサーバーコンソールへ流し込むコマンドをファイルから
//! 読み込みます。1行1コマンド、空行は無視されます。

use crate::error::{Result, ServerError};
use std::path::Path;

pub fn read_commands_from_file(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(ServerError::CommandFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
