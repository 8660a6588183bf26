//! シークレット読み込みモジュール
//!
//! RCONパスワードはBuildKitのシークレットマウント経由でのみビルドステップに
//! 渡されます。ビルド引数はイメージ履歴に記録されるため、値の受け渡しには
//! 一切使用しません。
//!
//! ## セキュリティ
//!
//! - 読み込まれた値はログに出力されません
//! - エラーメッセージにも値は含まれません
//! - 欠落・空のシークレットはハードエラーです（fail-closed）

use crate::error::{CoreError, Result};
use std::path::Path;
use tracing::debug;

/// シークレットマウントの識別子
pub const SECRET_ID: &str = "rcon_password";

/// BuildKitがシークレットを展開するデフォルトパス
pub const DEFAULT_SECRET_PATH: &str = "/run/secrets/rcon_password";

/// シークレットをファイル内容から読み込む
///
/// 末尾の改行のみ除去します。ファイルが存在しない、または除去後に
/// 空になる場合はエラーです。デフォルト値へのフォールバックはありません。
pub fn load_secret(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CoreError::SecretNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|e| CoreError::SecretReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let secret = raw.trim_end_matches(['\r', '\n']).to_string();
    if secret.is_empty() {
        return Err(CoreError::EmptySecret {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "Loaded secret from file");
    Ok(secret)
}

/// キー名が機密情報を運んでいそうかを判定
///
/// ビルド引数として渡そうとした場合に拒否するためのガードです。
pub fn looks_sensitive(key: &str) -> bool {
    const SENSITIVE_PATTERNS: &[&str] = &["password", "token", "secret", "api_key", "private_key"];

    let key_lower = key.to_lowercase();
    SENSITIVE_PATTERNS.iter().any(|p| key_lower.contains(p))
}
