//! Dockerfileの生成
//!
//! イメージのビルド・ラン契約を1枚のDockerfileとして展開します:
//! ビルド引数 `VERSION` / `SERVER_DIR`、シークレットマウント付きの
//! プロビジョニングステップ（1ステップのみ）、プロビジョニング済み
//! ディレクトリへのWORKDIR、非対話エントリポイント。

use crate::error::Result;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::debug;

const DOCKERFILE_TEMPLATE: &str = include_str!("../templates/Dockerfile.tera");

/// Dockerfileのレンダリングパラメータ
#[derive(Debug, Clone)]
pub struct DockerfileParams {
    /// ビルダーステージのRustイメージタグ
    pub rust_version: String,
    /// ランタイムステージのJavaメジャーバージョン
    pub java_version: u32,
}

impl Default for DockerfileParams {
    fn default() -> Self {
        Self {
            rust_version: "1.85".to_string(),
            java_version: 21,
        }
    }
}

/// Dockerfileを文字列としてレンダリング
pub fn render_dockerfile(params: &DockerfileParams) -> Result<String> {
    let mut context = Context::new();
    context.insert("rust_version", &params.rust_version);
    context.insert("java_version", &params.java_version);

    let rendered = Tera::one_off(DOCKERFILE_TEMPLATE, &context, false)?;
    Ok(rendered)
}

/// Dockerfileをディレクトリに書き出してパスを返す
///
/// buildxの `-f` に渡すための一時ファイルとして使います。
pub fn write_dockerfile(params: &DockerfileParams, dir: &Path) -> Result<PathBuf> {
    let rendered = render_dockerfile(params)?;
    let path = dir.join("Dockerfile");
    std::fs::write(&path, rendered)?;
    debug!(path = %path.display(), "Wrote rendered Dockerfile");
    Ok(path)
}
