//! サーバーjarのダウンロード
//!
//! ストリーミングでファイルに書き出し、進捗をindicatifで表示します。

use crate::api::PaperApi;
use crate::error::{ProvisionError, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// jarをダウンロードして保存先のパスを返す
///
/// 同名ファイルが既に存在する場合は上書きします（再ビルドは常に
/// 再プロビジョニングするため）。
pub async fn download_jar(
    api: &PaperApi,
    version: &str,
    build: u32,
    file_name: &str,
    dest_dir: &Path,
) -> Result<PathBuf> {
    let url = api.download_url(version, build, file_name);
    let dest_path = dest_dir.join(file_name);

    info!(url = %url, dest = %dest_path.display(), "Downloading server jar");

    let response = api.client().get(&url).send().await?.error_for_status()?;
    let total_size = response.content_length();

    let progress = match total_size {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    };

    let mut file = tokio::fs::File::create(&dest_path).await.map_err(|e| {
        ProvisionError::FilesystemWriteFailure {
            path: dest_path.clone(),
            message: e.to_string(),
        }
    })?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| ProvisionError::FilesystemWriteFailure {
                path: dest_path.clone(),
                message: e.to_string(),
            })?;
        progress.inc(chunk.len() as u64);
    }

    file.flush()
        .await
        .map_err(|e| ProvisionError::FilesystemWriteFailure {
            path: dest_path.clone(),
            message: e.to_string(),
        })?;
    progress.finish_and_clear();

    info!(file = %file_name, "Download complete");
    Ok(dest_path)
}
