//! PaperMC API クライアント
//!
//! <https://api.papermc.io/v2/> に対してバージョンとビルドの解決を行います。
//! ビルドの選択は安定チャンネル（`default`）を優先し、安定ビルドが
//! 存在しないバージョンでは警告付きで最新のexperimentalビルドに
//! フォールバックします。

use crate::error::{ProvisionError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// PaperMC APIのベースURL
pub const DEFAULT_BASE_URL: &str = "https://api.papermc.io/v2/projects/paper";

/// ビルドのリリースチャンネル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Default,
    Experimental,
}

/// 1つのサーバービルド
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    pub build: u32,
    pub channel: Channel,
    #[serde(default)]
    pub downloads: HashMap<String, Download>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Download {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BuildsResponse {
    builds: Vec<Build>,
}

/// ビルドを選択
///
/// 最新の安定ビルドを返します。安定ビルドがない場合は最新の
/// experimentalビルドにフォールバックします（警告付き）。
pub fn select_build(builds: &[Build]) -> Option<&Build> {
    let stable = builds
        .iter()
        .filter(|b| b.channel == Channel::Default)
        .max_by_key(|b| b.build);

    if let Some(build) = stable {
        return Some(build);
    }

    let experimental = builds.iter().max_by_key(|b| b.build);
    if let Some(build) = experimental {
        warn!(
            build = build.build,
            "No stable build available, falling back to experimental channel"
        );
    }
    experimental
}

/// PaperMC APIクライアント
pub struct PaperApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for PaperApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PaperApi {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// ベースURLを指定して作成（テスト用のモックサーバー向け）
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 利用可能なバージョンの一覧を取得
    pub async fn versions(&self) -> Result<Vec<String>> {
        let url = format!("{}/", self.base_url);
        debug!(url = %url, "Fetching available versions");

        let response: ProjectResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.versions)
    }

    /// バージョンのビルド一覧を取得
    ///
    /// 未知のバージョンは `UnresolvableVersion` になります。
    pub async fn builds(&self, version: &str) -> Result<Vec<Build>> {
        let url = format!("{}/versions/{}/builds", self.base_url, version);
        debug!(url = %url, "Fetching builds");

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProvisionError::UnresolvableVersion {
                version: version.to_string(),
            });
        }

        let response: BuildsResponse = response.error_for_status()?.json().await?;
        Ok(response.builds)
    }

    /// バージョンをダウンロード対象のビルドに解決
    pub async fn resolve_build(&self, version: &str) -> Result<Build> {
        let builds = self.builds(version).await?;
        select_build(&builds)
            .cloned()
            .ok_or_else(|| ProvisionError::NoBuilds {
                version: version.to_string(),
            })
    }

    /// バージョンのビルドが全てexperimentalかどうか
    pub async fn experimental_only(&self, version: &str) -> Result<bool> {
        let builds = self.builds(version).await?;
        Ok(builds.iter().all(|b| b.channel == Channel::Experimental))
    }

    /// jarのダウンロードURLを組み立て
    pub fn download_url(&self, version: &str, build: u32, file_name: &str) -> String {
        format!(
            "{}/versions/{}/builds/{}/downloads/{}",
            self.base_url, version, build, file_name
        )
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }
}
