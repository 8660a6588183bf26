//! Docker API連携
//!
//! ビルド本体はbuildxサブプロセスが担当し、こちらはDocker APIでの
//! 事前・事後チェック（接続確認、イメージの存在確認）を受け持ちます。

use crate::error::{ImageError, Result};
use bollard::Docker;
use tracing::debug;

/// Dockerデーモンに接続
pub fn connect() -> Result<Docker> {
    Docker::connect_with_local_defaults().map_err(|e| ImageError::DockerConnection(e.to_string()))
}

pub struct ImageInspector {
    docker: Docker,
}

impl ImageInspector {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// イメージの存在確認
    pub async fn image_exists(&self, image_tag: &str) -> Result<bool> {
        debug!(tag = %image_tag, "Inspecting image");
        match self.docker.inspect_image(image_tag).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(ImageError::DockerApi(e)),
        }
    }
}
