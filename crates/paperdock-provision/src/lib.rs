//! PaperDock Provisioning
//!
//! ビルドステージのワンショット変換 `(version, server_dir, secret) →
//! provisioned directory` を提供します。バージョン解決とjarのダウンロードは
//! PaperMCの公開APIに対して行い、`eula.txt` と `server.properties`
//! （RCONパスワード埋め込み済み）を書き出します。

pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod provisioner;

pub use api::{Build, Channel, PaperApi, select_build};
pub use config::ServerConfigWriter;
pub use download::download_jar;
pub use error::{ProvisionError, Result};
pub use provisioner::Provisioner;
