//! PaperDock Core
//!
//! PaperDockパイプライン全体で共有されるモデルを提供します:
//! ビルドパラメータ、パイプラインの状態機械、シークレットの読み込み、
//! およびエラー型です。

pub mod error;
pub mod params;
pub mod phase;
pub mod secret;

pub use error::{CoreError, Result};
pub use params::{ARG_SERVER_DIR, ARG_VERSION, BuildParams};
pub use phase::PipelinePhase;
pub use secret::{DEFAULT_SECRET_PATH, SECRET_ID, load_secret, looks_sensitive};
