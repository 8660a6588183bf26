//! PaperDock Image Pipeline
//!
//! バージョンパラメータ付きのイメージビルドを提供します。Dockerfileの
//! レンダリング、ビルド引数のスレッディング、BuildKitシークレット
//! マウントによるRCONパスワードの受け渡しを担当します。シークレットの
//! 値がビルドメタデータ（引数リスト、イメージ履歴）に載ることは
//! ありません。

pub mod builder;
pub mod buildx;
pub mod dockerfile;
pub mod error;

pub use builder::{ImageInspector, connect};
pub use buildx::{BuildxOptions, buildx_args, default_tag, run_buildx};
pub use dockerfile::{DockerfileParams, render_dockerfile, write_dockerfile};
pub use error::{ImageError, Result};
