//! PaperDock Server Supervision
//!
//! コンテナのフォアグラウンドプロセスとしてPaperMCサーバーを監督します。
//! jarの発見、JVMの起動、シグナルの転送、終了コードの伝播を担当します。
//! 非対話モードでは標準入力を一切読み取りません。

pub mod commands;
pub mod error;
pub mod jar;
pub mod launch;
pub mod supervisor;

pub use commands::read_commands_from_file;
pub use error::{Result, ServerError};
pub use jar::find_latest_jar;
pub use launch::JvmOptions;
pub use supervisor::{Supervisor, SupervisorOptions};
