use colored::Colorize;
use paperdock_server::{JvmOptions, Supervisor, SupervisorOptions};
use std::path::{Path, PathBuf};
use tracing::info;

/// runコマンドを処理
///
/// サーバープロセスの終了コードを返します。呼び出し側がそのまま
/// プロセスの終了コードとして伝播させます。
pub async fn handle(
    server_dir: &Path,
    non_interactive: bool,
    command_file: Option<PathBuf>,
    heap_mb: u32,
) -> anyhow::Result<i32> {
    info!(
        server_dir = %server_dir.display(),
        non_interactive,
        heap_mb,
        "Starting orchestrator"
    );

    let options = SupervisorOptions {
        non_interactive,
        command_file,
        jvm: JvmOptions { heap_mb },
    };

    let supervisor = match Supervisor::for_server_dir(server_dir, options) {
        Ok(supervisor) => supervisor,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if non_interactive {
        println!(
            "{}",
            "サーバーを非対話モードで起動します。出力はログを確認してください。".blue()
        );
    } else {
        println!(
            "{}",
            "サーバーを起動します。コマンドを入力して操作できます（stopで停止）。".blue()
        );
    }

    let code = supervisor.run().await?;
    Ok(code)
}
