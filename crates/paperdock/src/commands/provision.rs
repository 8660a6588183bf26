use colored::Colorize;
use paperdock_core::CoreError;
use paperdock_provision::Provisioner;
use std::path::{Path, PathBuf};

/// provisionコマンドを処理
///
/// シークレットの解決順序: 位置引数 > シークレットファイル。
/// どちらも無い・空の場合はハードエラー（デフォルト値なし）。
pub async fn handle(
    version: &str,
    server_dir: &Path,
    rcon_password: Option<String>,
    password_file: &Path,
) -> anyhow::Result<()> {
    let secret = match rcon_password {
        Some(value) => {
            if value.trim().is_empty() {
                return Err(CoreError::EmptySecret {
                    path: PathBuf::from("<argument>"),
                }
                .into());
            }
            value
        }
        None => paperdock_core::load_secret(password_file)?,
    };

    println!("{}", "サーバーディレクトリをプロビジョニング中...".green());
    println!("バージョン: {}", version.cyan());
    println!(
        "ディレクトリ: {}",
        server_dir.display().to_string().cyan()
    );

    let provisioner = Provisioner::new();
    match provisioner.provision(version, server_dir, &secret).await {
        Ok(dir) => {
            println!();
            println!("{}", "✓ プロビジョニング完了！".green().bold());
            println!("  {}", dir.display().to_string().cyan());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e.user_message());
            std::process::exit(1);
        }
    }
}
