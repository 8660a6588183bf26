use colored::Colorize;
use paperdock_core::BuildParams;
use paperdock_image::{BuildxOptions, DockerfileParams};
use std::path::Path;

/// buildコマンドを処理
///
/// Dockerfileを一時ディレクトリにレンダリングし、buildxで
/// シークレットマウント付きビルドを実行します。
#[allow(clippy::too_many_arguments)]
pub async fn handle(
    version: &str,
    server_dir: &str,
    password_file: &Path,
    tag: Option<String>,
    platform: Option<String>,
    push: bool,
    no_cache: bool,
    context: &Path,
) -> anyhow::Result<()> {
    let params = BuildParams::new(version, server_dir)?;
    let tag = tag.unwrap_or_else(|| paperdock_image::default_tag(&params));

    println!("{}", "Dockerイメージをビルド中...".green());
    println!("バージョン: {}", params.version.cyan());
    println!("サーバーディレクトリ: {}", params.server_dir.cyan());
    println!("イメージ: {}", tag.cyan());
    if let Some(p) = &platform {
        println!("プラットフォーム: {}", p.cyan());
    }

    let temp_dir = tempfile::tempdir()?;
    let dockerfile = paperdock_image::write_dockerfile(&DockerfileParams::default(), temp_dir.path())?;

    let mut options = BuildxOptions::new(tag.clone());
    options.platform = platform;
    options.push = push;
    options.no_cache = no_cache;

    println!();
    println!("  {} docker buildx build を実行中...", "→".blue());
    if let Err(e) = paperdock_image::run_buildx(&dockerfile, context, &params, password_file, &options) {
        eprintln!("  {} ビルドエラー: {}", "✗".red().bold(), e);
        std::process::exit(1);
    }

    println!();
    if push {
        println!("{}", "✓ イメージがビルド＆プッシュされました！".green().bold());
    } else {
        println!("{}", "✓ イメージがビルドされました！".green().bold());
    }
    println!("  {} {}", "✓".green(), tag.cyan());

    Ok(())
}
