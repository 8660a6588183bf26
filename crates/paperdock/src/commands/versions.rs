use colored::Colorize;
use paperdock_provision::PaperApi;

/// 一覧表示の1行あたりのバージョン数
const COLUMNS: usize = 6;

/// versionsコマンドを処理
pub async fn handle(all: bool) -> anyhow::Result<()> {
    let api = PaperApi::new();

    let versions = match api.versions().await {
        Ok(versions) => versions,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e.user_message());
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        format!("利用可能なバージョン ({} 個):", versions.len()).bold()
    );

    if all {
        // 各バージョンの安定ビルドの有無を確認（バージョンごとに1リクエスト）
        for version in &versions {
            match api.experimental_only(version).await {
                Ok(true) => println!("  {} {}（experimentalのみ）", "⚠".yellow(), version),
                Ok(false) => println!("  {} {}", "✓".green(), version.cyan()),
                Err(_) => println!("  {} {}（確認失敗）", "?".yellow(), version),
            }
        }
    } else {
        for chunk in versions.chunks(COLUMNS) {
            let row: Vec<String> = chunk.iter().map(|v| format!("{:<10}", v)).collect();
            println!("  {}", row.join(" "));
        }
        println!();
        println!(
            "{}",
            "ヒント: --all で各バージョンの安定ビルド有無を確認できます".yellow()
        );
    }

    Ok(())
}
