mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paperdock")]
#[command(about = "バージョン指定のPaperMCサーバーを、ビルドして、動かす。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// サーバーディレクトリをプロビジョニング（イメージビルドステップ用）
    Provision {
        /// PaperMCサーバーのバージョン（例: 1.20.4）
        version: String,
        /// プロビジョニング先ディレクトリ
        server_dir: PathBuf,
        /// RCONパスワード（省略時はシークレットファイルから読み込み）
        rcon_password: Option<String>,
        /// シークレットファイルのパス（BuildKitシークレットマウント）
        #[arg(long, default_value = paperdock_core::DEFAULT_SECRET_PATH)]
        password_file: PathBuf,
    },
    /// プロビジョニング済みディレクトリでサーバーを起動・監督
    Run {
        /// サーバーディレクトリ（コンテナ内では "."）
        server_dir: PathBuf,
        /// 標準入力を読まない（コンテナのエントリポイント用）
        #[arg(long)]
        non_interactive: bool,
        /// 起動直後に実行するコマンドのファイル
        #[arg(long)]
        commands: Option<PathBuf>,
        /// JVMヒープサイズ（MB）
        #[arg(long, default_value = "4096")]
        heap_mb: u32,
    },
    /// Dockerイメージをビルド（シークレットマウント経由でパスワードを注入）
    Build {
        /// PaperMCサーバーのバージョン
        #[arg(long)]
        version: String,
        /// イメージ内のプロビジョニング先ディレクトリ
        #[arg(long)]
        server_dir: String,
        /// RCONパスワードを書いたファイル
        #[arg(long)]
        password_file: PathBuf,
        /// イメージタグ（省略時は paperdock-{server_dir}:{version}）
        #[arg(long)]
        tag: Option<String>,
        /// ターゲットプラットフォーム（例: linux/amd64）
        #[arg(long)]
        platform: Option<String>,
        /// ビルド後にレジストリにプッシュ
        #[arg(long)]
        push: bool,
        /// キャッシュを使用しない
        #[arg(long)]
        no_cache: bool,
        /// ビルドコンテキスト
        #[arg(long, default_value = ".")]
        context: PathBuf,
    },
    /// 利用可能なPaperMCバージョンを一覧表示
    Versions {
        /// 各バージョンの安定ビルド有無も確認する（リクエスト数が増える）
        #[arg(long)]
        all: bool,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Provision {
            version,
            server_dir,
            rcon_password,
            password_file,
        } => {
            commands::provision::handle(&version, &server_dir, rcon_password, &password_file)
                .await?;
        }
        Commands::Run {
            server_dir,
            non_interactive,
            commands: command_file,
            heap_mb,
        } => {
            // 子プロセスの終了コードをコンテナの終了コードとして伝播する
            let code =
                commands::run::handle(&server_dir, non_interactive, command_file, heap_mb).await?;
            std::process::exit(code);
        }
        Commands::Build {
            version,
            server_dir,
            password_file,
            tag,
            platform,
            push,
            no_cache,
            context,
        } => {
            commands::build::handle(
                &version,
                &server_dir,
                &password_file,
                tag,
                platform,
                push,
                no_cache,
                &context,
            )
            .await?;
        }
        Commands::Versions { all } => {
            commands::versions::handle(all).await?;
        }
        Commands::Version => {
            println!("paperdock {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
