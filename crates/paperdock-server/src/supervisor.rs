//! サーバープロセスの監督
//!
//! Orchestratorの中核。サーバーを子プロセスとして起動し、コンテナの
//! フォアグラウンドプロセスとして振る舞います:
//!
//! - SIGTERM/SIGINTを捕捉し、サーバーコンソールの `stop` コマンドに
//!   変換して転送する（graceful shutdown）
//! - 子プロセスの終了を待ってからのみ自身も終了する（孤児プロセスを
//!   残さない）
//! - 子プロセスの終了コードをそのまま伝播する（クラッシュを隠蔽しない）
//! - 非対話モードでは標準入力を一切読み取らない
//!
//! 再起動ポリシー: 子プロセスのクラッシュはOrchestrator自身にとっても
//! 致命的です。自動再起動はせず、コンテナランタイムの再起動ポリシーに
//! 委ねます。

use crate::commands::read_commands_from_file;
use crate::error::{Result, ServerError};
use crate::jar::find_latest_jar;
use crate::launch::JvmOptions;
use paperdock_core::PipelinePhase;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// サーバーコンソールの停止コマンド
const STOP_COMMAND: &str = "stop";

/// コンソールで停止として解釈する入力
const STOP_KEYWORDS: &[&str] = &["stop", "exit", "quit"];

/// 監督の動作オプション
#[derive(Debug, Clone, Default)]
pub struct SupervisorOptions {
    /// 標準入力を読まない（コンテナのエントリポイント用）
    pub non_interactive: bool,
    /// 起動直後に流し込むコマンドのファイル
    pub command_file: Option<PathBuf>,
    /// JVM設定
    pub jvm: JvmOptions,
}

/// コンソール入力イベント
enum ConsoleEvent {
    Command(String),
    Stop,
}

#[derive(Debug)]
pub struct Supervisor {
    command: Command,
    options: SupervisorOptions,
}

impl Supervisor {
    /// プロビジョニング済みディレクトリに対して監督を構成
    ///
    /// 最新のjarを発見し、カレントディレクトリをサーバーディレクトリに
    /// 設定したJVMコマンドを組み立てます。
    pub fn for_server_dir(dir: &Path, options: SupervisorOptions) -> Result<Self> {
        let jar = find_latest_jar(dir)?;
        info!(jar = %jar.display(), "Found server jar");

        let mut command = options.jvm.command(&jar);
        command.current_dir(dir);
        Ok(Self { command, options })
    }

    /// 任意のコマンドを監督（テスト用）
    pub fn with_command(command: Command, options: SupervisorOptions) -> Self {
        Self { command, options }
    }

    /// サーバーを起動し、終了まで監督する
    ///
    /// 子プロセスの終了コードを返します。呼び出し側はこれをプロセスの
    /// 終了コードとして伝播させる必要があります。
    pub async fn run(mut self) -> Result<i32> {
        // 起動前に検証できるものは全て検証する（起動後の部分状態を残さない）
        let automated_commands = match &self.options.command_file {
            Some(path) => read_commands_from_file(path)?,
            None => Vec::new(),
        };

        self.command
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = self.command.spawn().map_err(|e| ServerError::SpawnFailed {
            message: e.to_string(),
        })?;
        let mut stdin = child.stdin.take().ok_or(ServerError::StdinUnavailable)?;

        let mut phase = PipelinePhase::Running;
        info!(phase = %phase, "Server process started");

        if !automated_commands.is_empty() {
            info!(count = automated_commands.len(), "Running automated commands");
            for command in &automated_commands {
                send_line(&mut stdin, command).await?;
            }
        }

        // 対話コンソール（非対話モードでは標準入力に触れない）
        let (tx, mut rx) = mpsc::channel::<ConsoleEvent>(16);
        if !self.options.non_interactive {
            tokio::spawn(console_loop(tx));
        } else {
            drop(tx);
        }

        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| ServerError::SignalSetup(e.to_string()))?;
        let mut sigint = signal(SignalKind::interrupt())
            .map_err(|e| ServerError::SignalSetup(e.to_string()))?;

        let mut stopping = false;
        let mut exit_code = 1;
        while !phase.is_terminal() {
            tokio::select! {
                status = child.wait() => {
                    let status = status?;
                    exit_code = status.code().unwrap_or(1);
                    let next = if exit_code == 0 {
                        PipelinePhase::Stopped
                    } else {
                        PipelinePhase::Crashed
                    };
                    debug_assert!(phase.can_transition_to(next));
                    phase = next;
                    if exit_code == 0 {
                        info!(phase = %phase, "Server exited cleanly");
                    } else {
                        error!(phase = %phase, code = exit_code, "Server exited abnormally");
                    }
                }
                _ = sigterm.recv() => {
                    self.handle_stop_signal("SIGTERM", &mut child, &mut stdin, &mut stopping).await;
                }
                _ = sigint.recv() => {
                    self.handle_stop_signal("SIGINT", &mut child, &mut stdin, &mut stopping).await;
                }
                Some(event) = rx.recv() => {
                    match event {
                        ConsoleEvent::Stop => {
                            info!("Stop requested from console");
                            if send_line(&mut stdin, STOP_COMMAND).await.is_err() {
                                warn!("Failed to send stop command, killing server process");
                                child.kill().await.ok();
                            }
                            stopping = true;
                        }
                        ConsoleEvent::Command(line) => {
                            if send_line(&mut stdin, &line).await.is_err() {
                                warn!("Server stdin closed, ignoring console input");
                            }
                        }
                    }
                }
            }
        }
        Ok(exit_code)
    }

    /// 停止シグナルを処理
    ///
    /// 1回目は `stop` をコンソールに転送してgracefulに停止させる。
    /// 2回目以降、または転送に失敗した場合は子プロセスをkillする。
    /// どちらの場合もループは `child.wait()` の完了まで継続する。
    async fn handle_stop_signal(
        &self,
        signal_name: &str,
        child: &mut Child,
        stdin: &mut ChildStdin,
        stopping: &mut bool,
    ) {
        if *stopping {
            warn!(signal = signal_name, "Second stop signal, killing server process");
            child.kill().await.ok();
            return;
        }

        info!(signal = signal_name, "Forwarding shutdown to server");
        if send_line(stdin, STOP_COMMAND).await.is_err() {
            warn!("Failed to send stop command, killing server process");
            child.kill().await.ok();
        }
        *stopping = true;
    }
}

async fn send_line(stdin: &mut ChildStdin, line: &str) -> std::io::Result<()> {
    stdin.write_all(line.as_bytes()).await?;
    stdin.write_all(b"\n").await?;
    stdin.flush().await
}

/// 標準入力をコンソールイベントに変換するループ
///
/// 対話モードでのみ起動されます。EOFで終了します。
async fn console_loop(tx: mpsc::Sender<ConsoleEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event = if STOP_KEYWORDS.contains(&trimmed.to_lowercase().as_str()) {
            ConsoleEvent::Stop
        } else {
            ConsoleEvent::Command(trimmed.to_string())
        };
        if tx.send(event).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::time::timeout;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[tokio::test]
    async fn test_exit_code_propagates() {
        let supervisor = Supervisor::with_command(
            sh("exit 3"),
            SupervisorOptions {
                non_interactive: true,
                ..Default::default()
            },
        );

        let code = timeout(Duration::from_secs(10), supervisor.run())
            .await
            .expect("supervisor must not hang")
            .unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_clean_exit() {
        let supervisor = Supervisor::with_command(
            sh("exit 0"),
            SupervisorOptions {
                non_interactive: true,
                ..Default::default()
            },
        );

        let code = timeout(Duration::from_secs(10), supervisor.run())
            .await
            .expect("supervisor must not hang")
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_automated_stop_command() {
        let dir = tempdir().unwrap();
        let command_file = dir.path().join("commands.txt");
        fs::write(&command_file, "stop\n").unwrap();

        // stopを受け取ったら正常終了する擬似サーバー
        let supervisor = Supervisor::with_command(
            sh(r#"while read line; do [ "$line" = "stop" ] && exit 0; done; exit 7"#),
            SupervisorOptions {
                non_interactive: true,
                command_file: Some(command_file),
                ..Default::default()
            },
        );

        let code = timeout(Duration::from_secs(10), supervisor.run())
            .await
            .expect("supervisor must not hang")
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_sigterm_forwards_stop_and_exits_cleanly() {
        // stopを受け取ったら正常終了する擬似サーバー
        let supervisor = Supervisor::with_command(
            sh(r#"while read line; do [ "$line" = "stop" ] && exit 0; done; exit 7"#),
            SupervisorOptions {
                non_interactive: true,
                ..Default::default()
            },
        );

        let handle = tokio::spawn(supervisor.run());

        // シグナルハンドラの登録を待ってから自プロセスにSIGTERMを送る
        tokio::time::sleep(Duration::from_millis(500)).await;
        std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();

        let code = timeout(Duration::from_secs(10), handle)
            .await
            .expect("supervisor must not hang")
            .unwrap()
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_missing_command_file() {
        let dir = tempdir().unwrap();
        let supervisor = Supervisor::with_command(
            sh("exit 0"),
            SupervisorOptions {
                non_interactive: true,
                command_file: Some(dir.path().join("missing.txt")),
                ..Default::default()
            },
        );

        let err = supervisor.run().await.unwrap_err();
        assert!(matches!(err, ServerError::CommandFileNotFound { .. }));
    }

    #[test]
    fn test_for_server_dir_requires_provisioned_dir() {
        let dir = tempdir().unwrap();
        let err =
            Supervisor::for_server_dir(&dir.path().join("missing"), SupervisorOptions::default())
                .unwrap_err();
        assert!(matches!(err, ServerError::ServerDirNotFound { .. }));
    }
}
