//! JVM起動コマンドの組み立て
//!
//! Aikar's flags（G1GCチューニング済みのフラグセット）でPaperMCを
//! 起動します。<https://mcflags.emc.gs>

use std::path::Path;
use tokio::process::Command;

/// チューニング済みJVMフラグ（ヒープサイズ以外）
const AIKAR_FLAGS: &[&str] = &[
    "--add-modules=jdk.incubator.vector",
    "-XX:+UseG1GC",
    "-XX:+ParallelRefProcEnabled",
    "-XX:MaxGCPauseMillis=200",
    "-XX:+UnlockExperimentalVMOptions",
    "-XX:+DisableExplicitGC",
    "-XX:+AlwaysPreTouch",
    "-XX:G1HeapWastePercent=5",
    "-XX:G1MixedGCCountTarget=4",
    "-XX:InitiatingHeapOccupancyPercent=15",
    "-XX:G1MixedGCLiveThresholdPercent=90",
    "-XX:G1RSetUpdatingPauseTimePercent=5",
    "-XX:SurvivorRatio=32",
    "-XX:+PerfDisableSharedMem",
    "-XX:MaxTenuringThreshold=1",
    "-Dusing.aikars.flags=https://mcflags.emc.gs",
    "-Daikars.new.flags=true",
    "-XX:G1NewSizePercent=30",
    "-XX:G1MaxNewSizePercent=40",
    "-XX:G1HeapRegionSize=8M",
    "-XX:G1ReservePercent=20",
];

/// JVMオプション
#[derive(Debug, Clone)]
pub struct JvmOptions {
    /// ヒープサイズ（MB、XmsとXmxの両方に適用）
    pub heap_mb: u32,
}

impl Default for JvmOptions {
    fn default() -> Self {
        Self { heap_mb: 4096 }
    }
}

impl JvmOptions {
    /// jarを起動するコマンドを組み立てる
    ///
    /// `--nogui` で起動します。GUIはコンテナ内では意味を持ちません。
    pub fn command(&self, jar_path: &Path) -> Command {
        let mut cmd = Command::new("java");
        cmd.arg(format!("-Xms{}M", self.heap_mb))
            .arg(format!("-Xmx{}M", self.heap_mb))
            .args(AIKAR_FLAGS)
            .arg("-jar")
            .arg(jar_path)
            .arg("--nogui");
        cmd
    }

    /// 引数リストを取得（テストおよびログ表示用）
    pub fn args_for(&self, jar_path: &Path) -> Vec<String> {
        let mut args = vec![
            format!("-Xms{}M", self.heap_mb),
            format!("-Xmx{}M", self.heap_mb),
        ];
        args.extend(AIKAR_FLAGS.iter().map(|s| s.to_string()));
        args.push("-jar".to_string());
        args.push(jar_path.display().to_string());
        args.push("--nogui".to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_heap() {
        let opts = JvmOptions::default();
        let args = opts.args_for(&PathBuf::from("paper-1.20.4-496.jar"));
        assert!(args.contains(&"-Xms4096M".to_string()));
        assert!(args.contains(&"-Xmx4096M".to_string()));
    }

    #[test]
    fn test_nogui_is_last() {
        let opts = JvmOptions { heap_mb: 2048 };
        let args = opts.args_for(&PathBuf::from("paper.jar"));
        assert_eq!(args.last().unwrap(), "--nogui");
        let jar_pos = args.iter().position(|a| a == "-jar").unwrap();
        assert_eq!(args[jar_pos + 1], "paper.jar");
    }
}
