//! サーバーjarの発見
//!
//! プロビジョニング済みディレクトリから `paper-<version>-<build>.jar`
//! 形式のjarを探し、名前の降順で最新のものを選びます。

use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tracing::debug;

const JAR_PREFIX: &str = "paper-";
const JAR_SUFFIX: &str = ".jar";

/// ディレクトリ内の最新のPaperMC jarを返す
pub fn find_latest_jar(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(ServerError::ServerDirNotFound {
            dir: dir.to_path_buf(),
        });
    }

    let mut jars: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(JAR_PREFIX) && name.ends_with(JAR_SUFFIX))
        .collect();

    if jars.is_empty() {
        return Err(ServerError::JarNotFound {
            dir: dir.to_path_buf(),
        });
    }

    jars.sort_unstable_by(|a, b| b.cmp(a));
    let latest = dir.join(&jars[0]);
    debug!(jar = %latest.display(), "Selected server jar");
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_find_latest_jar() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("paper-1.20.4-495.jar"), b"").unwrap();
        fs::write(dir.path().join("paper-1.20.4-496.jar"), b"").unwrap();
        fs::write(dir.path().join("server.properties"), b"").unwrap();

        let jar = find_latest_jar(dir.path()).unwrap();
        assert_eq!(jar.file_name().unwrap(), "paper-1.20.4-496.jar");
    }

    #[test]
    fn test_find_latest_jar_ignores_other_jars() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("paper-1.20.4-100.jar"), b"").unwrap();
        // プラグイン等のjarは対象外
        fs::write(dir.path().join("zplugin.jar"), b"").unwrap();

        let jar = find_latest_jar(dir.path()).unwrap();
        assert_eq!(jar.file_name().unwrap(), "paper-1.20.4-100.jar");
    }

    #[test]
    fn test_find_latest_jar_empty_dir() {
        let dir = tempdir().unwrap();
        let err = find_latest_jar(dir.path()).unwrap_err();
        assert!(matches!(err, ServerError::JarNotFound { .. }));
    }

    #[test]
    fn test_find_latest_jar_missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = find_latest_jar(&missing).unwrap_err();
        assert!(matches!(err, ServerError::ServerDirNotFound { .. }));
    }
}
