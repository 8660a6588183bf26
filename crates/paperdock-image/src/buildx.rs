//! docker buildx によるイメージビルド
//!
//! シークレットマウント（`--secret id=rcon_password,src=<file>`）は
//! BuildKitの機能のため、ビルド本体はbollardではなく `docker buildx
//! build` のサブプロセス実行で行います。シークレットの「値」は
//! 引数リストに一切現れません。渡すのはファイルパスのみです。

use crate::error::{ImageError, Result};
use paperdock_core::{ARG_SERVER_DIR, ARG_VERSION, BuildParams, SECRET_ID};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// buildx実行のオプション
#[derive(Debug, Clone)]
pub struct BuildxOptions {
    pub tag: String,
    pub platform: Option<String>,
    pub no_cache: bool,
    pub push: bool,
    /// 追加のビルド引数（機密らしきキーは拒否される）
    pub extra_build_args: BTreeMap<String, String>,
}

impl BuildxOptions {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            platform: None,
            no_cache: false,
            push: false,
            extra_build_args: BTreeMap::new(),
        }
    }
}

/// buildxの引数ベクタを組み立てる
///
/// シークレットファイルは存在と非空を事前検証しますが、読み込んだ値は
/// 破棄され、引数にはパスだけが入ります。
pub fn buildx_args(
    dockerfile: &Path,
    context: &Path,
    params: &BuildParams,
    secret_file: &Path,
    options: &BuildxOptions,
) -> Result<Vec<String>> {
    // fail-closed: シークレットがなければビルドは始まらない
    paperdock_core::load_secret(secret_file)?;

    for key in options.extra_build_args.keys() {
        if paperdock_core::looks_sensitive(key) {
            return Err(ImageError::SecretBuildArg { key: key.clone() });
        }
    }

    if !context.is_dir() {
        return Err(ImageError::ContextNotFound(context.to_path_buf()));
    }

    let mut args: Vec<String> = vec![
        "buildx".into(),
        "build".into(),
        "--secret".into(),
        format!("id={},src={}", SECRET_ID, secret_file.display()),
        "--build-arg".into(),
        format!("{}={}", ARG_VERSION, params.version),
        "--build-arg".into(),
        format!("{}={}", ARG_SERVER_DIR, params.server_dir),
        "-t".into(),
        options.tag.clone(),
        "-f".into(),
        dockerfile.display().to_string(),
    ];

    for (key, value) in &options.extra_build_args {
        args.push("--build-arg".into());
        args.push(format!("{}={}", key, value));
    }

    if let Some(platform) = &options.platform {
        args.push("--platform".into());
        args.push(platform.clone());
    }

    if options.no_cache {
        args.push("--no-cache".into());
    }

    if options.push {
        args.push("--push".into());
    } else {
        args.push("--load".into());
    }

    args.push(context.display().to_string());
    Ok(args)
}

/// buildxビルドを実行
pub fn run_buildx(
    dockerfile: &Path,
    context: &Path,
    params: &BuildParams,
    secret_file: &Path,
    options: &BuildxOptions,
) -> Result<()> {
    use std::process::Command;

    let args = buildx_args(dockerfile, context, params, secret_file, options)?;
    debug!(args = ?args, "Running docker buildx");
    info!(tag = %options.tag, version = %params.version, "Building image");

    let output = Command::new("docker").args(&args).output()?;

    if !output.status.success() {
        return Err(ImageError::BuildxFailed {
            status: output.status.code().unwrap_or(1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    info!(tag = %options.tag, "Image build complete");
    Ok(())
}

/// デフォルトのイメージタグを組み立てる
pub fn default_tag(params: &BuildParams) -> String {
    format!("paperdock-{}:{}", params.server_dir, params.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf, BuildParams) {
        let dir = tempdir().unwrap();
        let dockerfile = dir.path().join("Dockerfile");
        fs::write(&dockerfile, "FROM alpine").unwrap();
        let secret_file = dir.path().join("rcon_password");
        fs::write(&secret_file, "s3cret\n").unwrap();
        let params = BuildParams::new("1.20.4", "server").unwrap();
        (dir, dockerfile, secret_file, params)
    }

    #[test]
    fn test_buildx_args_secret_by_path_only() {
        let (dir, dockerfile, secret_file, params) = setup();
        let options = BuildxOptions::new("paperdock-server:1.20.4");

        let args = buildx_args(&dockerfile, dir.path(), &params, &secret_file, &options).unwrap();

        // シークレットの値は引数ベクタに現れない
        assert!(args.iter().all(|a| !a.contains("s3cret")));
        // パスはシークレットマウント指定として現れる
        assert!(
            args.iter()
                .any(|a| a == &format!("id=rcon_password,src={}", secret_file.display()))
        );
    }

    #[test]
    fn test_buildx_args_threads_build_params() {
        let (dir, dockerfile, secret_file, params) = setup();
        let options = BuildxOptions::new("t");

        let args = buildx_args(&dockerfile, dir.path(), &params, &secret_file, &options).unwrap();

        assert!(args.contains(&"VERSION=1.20.4".to_string()));
        assert!(args.contains(&"SERVER_DIR=server".to_string()));
        // ロードかプッシュのどちらかで終端する
        assert!(args.contains(&"--load".to_string()));
    }

    #[test]
    fn test_buildx_args_missing_secret_fails_closed() {
        let (dir, dockerfile, _, params) = setup();
        let options = BuildxOptions::new("t");
        let missing = dir.path().join("missing_secret");

        let err = buildx_args(&dockerfile, dir.path(), &params, &missing, &options).unwrap_err();
        assert!(matches!(err, ImageError::SecretFile(_)));
    }

    #[test]
    fn test_buildx_args_empty_secret_fails_closed() {
        let (dir, dockerfile, secret_file, params) = setup();
        fs::write(&secret_file, "\n").unwrap();
        let options = BuildxOptions::new("t");

        let err =
            buildx_args(&dockerfile, dir.path(), &params, &secret_file, &options).unwrap_err();
        assert!(matches!(err, ImageError::SecretFile(_)));
    }

    #[test]
    fn test_buildx_args_rejects_sensitive_build_arg() {
        let (dir, dockerfile, secret_file, params) = setup();
        let mut options = BuildxOptions::new("t");
        options
            .extra_build_args
            .insert("RCON_PASSWORD".to_string(), "oops".to_string());

        let err =
            buildx_args(&dockerfile, dir.path(), &params, &secret_file, &options).unwrap_err();
        assert!(matches!(err, ImageError::SecretBuildArg { .. }));
    }

    #[test]
    fn test_buildx_args_push_replaces_load() {
        let (dir, dockerfile, secret_file, params) = setup();
        let mut options = BuildxOptions::new("t");
        options.push = true;

        let args = buildx_args(&dockerfile, dir.path(), &params, &secret_file, &options).unwrap();
        assert!(args.contains(&"--push".to_string()));
        assert!(!args.contains(&"--load".to_string()));
    }

    #[test]
    fn test_default_tag() {
        let params = BuildParams::new("1.20.4", "server").unwrap();
        assert_eq!(default_tag(&params), "paperdock-server:1.20.4");
    }
}
