use serde::Serialize;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::metadata;

/// Default ceiling for a build command. `--timeout 0` disables the limit.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    pub command: String,
    pub utility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    pub skipped: bool,
    pub exit_code: i32,
    pub success: bool,
}

/// Build one utility from its metadata.
///
/// No build command (absent or empty) is a trivial success, not an error.
/// A present command runs through the shell with the utility directory as
/// working directory and stdio inherited, so its output streams live.
/// `timeout_secs` bounds execution; 0 disables the limit.
pub fn run(utility_dir: &Path, timeout_secs: u64) -> Result<(BuildOutput, i32)> {
    let utility = utility_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| utility_dir.display().to_string());

    let meta = metadata::load(utility_dir)?;

    let Some(build_command) = meta.build_command().map(str::to_string) else {
        log_status!("build", "No build command for {}, skipping", utility);
        return Ok((
            BuildOutput {
                command: "build.run".to_string(),
                utility,
                build_command: None,
                skipped: true,
                exit_code: 0,
                success: true,
            },
            0,
        ));
    };

    log_status!("build", "Building {}...", utility);
    log_status!("build", "Running: {}", build_command);

    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
    let exit_code = execute_streaming(&build_command, utility_dir, timeout, &utility)?;

    // Signal termination has no ordinary exit code; report it as a failure.
    if exit_code < 0 {
        return Err(Error::build_command_failed(utility, build_command, exit_code));
    }

    let success = exit_code == 0;

    if success {
        log_status!("build", "Build succeeded for {}", utility);
    } else {
        log_status!("build", "Build failed for {}", utility);
    }

    Ok((
        BuildOutput {
            command: "build.run".to_string(),
            utility,
            build_command: Some(build_command),
            skipped: false,
            exit_code,
            success,
        },
        exit_code,
    ))
}

/// Run an opaque shell command in `dir` with inherited stdio.
///
/// The command is user-supplied shell code; no attempt is made to parse
/// it. With a timeout, the child is polled and killed once the deadline
/// passes. Exit code -1 stands in for signal termination.
fn execute_streaming(
    command: &str,
    dir: &Path,
    timeout: Option<Duration>,
    utility: &str,
) -> Result<i32> {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    };

    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    };

    cmd.current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = cmd
        .spawn()
        .map_err(|e| Error::build_launch_failed(utility, command, e.to_string()))?;

    let Some(limit) = timeout else {
        let status = child
            .wait()
            .map_err(|e| Error::internal_io(e.to_string(), Some("wait for build".to_string())))?;
        return Ok(status.code().unwrap_or(-1));
    };

    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status.code().unwrap_or(-1)),
            Ok(None) => {
                if started.elapsed() >= limit {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::build_timeout(utility, command, limit.as_secs()));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(Error::internal_io(
                    e.to_string(),
                    Some("poll build process".to_string()),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utility_dir(json: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("util.json"), json).unwrap();
        dir
    }

    #[test]
    fn missing_metadata_fails_without_panicking() {
        let dir = TempDir::new().unwrap();
        let err = run(dir.path(), DEFAULT_TIMEOUT_SECS).unwrap_err();
        assert_eq!(err.code.as_str(), "metadata.not_found");
    }

    #[test]
    fn malformed_metadata_is_a_failure() {
        let dir = utility_dir("{broken");
        let err = run(dir.path(), DEFAULT_TIMEOUT_SECS).unwrap_err();
        assert_eq!(err.code.as_str(), "metadata.invalid_json");
    }

    #[test]
    fn no_build_command_succeeds_trivially() {
        let dir = utility_dir(r#"{"name": "Tool"}"#);
        let (output, exit_code) = run(dir.path(), DEFAULT_TIMEOUT_SECS).unwrap();

        assert!(output.skipped);
        assert!(output.success);
        assert_eq!(exit_code, 0);
        assert!(output.build_command.is_none());
    }

    #[test]
    fn empty_build_command_counts_as_no_build() {
        let dir = utility_dir(r#"{"build": "  "}"#);
        let (output, _) = run(dir.path(), DEFAULT_TIMEOUT_SECS).unwrap();
        assert!(output.skipped);
    }

    #[test]
    fn successful_command_reports_exit_zero() {
        let dir = utility_dir(r#"{"build": "true"}"#);
        let (output, exit_code) = run(dir.path(), DEFAULT_TIMEOUT_SECS).unwrap();

        assert!(!output.skipped);
        assert!(output.success);
        assert_eq!(exit_code, 0);
    }

    #[test]
    fn failing_command_preserves_exit_code() {
        let dir = utility_dir(r#"{"build": "exit 7"}"#);
        let (output, exit_code) = run(dir.path(), DEFAULT_TIMEOUT_SECS).unwrap();

        assert!(!output.success);
        assert_eq!(exit_code, 7);
        assert_eq!(output.exit_code, 7);
    }

    #[test]
    fn command_runs_in_utility_directory() {
        let dir = utility_dir(r#"{"build": "echo built > marker.txt"}"#);
        run(dir.path(), DEFAULT_TIMEOUT_SECS).unwrap();
        assert!(dir.path().join("marker.txt").exists());
    }

    #[test]
    fn hung_command_is_killed_on_timeout() {
        let dir = utility_dir(r#"{"build": "sleep 30"}"#);
        let started = Instant::now();
        let err = run(dir.path(), 1).unwrap_err();

        assert_eq!(err.code.as_str(), "build.timeout");
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn zero_timeout_disables_the_limit() {
        let dir = utility_dir(r#"{"build": "true"}"#);
        let (output, _) = run(dir.path(), 0).unwrap();
        assert!(output.success);
    }
}
