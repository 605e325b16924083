//! Invocation of the external `7zz` binary and classification of its output.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::SEVEN_ZZ_BASENAME;
use crate::error::{Result, ShellError};
use crate::utils::resolve_resource_path;

/// Finished run of the archive tool.
#[derive(Debug, Clone)]
pub struct ToolRun {
    pub success: bool,
    /// stdout followed by stderr.
    pub output: String,
}

pub trait ArchiveTool: Send + Sync {
    /// Path the tool is invoked from, reported when it cannot be found.
    fn location(&self) -> &Path;

    fn run(&self, args: &[String]) -> Result<ToolRun>;
}

/// How a tool run should be handled by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded(String),
    ToolNotFound(PathBuf),
    PasswordRequired,
    Failed(String),
}

pub struct SevenZz {
    path: PathBuf,
}

impl SevenZz {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolves the bundled binary and makes sure it is executable.
    pub fn locate() -> Self {
        let path = resolve_resource_path(SEVEN_ZZ_BASENAME);
        if path != Path::new(SEVEN_ZZ_BASENAME) {
            if let Err(e) = ensure_executable(&path) {
                warn!("Could not mark {:?} executable: {}", path, e);
            }
        }
        info!("Using archive tool at {:?}", path);
        Self { path }
    }
}

impl ArchiveTool for SevenZz {
    fn location(&self) -> &Path {
        &self.path
    }

    fn run(&self, args: &[String]) -> Result<ToolRun> {
        debug!("Running {:?} {:?}", self.path, redact(args));
        let output = Command::new(&self.path).args(args).output().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ShellError::ToolNotFound {
                    path: self.path.clone(),
                }
            } else {
                ShellError::Spawn {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!("{:?} exited with {}", self.path, output.status);

        Ok(ToolRun {
            success: output.status.success(),
            output: combined,
        })
    }
}

#[cfg(unix)]
fn ensure_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn password_arg(password: Option<&str>) -> String {
    format!("-p{}", password.unwrap_or_default())
}

/// `l -slt <archive> -p[password]`. A bare `-p` keeps 7zz from blocking on
/// an interactive prompt.
pub fn list_args(archive: &Path, password: Option<&str>) -> Vec<String> {
    vec![
        "l".to_string(),
        "-slt".to_string(),
        archive.to_string_lossy().into_owned(),
        password_arg(password),
    ]
}

pub fn extract_args(archive: &Path, output_dir: &Path, password: Option<&str>) -> Vec<String> {
    vec![
        "x".to_string(),
        archive.to_string_lossy().into_owned(),
        "-y".to_string(),
        format!("-o{}", output_dir.to_string_lossy()),
        password_arg(password),
    ]
}

/// Argument list safe for logging.
pub fn redact(args: &[String]) -> Vec<&str> {
    args.iter()
        .map(|arg| if arg.starts_with("-p") && arg.len() > 2 { "-p***" } else { arg.as_str() })
        .collect()
}

/// Whether 7zz output says the archive needs a (different) password.
///
/// The `encrypted` + `password` pair may also match unrelated diagnostics.
pub fn needs_password(output: &str) -> bool {
    let lower = output.to_lowercase();
    lower.contains("enter password")
        || lower.contains("wrong password")
        || (lower.contains("encrypted") && lower.contains("password"))
}

pub fn classify(result: Result<ToolRun>) -> Outcome {
    match result {
        Err(ShellError::ToolNotFound { path }) => Outcome::ToolNotFound(path),
        Err(e) => Outcome::Failed(e.to_string()),
        Ok(run) if needs_password(&run.output) => Outcome::PasswordRequired,
        Ok(run) if !run.success => Outcome::Failed(run.output),
        Ok(run) => Outcome::Succeeded(run.output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(success: bool, output: &str) -> Result<ToolRun> {
        Ok(ToolRun {
            success,
            output: output.to_string(),
        })
    }

    #[test]
    fn password_prompts_are_detected() {
        assert!(needs_password("Enter password (will not be echoed):"));
        assert!(needs_password("ERROR: Wrong password : secret.txt"));
        assert!(needs_password(
            "Can not open encrypted archive. Wrong password?"
        ));
        assert!(needs_password("file is Encrypted ... need a PASSWORD"));
    }

    #[test]
    fn ordinary_output_is_not_a_prompt() {
        assert!(!needs_password("Everything is Ok"));
        assert!(!needs_password("Everything is fine"));
        assert!(!needs_password("Encrypted = -"));
        assert!(!needs_password(""));
    }

    #[test]
    fn classify_prefers_password_over_exit_status() {
        assert_eq!(
            classify(run(false, "Enter password (will not be echoed):")),
            Outcome::PasswordRequired
        );
    }

    #[test]
    fn classify_failures_keep_output() {
        assert_eq!(
            classify(run(false, "ERROR: Cannot open the file as archive")),
            Outcome::Failed("ERROR: Cannot open the file as archive".to_string())
        );
        assert_eq!(
            classify(run(true, "Everything is Ok")),
            Outcome::Succeeded("Everything is Ok".to_string())
        );
    }

    #[test]
    fn classify_missing_tool() {
        let err = Err(ShellError::ToolNotFound {
            path: PathBuf::from("/opt/app/7zz"),
        });
        assert_eq!(
            classify(err),
            Outcome::ToolNotFound(PathBuf::from("/opt/app/7zz"))
        );
    }

    #[test]
    fn missing_binary_maps_to_not_found() {
        let tool = SevenZz::new(PathBuf::from("/nonexistent/dir/7zz-missing"));
        match tool.run(&["i".to_string()]) {
            Err(ShellError::ToolNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/dir/7zz-missing"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn arguments_follow_7zz_conventions() {
        let archive = Path::new("/tmp/a.7z");
        assert_eq!(list_args(archive, None), ["l", "-slt", "/tmp/a.7z", "-p"]);
        assert_eq!(
            list_args(archive, Some("pw")),
            ["l", "-slt", "/tmp/a.7z", "-ppw"]
        );
        assert_eq!(
            extract_args(archive, Path::new("/tmp/a"), None),
            ["x", "/tmp/a.7z", "-y", "-o/tmp/a", "-p"]
        );
    }

    #[test]
    fn redaction_hides_password() {
        let args = list_args(Path::new("a.zip"), Some("hunter2"));
        assert_eq!(redact(&args), ["l", "-slt", "a.zip", "-p***"]);
        let args = list_args(Path::new("a.zip"), None);
        assert_eq!(redact(&args), ["l", "-slt", "a.zip", "-p"]);
    }
}
