use crate::Result;
use camino::Utf8PathBuf;
use ohno::{IntoAppError, bail};
use std::process::{Command, Output, Stdio};

const LOG_TARGET: &str = "     shell";

/// Runs command lines through the platform shell, starting in a fixed directory.
#[derive(Debug, Clone)]
pub struct Shell {
    working_dir: Utf8PathBuf,
}

impl Shell {
    #[must_use]
    pub fn new(working_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Run `command_line` and return its standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started, exits with a non-zero status, or
    /// produces output that is not valid UTF-8.
    pub fn run(&self, command_line: &str) -> Result<String> {
        log::debug!(target: LOG_TARGET, "Running '{command_line}' in '{}'", self.working_dir);

        let output = shell_command(command_line)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .into_app_err_with(|| format!("could not spawn '{command_line}'"))?;

        check_output(&output, command_line)?;

        String::from_utf8(output.stdout).into_app_err_with(|| format!("'{command_line}' produced non-UTF-8 output"))
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    let _ = cmd.args(["/C", command_line]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    let _ = cmd.args(["-c", command_line]);
    cmd
}

fn check_output(output: &Output, command_line: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("'{command_line}' failed with {}: {}", output.status, stderr.trim());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitStatus;

    fn exit_status(code: i32) -> ExitStatus {
        #[cfg(unix)]
        let status = {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(code << 8)
        };

        #[cfg(windows)]
        let status = {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(u32::try_from(code).unwrap())
        };

        status
    }

    #[test]
    fn test_check_output_success() {
        let output = Output {
            status: exit_status(0),
            stdout: b"ok".to_vec(),
            stderr: vec![],
        };

        check_output(&output, "true").unwrap();
    }

    #[test]
    fn test_check_output_failure_includes_stderr() {
        let output = Output {
            status: exit_status(2),
            stdout: vec![],
            stderr: b"something broke\n".to_vec(),
        };

        let err = check_output(&output, "make").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'make' failed"), "unexpected message: {msg}");
        assert!(msg.contains("something broke"), "unexpected message: {msg}");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let shell = Shell::new(Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap());

        let out = shell.run("echo 42").unwrap();
        assert_eq!(out.trim(), "42");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_uses_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let shell = Shell::new(Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap());

        let out = shell.run("cat marker.txt").unwrap();
        assert_eq!(out, "here");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_non_zero_exit_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let shell = Shell::new(Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap());

        let _ = shell.run("exit 3").unwrap_err();
    }
}
