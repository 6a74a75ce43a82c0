use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Captured output of a successful tool run.
#[derive(Clone, Debug)]
pub struct ToolOutput {
    /// Bytes written to stdout.
    pub stdout: Vec<u8>,
    /// Bytes written to stderr (warnings are common even on success).
    pub stderr: Vec<u8>,
}

/// Why a tool run did not succeed.
#[derive(thiserror::Error, Debug)]
pub enum ToolFailure {
    /// The process could not be started at all.
    #[error("failed to spawn '{program}' (is it installed and on PATH?): {source}")]
    Spawn {
        /// Program that was launched.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The process ran and reported failure.
    #[error("'{program}' exited with {status}: {stderr}")]
    Exit {
        /// Program that was launched.
        program: String,
        /// Exit status as reported by the OS.
        status: ExitStatus,
        /// Trimmed stderr.
        stderr: String,
    },
}

/// A single external command, built from an argument vector (never a shell string).
#[derive(Clone, Debug)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Start a command for `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments in order.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Human-readable command line for logs.
    pub fn display(&self) -> String {
        let mut out = self.program.display().to_string();
        for a in &self.args {
            out.push(' ');
            let a = a.to_string_lossy();
            if a.is_empty() || a.contains(char::is_whitespace) {
                out.push_str(&format!("{a:?}"));
            } else {
                out.push_str(&a);
            }
        }
        out
    }

    /// Run to completion, capturing stdout and stderr.
    ///
    /// Blocks until the process exits.
    pub fn run(&self) -> Result<ToolOutput, ToolFailure> {
        let program = self.program.display().to_string();
        tracing::debug!(command = %self.display(), "running external tool");

        let out = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolFailure::Spawn {
                program: program.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(ToolFailure::Exit {
                program,
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        Ok(ToolOutput {
            stdout: out.stdout,
            stderr: out.stderr,
        })
    }
}

/// `true` when `program -version` runs successfully.
pub fn is_tool_on_path(program: impl AsRef<OsStr>) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/tool.rs"]
mod tests;
