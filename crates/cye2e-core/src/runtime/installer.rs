//! Dependency installation for the generated project
//!
//! Runs the package manager in the target directory and streams its output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Default timeout for `npm install` (10 minutes)
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Time allowed for the process to exit once its output has closed
const EXIT_GRACE: Duration = Duration::from_secs(5);

/// Runs an install command in a project directory
#[derive(Debug, Clone)]
pub struct Installer {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
    timeout: Duration,
}

impl Installer {
    /// `npm install` in `dir`
    pub fn npm(dir: impl Into<PathBuf>) -> Self {
        let program = if cfg!(windows) { "npm.cmd" } else { "npm" };
        Self::new(program, ["install"], dir)
    }

    pub fn new<I, S>(program: impl Into<String>, args: I, dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            dir: dir.into(),
            timeout: INSTALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The command line as shown to the user
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }

    /// Run the command, streaming stdout and stderr line by line
    pub async fn run(&self) -> Result<()> {
        let cmd = self.command_line();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new(&self.program)
            .args(&self.args)
            .current_dir(&self.dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start '{}'", cmd))?;

        let stdout = child
            .stdout
            .take()
            .context("Failed to capture installer stdout")?;
        let stderr = child
            .stderr
            .take()
            .context("Failed to capture installer stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stdout_open = true;
            let mut stderr_open = true;
            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_reader.next_line(), if stdout_open => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => stdout_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_open = false;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(self.timeout, output_task).await.is_err() {
            let _ = child.kill().await;
            println!();
            anyhow::bail!(
                "'{}' timed out after {} seconds.\nRun it manually in {}",
                cmd,
                self.timeout.as_secs(),
                self.dir.display()
            );
        }

        match timeout(EXIT_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                if status.success() {
                    tracing::debug!(command = %cmd, "install finished");
                    Ok(())
                } else {
                    anyhow::bail!(
                        "'{}' failed with exit code: {}",
                        cmd,
                        status.code().unwrap_or(-1)
                    );
                }
            }
            Ok(Err(e)) => anyhow::bail!("Failed to wait for '{}': {}", cmd, e),
            Err(_) => {
                let _ = child.kill().await;
                anyhow::bail!("'{}' hung after closing its output", cmd);
            }
        }
    }
}
