//! Invocation of the companion tool through the package runner.
//!
//! The companion tool is always run from its own directory, so every
//! invocation enters it with a [`WorkdirGuard`] which puts the process back
//! where it was when dropped, whether the invocation succeeded or not.

use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};

use color_eyre::eyre::{Context, Result, bail};
use tracing::{debug, instrument, trace};

/// Changes the working directory and restores the original one on drop.
#[derive(Debug)]
#[must_use = "the working directory is restored as soon as the guard is dropped"]
pub struct WorkdirGuard {
    original: PathBuf,
}

impl WorkdirGuard {
    /// Enter `dir`, remembering the current directory.
    pub fn enter(dir: &Path) -> Result<Self> {
        let original = env::current_dir().context("read current directory")?;
        env::set_current_dir(dir).with_context(|| format!("enter directory: {dir:?}"))?;
        debug!(?original, ?dir, "workdir.enter");
        Ok(Self { original })
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        match env::set_current_dir(&self.original) {
            Ok(()) => debug!(original = ?self.original, "workdir.restore"),
            Err(error) => {
                tracing::error!(?error, original = ?self.original, "workdir.restore.failed")
            }
        }
    }
}

/// Combined output and exit state of one companion tool command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Whether the command exited with status zero.
    pub success: bool,

    /// Everything the command wrote to stdout and stderr, one line per line,
    /// without trailing whitespace.
    pub output: String,
}

/// Runs package scripts of the companion tool.
#[derive(Debug, Clone)]
pub struct Runner {
    program: OsString,
    companion_dir: PathBuf,
}

impl Runner {
    /// Create a runner that invokes `program` (usually `npm`) in `companion_dir`.
    ///
    /// A `program` given as a path is resolved up front so that it still
    /// points at the same file after entering the companion directory.
    pub fn new(program: impl Into<OsString>, companion_dir: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let program = if Path::new(&program).components().count() > 1 {
            Path::new(&program)
                .canonicalize()
                .map(PathBuf::into_os_string)
                .unwrap_or(program)
        } else {
            program
        };

        Self {
            program,
            companion_dir: companion_dir.into(),
        }
    }

    /// The runner's name as shown to users.
    pub fn name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .unwrap_or(&self.program)
            .to_string_lossy()
            .into_owned()
    }

    /// Install the companion tool's dependencies with `<runner> install`.
    #[instrument(skip(self), fields(program = ?self.program))]
    pub fn install(&self) -> Result<()> {
        self.require_companion_dir()?;
        let _guard = WorkdirGuard::enter(&self.companion_dir)?;

        let output = Command::new(&self.program)
            .arg("install")
            .output()
            .wrap_err_with(|| format!("run {} install", self.name()))?;
        if !output.status.success() {
            bail!(
                "{} install failed: {}",
                self.name(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }

    /// Run `<runner> run <script> <series>`, echoing its output to stdout.
    pub fn run(&self, script: &str, series: &str) -> Result<RunOutput> {
        self.run_with(script, series, |line| println!("{line}"))
    }

    /// Run `<runner> run <script> <series>`, passing each output line to
    /// `on_line` as soon as it is available.
    ///
    /// Stdout and stderr share a single pipe so lines arrive in the order the
    /// command wrote them. Errors mean the command could not be run at all;
    /// a command that ran and failed is reported through [`RunOutput`].
    #[instrument(skip(self, on_line), fields(program = ?self.program))]
    pub fn run_with(
        &self,
        script: &str,
        series: &str,
        mut on_line: impl FnMut(&str),
    ) -> Result<RunOutput> {
        self.require_companion_dir()?;
        let _guard = WorkdirGuard::enter(&self.companion_dir)?;
        self.ensure_available()?;

        let (reader, writer) = io::pipe().context("create output pipe")?;
        let mut command = Command::new(&self.program);
        command
            .args(["run", script, series])
            .stdout(writer.try_clone().context("clone output pipe")?)
            .stderr(writer);
        debug!(?command, "runner.spawn");

        let child = command
            .spawn()
            .wrap_err_with(|| format!("spawn {} run {script}", self.name()))?;
        let mut process = RunningCommand { child };

        // The command still holds our ends of the pipe; they must be closed
        // for the read loop to see end of file when the child exits.
        drop(command);

        let mut reader = BufReader::new(reader);
        let mut lines = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .context("read command output")?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end();
            trace!(%line, "runner.output");
            on_line(line);
            lines.push(line.to_string());
        }

        let status = process.wait()?;
        debug!(?status, "runner.exit");
        Ok(RunOutput {
            success: status.success(),
            output: lines.join("\n"),
        })
    }

    /// Check that the runner can be executed at all.
    fn ensure_available(&self) -> Result<()> {
        let available = Command::new(&self.program)
            .arg("--version")
            .output()
            .is_ok_and(|output| output.status.success());
        if !available {
            bail!("{} not found. Please install Node.js and npm.", self.name());
        }

        Ok(())
    }

    fn require_companion_dir(&self) -> Result<()> {
        if !self.companion_dir.is_dir() {
            bail!(
                "{} directory not found. Please ensure you're in the project root.",
                self.companion_dir.display()
            );
        }

        Ok(())
    }
}

/// A spawned command that is killed if it is dropped before exiting.
struct RunningCommand {
    child: Child,
}

impl RunningCommand {
    fn wait(&mut self) -> Result<ExitStatus> {
        self.child.wait().context("wait for command")
    }
}

impl Drop for RunningCommand {
    fn drop(&mut self) {
        if matches!(self.child.try_wait(), Ok(None)) {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
