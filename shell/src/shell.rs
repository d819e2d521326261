//! Shell state and command execution

use crate::command::Command;
use crate::error::{FshError, FshResult};
use crate::help;
use crate::lexer;
use crate::local_fs;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where command output goes: the process stdout, or a buffer that
/// tests can inspect.
pub enum Output {
    Stdout,
    Buffer(Vec<u8>),
}

impl Output {
    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout();
                stdout.write_all(data)?;
                stdout.flush()
            }
            Self::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    pub fn writeln(&mut self, line: &str) -> io::Result<()> {
        self.write(line.as_bytes())?;
        self.write(b"\n")
    }
}

/// The shell: the working directory, and the sink its output goes to.
///
/// The working directory is the single piece of state the shell keeps.
/// Every path argument resolves against it, `search` roots at it, the
/// prompt renders it, and only `cd` mutates it.
pub struct Shell {
    cwd: PathBuf,
    out: Output,
}

impl Shell {
    /// Shell rooted at the process working directory, writing to stdout.
    pub fn new() -> FshResult<Self> {
        Ok(Self {
            cwd: env::current_dir()?,
            out: Output::Stdout,
        })
    }

    /// Shell rooted at an explicit directory with an explicit sink.
    pub fn with_output(cwd: PathBuf, out: Output) -> Self {
        Self { cwd, out }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The working directory as a display string, or `<unknown>` when
    /// it cannot be rendered as text.
    pub fn display_cwd(&self) -> String {
        self.cwd
            .to_str()
            .map_or_else(|| "<unknown>".to_string(), str::to_string)
    }

    /// Drain the buffered output. Empty when writing to stdout.
    pub fn take_output(&mut self) -> Vec<u8> {
        match &mut self.out {
            Output::Stdout => Vec::new(),
            Output::Buffer(buf) => std::mem::take(buf),
        }
    }

    /// Execute one input line: tokenize, match against the command
    /// table, run. A blank line is a no-op; `exit` surfaces as
    /// [`FshError::Exit`] for the caller to stop on.
    pub fn execute(&mut self, line: &str) -> FshResult<()> {
        let words = lexer::tokenize(line);
        if words.is_empty() {
            return Ok(());
        }
        let command = Command::parse(&words)?;
        self.run(command)
    }

    fn run(&mut self, command: Command) -> FshResult<()> {
        match command {
            Command::Exit => Err(FshError::Exit),

            Command::Pwd => {
                let cwd = self.display_cwd();
                self.out.writeln(&cwd)?;
                Ok(())
            }

            Command::Ls { path } => {
                let target = path.map_or_else(|| self.cwd.clone(), |p| self.resolve(&p));
                for name in local_fs::list_entries(&target)? {
                    self.out.writeln(&name)?;
                }
                Ok(())
            }

            Command::Cd { path } => self.change_dir(path.as_deref()),

            Command::Cp { src, dst } => {
                local_fs::copy_recursive(&self.resolve(&src), &self.resolve(&dst)).map_err(|e| {
                    debug!(error = %e, src = %src, dst = %dst, "copy aborted");
                    FshError::Failed
                })
            }

            Command::Mv { src, dst } => {
                local_fs::rename(&self.resolve(&src), &self.resolve(&dst))?;
                Ok(())
            }

            Command::Rm { path } => {
                local_fs::remove(&self.resolve(&path))?;
                Ok(())
            }

            Command::Mkdir { path } => {
                local_fs::create_dirs(&self.resolve(&path))?;
                Ok(())
            }

            Command::Touch { path } => {
                local_fs::touch(&self.resolve(&path))?;
                Ok(())
            }

            Command::Search { pattern } => {
                let Self { cwd, out } = self;
                local_fs::search_names(cwd, &pattern, |rel| {
                    out.writeln(&rel.display().to_string())
                })
                .map_err(|e| {
                    debug!(error = %e, pattern = %pattern, "search aborted");
                    FshError::Failed
                })
            }

            Command::Chmod { mode, path } => {
                let mode = local_fs::parse_mode(&mode).ok_or(FshError::BadMode)?;
                local_fs::chmod(&self.resolve(&path), mode)?;
                Ok(())
            }

            Command::Help => {
                for cmd in help::COMMANDS {
                    self.out.writeln(cmd.usage)?;
                }
                Ok(())
            }
        }
    }

    /// Resolve a command path argument against the working directory.
    /// Absolute arguments stand on their own.
    fn resolve(&self, path: &str) -> PathBuf {
        self.cwd.join(path)
    }

    /// `cd` to the argument, else `$HOME`, else `/`. The target must
    /// canonicalize to an existing directory before the working
    /// directory changes; on failure it stays what it was.
    fn change_dir(&mut self, path: Option<&str>) -> FshResult<()> {
        let target = match path {
            Some(p) => self.resolve(p),
            None => env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/")),
        };

        let canonical = target.canonicalize()?;
        if !canonical.is_dir() {
            return Err(FshError::NotADirectory);
        }
        self.cwd = canonical;
        Ok(())
    }
}
