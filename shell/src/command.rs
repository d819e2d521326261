//! The fixed command table.
//!
//! Lexed words are matched against a tagged command enum; dispatch
//! happens on the variant, not on repeated string comparisons.

use crate::error::{FshError, FshResult};

/// One parsed shell command with its validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pwd,
    Ls { path: Option<String> },
    Cd { path: Option<String> },
    Cp { src: String, dst: String },
    Mv { src: String, dst: String },
    Rm { path: String },
    Mkdir { path: String },
    Touch { path: String },
    Search { pattern: String },
    Chmod { mode: String, path: String },
    Help,
    Exit,
}

impl Command {
    /// Match a word list against the command table.
    ///
    /// `ls` and `cd` run without an argument (they default later);
    /// every other command below its minimum argument count is the
    /// same generic error as an unknown name. Arguments beyond a
    /// command's arity are ignored.
    pub fn parse(words: &[String]) -> FshResult<Self> {
        let name = words.first().ok_or(FshError::Failed)?;
        let optional = |i: usize| words.get(i).cloned();
        let required = |i: usize| words.get(i).cloned().ok_or(FshError::Failed);

        let command = match name.as_str() {
            "exit" => Self::Exit,
            "pwd" => Self::Pwd,
            "ls" => Self::Ls { path: optional(1) },
            "cd" => Self::Cd { path: optional(1) },
            "cp" => Self::Cp {
                src: required(1)?,
                dst: required(2)?,
            },
            "mv" => Self::Mv {
                src: required(1)?,
                dst: required(2)?,
            },
            "rm" => Self::Rm { path: required(1)? },
            "mkdir" => Self::Mkdir { path: required(1)? },
            "touch" => Self::Touch { path: required(1)? },
            "search" => Self::Search {
                pattern: required(1)?,
            },
            "chmod" => Self::Chmod {
                mode: required(1)?,
                path: required(2)?,
            },
            "help" => Self::Help,
            _ => return Err(FshError::Failed),
        };

        Ok(command)
    }
}
