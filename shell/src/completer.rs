use fsh::help;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub struct FshHelper {
    cwd: Arc<RwLock<PathBuf>>,
}

impl FshHelper {
    pub fn new(cwd: Arc<RwLock<PathBuf>>) -> Self {
        Self { cwd }
    }
}

impl Completer for FshHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];

        let (start, word) = find_word_start(line_to_cursor);

        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let is_first_word = !line_to_cursor[..start].contains(|c: char| !c.is_whitespace());

        let mut completions = Vec::new();

        if is_first_word {
            for cmd in help::COMMANDS {
                if cmd.name.starts_with(word) {
                    completions.push(Pair {
                        display: cmd.name.to_string(),
                        replacement: cmd.name.to_string(),
                    });
                }
            }
        }

        if !is_first_word || word.starts_with('/') || word.starts_with('.') || word.contains('/') {
            let cwd = self.cwd.read().unwrap().clone();

            let (dir_part, partial) = match word.rfind('/') {
                Some(idx) => (&word[..=idx], &word[idx + 1..]),
                None => ("", word),
            };
            let dir = if dir_part.is_empty() {
                cwd
            } else {
                let p = Path::new(dir_part);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    cwd.join(p)
                }
            };

            if let Ok(entries) = std::fs::read_dir(&dir) {
                for entry in entries.flatten() {
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.starts_with(partial) {
                        let is_dir = entry.file_type().is_ok_and(|ft| ft.is_dir());
                        let display = if is_dir { format!("{name}/") } else { name };
                        completions.push(Pair {
                            replacement: format!("{dir_part}{display}"),
                            display,
                        });
                    }
                }
            }
        }

        Ok((start, completions))
    }
}

fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

impl Hinter for FshHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for FshHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for FshHelper {}

impl Helper for FshHelper {}
