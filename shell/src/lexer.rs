//! Lexer for fsh command lines
//!
//! Splits one input line into argument words, honoring single and
//! double quotes and backslash escapes.

use chumsky::prelude::*;

/// Builds the word lexer.
///
/// Whitespace outside quotes separates words. Either quote kind
/// suppresses word splitting and the other quote's meaning while
/// active. A backslash escapes the next character literally, inside or
/// outside quotes, and is itself consumed. The grammar is total: every
/// line lexes, with unterminated quotes running to end of input and a
/// trailing backslash dropped.
pub fn lexer() -> impl Parser<char, Vec<String>, Error = Simple<char>> {
    let ws = filter(|c: &char| c.is_whitespace()).repeated();

    let escaped = just('\\')
        .ignore_then(any().or_not())
        .map(|c: Option<char>| c.map_or_else(String::new, |c| c.to_string()));

    // Quoted segments: the closing quote is optional so an unterminated
    // quote consumes the rest of the line.
    let sq_seg = just('\'')
        .ignore_then(
            escaped
                .clone()
                .or(filter(|c: &char| *c != '\'' && *c != '\\').map(|c: char| c.to_string()))
                .repeated(),
        )
        .then_ignore(just('\'').or_not())
        .map(|parts: Vec<String>| parts.concat());

    let dq_seg = just('"')
        .ignore_then(
            escaped
                .clone()
                .or(filter(|c: &char| *c != '"' && *c != '\\').map(|c: char| c.to_string()))
                .repeated(),
        )
        .then_ignore(just('"').or_not())
        .map(|parts: Vec<String>| parts.concat());

    let bare_seg = escaped
        .or(filter(|c: &char| !c.is_whitespace() && !matches!(c, '\'' | '"' | '\\'))
            .map(|c: char| c.to_string()))
        .repeated()
        .at_least(1)
        .map(|parts: Vec<String>| parts.concat());

    // A word is one or more adjacent segments with no whitespace
    // between them.
    let word = choice((sq_seg, dq_seg, bare_seg))
        .repeated()
        .at_least(1)
        .map(|segments: Vec<String>| segments.concat());

    ws.clone()
        .ignore_then(word.then_ignore(ws).repeated())
        .then_ignore(end())
}

/// Tokenize one input line into argument words.
///
/// Words that collapse to nothing, such as a bare `""`, are dropped
/// rather than kept as empty arguments.
pub fn tokenize(line: &str) -> Vec<String> {
    lexer()
        .parse(line)
        .unwrap_or_default()
        .into_iter()
        .filter(|word| !word.is_empty())
        .collect()
}
