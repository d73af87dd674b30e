// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line tokenizer.
//!
//! Words are separated by whitespace. A word that starts with `'` runs to
//! the next `'` and is taken verbatim. A final word starting with `&` asks
//! for background execution and is dropped from argv.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated quote at position {position}")]
    UnterminatedQuote { position: usize },
}

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub argv: Vec<String>,
    pub background: bool,
    /// The line as typed, without its trailing newline.
    pub text: String,
}

impl CommandLine {
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }
}

/// Tokenize `line`. Returns `Ok(None)` for a line with nothing to run.
pub fn parse_line(line: &str) -> Result<Option<CommandLine>, ParseError> {
    let text = line.trim_end_matches(['\n', '\r']);
    let mut argv = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        if ch == '\'' {
            chars.next();
            let mut word = String::new();
            loop {
                match chars.next() {
                    Some((_, '\'')) => break,
                    Some((_, c)) => word.push(c),
                    None => return Err(ParseError::UnterminatedQuote { position: start }),
                }
            }
            argv.push(word);
            continue;
        }
        let mut word = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            word.push(c);
            chars.next();
        }
        argv.push(word);
    }

    let background = argv.last().is_some_and(|word| word.starts_with('&'));
    if background {
        argv.pop();
    }
    if argv.is_empty() {
        return Ok(None);
    }

    Ok(Some(CommandLine {
        argv,
        background,
        text: text.to_string(),
    }))
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
