//! Boundary location in raw text.
//!
//! Splitters break a slice into ordered segments at a delimiter while treating
//! quoted string/char contents, escape sequences, and line comments as opaque,
//! and while only splitting at bracket depth zero. No tree is built here.

use crate::error::ErrorKind;
use magma_common::{CompileError, CompileResult, SourceContext};

/// Divides text into ordered sub-slices and rejoins generated segments.
pub trait Splitter: Send + Sync {
    fn split(&self, input: &str) -> CompileResult<Vec<String>>;
    fn join(&self, segments: &[String]) -> String;
}

/// How generated segments are reassembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStyle {
    /// Every segment is followed by the delimiter (statement convention).
    Terminated,
    /// The delimiter sits between segments (value/list convention).
    Separated,
}

/// Splits at a single-character delimiter, at bracket depth zero, outside
/// quotes and line comments. The delimiter itself is dropped from segments and
/// re-inserted by [`Splitter::join`].
pub struct DelimiterSplitter {
    delimiter: char,
    style: JoinStyle,
}

impl DelimiterSplitter {
    pub fn new(delimiter: char, style: JoinStyle) -> Self {
        Self { delimiter, style }
    }

    /// Statement splitter: `;`-terminated segments.
    pub fn statements() -> Self {
        Self::new(';', JoinStyle::Terminated)
    }

    /// Value splitter: `,`-separated segments.
    pub fn values() -> Self {
        Self::new(',', JoinStyle::Separated)
    }
}

impl Splitter for DelimiterSplitter {
    fn split(&self, input: &str) -> CompileResult<Vec<String>> {
        split_segments(input, self.delimiter, false)
    }

    fn join(&self, segments: &[String]) -> String {
        let mut output = String::new();
        for (index, segment) in segments.iter().enumerate() {
            if index > 0 && self.style == JoinStyle::Separated {
                output.push(self.delimiter);
            }
            output.push_str(segment);
            if self.style == JoinStyle::Terminated {
                output.push(self.delimiter);
            }
        }
        output
    }
}

/// Splits `text` into `;`-terminated statements.
pub fn split_statements(text: &str) -> CompileResult<Vec<String>> {
    DelimiterSplitter::statements().split(text)
}

/// Statement splitter for block bodies: splits at `;` and additionally ends a
/// segment when a top-level `{...}` block closes, so block constructs (method
/// bodies, nested blocks) need no trailing terminator. Join re-inserts `;`
/// after plain statements only.
pub struct BlockSplitter;

impl Splitter for BlockSplitter {
    fn split(&self, input: &str) -> CompileResult<Vec<String>> {
        split_segments(input, ';', true)
    }

    fn join(&self, segments: &[String]) -> String {
        let mut output = String::new();
        for segment in segments {
            output.push_str(segment);
            if !segment.trim_end().ends_with('}') {
                output.push(';');
            }
        }
        output
    }
}

fn opening(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn split_segments(input: &str, delimiter: char, blocks: bool) -> CompileResult<Vec<String>> {
    let mut segments: Vec<String> = Vec::new();
    let mut buffer = String::new();
    // Stack of open brackets with their byte positions.
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        // Line comment: opaque until end of line.
        if c == '/' && matches!(chars.peek(), Some((_, '/'))) {
            buffer.push(c);
            for (_, commented) in chars.by_ref() {
                buffer.push(commented);
                if commented == '\n' {
                    break;
                }
            }
            continue;
        }

        // Quoted region: opaque, with backslash consuming the next character.
        if c == '"' || c == '\'' {
            buffer.push(c);
            let mut closed = false;
            while let Some((_, quoted)) = chars.next() {
                buffer.push(quoted);
                if quoted == '\\' {
                    if let Some((_, escaped)) = chars.next() {
                        buffer.push(escaped);
                    }
                    continue;
                }
                if quoted == c {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(unbalanced(input, c, index, &segments));
            }
            continue;
        }

        if c == delimiter && open.is_empty() {
            // In block mode a block segment already ended at its `}`, leaving
            // an empty statement before this delimiter; skip it.
            if blocks && buffer.trim().is_empty() {
                buffer.clear();
            } else {
                segments.push(std::mem::take(&mut buffer));
            }
            continue;
        }

        if opening(c) {
            open.push((c, index));
        } else if matches!(c, ')' | ']' | '}') {
            match open.pop() {
                Some((o, _)) if closing_for(o) == c => {}
                _ => return Err(unbalanced(input, c, index, &segments)),
            }
            if blocks && c == '}' && open.is_empty() {
                buffer.push(c);
                segments.push(std::mem::take(&mut buffer));
                continue;
            }
        }

        buffer.push(c);
    }

    if let Some(&(o, index)) = open.first() {
        return Err(unbalanced(input, o, index, &segments));
    }

    if !buffer.trim().is_empty() {
        segments.push(buffer);
    }
    Ok(segments)
}

fn unbalanced(input: &str, delimiter: char, position: usize, complete: &[String]) -> CompileError {
    let mut causes =
        vec![ErrorKind::UnbalancedDelimiter(delimiter).at(SourceContext::at(&input[position..], position))];
    causes.extend(complete.iter().enumerate().map(|(index, segment)| {
        CompileError::with_context(
            format!("Complete segment {}", index),
            SourceContext::new(segment.as_str()),
        )
    }));
    CompileError::caused(
        format!("Splitting failed after {} complete segment(s)", complete.len()),
        SourceContext::new(input),
        causes,
    )
}

/// Byte indices where `anchor` occurs at bracket depth zero, outside quotes
/// and line comments, in left-to-right order.
pub(crate) fn shallow_anchor_indices(input: &str, anchor: &str) -> Vec<usize> {
    let mut found = Vec::new();
    if anchor.is_empty() {
        return found;
    }

    let mut depth = 0usize;
    let mut chars = input.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if c == '/' && matches!(chars.peek(), Some((_, '/'))) {
            for (_, commented) in chars.by_ref() {
                if commented == '\n' {
                    break;
                }
            }
            continue;
        }

        if c == '"' || c == '\'' {
            while let Some((_, quoted)) = chars.next() {
                if quoted == '\\' {
                    chars.next();
                    continue;
                }
                if quoted == c {
                    break;
                }
            }
            continue;
        }

        if depth == 0 && input[index..].starts_with(anchor) {
            found.push(index);
        }

        if opening(c) {
            depth += 1;
        } else if matches!(c, ')' | ']' | '}') {
            depth = depth.saturating_sub(1);
        }
    }
    found
}
