//! Greedy fixed-column wrapping of logical lines into physical lines.

use crate::foundation::error::{SubsError, SubsResult};

/// Wrap every logical line to at most `max_columns` characters.
///
/// Lines are wrapped independently and the result is flattened in order. Hyphenated words may
/// break after an inner hyphen. Other words are only split when a single word is longer than
/// `max_columns`; the first piece of such a word fills the space left on the current line. Empty or whitespace-only logical lines yield one empty
/// physical line so that vertical spacing is preserved.
pub fn wrap_lines<S: AsRef<str>>(logical: &[S], max_columns: usize) -> SubsResult<Vec<String>> {
    if max_columns == 0 {
        return Err(SubsError::configuration("wrap width must be >= 1 column"));
    }
    let mut out = Vec::with_capacity(logical.len());
    for line in logical {
        let wrapped = wrap_line(line.as_ref(), max_columns);
        if wrapped.is_empty() {
            out.push(String::new());
        } else {
            out.extend(wrapped);
        }
    }
    Ok(out)
}

/// Wrap a single logical line. Returns no lines for whitespace-only input.
pub(crate) fn wrap_line(text: &str, width: usize) -> Vec<String> {
    // Chunks are stored reversed so the next one is popped off the end.
    let mut chunks: Vec<String> = split_chunks(text);
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        let mut cur: Vec<String> = Vec::new();
        let mut cur_len = 0usize;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_space(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            let len = char_len(chunk);
            if cur_len + len > width {
                break;
            }
            cur_len += len;
            cur.push(chunks.pop().unwrap_or_default());
        }

        if chunks.last().is_some_and(|c| char_len(c) > width) {
            split_long_chunk(&mut chunks, &mut cur, cur_len, width);
        }

        if cur.last().is_some_and(|c| is_space(c)) {
            cur.pop();
        }
        if !cur.is_empty() {
            lines.push(cur.concat());
        }
    }
    lines
}

fn split_long_chunk(chunks: &mut Vec<String>, cur: &mut Vec<String>, cur_len: usize, width: usize) {
    let space_left = if width < 1 { 1 } else { width - cur_len };
    let Some(long) = chunks.pop() else {
        return;
    };
    if space_left == 0 {
        chunks.push(long);
        return;
    }
    let chars: Vec<char> = long.chars().collect();
    let mut end = space_left.min(chars.len());
    // Prefer breaking right after the last hyphen that fits, if something other than hyphens
    // precedes it.
    if chars.len() > space_left
        && let Some(hyphen) = chars[..space_left].iter().rposition(|&c| c == '-')
        && hyphen > 0
        && chars[..hyphen].iter().any(|&c| c != '-')
    {
        end = hyphen + 1;
    }
    let head: String = chars[..end].iter().collect();
    let tail: String = chars[end..].iter().collect();
    cur.push(head);
    if !tail.is_empty() {
        chunks.push(tail);
    }
}

/// Split into runs of whitespace and words; words also break after an inner hyphen.
///
/// Tabs expand to the next multiple of [`TAB_SIZE`] columns, then every whitespace char becomes
/// a space.
fn split_chunks(text: &str) -> Vec<String> {
    let chars = expand_tabs(text);
    let mut chunks = Vec::new();
    let mut cur = String::new();
    let mut cur_space = false;
    for (i, &ch) in chars.iter().enumerate() {
        let space = ch.is_whitespace();
        if !cur.is_empty() && space != cur_space {
            chunks.push(std::mem::take(&mut cur));
        }
        cur_space = space;
        cur.push(if space { ' ' } else { ch });
        if !space && is_break_hyphen(&chars, i) {
            chunks.push(std::mem::take(&mut cur));
        }
    }
    if !cur.is_empty() {
        chunks.push(cur);
    }
    chunks
}

const TAB_SIZE: usize = 8;

fn expand_tabs(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut column = 0usize;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// A hyphen inside a word: preceded by two letters (or `letter-letter`) and followed by a
/// letter, optionally after one more hyphen.
fn is_break_hyphen(chars: &[char], i: usize) -> bool {
    let at = |j: usize| chars.get(j).copied();
    let letter = |j: usize| at(j).is_some_and(char::is_alphabetic);
    if at(i) != Some('-') || i < 2 {
        return false;
    }
    let before = (letter(i - 1) && letter(i - 2))
        || (i >= 3 && letter(i - 1) && at(i - 2) == Some('-') && letter(i - 3));
    let after = letter(i + 1) && (letter(i + 2) || (at(i + 2) == Some('-') && letter(i + 3)));
    before && after
}

fn is_space(chunk: &str) -> bool {
    chunk.chars().all(char::is_whitespace)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
