//! Unicode character cell width calculations.
//!
//! This module provides functions to calculate the display width of text
//! in terminal cells, handling wide characters (CJK, emoji) and escape
//! sequences correctly.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

use crate::sync::lock_recover;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

/// LRU cache for `cell_len` calculations.
static CELL_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// SGR escape sequences, as emitted by the style builder.
static ANSI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("invalid regex"));

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide, but CJK characters and some emoji
/// are 2 cells wide. Control characters and combining marks have 0 width.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_cell_width(text: &str) -> usize {
    text.chars().map(get_character_cell_size).sum()
}

/// Get the total cell width of a string (cached for longer strings).
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_cell_width(text);
    }

    if let Some(&cached) = lock_recover(&CELL_LEN_CACHE).get(text) {
        return cached;
    }

    let width = compute_cell_width(text);
    lock_recover(&CELL_LEN_CACHE).put(text.to_string(), width);
    width
}

/// Get the total cell width of a string without caching.
#[must_use]
pub fn cell_len_uncached(text: &str) -> usize {
    compute_cell_width(text)
}

/// Replace tabs with spaces up to the next multiple of `tab_size`.
///
/// `column` is the cell position the text starts at. Escape sequences take
/// no cells.
#[must_use]
pub fn expand_tabs(text: &str, column: usize, tab_size: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + tab_size);
    let mut column = column;
    let mut in_escape = false;
    for c in text.chars() {
        if in_escape {
            result.push(c);
            in_escape = c != 'm';
        } else if c == '\x1b' {
            result.push(c);
            in_escape = true;
        } else if c == '\t' {
            let spaces = tab_size.max(1) - column % tab_size.max(1);
            result.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            result.push(c);
            column += get_character_cell_size(c);
        }
    }
    result
}

/// Remove SGR escape sequences from text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    if !text.contains('\x1b') {
        return text.to_string();
    }
    ANSI_PATTERN.replace_all(text, "").into_owned()
}

/// Returns true if the text contains an SGR escape sequence.
#[must_use]
pub fn has_ansi(text: &str) -> bool {
    text.contains('\x1b') && ANSI_PATTERN.is_match(text)
}

/// Display width of text once escape sequences are removed.
#[must_use]
pub fn visible_len(text: &str) -> usize {
    if text.contains('\x1b') {
        cell_len(&strip_ansi(text))
    } else {
        cell_len(text)
    }
}

/// Truncate a string to a maximum cell width.
///
/// Returns the truncated string and its actual width.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> (String, usize) {
    let mut width = 0;
    let mut result = String::new();

    for c in text.chars() {
        let char_width = get_character_cell_size(c);
        if width + char_width > max_width {
            break;
        }
        width += char_width;
        result.push(c);
    }

    (result, width)
}
