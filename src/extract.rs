//! Email extraction module
//!
//! Scans text for email-shaped substrings and returns them deduplicated in
//! first-seen order.
//!
//! The pattern is a loose approximation and is kept exactly as is: it
//! accepts some addresses RFC 5322 would reject (`a..b@x..com`) and rejects
//! some it would accept (quoted local parts, `!` or `#` in the local part).
//! Note that the TLD class also admits a literal `|`.
//!
//! Word boundaries treat a character as a word character when it is
//! alphanumeric (any script, including numerals like `²`) or `_`. Combining
//! marks and connector punctuation other than `_` are not word characters.
//! The regex crate's `\b` disagrees on both counts, so the boundaries are
//! checked by hand around each candidate the regex finds.

use regex::Regex;
use std::sync::LazyLock;

use crate::dedup::UniqueCollection;

/// Email shape: `local-part@domain.tld`, bounded by word boundaries
pub const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";

/// The same shape without the boundaries; only used to locate candidate starts
const CANDIDATE_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}";

static CANDIDATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CANDIDATE_PATTERN).expect("email pattern is a valid regex"));

// Anchored, so only the first and last characters meet a boundary; both are
// ASCII, where the two notions of word character agree.
static EMAIL_EXACT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{})$", EMAIL_PATTERN)).expect("email pattern is a valid regex")
});

fn is_local_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'%' | b'+' | b'-')
}

fn is_domain_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-')
}

fn is_tld_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'|'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True if exactly one side of byte offset `at` is a word character
fn is_boundary(text: &str, at: usize) -> bool {
    let before = text[..at].chars().next_back().is_some_and(is_word_char);
    let after = text[at..].chars().next().is_some_and(is_word_char);
    before != after
}

/// End of the run of `class` bytes starting at `from`
///
/// Every class is ASCII, so the result is always a char boundary.
fn run_end(bytes: &[u8], from: usize, class: fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !class(b))
        .map_or(bytes.len(), |i| from + i)
}

/// Try to match an email starting exactly at `start`; returns its end
///
/// Greedy with backtracking: the longest domain is tried first, and for each
/// domain the longest TLD, until the closing boundary holds.
fn match_at(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !is_boundary(text, start) {
        return None;
    }

    // The local part cannot contain `@`, so only its full run can be followed by one
    let at = run_end(bytes, start, is_local_byte);
    if at == start || bytes.get(at) != Some(&b'@') {
        return None;
    }

    let domain_start = at + 1;
    let domain_max = run_end(bytes, domain_start, is_domain_byte);

    for dot in (domain_start + 1..=domain_max).rev() {
        if bytes.get(dot) != Some(&b'.') {
            continue;
        }
        let tld_start = dot + 1;
        let tld_max = run_end(bytes, tld_start, is_tld_byte);

        for end in (tld_start + 2..=tld_max).rev() {
            if is_boundary(text, end) {
                return Some(end);
            }
        }
    }

    None
}

/// Iterate over every candidate in `text`, left to right, non-overlapping
///
/// Repeats are yielded as often as they occur.
pub fn find_candidates(text: &str) -> impl Iterator<Item = &str> {
    let mut pos = 0;

    std::iter::from_fn(move || {
        // No match can start before the leftmost place the unbounded shape fits
        while let Some(m) = CANDIDATE_REGEX.find_at(text, pos) {
            let start = m.start();
            if let Some(end) = match_at(text, start) {
                pos = end;
                return Some(&text[start..end]);
            }
            pos = start + 1;
        }
        None
    })
}

/// Collect the unique candidates of `text` in first-seen order
pub fn extract_unique(text: &str) -> UniqueCollection {
    find_candidates(text).collect()
}

/// Extract unique email addresses from `text`
///
/// Pure function: the same text always yields the same sequence. Text with
/// no candidates yields an empty vector.
pub fn extract_emails(text: &str) -> Vec<String> {
    extract_unique(text).into_vec()
}

/// Check whether `candidate` as a whole has the email shape
pub fn is_email_shaped(candidate: &str) -> bool {
    EMAIL_EXACT_REGEX.is_match(candidate)
}
