//! Abbreviation patterns for name tokens.
//!
//! A pattern built from "Zoellner Miller" accepts the spellings people
//! actually type for it:
//!
//! ```text
//! Z M            Z. M.          Z.M.
//! Z Miller       Z. Miller      Zoellner Miller
//! ```
//!
//! Tokens are either all spelled out or all reduced to initials, so a
//! mixed form such as "Zoellner M" (or "abc e" for "abc edf") is rejected.
//!
//! First names also accept single-token contractions ([`contraction_match`]).
//!
//! CHANGELOG:
//! - 01/13/2026 - Contractions for first names
//! - 01/12/2026 - Uniform token-wise variants, trailing dot
//! - 01/11/2026 - Initial implementation

use regex::{escape, Regex};

use crate::error::{MatchError, Result};

/// Separator between name tokens: a run of spaces and/or dots.
const SEP: &str = "[. ]+";

/// Compiled, anchored, case-insensitive abbreviation pattern.
#[derive(Debug, Clone)]
pub struct AbbreviationPattern {
    regex: Regex,
}

impl AbbreviationPattern {
    /// Build the pattern for a name token or a multi-token middle name.
    pub fn build(text: &str) -> Result<Self> {
        let source = pattern_source(text)?;
        let regex = Regex::new(&source)?;
        Ok(Self { regex })
    }

    /// Whole-string, case-insensitive test against `candidate`.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate.trim())
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Split on runs of spaces and dots, dropping empty tokens.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| c == ' ' || c == '.')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Regex source for [`AbbreviationPattern::build`].
pub fn pattern_source(text: &str) -> Result<String> {
    let tokens = split_tokens(text);
    let Some((last, init)) = tokens.split_last() else {
        return Err(MatchError::EmptyName);
    };

    let mut alternatives: Vec<String> = Vec::new();

    // Initials then the full last token: "Z. Miller", "Z M Miller".
    if !init.is_empty() {
        let mut alt: String = init
            .iter()
            .map(|t| format!("{}{}", escape(initial(t)), SEP))
            .collect();
        alt.push_str(&escape(last));
        alternatives.push(alt);
    }

    // Every token spelled out, or every token reduced to its initial.
    // Mixed forms such as "Zoellner M" are not accepted.
    let spelled: Vec<String> = tokens.iter().map(|t| token_spelled(t)).collect();
    let initials: Vec<String> = tokens.iter().map(|t| token_initial(t)).collect();
    alternatives.push(spelled.join(SEP));
    let initials = initials.join(SEP);
    if !alternatives.contains(&initials) {
        alternatives.push(initials);
    }

    Ok(format!("(?i)^(?:{})[.]?$", alternatives.join("|")))
}

/// Candidate-retrieval pattern for a first name.
///
/// A full first name retrieves its own initial ("J", "J."); an initial
/// retrieves any name starting with it.
pub fn first_name_pattern(first: &str) -> Result<String> {
    let first = first.trim();
    let head = first.chars().next().ok_or(MatchError::EmptyName)?;
    let head = escape(&head.to_string());

    if is_initial(first) {
        Ok(format!("(?i)^{}([.]?|[a-z]+)$", head))
    } else {
        Ok(format!("(?i)^{}([.]?)$", head))
    }
}

/// A single letter, optionally followed by a dot.
fn is_initial(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), None, None) | (Some(c), Some('.'), None) if c.is_alphabetic()
    )
}

fn initial(token: &str) -> &str {
    match token.char_indices().nth(1) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

fn is_single_char(token: &str) -> bool {
    token.chars().nth(1).is_none()
}

/// One-character tokens are initials and accept any continuation.
fn token_spelled(token: &str) -> String {
    if is_single_char(token) {
        format!("{}\\S*", escape(token))
    } else {
        escape(token)
    }
}

fn token_initial(token: &str) -> String {
    if is_single_char(token) {
        format!("{}\\S*", escape(token))
    } else {
        format!("{}[.]?", escape(initial(token)))
    }
}

/// Build the pattern from `source` and test `candidate` against it.
///
/// Not symmetric: `abbr_match("J", "John")` holds, `abbr_match("John", "Jo")`
/// does not.
pub fn abbr_match(source: &str, candidate: &str) -> bool {
    AbbreviationPattern::build(source)
        .map(|p| p.is_match(candidate))
        .unwrap_or(false)
}

/// `short` is a contraction of the single token `long`: "Wm" for
/// "William", "Chas." for "Charles".
///
/// Same first and last letter, the letters between them appear in order
/// in `long`, and `short` is shorter. Nicknames ("Bob" for "Robert") are
/// not contractions.
pub fn contraction_match(short: &str, long: &str) -> bool {
    let letters = |s: &str| -> Vec<char> { s.trim().trim_end_matches('.').to_lowercase().chars().collect() };
    let short = letters(short);
    let long = letters(long);

    if short.len() < 2 || short.len() >= long.len() {
        return false;
    }
    if !short.iter().chain(long.iter()).all(|c| c.is_alphabetic()) {
        return false;
    }
    if short.first() != long.first() || short.last() != long.last() {
        return false;
    }

    let mut inner = long[1..long.len() - 1].iter();
    short[1..short.len() - 1].iter().all(|c| inner.any(|l| l == c))
}
