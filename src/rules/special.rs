//! Special-character rule.
//!
//! Letters, digits and whitespace are always allowed; the characters in
//! [`DEFAULT_FORBIDDEN`] are the ones that make logs noisy and hard to
//! parse reliably. Hyphen, underscore, slash, colon, dot and comma are
//! intentionally not forbidden because they appear legitimately in paths,
//! identifiers and sentences.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// ASCII punctuation/symbol characters that are not allowed in log
/// messages by default.
pub const DEFAULT_FORBIDDEN: &str = "!@#$%^&*+=|\\<>?`~;'\"";

/// Repeated-punctuation sequences that indicate emphasis with no place
/// in structured log messages.
const REPEATED_SEQUENCES: &[&str] = &["...", "!!", "??", "***"];

/// Check that a log message contains no emoji and no forbidden special
/// characters.
///
/// `allowed_extra` is an optional string of additional characters the
/// caller considers safe (sourced from the config file); any character in
/// it is excluded from the check. The per-character scan runs before the
/// repeated-punctuation scan, so a message containing both always
/// reports the character violation.
pub fn check_special_chars(msg: &str, allowed_extra: &str) -> String {
    let forbidden = build_forbidden_set(allowed_extra);

    for c in msg.chars() {
        if is_emoji_like(c) {
            return format!(
                "log message contains emoji or special Unicode symbol (char {:?})",
                c
            );
        }

        if is_punct_or_symbol(c) && forbidden.contains(&c) {
            return format!("log message contains forbidden special character {:?}", c);
        }
    }

    for seq in REPEATED_SEQUENCES {
        if msg.contains(seq) {
            return format!("log message contains repeated punctuation {:?}", seq);
        }
    }

    String::new()
}

/// The default forbidden set minus any characters the user explicitly
/// allows.
fn build_forbidden_set(allowed_extra: &str) -> Vec<char> {
    DEFAULT_FORBIDDEN
        .chars()
        .filter(|c| !allowed_extra.contains(*c))
        .collect()
}

/// Emoji and pictographic symbols: the Other_Symbol category plus the
/// pictograph, dingbat and variation-selector blocks.
fn is_emoji_like(c: char) -> bool {
    if c.general_category() == GeneralCategory::OtherSymbol {
        return true;
    }
    matches!(c as u32,
        0x1F300..=0x1FAFF // Misc Symbols and Pictographs, Emoji
        | 0x2600..=0x27BF // Misc Symbols, Dingbats
        | 0xFE00..=0xFE0F // Variation Selectors
    )
}

/// ASCII punctuation, or a symbol-category character of any width.
fn is_punct_or_symbol(c: char) -> bool {
    (c.is_ascii() && c.general_category_group() == GeneralCategoryGroup::Punctuation)
        || c.general_category_group() == GeneralCategoryGroup::Symbol
}

/// Rebuild `msg` without emoji and noisy punctuation, keeping letters,
/// digits, whitespace and a small set of safe ASCII punctuation (plus
/// anything in `allowed_extra`). Runs of three or more dots collapse to
/// a single dot so the result also passes the repeated-punctuation scan.
pub fn clean_message(msg: &str, allowed_extra: &str) -> String {
    if msg.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(msg.len());

    for c in msg.chars() {
        // Dropping every non-ASCII char covers emoji and pictographic
        // symbols in one conservative stroke.
        if !c.is_ascii() {
            continue;
        }
        if allowed_extra.contains(c) {
            out.push(c);
            continue;
        }
        if DEFAULT_FORBIDDEN.contains(c) {
            continue;
        }
        // Safe punctuation used in normal text and paths.
        if matches!(c, '-' | '_' | '/' | ':' | '.' | ',' | ' ') {
            out.push(c);
            continue;
        }
        if c.general_category_group() == GeneralCategoryGroup::Punctuation
            || c.general_category_group() == GeneralCategoryGroup::Symbol
        {
            continue;
        }
        out.push(c);
    }

    collapse_ellipses(&out)
}

/// Collapse every run of three or more `.` characters to a single `.`.
/// Runs of one or two dots pass the repeated-punctuation scan and are
/// left alone.
fn collapse_ellipses(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut dots = 0usize;

    for c in s.chars() {
        if c == '.' {
            dots += 1;
            continue;
        }
        flush_dots(&mut out, dots);
        dots = 0;
        out.push(c);
    }
    flush_dots(&mut out, dots);

    out
}

fn flush_dots(out: &mut String, dots: usize) {
    if dots >= 3 {
        out.push('.');
    } else {
        for _ in 0..dots {
            out.push('.');
        }
    }
}
