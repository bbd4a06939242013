//! English-only rule.
//!
//! Non-Latin scripts are rejected to keep log output machine-parseable
//! and to avoid encoding surprises when logs are shipped to aggregators
//! that are not UTF-8-aware.

/// Check that a log message contains only characters from the Latin/ASCII
/// repertoire, plus a small set of typographic punctuation.
///
/// Only the first offending character is reported; evaluation stops at
/// the earliest problem.
pub fn check_language(msg: &str) -> String {
    for c in msg.chars() {
        // Everything in the Basic Latin block is allowed.
        if (c as u32) <= 0x7F {
            continue;
        }
        if is_allowed_non_ascii(c) {
            continue;
        }
        return format!(
            "log message contains non-English characters ({} script, char {:?})",
            script_name(c),
            c
        );
    }
    String::new()
}

/// A small set of non-ASCII characters acceptable in English-language
/// technical log messages.
fn is_allowed_non_ascii(c: char) -> bool {
    matches!(
        c,
        '\u{2013}' // en-dash
            | '\u{2014}' // em-dash
            | '\u{2018}' | '\u{2019}' // curly single quotes
            | '\u{201C}' | '\u{201D}' // curly double quotes
            | '\u{2026}' // ellipsis
    )
}

/// Best-effort Unicode script name for diagnostic messages.
fn script_name(c: char) -> &'static str {
    match c as u32 {
        0x0400..=0x04FF => "Cyrillic",
        0x4E00..=0x9FFF => "CJK",
        0x0600..=0x06FF => "Arabic",
        0x0900..=0x097F => "Devanagari",
        0x1F300..=0x1FAFF => "Emoji",
        _ => "non-Latin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_language() {
        let tests: &[(&str, &str, bool)] = &[
            ("pure ascii", "starting server on port 8080", false),
            ("numbers and symbols", "retry attempt 3/5", false),
            ("cyrillic", "запуск сервера", true),
            ("mixed cyrillic", "starting сервер", true),
            ("chinese", "服务器启动", true),
            ("arabic", "فشل الاتصال", true),
            ("emoji in msg", "server started 🚀", true),
            ("empty", "", false),
            ("allowed en-dash", "step 1\u{2013}2", false),
            ("allowed ellipsis char", "loading\u{2026}", false),
        ];

        for (name, msg, want_err) in tests {
            let got = check_language(msg);
            assert_eq!(
                !got.is_empty(),
                *want_err,
                "{name}: check_language({msg:?}) = {got:?}"
            );
        }
    }

    #[test]
    fn test_script_names_in_diagnostics() {
        assert!(check_language("запуск").contains("Cyrillic"));
        assert!(check_language("服务").contains("CJK"));
        assert!(check_language("فشل").contains("Arabic"));
        assert!(check_language("नमस्ते").contains("Devanagari"));
        assert!(check_language("🚀").contains("Emoji"));
        assert!(check_language("\u{0100}").contains("non-Latin"));
    }

    #[test]
    fn test_first_offender_reported() {
        // Cyrillic comes before the emoji; the diagnostic names the
        // earliest problem only.
        let got = check_language("з 🚀");
        assert!(got.contains("Cyrillic"), "got {got:?}");
    }
}
