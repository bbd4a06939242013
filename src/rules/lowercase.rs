//! Lowercase-start rule.
//!
//! Consistent lower-case openings make log streams easier to grep and
//! parse; tools that capitalise log levels (INFO, ERROR) would otherwise
//! produce mixed-case lines.

/// Check that a log message begins with a lower-case letter.
///
/// Returns a non-empty diagnostic string on violation; the empty string
/// means the message is compliant.
pub fn check_lowercase(msg: &str) -> String {
    let msg = msg.trim();
    if msg.is_empty() {
        return String::new();
    }

    // General case mapping, not ASCII-only: non-Latin uppercase letters
    // are violations too. A first byte that does not decode is treated
    // as compliant (diagnosing encoding errors is not this rule's job).
    match msg.chars().next() {
        Some(first) if first.is_uppercase() => {
            "log message should start with a lowercase letter".to_string()
        }
        _ => String::new(),
    }
}
