//! Content rules for log messages.
//!
//! Each rule is a pure, total function over any input string, returning
//! the empty string for "no violation" and a description otherwise. An
//! empty *message* is never flagged by any rule, so an empty return
//! value is unambiguous to the driver.

mod driver;
mod language;
mod lowercase;
mod sensitive;
mod special;

pub use driver::run_rules;
pub use language::check_language;
pub use lowercase::check_lowercase;
pub use sensitive::check_sensitive;
pub use special::{check_special_chars, clean_message, DEFAULT_FORBIDDEN};
