//! Environment variable expansion for `.swiftlint.yml` contents.
//!
//! References of the form `${VAR}` are replaced with the value of `VAR`.
//! Unset variables are left verbatim so that a broken reference never makes
//! configuration loading fail.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn var_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^{}]+)\}").expect("static regex"))
}

/// Expand `${VAR}` references using the process environment.
pub fn expand_env_vars(text: &str) -> Cow<'_, str> {
    expand_with(text, |name| std::env::var(name).ok())
}

/// Expand `${VAR}` references using `lookup`; unresolved names stay as-is.
pub fn expand_with<F>(text: &str, lookup: F) -> Cow<'_, str>
where
    F: Fn(&str) -> Option<String>,
{
    if !text.contains("${") {
        return Cow::Borrowed(text);
    }
    var_pattern().replace_all(text, |caps: &Captures<'_>| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
}
