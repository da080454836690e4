//! Format checks for email and URL fields.

use once_cell::sync::Lazy;
use regex::Regex;

// Local part: any run of non-@, non-space characters, where a backslash
// escapes the next character. Domain: dot-separated non-empty labels, at
// least two of them.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^@\s\\]|\\\S)+@[^@\s.]+(?:\.[^@\s.]+)+$").unwrap()
});

// Absolute URL with an explicit `scheme://authority`.
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#@]*@?[^\s/?#@]+(?:[/?#]\S*)?$").unwrap()
});

pub fn is_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

pub fn is_url(s: &str) -> bool {
    URL.is_match(s)
}
