// src/extract/normalize.rs

use once_cell::sync::Lazy;
use regex::Regex;

static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Collapse every whitespace run (newlines included) to a single space and
/// trim both ends. Pure and idempotent.
pub fn normalize(raw: &str) -> String {
    WS_RUN.replace_all(raw.trim(), " ").into_owned()
}

/// `normalize` over a nullable value; missing cells come back as "".
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(normalize("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize("one two"), "one two");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn missing_value_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("  x ")), "x");
    }

    #[test]
    fn idempotent() {
        for s in ["  a \t b\n\nc  ", "plain", "", "x\ny\nz"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn never_leaves_double_whitespace() {
        let out = normalize("a\r\n b\t\t c \u{a0} d");
        assert!(!out.contains("  "));
        assert_eq!(out, out.trim());
    }
}
