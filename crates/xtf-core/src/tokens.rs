//! Comma-delimited token helpers shared by both codec directions.
//!
//! The XTF list convention is comma-separated tokens, each trimmed of
//! surrounding whitespace and stripped of carriage returns and line feeds.

use std::fmt::{Display, Write as _};

use crate::error::XtfError;

/// Strip `\r`/`\n`, then trim surrounding whitespace.
pub fn clean(raw: &str) -> String {
    let flat: String = raw.chars().filter(|c| *c != '\r' && *c != '\n').collect();
    flat.trim().to_string()
}

/// Split a comma-delimited list into cleaned tokens.
///
/// An empty or whitespace-only input produces no tokens. A trailing
/// delimiter does not produce a trailing empty token; interior empty tokens
/// are kept as-is.
pub fn split(raw: &str) -> Vec<String> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Vec::new();
    }
    let mut items: Vec<String> = cleaned.split(',').map(clean).collect();
    if cleaned.ends_with(',') {
        items.pop();
    }
    items
}

/// Boolean literal convention: `true`, `TRUE` and `1` are true, anything
/// else is false.
pub fn parse_bool(token: &str) -> bool {
    matches!(token, "true" | "TRUE" | "1")
}

/// Parse a comma-delimited boolean list.
pub fn parse_bools(raw: &str) -> Vec<bool> {
    split(raw).iter().map(|token| parse_bool(token)).collect()
}

/// Parse a comma-delimited integer list.
pub fn parse_integers(raw: &str) -> Result<Vec<i64>, XtfError> {
    split(raw)
        .iter()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| XtfError::Format(format!("invalid integer token '{token}'")))
        })
        .collect()
}

/// Parse a comma-delimited double list.
pub fn parse_doubles(raw: &str) -> Result<Vec<f64>, XtfError> {
    split(raw)
        .iter()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| XtfError::Format(format!("invalid numeric token '{token}'")))
        })
        .collect()
}

pub fn render_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Join items with `", "`, the canonical XTF list rendering.
pub fn join<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{item}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_newlines_and_trims() {
        assert_eq!(clean("  j0 \r\n"), "j0");
        assert_eq!(clean("\n\r"), "");
    }

    #[test]
    fn split_handles_blank_and_trailing_delimiters() {
        assert_eq!(split("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split("   \n"), Vec::<String>::new());
        assert_eq!(split("a, b,"), vec!["a", "b"]);
        assert_eq!(split("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn bool_tokens_follow_the_literal_convention() {
        assert_eq!(parse_bools("true, TRUE, 1, false, no"), vec![
            true, true, true, false, false
        ]);
    }

    #[test]
    fn numeric_lists_reject_bad_tokens() {
        assert_eq!(parse_doubles("0.5, 1.5").unwrap(), vec![0.5, 1.5]);
        assert_eq!(parse_doubles("").unwrap(), Vec::<f64>::new());
        assert!(parse_doubles("0.5, abc").is_err());
        assert_eq!(parse_integers("4, -2").unwrap(), vec![4, -2]);
        assert!(parse_integers("4, 1.5").is_err());
    }

    #[test]
    fn join_is_comma_space_separated() {
        assert_eq!(join([1, 2, 3].iter()), "1, 2, 3");
        assert_eq!(join(Vec::<i64>::new().iter()), "");
    }
}
