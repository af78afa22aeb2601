//! Toxic field parsing.
//!
//! Toxic parameters are given on the command line as a flat
//! `key=value,key=value` string. Every value is an integer.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Toxic parameters keyed by field name.
pub type Fields = BTreeMap<String, i64>;

/// Parse a `key=value,key=value` string into typed fields.
///
/// Each pair is split on its first `=`. A repeated key keeps its last value.
pub fn parse_fields(raw: &str) -> Result<Fields> {
    let mut parsed = Fields::new();

    for pair in raw.split(',') {
        let (key, value) = pair
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, _)| !k.is_empty())
            .ok_or_else(|| Error::MalformedFields(raw.to_string()))?;

        let number = value.parse::<i64>().map_err(|_| Error::NonIntegerField {
            key: key.to_string(),
            value: value.to_string(),
        })?;

        if let Some(previous) = parsed.insert(key.to_string(), number) {
            debug!(field = key, previous, value = number, "Duplicate toxic field, keeping last value");
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_pairs() {
        let fields = parse_fields("latency=100,jitter=50").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["latency"], 100);
        assert_eq!(fields["jitter"], 50);
    }

    #[test]
    fn negative_values_are_accepted() {
        let fields = parse_fields("delay=-5").unwrap();
        assert_eq!(fields["delay"], -5);
    }

    #[test]
    fn value_may_contain_equals_sign() {
        // Split happens on the first '=', so the value "1=2" is not an integer.
        let err = parse_fields("rate=1=2").unwrap_err();
        assert!(matches!(err, Error::NonIntegerField { ref key, .. } if key == "rate"));
    }

    #[test]
    fn non_integer_value_is_rejected() {
        let err = parse_fields("latency=100,jitter=abc").unwrap_err();
        match err {
            Error::NonIntegerField { key, value } => {
                assert_eq!(key, "jitter");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_equals_is_rejected() {
        assert!(matches!(
            parse_fields("latency").unwrap_err(),
            Error::MalformedFields(_)
        ));
        assert!(matches!(
            parse_fields("latency=1,jitter").unwrap_err(),
            Error::MalformedFields(_)
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_fields("").unwrap_err(), Error::MalformedFields(_)));
        assert!(matches!(parse_fields("=5").unwrap_err(), Error::MalformedFields(_)));
    }

    #[test]
    fn last_duplicate_wins() {
        let fields = parse_fields("rate=10,rate=20").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["rate"], 20);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let fields = parse_fields(" latency = 100 , jitter=5").unwrap();
        assert_eq!(fields["latency"], 100);
        assert_eq!(fields["jitter"], 5);
    }
}
