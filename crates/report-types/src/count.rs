//! Optional counter values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A counter captured from report text.
///
/// `Count(None)` means the value was not found, which is distinct from a
/// captured zero. Use [`Count::display`] to get the sentinel-defaulted form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Count(Option<u64>);

impl Count {
    pub const MISSING: Count = Count(None);

    pub fn new(value: u64) -> Self {
        Self(Some(value))
    }

    /// Parse captured text. Only a non-empty run of ASCII decimal digits
    /// (after trimming) yields a value; anything else is missing.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Self(None);
        }
        Self(text.parse().ok())
    }

    pub fn value(&self) -> Option<u64> {
        self.0
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Counter display with the `"0"` default for missing values
    pub fn display(&self) -> String {
        match self.0 {
            Some(v) => v.to_string(),
            None => crate::ZERO.to_string(),
        }
    }
}

impl From<u64> for Count {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Option<u64>> for Count {
    fn from(value: Option<u64>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(Count::parse("12"), Count::new(12));
        assert_eq!(Count::parse(" 7\n"), Count::new(7));
        assert_eq!(Count::parse("0"), Count::new(0));
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert!(Count::parse("N/A").is_missing());
        assert!(Count::parse("").is_missing());
        assert!(Count::parse("-3").is_missing());
        assert!(Count::parse("1,200").is_missing());
        assert!(Count::parse("١٢").is_missing());
    }

    #[test]
    fn test_parse_overflow_is_missing() {
        assert!(Count::parse("99999999999999999999999").is_missing());
    }

    #[test]
    fn test_display_defaults_to_zero() {
        assert_eq!(Count::MISSING.display(), "0");
        assert_eq!(Count::new(42).to_string(), "42");
    }

    #[test]
    fn test_serializes_as_nullable_number() {
        assert_eq!(serde_json::to_string(&Count::new(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Count::MISSING).unwrap(), "null");
    }

    proptest! {
        /// Property: decimal rendering of any u64 parses back to the same count
        #[test]
        fn parse_accepts_any_u64(n in any::<u64>()) {
            prop_assert_eq!(Count::parse(&n.to_string()), Count::new(n));
            prop_assert_eq!(Count::parse(&format!("  {}\n", n)), Count::new(n));
        }

        /// Property: text without any ASCII digit is always missing
        #[test]
        fn parse_without_digits_is_missing(text in "[^0-9]*") {
            prop_assert!(Count::parse(&text).is_missing());
        }
    }
}
