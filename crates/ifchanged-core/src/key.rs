//! Validated content keys.

use std::fmt;

use thiserror::Error;

/// Reasons a raw identifier is rejected as a key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("key is empty")]
    Empty,

    #[error("key contains invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Identifier of one logical content stream.
///
/// A key is non-empty and made only of ASCII letters, digits, `-` and `_`,
/// which keeps it safe to embed in a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    /// Validates `raw` and wraps it as a key.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        if raw.is_empty() {
            return Err(KeyError::Empty);
        }

        if let Some((position, character)) =
            raw.chars().enumerate().find(|(_, c)| !is_key_char(*c))
        {
            return Err(KeyError::InvalidCharacter {
                character,
                position,
            });
        }

        Ok(Self(raw.to_string()))
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_alphanumeric() {
        let key = Key::parse("abc123").unwrap();
        assert_eq!(key.as_str(), "abc123");
    }

    #[test]
    fn test_valid_with_dash_and_underscore() {
        let key = Key::parse("abc-123_def").unwrap();
        assert_eq!(key.as_str(), "abc-123_def");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Key::parse(""), Err(KeyError::Empty));
    }

    #[test]
    fn test_symbol_rejected() {
        assert_eq!(
            Key::parse("abc@123"),
            Err(KeyError::InvalidCharacter {
                character: '@',
                position: 3
            })
        );
    }

    #[test]
    fn test_space_dot_and_slash_rejected() {
        assert!(Key::parse("abc 123").is_err());
        assert!(Key::parse("abc.123").is_err());
        assert!(Key::parse("abc/123").is_err());
        assert!(Key::parse("..").is_err());
    }

    #[test]
    fn test_lone_dash_and_underscore_accepted() {
        assert_eq!(Key::parse("-").unwrap().as_str(), "-");
        assert_eq!(Key::parse("_").unwrap().as_str(), "_");
    }

    #[test]
    fn test_non_ascii_rejected() {
        // Unicode letters and digits are outside the ASCII class.
        assert!(Key::parse("café").is_err());
        assert!(Key::parse("١٢٣").is_err());
    }

    #[test]
    fn test_every_ascii_char_classified() {
        for byte in 0u8..=127 {
            let c = byte as char;
            let raw = format!("k{}", c);
            let expected = c.is_ascii_alphanumeric() || c == '-' || c == '_';
            assert_eq!(Key::parse(&raw).is_ok(), expected, "char {:?}", c);
        }
    }

    #[test]
    fn test_invalid_position_counts_chars() {
        let err = Key::parse("ab!").unwrap_err();
        assert_eq!(
            err,
            KeyError::InvalidCharacter {
                character: '!',
                position: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "key contains invalid character '!' at position 2"
        );
    }

    #[test]
    fn test_display_matches_input() {
        let key = Key::parse("build-1").unwrap();
        assert_eq!(format!("{}", key), "build-1");
        assert!(Key::parse("bad key!").is_err());
    }
}
