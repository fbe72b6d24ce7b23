use std::fmt;

use serde::{Deserialize, Serialize};

/// Primary key of a row in the world store.
///
/// Tables in the store were created at different times and do not agree on
/// key types: some use integer sequences, others uuid or text keys. The id is
/// kept in whichever shape the store returned it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

macro_rules! define_slug {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Human-readable keys used by scripts and game content
define_slug!(LocationSlug);
define_slug!(NpcSlug);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_integer_and_text_keys() {
        let int: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(int, RecordId::Int(42));

        let text: RecordId =
            serde_json::from_str("\"3f1c0e4e-7d0a-4b7b-9a55-0c1f2e3d4b5a\"").unwrap();
        assert_eq!(
            text.to_string(),
            "3f1c0e4e-7d0a-4b7b-9a55-0c1f2e3d4b5a"
        );
        assert!(matches!(text, RecordId::Text(_)));
    }

    #[test]
    fn slug_serializes_as_plain_string() {
        let slug = NpcSlug::new("old_merchant");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"old_merchant\"");
    }
}
