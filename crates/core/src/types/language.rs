//! Interface language preference.

use serde::{Deserialize, Serialize};

/// Language the user prefers for catalog content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Amharic,
}

impl Language {
    /// Lowercase wire name (`english`, `amharic`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Amharic => "amharic",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Self::English),
            "amharic" => Ok(Self::Amharic),
            _ => Err(format!("invalid language: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_parse_and_display_agree() {
        for lang in [Language::English, Language::Amharic] {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
        }
        assert!("oromo".parse::<Language>().is_err());
    }
}
