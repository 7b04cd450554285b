use crate::error::TranslateError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Translation engine selector
///
/// The wire protocol carries the engine as a plain string so that unknown
/// values reach the coordinator (which answers "Unknown translation engine")
/// instead of failing deserialization. Parse with [`Engine::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Google,
    Gemini,
}

impl Engine {
    /// Wire identifier ("google" / "gemini")
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Gemini => "gemini",
        }
    }

    /// Human-readable name used in error prefixes and logs
    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Google => "Google Translate",
            Engine::Gemini => "Gemini",
        }
    }
}

impl FromStr for Engine {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Engine::Google),
            "gemini" => Ok(Engine::Gemini),
            other => Err(TranslateError::UnknownEngine(other.to_string())),
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_engines() {
        assert_eq!("google".parse::<Engine>().unwrap(), Engine::Google);
        assert_eq!("gemini".parse::<Engine>().unwrap(), Engine::Gemini);
    }

    #[test]
    fn rejects_unknown_engine() {
        match "bing".parse::<Engine>() {
            Err(TranslateError::UnknownEngine(value)) => assert_eq!(value, "bing"),
            other => panic!("expected UnknownEngine, got {:?}", other),
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        // Stored preferences are written lowercase; anything else is unknown.
        assert!("Google".parse::<Engine>().is_err());
    }
}
