use std::fmt;

use serde::{Deserialize, Serialize};

/// Display languages supported by a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub const DEFAULT: Language = Language::Es;
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub const fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Exact match on the two supported codes.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Unsupported or missing codes resolve to [`Language::DEFAULT`].
    pub fn from_code_or_default(code: Option<&str>) -> Self {
        code.and_then(Self::parse).unwrap_or(Self::DEFAULT)
    }

    pub const fn toggle(self) -> Self {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
